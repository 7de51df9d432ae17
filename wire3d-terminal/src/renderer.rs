/// Half-block presenter: two framebuffer rows per terminal row
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, Framebuffer};

const UPPER_HALF_BLOCK: char = '▀';

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Framebuffer height needed to fill `rows` terminal rows
pub fn buffer_height(rows: u16) -> usize {
    rows as usize * 2
}

/// Queue the whole buffer starting at the top-left cell. Each cell shows the
/// upper pixel as foreground and the lower pixel as background.
pub fn draw<W: Write>(buffer: &Framebuffer, writer: &mut W) -> std::io::Result<()> {
    let mut current: Option<(u32, u32)> = None;

    for row in 0..buffer.height() / 2 {
        writer.queue(cursor::MoveTo(0, row as u16))?;
        let top_y = (row * 2) as i64;

        for x in 0..buffer.width() as i64 {
            let top = buffer.get(x, top_y).unwrap_or_default();
            let bottom = buffer.get(x, top_y + 1).unwrap_or_default();

            if current != Some((top, bottom)) {
                writer.queue(SetForegroundColor(to_terminal(Color::from_argb(top))))?;
                writer.queue(SetBackgroundColor(to_terminal(Color::from_argb(bottom))))?;
                current = Some((top, bottom));
            }
            writer.queue(Print(UPPER_HALF_BLOCK))?;
        }
    }

    writer.queue(ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_emits_one_block_per_cell() {
        let mut buffer = Framebuffer::new(3, 4);
        buffer.fill(Color::BLACK.to_argb());
        buffer.set(1, 1, Color::WHITE.to_argb());

        let mut out = Vec::new();
        draw(&buffer, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(UPPER_HALF_BLOCK).count(), 6);
        // White lower half on the second cell of the first row
        assert!(text.contains("48;2;255;255;255"));
    }

    #[test]
    fn test_buffer_height() {
        assert_eq!(buffer_height(24), 48);
    }
}
