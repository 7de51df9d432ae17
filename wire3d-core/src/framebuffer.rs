/// Packed ARGB colors and a bounds-checked pixel buffer

/// An 8-bit-per-channel color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Pack as `0xAARRGGBB`
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

/// Row-major `width × height` buffer of packed ARGB pixels, origin at the top left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel. Returns `false` and writes nothing when `(x, y)` is off the buffer.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, argb: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = argb;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Raw contiguous view, `width * height` entries
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Change dimensions, discarding the current contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_packing() {
        let color = Color::new(0x80, 0x12, 0x34, 0x56);
        assert_eq!(color.to_argb(), 0x8012_3456);
        assert_eq!(Color::from_argb(0x8012_3456), color);
        assert_eq!(Color::WHITE.to_argb(), 0xFFFF_FFFF);
        assert_eq!(u32::from(Color::BLACK), 0xFF00_0000);
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut fb = Framebuffer::new(4, 3);
        assert!(fb.set(3, 2, 7));
        assert_eq!(fb.get(3, 2), Some(7));
        assert_eq!(fb.pixels()[2 * 4 + 3], 7);

        assert!(!fb.set(4, 0, 1));
        assert!(!fb.set(0, 3, 1));
        assert!(!fb.set(-1, 0, 1));
        assert_eq!(fb.get(-1, -1), None);
        assert_eq!(fb.pixels().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn test_resize() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(9);
        fb.resize(5, 1);
        assert_eq!((fb.width(), fb.height()), (5, 1));
        assert_eq!(fb.pixels(), &[0; 5]);
    }
}
