/// Wireframe rasterization into a `Framebuffer`
use nalgebra::Vector4;

use crate::framebuffer::{Color, Framebuffer};
use crate::geometry::Mesh;

/// Overwrite every pixel with `color`
pub fn clear(buffer: &mut Framebuffer, color: Color) {
    buffer.fill(color.to_argb());
}

/// Draw every polygon of `mesh` as a closed outline using its transformed-vertex cache.
///
/// Edges that reference a vertex outside the cache are skipped.
pub fn draw_model(buffer: &mut Framebuffer, mesh: &Mesh, color: Color) {
    let vertices = mesh.transformed();
    let argb = color.to_argb();
    let mut drawn = 0usize;
    let mut skipped = 0usize;

    for polygon in mesh.polygons.iter().filter(|p| p.len() >= 2) {
        for (a, b) in polygon.edges() {
            match (vertices.get(a), vertices.get(b)) {
                (Some(from), Some(to)) if line(buffer, from, to, argb) => drawn += 1,
                _ => skipped += 1,
            }
        }
    }

    log::trace!("drew {} edges, skipped {}", drawn, skipped);
}

/// Draw a single edge between two screen-space positions; z and w are ignored
pub fn draw_line(buffer: &mut Framebuffer, from: &Vector4<f32>, to: &Vector4<f32>, color: Color) {
    line(buffer, from, to, color.to_argb());
}

/// Rounded endpoints are clamped to this many pixels from the origin so the
/// stepping arithmetic below stays inside `i128`
const COORD_LIMIT: i64 = 1 << 61;

fn to_pixel(coord: f32) -> i64 {
    (coord.round() as i64).clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Returns `false` when an endpoint is not finite and nothing was stepped
fn line(buffer: &mut Framebuffer, from: &Vector4<f32>, to: &Vector4<f32>, argb: u32) -> bool {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return false;
    }

    bresenham(
        buffer,
        (to_pixel(from.x), to_pixel(from.y)),
        (to_pixel(to.x), to_pixel(to.y)),
        argb,
    );
    true
}

/// Integer Bresenham over the whole segment; only off-buffer writes are dropped.
///
/// The major axis advances by one pixel every step, and after `k` steps the minor
/// axis has advanced `ceil((2·k·minor_len − major_len) / (2·major_len))` pixels,
/// the same pixels the incremental error-term loop visits. Only the steps whose
/// major coordinate lies inside the buffer are walked, so a segment reaching far
/// off screen costs no more than one spanning the buffer.
fn bresenham(buffer: &mut Framebuffer, from: (i64, i64), to: (i64, i64), argb: u32) {
    let (x0, y0) = (from.0 as i128, from.1 as i128);
    let (x1, y1) = (to.0 as i128, to.1 as i128);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let x_major = dx >= dy;
    let (major_len, minor_len) = if x_major { (dx, dy) } else { (dy, dx) };
    let (major_start, major_dir, extent) = if x_major {
        (x0, sx, buffer.width())
    } else {
        (y0, sy, buffer.height())
    };

    let Some((first, last)) = steps_inside(major_start, major_dir, major_len, extent as i128)
    else {
        return;
    };

    for k in first..=last {
        let minor = if major_len == 0 {
            0
        } else {
            ceil_div(2 * k * minor_len - major_len, 2 * major_len)
        };
        let (x, y) = if x_major {
            (x0 + sx * k, y0 + sy * minor)
        } else {
            (x0 + sx * minor, y0 + sy * k)
        };
        // Endpoints are within ±2^61 and steps within 2^62, so this fits i64
        buffer.set(x as i64, y as i64, argb);
    }
}

/// Step range `first..=last` within `0..=len` whose coordinate `start + dir·k`
/// falls in `0..extent`
fn steps_inside(start: i128, dir: i128, len: i128, extent: i128) -> Option<(i128, i128)> {
    let (lo, hi) = if dir > 0 {
        (-start, extent - 1 - start)
    } else {
        (start - extent + 1, start)
    };
    let first = lo.max(0);
    let last = hi.min(len);
    (first <= last).then_some((first, last))
}

/// Ceiling division for a positive divisor
fn ceil_div(numerator: i128, divisor: i128) -> i128 {
    -(-numerator).div_euclid(divisor)
}
