/// Viewer tuning: input step sizes and colors
use wire3d_core::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// World units per arrow key press
    pub translate_step: f32,
    pub scale_step: f32,
    pub min_scale: f32,
    /// Radians per rotation key press
    pub rotate_step: f32,
    /// Radians per framebuffer pixel of left-button drag
    pub drag_sensitivity: f32,
    pub wheel_step: f32,
    pub wheel_min_scale: f32,
    pub background: Color,
    pub foreground: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            translate_step: 0.2,
            scale_step: 0.1,
            min_scale: 0.01,
            rotate_step: 0.1,
            drag_sensitivity: 0.005,
            wheel_step: 0.1,
            wheel_min_scale: 0.05,
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }
}
