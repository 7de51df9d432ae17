/// Camera, projection and viewport matrices
use nalgebra::{Matrix4, Point3, Vector3};

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target`, other parameters default
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            eye,
            target,
            ..Self::default()
        }
    }

    /// Look-at view matrix.
    ///
    /// The camera basis is `z = normalize(eye - target)`, `x = normalize(up × z)`
    /// and `y = up` as given, without re-orthogonalizing against `z`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = self.eye.coords;
        let z = (eye - self.target.coords).normalize();
        let x = self.up.cross(&z).normalize();
        let y = self.up;

        Matrix4::new(
            x.x, x.y, x.z, -x.dot(&eye),
            y.x, y.y, y.z, -y.dot(&eye),
            z.x, z.y, z.z, -z.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Symmetric-frustum perspective projection, right-handed, depth in `[0, 1]`
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        perspective(self.fov, aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4,
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Perspective projection. Clip-space w is the negated camera-space z, so a
/// point in front of the camera ends up with positive w.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let tan_half_fov = (fov / 2.0).tan();
    let m11 = 1.0 / (aspect * tan_half_fov);
    let m22 = 1.0 / tan_half_fov;
    let m33 = far / (near - far);
    let m34 = near * far / (near - far);

    Matrix4::new(
        m11, 0.0, 0.0, 0.0,
        0.0, m22, 0.0, 0.0,
        0.0, 0.0, m33, m34,
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Map normalized device coordinates onto a `width × height` pixel grid whose
/// top-left corner sits at `(x_min, y_min)`. Screen y grows downward.
pub fn viewport(width: f32, height: f32, x_min: f32, y_min: f32) -> Matrix4<f32> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    Matrix4::new(
        half_w, 0.0, 0.0, x_min + half_w,
        0.0, -half_h, 0.0, y_min + half_h,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = Camera::new(Point3::new(3.0, 2.0, 7.0), Point3::new(0.0, 0.0, 0.0));
        let view = camera.view_matrix();

        let eye = view * camera.eye.to_homogeneous();
        assert_relative_eq!(eye, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-5);

        let target = view * camera.target.to_homogeneous();
        let distance = (camera.eye - camera.target).norm();
        assert_relative_eq!(target.z, -distance, epsilon = 1e-4);
    }

    #[test]
    fn test_view_matrix_axis_aligned() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        let expected = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(view, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_layout() {
        let m = perspective(std::f32::consts::FRAC_PI_2, 2.0, 1.0, 101.0);
        assert_relative_eq!(m[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(m[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(m[(2, 2)], -101.0 / 100.0, epsilon = 1e-6);
        assert_relative_eq!(m[(2, 3)], -101.0 / 100.0, epsilon = 1e-6);
        assert_eq!(m[(3, 2)], -1.0);
        assert_eq!(m[(3, 3)], 0.0);
    }

    #[test]
    fn test_near_and_far_depth() {
        let m = perspective(1.0, 1.0, 1.0, 10.0);

        let near = m * Vector4::new(0.0, 0.0, -1.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-6);

        let far = m * Vector4::new(0.0, 0.0, -10.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_viewport_flips_y() {
        let m = viewport(800.0, 600.0, 0.0, 0.0);

        let top_left = m * Vector4::new(-1.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(top_left, Vector4::new(0.0, 0.0, 0.0, 1.0));

        let bottom_right = m * Vector4::new(1.0, -1.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right, Vector4::new(800.0, 600.0, 0.0, 1.0));
    }

    #[test]
    fn test_viewport_offset() {
        let m = viewport(100.0, 50.0, 10.0, 20.0);
        let center = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(center, Vector4::new(60.0, 45.0, 0.0, 1.0));
    }
}
