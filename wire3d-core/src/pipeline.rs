/// Model → view → projection → viewport pipeline over a mesh's geometric vertices
use nalgebra::{Matrix4, Vector4};
use rayon::prelude::*;

use crate::geometry::Mesh;
use crate::projection::{viewport, Camera};
use crate::transform::ModelTransform;

/// Compose the full vertex transform for one frame.
///
/// Vertices are column vectors here, so this is `viewport * projection * view * model`,
/// the same mapping as the row-vector product `model · view · projection · viewport`.
pub fn final_matrix(
    transform: &ModelTransform,
    camera: &Camera,
    width: f32,
    height: f32,
) -> Matrix4<f32> {
    let model = transform.matrix();
    let view = camera.view_matrix();
    let projection = camera.projection_matrix(width / height);
    let viewport = viewport(width, height, 0.0, 0.0);

    viewport * projection * view * model
}

/// Map one vertex through `matrix`, dividing by w only when w is past the near plane
#[inline]
pub fn project_vertex(matrix: &Matrix4<f32>, vertex: &Vector4<f32>, near: f32) -> Vector4<f32> {
    let v = matrix * vertex;
    if v.w > near {
        v / v.w
    } else {
        v
    }
}

/// Recompute `mesh`'s transformed-vertex cache for a `width × height` viewport.
///
/// Reads the mesh's transform parameters and the camera without modifying either.
/// A zero-sized viewport leaves the cache untouched.
pub fn transform(mesh: &mut Mesh, camera: &Camera, width: u32, height: u32) {
    if width == 0 || height == 0 {
        log::warn!("skipping transform for empty {}x{} viewport", width, height);
        return;
    }

    if mesh.transformed().len() != mesh.vertices.len() {
        log::debug!(
            "transformed cache holds {} entries for {} vertices, reinitializing",
            mesh.transformed().len(),
            mesh.vertices.len()
        );
        mesh.initialize();
    }

    let matrix = final_matrix(&mesh.transform, camera, width as f32, height as f32);
    log::trace!("final matrix: {}", matrix);

    let near = camera.near;
    let (source, cache) = mesh.split_for_transform();
    cache
        .par_iter_mut()
        .zip(source.par_iter())
        .for_each(|(out, vertex)| *out = project_vertex(&matrix, vertex, near));
}
