//! wire3d core library - mesh loading, vertex pipeline and wireframe rasterization
//!
//! Data flows from [`obj::load`] into a [`Mesh`], through [`pipeline::transform`]
//! into the mesh's transformed-vertex cache, and from there into a
//! [`Framebuffer`] via [`raster::draw_model`].

pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod transform;

// Re-export commonly used types
pub use framebuffer::{Color, Framebuffer};
pub use geometry::{Bounds, Mesh, Polygon, PolygonVertex};
pub use obj::{LoadError, ParseErrorKind};
pub use projection::Camera;
pub use transform::ModelTransform;
