/// Indexed mesh geometry and its per-model transform state
use nalgebra::{Point3, Vector3, Vector4};

use crate::transform::ModelTransform;

/// One corner of a polygon, referencing the mesh vertex sets by zero-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonVertex {
    pub geometric: usize,
    pub texture: Option<usize>,
    pub normal: Option<usize>,
}

impl PolygonVertex {
    pub fn new(geometric: usize) -> Self {
        Self {
            geometric,
            texture: None,
            normal: None,
        }
    }
}

/// A closed loop of vertex records describing one face outline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub records: Vec<PolygonVertex>,
}

impl Polygon {
    pub fn new(records: Vec<PolygonVertex>) -> Self {
        Self { records }
    }

    /// Build a polygon from bare geometric indices
    pub fn from_indices(indices: &[usize]) -> Self {
        Self::new(indices.iter().copied().map(PolygonVertex::new).collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Geometric index pairs for every edge, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let count = self.records.len();
        (0..count).map(move |i| {
            (
                self.records[i].geometric,
                self.records[(i + 1) % count].geometric,
            )
        })
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    /// Bounding box of the xyz part of `vertices`, `None` when empty
    pub fn of(vertices: &[Vector4<f32>]) -> Option<Self> {
        let first = vertices.first()?;
        let start = Point3::new(first.x, first.y, first.z);
        let (min, max) = vertices.iter().fold((start, start), |(min, max), v| {
            (
                Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
                Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
            )
        });
        Some(Self { min, max })
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max()
    }
}

/// An indexed polygon mesh with its transform parameters and screen-space cache
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vector4<f32>>,
    pub texture_vertices: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub polygons: Vec<Polygon>,
    pub transform: ModelTransform,
    transformed: Vec<Vector4<f32>>,
    bounds: Option<Bounds>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the transformed-vertex cache to the geometric vertex count, zero-filled
    pub fn initialize(&mut self) {
        self.transformed = vec![Vector4::zeros(); self.vertices.len()];
    }

    /// Recenter and rescale so the bounding box sits on the origin with its
    /// largest side spanning exactly 2 units. The w component is untouched.
    pub fn normalize(&mut self) {
        let Some(bounds) = Bounds::of(&self.vertices) else {
            return;
        };

        let center = bounds.center();
        let max_dimension = bounds.max_dimension();
        let scale = if max_dimension > 0.0 {
            2.0 / max_dimension
        } else {
            1.0
        };
        log::debug!(
            "normalizing {} vertices: bounds {:?}..{:?}, scale {}",
            self.vertices.len(),
            bounds.min,
            bounds.max,
            scale
        );

        for v in &mut self.vertices {
            v.x = (v.x - center.x) * scale;
            v.y = (v.y - center.y) * scale;
            v.z = (v.z - center.z) * scale;
        }

        self.bounds = Some(Bounds {
            min: Point3::from((bounds.min - center) * scale),
            max: Point3::from((bounds.max - center) * scale),
        });
    }

    /// Bounding box recorded by the last `normalize` call
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Restore default scale, rotation and translation
    pub fn reset_transform(&mut self) {
        self.transform = ModelTransform::default();
    }

    /// Screen-space positions written by the last pipeline pass
    pub fn transformed(&self) -> &[Vector4<f32>] {
        &self.transformed
    }

    /// Source vertices and cache together, for the pipeline's parallel pass
    pub(crate) fn split_for_transform(&mut self) -> (&[Vector4<f32>], &mut [Vector4<f32>]) {
        (&self.vertices, &mut self.transformed)
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.vertices.push(Vector4::new(x, y, z, 1.0));
        self.vertices.len() - 1
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Create an indexed cube centered on the origin: 8 vertices, 6 quads
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.add_vertex(x, y, z);
        }

        // Back, front, bottom, top, left, right
        for face in &[
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [3, 7, 6, 2],
            [0, 4, 7, 3],
            [1, 2, 6, 5],
        ] {
            mesh.add_polygon(Polygon::from_indices(face));
        }

        mesh
    }
}
