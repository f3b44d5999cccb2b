//! Indexed mesh primitives produced by the OBJ parser
use nalgebra::{Point2, Point3, Vector3};

use crate::bounds::BoundingBox;

/// Texture coordinate; parsed and kept but never sampled.
pub type TexCoord = Point2<f32>;

/// A triangle of indices into the owning [`Mesh`].
///
/// Corners without a texture coordinate or normal carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub texcoords: [Option<usize>; 3],
    pub normals: [Option<usize>; 3],
}

impl Face {
    pub fn new(vertices: [usize; 3], normals: [Option<usize>; 3]) -> Self {
        Self {
            vertices,
            texcoords: [None; 3],
            normals,
        }
    }
}

/// One polygon corner as written in an `f` record, already zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// Triangulated, indexed mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<TexCoord>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a polygon as a triangle fan around its first corner.
    ///
    /// An N-gon yields N-2 faces `(c0, ci, ci+1)`. Non-convex or
    /// non-planar polygons come out wrong; there is no ear clipping.
    pub fn add_polygon(&mut self, corners: &[Corner]) -> usize {
        let Some((first, rest)) = corners.split_first() else {
            return 0;
        };
        let before = self.faces.len();
        for pair in rest.windows(2) {
            let (b, c) = (pair[0], pair[1]);
            self.faces.push(Face {
                vertices: [first.vertex, b.vertex, c.vertex],
                texcoords: [first.texcoord, b.texcoord, c.texcoord],
                normals: [first.normal, b.normal, c.normal],
            });
        }
        self.faces.len() - before
    }

    /// Shift every vertex so the box midpoint lands on the origin.
    ///
    /// Normals are directions and stay put. An empty box leaves the mesh
    /// untouched.
    pub fn center_in_place(&mut self, bounds: &BoundingBox) {
        let Some(center) = bounds.center() else {
            return;
        };
        let offset = center.coords;
        for vertex in &mut self.vertices {
            *vertex -= offset;
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }
}

/// Normal of the plane through three points, or zero for a degenerate triangle.
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    edge1
        .cross(&edge2)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}
