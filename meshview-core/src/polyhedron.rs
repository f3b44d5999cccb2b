//! Procedurally generated wireframe polyhedra and the in-place transform engine
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Pair of vertex indices drawn as one line segment.
pub type Edge = (usize, usize);

/// Coordinate axis used by [`Polyhedron::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Map an axis letter; anything other than x, y or z is `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            _ => None,
        }
    }
}

/// Edge list shared by every cube, indexing the vertex order of
/// [`Polyhedron::cube`].
pub const CUBE_EDGES: [Edge; 12] = [
    // base
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // top
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // columns
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Wireframe solid whose transforms are baked straight into its vertices.
///
/// `position` is the recorded centroid. Scaling and rotation pivot on it,
/// it is never recomputed from the vertex data.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    pub position: Point3<f32>,
    pub scale: Vector3<f32>,
    pub side_length: f32,
    pub vertices: Vec<Point3<f32>>,
    pub edges: Vec<Edge>,
}

impl Polyhedron {
    /// Cube of edge length `side_length` centered at `center`.
    ///
    /// Vertices 0..3 run counter-clockwise around the base (`z = -h`),
    /// vertices 4..7 sit directly above them.
    pub fn cube(center: Point3<f32>, side_length: f32) -> Self {
        let h = side_length / 2.0;
        let offset = center.coords;

        let vertices = [
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ]
        .into_iter()
        .map(|(x, y, z)| Point3::new(x, y, z) + offset)
        .collect();

        Self {
            position: center,
            scale: Vector3::new(1.0, 1.0, 1.0),
            side_length,
            vertices,
            edges: CUBE_EDGES.to_vec(),
        }
    }

    /// Mean of the current vertex positions.
    pub fn centroid(&self) -> Point3<f32> {
        if self.vertices.is_empty() {
            return self.position;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Move along a planar heading (radians from +X) plus a free depth offset.
    pub fn translate(&mut self, distance: f32, heading: f32, dz: f32) {
        let delta = Vector3::new(heading.cos() * distance, heading.sin() * distance, dz);
        self.position += delta;
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }

    /// Per-axis scale about the recorded centroid. Repeated calls compound.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        let factors = Vector3::new(sx, sy, sz);
        let pivot = self.position;
        for vertex in &mut self.vertices {
            *vertex = pivot + (*vertex - pivot).component_mul(&factors);
        }
        self.scale.component_mul_assign(&factors);
    }

    /// Right-handed rotation by `angle` radians about `axis` through the
    /// recorded centroid.
    pub fn rotate(&mut self, angle: f32, axis: Axis) {
        let (sin, cos) = angle.sin_cos();
        let pivot = self.position;
        for vertex in &mut self.vertices {
            let d = *vertex - pivot;
            let rotated = match axis {
                Axis::X => Vector3::new(d.x, d.y * cos - d.z * sin, d.y * sin + d.z * cos),
                Axis::Y => Vector3::new(d.x * cos + d.z * sin, d.y, -d.x * sin + d.z * cos),
                Axis::Z => Vector3::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos, d.z),
            };
            *vertex = pivot + rotated;
        }
    }

    /// Rotate about an axis named by letter. Unknown letters are ignored.
    pub fn rotate_named(&mut self, angle: f32, axis: char) {
        match Axis::from_char(axis) {
            Some(axis) => self.rotate(angle, axis),
            None => trace!(%axis, "ignoring rotation about unknown axis"),
        }
    }

    /// Endpoints of every edge, in edge order.
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.vertices[a], self.vertices[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn pairwise_distances(p: &Polyhedron) -> Vec<f32> {
        let mut out = Vec::new();
        for i in 0..p.vertices.len() {
            for j in i + 1..p.vertices.len() {
                out.push((p.vertices[i] - p.vertices[j]).norm());
            }
        }
        out
    }

    #[test]
    fn test_cube_vertex_order() {
        let cube = Polyhedron::cube(Point3::origin(), 2.0);
        assert_eq!(cube.vertices[0], Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(cube.vertices[1], Point3::new(1.0, -1.0, -1.0));
        assert_eq!(cube.vertices[2], Point3::new(1.0, 1.0, -1.0));
        assert_eq!(cube.vertices[3], Point3::new(-1.0, 1.0, -1.0));
        for i in 0..4 {
            let (base, top) = (cube.vertices[i], cube.vertices[i + 4]);
            assert_eq!((base.x, base.y), (top.x, top.y));
            assert_eq!(top.z, 1.0);
        }
        assert_eq!(cube.edges, CUBE_EDGES.to_vec());
    }

    #[test]
    fn test_cube_geometry() {
        let center = Point3::new(3.0, -7.0, 12.0);
        let side = 60.0;
        let cube = Polyhedron::cube(center, side);

        assert_relative_eq!(cube.centroid(), center, epsilon = 1e-4);
        assert_eq!(cube.position, center);
        for (a, b) in cube.segments() {
            assert_relative_eq!((a - b).norm(), side, epsilon = 1e-4);
        }
        let radius = side * 3.0_f32.sqrt() / 2.0;
        for vertex in &cube.vertices {
            assert_relative_eq!((vertex - center).norm(), radius, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_translate_uses_heading_and_depth() {
        let mut cube = Polyhedron::cube(Point3::origin(), 60.0);
        cube.translate(10.0, FRAC_PI_2, 0.0);
        assert_relative_eq!(cube.position, Point3::new(0.0, 10.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(cube.vertices[0], Point3::new(-30.0, -20.0, -30.0), epsilon = 1e-4);

        cube.translate(10.0, PI, -5.0);
        assert_relative_eq!(cube.position, Point3::new(-10.0, 10.0, -5.0), epsilon = 1e-5);
        assert_relative_eq!(cube.centroid(), cube.position, epsilon = 1e-4);
    }

    #[test]
    fn test_scale_compounds_about_recorded_centroid() {
        let mut cube = Polyhedron::cube(Point3::new(5.0, 5.0, 5.0), 2.0);
        cube.scale(1.1, 1.1, 1.1);
        cube.scale(1.1, 1.1, 1.1);
        assert_relative_eq!(cube.vertices[6], Point3::new(6.21, 6.21, 6.21), epsilon = 1e-4);
        assert_eq!(cube.position, Point3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(cube.scale, Vector3::new(1.21, 1.21, 1.21), epsilon = 1e-5);
    }

    #[test]
    fn test_scale_round_trip_restores_vertices() {
        let original = Polyhedron::cube(Point3::new(1.0, 2.0, 3.0), 60.0);
        for s in [0.5_f32, 0.9, 1.1, 3.0, -2.0] {
            let mut cube = original.clone();
            cube.scale(s, s, s);
            cube.scale(1.0 / s, 1.0 / s, 1.0 / s);
            for (got, want) in cube.vertices.iter().zip(&original.vertices) {
                assert_relative_eq!(*got, *want, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_non_uniform_scale_keeps_pivot() {
        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        cube.scale(2.0, 1.0, 0.5);
        assert_eq!(cube.vertices[6], Point3::new(2.0, 1.0, 0.5));
        assert_eq!(cube.position, Point3::origin());
    }

    #[test]
    fn test_rotate_is_isometry() {
        let original = Polyhedron::cube(Point3::new(10.0, -4.0, 2.0), 60.0);
        let before = pairwise_distances(&original);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for angle in [0.1_f32, -0.7, 2.5, 10.0] {
                let mut cube = original.clone();
                cube.rotate(angle, axis);
                for (a, b) in pairwise_distances(&cube).iter().zip(&before) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-3);
                }
                assert_relative_eq!(cube.centroid(), original.position, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_rotate_follows_right_hand_rule() {
        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        cube.rotate(FRAC_PI_2, Axis::Z);
        // (1,-1,-1) -> (1,1,-1)
        assert_relative_eq!(cube.vertices[1], Point3::new(1.0, 1.0, -1.0), epsilon = 1e-5);

        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        cube.rotate(FRAC_PI_2, Axis::X);
        // (1,1,-1) -> (1,1,1)
        assert_relative_eq!(cube.vertices[2], Point3::new(1.0, 1.0, 1.0), epsilon = 1e-5);

        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        cube.rotate(FRAC_PI_2, Axis::Y);
        // (1,-1,-1) -> (-1,-1,-1)
        assert_relative_eq!(cube.vertices[1], Point3::new(-1.0, -1.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_leaves_axis_coordinate_alone() {
        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        cube.rotate(0.3, Axis::Y);
        let original = Polyhedron::cube(Point3::origin(), 2.0);
        for (got, want) in cube.vertices.iter().zip(original.vertices) {
            assert_eq!(got.y, want.y);
        }
    }

    #[test]
    fn test_unknown_axis_is_ignored() {
        let mut cube = Polyhedron::cube(Point3::origin(), 2.0);
        let before = cube.clone();
        cube.rotate_named(1.0, 'w');
        assert_eq!(cube, before);

        cube.rotate_named(1.0, 'Z');
        assert_ne!(cube, before);
    }
}
