//! Backend-independent draw commands built from polyhedra and meshes
use std::borrow::Cow;

use nalgebra::{Matrix4, Point3, Vector3};
use tracing::{debug, warn};

use crate::geometry::Mesh;
use crate::lighting::{Lighting, Shading};
use crate::polyhedron::Polyhedron;
use crate::transform::TransformState;

/// A primitive in model space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point3<f32>,
        to: Point3<f32>,
    },
    Triangle {
        positions: [Point3<f32>; 3],
        normals: [Option<Vector3<f32>>; 3],
    },
}

/// What a backend draws for one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub model: Matrix4<f32>,
    pub commands: Cow<'a, [DrawCommand]>,
    /// `None` draws unlit (wireframes).
    pub shading: Option<Shading>,
}

/// Triangle list compiled once per loaded mesh and replayed every frame.
#[derive(Debug, Clone, Default)]
pub struct MeshDrawList {
    commands: Vec<DrawCommand>,
    skipped: usize,
}

impl MeshDrawList {
    /// Resolve face indices into positions and normals.
    ///
    /// A face referencing a vertex that does not exist is dropped as a
    /// whole. A bad normal index only strips that corner's normal.
    pub fn compile(mesh: &Mesh) -> Self {
        let mut commands = Vec::with_capacity(mesh.faces.len());
        let mut skipped = 0;

        'faces: for (face_index, face) in mesh.faces.iter().enumerate() {
            let mut positions = [Point3::origin(); 3];
            let mut normals = [None; 3];

            for corner in 0..3 {
                let vi = face.vertices[corner];
                let Some(position) = mesh.vertices.get(vi) else {
                    warn!(
                        face = face_index,
                        vertex = vi,
                        "invalid vertex index, skipping triangle"
                    );
                    skipped += 1;
                    continue 'faces;
                };
                positions[corner] = *position;

                if let Some(ni) = face.normals[corner] {
                    match mesh.normals.get(ni) {
                        Some(normal) => normals[corner] = Some(*normal),
                        None => warn!(face = face_index, normal = ni, "invalid normal index"),
                    }
                }
            }

            commands.push(DrawCommand::Triangle { positions, normals });
        }

        debug!(triangles = commands.len(), skipped, "compiled mesh draw list");
        Self { commands, skipped }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of faces left out because of bad vertex indices.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Edges as lines. The transforms already live in the vertices, so the
/// model matrix is the identity.
pub fn render_polyhedron(polyhedron: &Polyhedron) -> Frame<'static> {
    let commands: Vec<DrawCommand> = polyhedron
        .segments()
        .map(|(from, to)| DrawCommand::Line { from, to })
        .collect();
    Frame {
        model: Matrix4::identity(),
        commands: Cow::Owned(commands),
        shading: None,
    }
}

/// Replay a compiled mesh under the current transform and lights.
pub fn render_mesh<'a>(
    list: &'a MeshDrawList,
    state: &TransformState,
    lighting: &Lighting,
) -> Frame<'a> {
    Frame {
        model: state.model_matrix(),
        commands: Cow::Borrowed(list.commands()),
        shading: Some(lighting.shading(state)),
    }
}
