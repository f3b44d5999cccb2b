//! meshview core library: geometry, OBJ loading and transform logic
//!
//! Two pipelines live here. A procedurally generated cube whose transforms
//! are baked into its vertices, and an OBJ mesh that is parsed, fan
//! triangulated and centered once, then shown through a per-frame
//! transform. Both end in a list of [`DrawCommand`]s that any backend can
//! rasterize.

pub mod bounds;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod keymap;
pub mod lighting;
pub mod obj;
pub mod polyhedron;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use bounds::BoundingBox;
pub use command::{Command, Control, Direction, DragButton};
pub use config::{CubeConfig, MeshConfig};
pub use error::{ObjError, ObjResult};
pub use geometry::{Corner, Face, Mesh, TexCoord};
pub use keymap::{Key, Keymap};
pub use lighting::{Lighting, LightingMode, Shading};
pub use obj::{load_obj, parse_obj, ParsedObj};
pub use polyhedron::{Axis, Edge, Polyhedron};
pub use projection::Camera;
pub use render::{render_mesh, render_polyhedron, DrawCommand, Frame, MeshDrawList};
pub use scene::{CubeScene, MeshScene, Scene};
pub use transform::{Transform, TransformState, MIN_SCALE};
