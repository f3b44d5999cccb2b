//! Viewer sessions: the state each event loop owns and mutates
use nalgebra::Vector3;
use tracing::{debug, info, trace};

use crate::command::{Command, Control, Direction, DragButton};
use crate::config::{CubeConfig, MeshConfig};
use crate::geometry::Mesh;
use crate::keymap::{Key, Keymap};
use crate::lighting::{Lighting, LightingMode};
use crate::polyhedron::{Axis, Polyhedron};
use crate::projection::Camera;
use crate::render::{render_mesh, render_polyhedron, Frame, MeshDrawList};
use crate::transform::TransformState;

/// Something a backend can drive with input and draw every frame.
///
/// All mutation goes through [`Scene::apply`] on the loop's thread, between
/// frames.
pub trait Scene {
    fn command_for(&self, key: Key) -> Option<Command>;

    fn apply(&mut self, command: Command) -> Control;

    fn frame(&self) -> Frame<'_>;

    fn camera(&self, width: u32, height: u32) -> Camera;

    /// One-line summary for a status bar.
    fn status(&self) -> String;

    fn controls(&self) -> &'static str;

    /// Look a key up and apply its command. Unbound keys do nothing.
    fn handle_key(&mut self, key: Key) -> Control {
        match self.command_for(key) {
            Some(command) => self.apply(command),
            None => Control::Continue,
        }
    }
}

/// Wireframe cube whose vertices are transformed in place.
#[derive(Debug, Clone)]
pub struct CubeScene {
    config: CubeConfig,
    keymap: Keymap,
    cube: Polyhedron,
}

impl CubeScene {
    pub fn new(config: CubeConfig) -> Self {
        let cube = Polyhedron::cube(config.center, config.side_length);
        Self {
            keymap: Keymap::cube(&config),
            config,
            cube,
        }
    }

    pub fn cube(&self) -> &Polyhedron {
        &self.cube
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}

impl Scene for CubeScene {
    fn command_for(&self, key: Key) -> Option<Command> {
        self.keymap.lookup(key)
    }

    fn apply(&mut self, command: Command) -> Control {
        debug!(?command, "cube command");
        match command {
            Command::Rotate { axis, delta } => self.cube.rotate(delta, axis),
            Command::Move(direction) => {
                let step = self.config.move_step;
                match (direction.heading(), direction) {
                    (Some(heading), _) => self.cube.translate(step, heading, 0.0),
                    (None, Direction::Toward) => self.cube.translate(0.0, 0.0, step),
                    (None, _) => self.cube.translate(0.0, 0.0, -step),
                }
            }
            Command::Scale(delta) => {
                let factor = 1.0 + delta;
                self.cube.scale(factor, factor, factor);
            }
            Command::Reset => {
                self.cube = Polyhedron::cube(self.config.center, self.config.side_length);
            }
            Command::Exit => return Control::Exit,
            Command::Drag { .. } | Command::ToggleLight(_) | Command::LightsFollowModel(_) => {
                trace!(?command, "not applicable to a wireframe");
            }
        }
        Control::Continue
    }

    fn frame(&self) -> Frame<'_> {
        render_polyhedron(&self.cube)
    }

    fn camera(&self, width: u32, height: u32) -> Camera {
        Camera::wireframe(width, height)
    }

    fn status(&self) -> String {
        let p = self.cube.position;
        let s = self.cube.scale;
        format!(
            "cube {:.0} | pos ({:.0}, {:.0}, {:.0}) | scale ({:.2}, {:.2}, {:.2})",
            self.cube.side_length, p.x, p.y, p.z, s.x, s.y, s.z
        )
    }

    fn controls(&self) -> &'static str {
        "WS/AD/QE=Rotate Arrows=Move Z/X=Depth +/-=Scale Space=Reset Esc=Quit"
    }
}

/// Loaded mesh shown through a per-frame transform; the mesh itself is
/// never modified.
#[derive(Debug, Clone)]
pub struct MeshScene {
    config: MeshConfig,
    keymap: Keymap,
    draw_list: MeshDrawList,
    initial: TransformState,
    state: TransformState,
    lighting: Lighting,
}

impl MeshScene {
    pub fn new(mesh: &Mesh, config: MeshConfig) -> Self {
        let initial = TransformState::new(Vector3::new(0.0, 0.0, -config.distance));
        Self {
            keymap: Keymap::mesh(&config),
            draw_list: MeshDrawList::compile(mesh),
            initial,
            state: initial,
            lighting: Lighting::three_point(),
            config,
        }
    }

    /// Swap in a freshly loaded mesh, keeping the current view.
    pub fn reload(&mut self, mesh: &Mesh) {
        self.draw_list = MeshDrawList::compile(mesh);
        info!(triangles = self.draw_list.len(), "mesh replaced");
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn draw_list(&self) -> &MeshDrawList {
        &self.draw_list
    }
}

impl Scene for MeshScene {
    fn command_for(&self, key: Key) -> Option<Command> {
        self.keymap.lookup(key)
    }

    fn apply(&mut self, command: Command) -> Control {
        debug!(?command, "mesh command");
        match command {
            Command::Rotate { axis, delta } => match axis {
                Axis::X => self.state.rotate(delta, 0.0, 0.0),
                Axis::Y => self.state.rotate(0.0, delta, 0.0),
                Axis::Z => self.state.rotate(0.0, 0.0, delta),
            },
            Command::Move(direction) => {
                let step = self.config.move_step;
                let delta = match direction {
                    Direction::Left => Vector3::new(-step, 0.0, 0.0),
                    Direction::Right => Vector3::new(step, 0.0, 0.0),
                    Direction::Up => Vector3::new(0.0, step, 0.0),
                    Direction::Down => Vector3::new(0.0, -step, 0.0),
                    Direction::Toward => Vector3::new(0.0, 0.0, step),
                    Direction::Away => Vector3::new(0.0, 0.0, -step),
                };
                self.state.translate(delta);
            }
            Command::Scale(delta) => self.state.scale_by(delta),
            Command::Drag { button, dx, dy } => match button {
                DragButton::Primary => {
                    let k = self.config.drag_rotate;
                    self.state.rotate(dy * k, dx * k, 0.0);
                }
                DragButton::Secondary => {
                    let k = self.config.drag_pan;
                    self.state.translate(Vector3::new(dx * k, -dy * k, 0.0));
                }
            },
            Command::ToggleLight(index) => match self.lighting.toggle(index) {
                Some(on) => info!(light = index + 1, on, "toggled light"),
                None => trace!(index, "no such light"),
            },
            Command::LightsFollowModel(follow) => {
                self.lighting.mode = if follow {
                    LightingMode::FollowsModel
                } else {
                    LightingMode::Fixed
                };
            }
            Command::Reset => self.state = self.initial,
            Command::Exit => return Control::Exit,
        }
        Control::Continue
    }

    fn frame(&self) -> Frame<'_> {
        render_mesh(&self.draw_list, &self.state, &self.lighting)
    }

    fn camera(&self, width: u32, height: u32) -> Camera {
        Camera::viewer(width, height)
    }

    fn status(&self) -> String {
        let s = &self.state;
        let t = s.translation;
        let lights: String = self
            .lighting
            .enabled
            .iter()
            .zip(["R", "G", "B"])
            .map(|(&on, name)| if on { name } else { "-" })
            .collect();
        let mode = match self.lighting.mode {
            LightingMode::Fixed => "fixed",
            LightingMode::FollowsModel => "follow",
        };
        format!(
            "{} tris | rot ({:.0}, {:.0}, {:.0}) | scale {:.1} | pos ({:.0}, {:.0}, {:.0}) | lights {} {}",
            self.draw_list.len(),
            s.rot_x,
            s.rot_y,
            s.rot_z,
            s.scale,
            t.x,
            t.y,
            t.z,
            lights,
            mode
        )
    }

    fn controls(&self) -> &'static str {
        "WS/AD/ZX=Rotate JL/IK/UO=Move +/-=Scale 1-3=Lights F/M=Light mode Space=Reset Esc=Quit"
    }
}
