//! meshview web bindings: drive a mesh scene from JavaScript
//!
//! The page owns the canvas and the GPU; this crate only exposes the
//! geometry of the current frame as flat float arrays, built from the same
//! draw commands the terminal backend rasterizes.

use meshview_core::{
    parse_obj, Command, Control, DragButton, DrawCommand, Frame, Key, Mesh, MeshConfig, MeshScene,
    Scene,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebViewer {
    scene: MeshScene,
}

#[wasm_bindgen]
impl WebViewer {
    /// Start with an empty mesh; call [`WebViewer::load_obj`] next.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebViewer {
        WebViewer {
            scene: MeshScene::new(&Mesh::new(), MeshConfig::default()),
        }
    }

    /// Parse and center OBJ text, replacing the current mesh.
    #[wasm_bindgen(js_name = loadObj)]
    pub fn load_obj(&mut self, text: &str) -> Result<usize, JsValue> {
        let mesh = parse_obj(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .into_centered();
        self.scene.reload(&mesh);
        Ok(self.scene.draw_list().len())
    }

    /// Feed a `KeyboardEvent.key` value. Returns false once the viewer
    /// asked to exit.
    pub fn key(&mut self, name: &str) -> bool {
        match key_from_name(name) {
            Some(key) => self.scene.handle_key(key) == Control::Continue,
            None => true,
        }
    }

    /// Pointer drag in CSS pixels; `button` follows `MouseEvent.button`.
    pub fn drag(&mut self, button: u8, dx: f32, dy: f32) {
        let button = match button {
            0 => DragButton::Primary,
            2 => DragButton::Secondary,
            _ => return,
        };
        self.scene.apply(Command::Drag { button, dx, dy });
    }

    pub fn scroll(&mut self, up: bool) {
        let key = if up { Key::ScrollUp } else { Key::ScrollDown };
        self.scene.handle_key(key);
    }

    /// Model-space triangle corners, 9 floats per triangle.
    pub fn positions(&self) -> Vec<f32> {
        triangle_positions(&self.scene.frame())
    }

    /// Corner normals parallel to [`WebViewer::positions`]; corners
    /// without a normal get zeros.
    pub fn normals(&self) -> Vec<f32> {
        triangle_normals(&self.scene.frame())
    }

    /// Column-major 4x4 model matrix for this frame.
    #[wasm_bindgen(js_name = modelMatrix)]
    pub fn model_matrix(&self) -> Vec<f32> {
        self.scene.frame().model.as_slice().to_vec()
    }

    pub fn status(&self) -> String {
        self.scene.status()
    }
}

impl Default for WebViewer {
    fn default() -> Self {
        Self::new()
    }
}

fn key_from_name(name: &str) -> Option<Key> {
    match name {
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        "Escape" => Some(Key::Esc),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
    }
}

fn triangle_positions(frame: &Frame<'_>) -> Vec<f32> {
    let mut out = Vec::with_capacity(frame.commands.len() * 9);
    for command in frame.commands.iter() {
        if let DrawCommand::Triangle { positions, .. } = command {
            out.extend(positions.iter().flat_map(|p| [p.x, p.y, p.z]));
        }
    }
    out
}

fn triangle_normals(frame: &Frame<'_>) -> Vec<f32> {
    let mut out = Vec::with_capacity(frame.commands.len() * 9);
    for command in frame.commands.iter() {
        if let DrawCommand::Triangle { normals, .. } = command {
            out.extend(
                normals
                    .iter()
                    .flat_map(|n| n.map_or([0.0; 3], |n| [n.x, n.y, n.z])),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 2 0 0\nv 0 2 0\nvn 0 0 1\nf 1//1 2//1 3\n";

    #[test]
    fn test_load_and_export_buffers() {
        let mut viewer = WebViewer::new();
        assert_eq!(viewer.load_obj(TRIANGLE).ok(), Some(1));

        let positions = viewer.positions();
        assert_eq!(positions.len(), 9);
        // centered on the bounding box midpoint (1, 1, 0)
        assert_eq!(&positions[..3], &[-1.0, -1.0, 0.0]);

        let normals = viewer.normals();
        assert_eq!(&normals[..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&normals[6..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_keys_drive_model_matrix() {
        let mut viewer = WebViewer::new();
        let before = viewer.model_matrix();
        assert!(viewer.key("u"));
        assert_ne!(viewer.model_matrix(), before);
        assert_eq!(viewer.model_matrix().len(), 16);
        assert!(viewer.key("F5"));
        assert!(!viewer.key("Escape"));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_name("+"), Some(Key::Char('+')));
        assert_eq!(key_from_name("Shift"), None);
    }
}
