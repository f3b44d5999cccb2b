//! Key bindings for the cube and mesh viewers
use std::collections::HashMap;

use crate::command::{Command, Direction};
use crate::config::{CubeConfig, MeshConfig};
use crate::polyhedron::Axis;

/// Backend-neutral key. The mouse wheel is treated as a pair of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Esc,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<Key, Command>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: Key, command: Command) -> &mut Self {
        self.bindings.insert(key, command);
        self
    }

    fn bind_chars(&mut self, chars: &str, command: Command) -> &mut Self {
        for c in chars.chars() {
            self.bind(Key::Char(c), command);
        }
        self
    }

    pub fn lookup(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key).copied()
    }

    /// w/s, a/d, q/e rotate about X, Y, Z; arrows move in the plane; z/x
    /// move in depth; +/- scale; space resets; Esc quits.
    pub fn cube(config: &CubeConfig) -> Self {
        let r = config.rotate_step;
        let s = config.scale_step;
        let mut keymap = Self::new();
        keymap
            .bind(Key::Esc, Command::Exit)
            .bind_chars("wW", Command::Rotate { axis: Axis::X, delta: r })
            .bind_chars("sS", Command::Rotate { axis: Axis::X, delta: -r })
            .bind_chars("aA", Command::Rotate { axis: Axis::Y, delta: r })
            .bind_chars("dD", Command::Rotate { axis: Axis::Y, delta: -r })
            .bind_chars("qQ", Command::Rotate { axis: Axis::Z, delta: r })
            .bind_chars("eE", Command::Rotate { axis: Axis::Z, delta: -r })
            .bind_chars("zZ", Command::Move(Direction::Away))
            .bind_chars("xX", Command::Move(Direction::Toward))
            .bind_chars("+=", Command::Scale(s))
            .bind_chars("-_", Command::Scale(-s))
            .bind_chars(" ", Command::Reset)
            .bind(Key::Up, Command::Move(Direction::Up))
            .bind(Key::Down, Command::Move(Direction::Down))
            .bind(Key::Left, Command::Move(Direction::Left))
            .bind(Key::Right, Command::Move(Direction::Right))
            .bind(Key::ScrollUp, Command::Scale(s))
            .bind(Key::ScrollDown, Command::Scale(-s));
        keymap
    }

    /// a/d, w/s, z/x rotate about Y, X, Z; j/l, i/k, u/o translate; +/-
    /// scale; f/m pick the lighting mode; 1-3 toggle lights.
    pub fn mesh(config: &MeshConfig) -> Self {
        let r = config.rotate_step;
        let s = config.scale_step;
        let mut keymap = Self::new();
        keymap
            .bind(Key::Esc, Command::Exit)
            .bind_chars("a", Command::Rotate { axis: Axis::Y, delta: -r })
            .bind_chars("d", Command::Rotate { axis: Axis::Y, delta: r })
            .bind_chars("w", Command::Rotate { axis: Axis::X, delta: -r })
            .bind_chars("s", Command::Rotate { axis: Axis::X, delta: r })
            .bind_chars("z", Command::Rotate { axis: Axis::Z, delta: -r })
            .bind_chars("x", Command::Rotate { axis: Axis::Z, delta: r })
            .bind_chars("+", Command::Scale(s))
            .bind_chars("-", Command::Scale(-s))
            .bind_chars("j", Command::Move(Direction::Left))
            .bind_chars("l", Command::Move(Direction::Right))
            .bind_chars("i", Command::Move(Direction::Up))
            .bind_chars("k", Command::Move(Direction::Down))
            .bind_chars("u", Command::Move(Direction::Toward))
            .bind_chars("o", Command::Move(Direction::Away))
            .bind_chars("f", Command::LightsFollowModel(false))
            .bind_chars("m", Command::LightsFollowModel(true))
            .bind_chars("1", Command::ToggleLight(0))
            .bind_chars("2", Command::ToggleLight(1))
            .bind_chars("3", Command::ToggleLight(2))
            .bind_chars(" ", Command::Reset)
            .bind(Key::ScrollUp, Command::Scale(s))
            .bind(Key::ScrollDown, Command::Scale(-s));
        keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bindings() {
        let keymap = Keymap::cube(&CubeConfig::default());
        assert_eq!(keymap.lookup(Key::Esc), Some(Command::Exit));
        assert_eq!(
            keymap.lookup(Key::Char('W')),
            Some(Command::Rotate { axis: Axis::X, delta: 0.1 })
        );
        assert_eq!(keymap.lookup(Key::Char('_')), Some(Command::Scale(-0.1)));
        assert_eq!(keymap.lookup(Key::Char('z')), Some(Command::Move(Direction::Away)));
        assert_eq!(keymap.lookup(Key::Char('m')), None);
    }

    #[test]
    fn test_mesh_bindings() {
        let keymap = Keymap::mesh(&MeshConfig::default());
        assert_eq!(
            keymap.lookup(Key::Char('a')),
            Some(Command::Rotate { axis: Axis::Y, delta: -5.0 })
        );
        assert_eq!(keymap.lookup(Key::Char('3')), Some(Command::ToggleLight(2)));
        assert_eq!(keymap.lookup(Key::Char('u')), Some(Command::Move(Direction::Toward)));
        assert_eq!(keymap.lookup(Key::Up), None);
    }
}
