//! Terminal backend: crossterm event loop driving a meshview scene
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use meshview_core::{Command, Control, DragButton, Key, Scene};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Approximate pixel size of one terminal cell, so mouse drags feel like
/// they do in a windowed viewer.
const CELL_PIXELS: (f32, f32) = (8.0, 16.0);

/// Main application struct for terminal 3D rendering
pub struct TerminalApp<S: Scene> {
    scene: S,
    renderer: AsciiRenderer,
    running: bool,
    frame_time: Duration,
    drag: Option<(MouseButton, u16, u16)>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl<S: Scene> TerminalApp<S> {
    pub fn new(scene: S, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, target_fps, width, height))
    }

    /// Build the app for a fixed cell grid without querying the terminal.
    pub fn with_size(scene: S, target_fps: u32, width: u16, height: u16) -> Self {
        Self {
            scene,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            frame_time: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            drag: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        info!("entered terminal viewer");

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        info!("left terminal viewer");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event before drawing
            while self.running && event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                // Wake early for input instead of sleeping blindly
                event::poll(self.frame_time - elapsed)?;
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Translate one backend event into scene commands.
    pub fn handle_event(&mut self, event: Event) {
        let control = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.renderer.resize(width as usize, height as usize);
                Control::Continue
            }
            _ => Control::Continue,
        };
        if control == Control::Exit {
            self.running = false;
        }
    }

    fn handle_key(&mut self, event: KeyEvent) -> Control {
        if event.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return self.scene.apply(Command::Exit);
        }
        match map_key(event.code) {
            Some(key) => self.scene.handle_key(key),
            None => Control::Continue,
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Control {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(button) => {
                self.drag = Some((button, column, row));
                Control::Continue
            }
            MouseEventKind::Up(_) => {
                self.drag = None;
                Control::Continue
            }
            MouseEventKind::Drag(button) => {
                let Some((_, last_column, last_row)) = self.drag else {
                    self.drag = Some((button, column, row));
                    return Control::Continue;
                };
                self.drag = Some((button, column, row));
                let Some(button) = map_button(button) else {
                    return Control::Continue;
                };
                let dx = (f32::from(column) - f32::from(last_column)) * CELL_PIXELS.0;
                let dy = (f32::from(row) - f32::from(last_row)) * CELL_PIXELS.1;
                self.scene.apply(Command::Drag { button, dx, dy })
            }
            MouseEventKind::ScrollUp => self.scene.handle_key(Key::ScrollUp),
            MouseEventKind::ScrollDown => self.scene.handle_key(Key::ScrollDown),
            _ => Control::Continue,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = (self.renderer.width(), self.renderer.height());
        let camera = self
            .renderer
            .camera_for(self.scene.camera(width as u32, height as u32));

        // Clear renderer
        self.renderer.clear();

        self.renderer.render_frame(&self.scene.frame(), &camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = format!("meshview | FPS: {:.1} | {}", self.fps, self.scene.status());
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(truncate(&status, width)),
            ResetColor
        )?;
        if height > 1 {
            queue!(
                stdout,
                cursor::MoveTo(0, (height - 1) as u16),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::DarkYellow),
                Print(truncate(self.scene.controls(), width)),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

/// Map crossterm keys onto the backend-neutral [`Key`].
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

fn map_button(button: MouseButton) -> Option<DragButton> {
    match button {
        MouseButton::Left => Some(DragButton::Primary),
        MouseButton::Right => Some(DragButton::Secondary),
        MouseButton::Middle => None,
    }
}

fn truncate(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_core::{parse_obj, CubeScene, MeshConfig, MeshScene};

    fn mesh_app() -> TerminalApp<MeshScene> {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
            .unwrap()
            .into_centered();
        TerminalApp::with_size(MeshScene::new(&mesh, MeshConfig::default()), 30, 80, 24)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_stops_the_loop() {
        let mut app = TerminalApp::with_size(CubeScene::default(), 30, 80, 24);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.running);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = TerminalApp::with_size(CubeScene::default(), 30, 80, 24);
        let before = app.scene().cube().clone();
        app.handle_event(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Release,
        )));
        app.handle_event(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        )));
        assert!(app.running);
        assert_eq!(app.scene().cube(), &before);
    }

    #[test]
    fn test_drag_converts_cells_to_pixels() {
        let mut app = mesh_app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 11));

        // 2 columns * 8px and 1 row * 16px, at 0.5 degrees per pixel
        let state = app.scene().state();
        assert_eq!(state.rot_y, 8.0);
        assert_eq!(state.rot_x, 8.0);
        assert!(app.running);
    }

    #[test]
    fn test_drag_without_press_only_records_position() {
        let mut app = mesh_app();
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 5));
        assert_eq!(app.scene().state().rot_x, 0.0);
        assert_eq!(app.scene().state().rot_y, 0.0);
        assert_eq!(app.drag, Some((MouseButton::Left, 40, 5)));

        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 41, 5));
        assert_eq!(app.scene().state().rot_y, 4.0);
    }

    #[test]
    fn test_release_clears_stale_drag() {
        let mut app = mesh_app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 10));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Right), 10, 10));
        assert_eq!(app.drag, None);

        let before = app.scene().state().translation;
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Right), 30, 20));
        assert_eq!(app.scene().state().translation, before);
    }

    #[test]
    fn test_middle_drag_is_ignored() {
        let mut app = mesh_app();
        let before = *app.scene().state();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Middle), 0, 0));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Middle), 5, 5));
        assert_eq!(app.scene().state(), &before);
    }

    #[test]
    fn test_scroll_and_resize() {
        let mut app = mesh_app();
        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0));
        assert!((app.scene().state().scale - 1.1).abs() < 1e-6);

        app.handle_event(Event::Resize(40, 12));
        assert_eq!((app.renderer.width(), app.renderer.height()), (40, 12));
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Char('w')), Some(Key::Char('w')));
        assert_eq!(map_key(KeyCode::Esc), Some(Key::Esc));
        assert_eq!(map_key(KeyCode::F(1)), None);
    }

    #[test]
    fn test_map_button() {
        assert_eq!(map_button(MouseButton::Left), Some(DragButton::Primary));
        assert_eq!(map_button(MouseButton::Right), Some(DragButton::Secondary));
        assert_eq!(map_button(MouseButton::Middle), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
