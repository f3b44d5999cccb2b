//! ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use meshview_core::geometry::face_normal;
use meshview_core::lighting::{luminance, Rgb};
use meshview_core::{Camera, DrawCommand, Frame};
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

const WIREFRAME_GREY: f32 = 0.9;

/// A projected corner: screen x, screen y, depth and lit colour.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    color: Rgb,
}

/// ASCII renderer that turns draw commands into terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Rgb>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Rgb::zeros(); size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Rgb::zeros());
    }

    /// Character currently stored at a cell, for inspection.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Camera tuned for this grid, correcting for non-square cells.
    pub fn camera_for(&self, mut camera: Camera) -> Camera {
        camera.set_viewport(self.width as u32, self.height as u32);
        camera.aspect /= CELL_ASPECT;
        camera
    }

    pub fn render_frame(&mut self, frame: &Frame<'_>, camera: &Camera) {
        let model_view = camera.view_matrix() * frame.model;
        let mvp = camera.projection_matrix() * model_view;
        let normal_matrix: Matrix3<f32> = model_view.fixed_view::<3, 3>(0, 0).into_owned();

        for command in frame.commands.iter() {
            match command {
                DrawCommand::Line { from, to } => self.render_line(from, to, &mvp, camera),
                DrawCommand::Triangle { positions, normals } => self.render_triangle(
                    positions,
                    normals,
                    frame,
                    &model_view,
                    &normal_matrix,
                    &mvp,
                    camera,
                ),
            }
        }
    }

    fn project(
        &self,
        camera: &Camera,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
    ) -> Option<(f32, f32, f32)> {
        camera.project_with(mvp, point, self.width as u32, self.height as u32)
    }

    fn render_line(
        &mut self,
        from: &Point3<f32>,
        to: &Point3<f32>,
        mvp: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let (Some(a), Some(b)) = (self.project(camera, mvp, from), self.project(camera, mvp, to))
        else {
            return;
        };

        // DDA: one sample per cell along the longer axis
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            // nearer segments get denser characters
            let brightness = (1.0 - depth).clamp(0.0, 1.0) * 0.5 + 0.5;
            let color = Rgb::repeat(WIREFRAME_GREY * brightness);
            self.plot(x.floor() as i32, y.floor() as i32, depth, color);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_triangle(
        &mut self,
        positions: &[Point3<f32>; 3],
        normals: &[Option<Vector3<f32>>; 3],
        frame: &Frame<'_>,
        model_view: &Matrix4<f32>,
        normal_matrix: &Matrix3<f32>,
        mvp: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let eye = positions.map(|p| model_view.transform_point(&p));
        let flat_normal = face_normal(&eye[0], &eye[1], &eye[2]);

        let mut corners = [ScreenVertex {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            color: Rgb::zeros(),
        }; 3];
        for i in 0..3 {
            // Triangle is clipped
            let Some((x, y, depth)) = self.project(camera, mvp, &positions[i]) else {
                return;
            };
            let normal = normals[i]
                .and_then(|n| (normal_matrix * n).try_normalize(f32::EPSILON))
                .unwrap_or(flat_normal);
            let color = match &frame.shading {
                Some(shading) => shading.shade(&eye[i], &normal),
                None => {
                    let light_dir = Vector3::new(0.0, 0.0, 1.0);
                    Rgb::repeat(normal.dot(&light_dir).abs())
                }
            };
            corners[i] = ScreenVertex { x, y, depth, color };
        }

        self.rasterize_triangle(&corners);
    }

    fn rasterize_triangle(&mut self, corners: &[ScreenVertex; 3]) {
        let [v0, v1, v2] = *corners;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                    let color = v0.color * w0 + v1.color * w1 + v2.color * w2;
                    self.plot(x, y, depth, color);
                }
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = ramp_char(luminance(&color));
            self.color_buffer[idx] = color;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = to_terminal_color(&self.color_buffer[idx]);
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a ramp character; anything lit at all shows up as at least `.`.
fn ramp_char(brightness: f32) -> char {
    let top = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * top as f32).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, top)]
}

fn to_terminal_color(color: &Rgb) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
