/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use polyblock_core::{Camera, Mesh, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light that never fully leaves a visible face.
const AMBIENT: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Option<polyblock_core::Color>,
}

const BLANK: Cell = Cell {
    character: ' ',
    color: None,
};

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
    light_dir: Vector3<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
            light_dir: Vector3::new(0.4, 0.7, 1.0).normalize(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self {
            light_dir: self.light_dir,
            ..Self::new(width, height)
        };
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, camera: &Camera) {
        // Cull faces pointing away from the camera
        let normal = model_matrix.transform_vector(&triangle.vertices[0].normal);
        let anchor = model_matrix.transform_point(&triangle.vertices[0].position);
        if normal.dot(&(camera.position - anchor)) <= 0.0 {
            return;
        }

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *slot = projected,
                None => return, // Triangle is clipped
            }
        }

        let brightness = AMBIENT + (1.0 - AMBIENT) * normal.normalize().dot(&self.light_dir).max(0.0);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)],
            color: Some(triangle.color.scaled(brightness)),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Characters currently in row `y`, mainly for inspection in tests.
    pub fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .map(|c| c.character)
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<polyblock_core::Color> = None;
        for y in 0..self.height {
            writer.queue(MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if let Some(color) = cell.color {
                    if current != Some(color) {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        }))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use polyblock_core::{assemble_piece, Catalog, Style};

    #[test]
    fn test_barycentric_inside_and_outside() {
        let tri = ((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let (w0, w1, w2) = barycentric(tri.0, tri.1, tri.2, (2.0, 2.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        let (_, w1, w2) = barycentric(tri.0, tri.1, tri.2, (9.0, 9.0)).unwrap();
        assert!(w1 + w2 > 1.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_piece_lands_in_middle_of_screen() {
        let catalog = Catalog::builtin();
        let piece = assemble_piece(catalog.get("O").unwrap(), &Style::default());
        let mesh = Mesh::from_node(&piece);
        let camera = Camera::for_terminal(80, 40, 0.5);

        let mut renderer = AsciiRenderer::new(80, 40);
        renderer.render_mesh(&mesh, &Matrix4::identity(), &camera);

        let middle = renderer.row(20);
        assert!(middle.chars().nth(40).is_some_and(|c| c != ' '));
        assert!(renderer.row(0).trim().is_empty());

        renderer.clear();
        assert!(renderer.row(20).trim().is_empty());
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = AsciiRenderer::new(4, 3);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("    ").count(), 3);
    }
}
