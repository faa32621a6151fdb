/// Terminal viewer for procedurally assembled polycube pieces
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Matrix4;
use polyblock_core::{Camera, Catalog, Mesh, PieceStage, ProjectionMode, SpinController};
use rand::rngs::StdRng;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod error;
pub mod renderer;

pub use config::{Args, ViewerConfig};
pub use error::AppError;
pub use renderer::AsciiRenderer;

/// Approximate pixel size of a terminal cell, so mouse drags rotate at the
/// same rate as pointer drags elsewhere.
const CELL_PIXELS: (f32, f32) = (8.0, 16.0);

/// Pixels of drag produced by one arrow key press.
const KEY_DRAG: f32 = 12.0;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    stage: PieceStage,
    catalog: Catalog,
    spin: SpinController,
    rng: StdRng,
    camera: Camera,
    cell_aspect: f32,
    renderer: AsciiRenderer,
    drag_from: Option<(u16, u16)>,
    running: bool,
    target_fps: u32,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig, catalog: Catalog, rng: StdRng) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut camera = Camera::for_terminal(width, height, config.cell_aspect);
        if config.orthographic {
            camera.mode = ProjectionMode::Orthographic;
        }

        let mut app = Self {
            stage: PieceStage::new(config.style),
            catalog,
            spin: SpinController::new(config.spin),
            rng,
            camera,
            cell_aspect: config.cell_aspect,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            drag_from: None,
            running: true,
            target_fps: config.fps,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.new_piece();
        Ok(app)
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f32(1.0 / self.target_fps as f32);
        let mut previous = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            // Update
            self.update((frame_start - previous).as_secs_f32());
            previous = frame_start;

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
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

    fn new_piece(&mut self) {
        self.stage.generate_new_piece(&self.catalog, &mut self.rng);
        self.stage.set_orientation(self.spin.orientation());
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
                self.renderer.resize(width as usize, height as usize);
                let mode = self.camera.mode;
                self.camera = Camera::for_terminal(width, height, self.cell_aspect);
                self.camera.mode = mode;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('n') | KeyCode::Enter => self.new_piece(),
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.spin.toggle_pause();
            }
            KeyCode::Char('o') => {
                self.camera.mode = self.camera.mode.toggled();
            }
            KeyCode::Char('w') | KeyCode::Up => self.spin.drag(0.0, -KEY_DRAG),
            KeyCode::Char('s') | KeyCode::Down => self.spin.drag(0.0, KEY_DRAG),
            KeyCode::Char('a') | KeyCode::Left => self.spin.drag(-KEY_DRAG, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.spin.drag(KEY_DRAG, 0.0),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let at = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_from = Some(at),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((x, y)) = self.drag_from {
                    let dx = (at.0 as f32 - x as f32) * CELL_PIXELS.0;
                    let dy = (at.1 as f32 - y as f32) * CELL_PIXELS.1;
                    self.spin.drag(dx, dy);
                }
                self.drag_from = Some(at);
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_from = None,
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.spin.tick(dt);
        self.stage.set_orientation(self.spin.orientation());
    }

    fn render(&mut self) -> io::Result<()> {
        let mesh = Mesh::from_node(self.stage.scene().root());

        // Clear renderer
        self.renderer.clear();

        // Render mesh; the anchor already carries the rotation
        self.renderer.render_mesh(&mesh, &Matrix4::identity(), &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        format!(
            "Polyblock | piece: {} | {} | {:?} | FPS: {:.1} | Drag/WASD=Rotate N=New Space=Pause O=Projection Q=Quit",
            self.stage.current_piece_name().unwrap_or("-"),
            if self.spin.is_spinning() { "spinning" } else { "paused" },
            self.camera.mode,
            self.fps
        )
    }
}
