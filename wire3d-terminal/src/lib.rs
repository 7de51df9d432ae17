/// Terminal wireframe viewer: owns the framebuffer and maps keys onto the model
use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::Duration;
use wire3d_core::{obj, pipeline, raster, Camera, Framebuffer, Mesh};

pub mod config;
pub mod renderer;

pub use config::ViewerConfig;

/// Reset a freshly built mesh for display: cache sized, geometry normalized,
/// default transform
pub fn prepare(mut mesh: Mesh) -> Mesh {
    mesh.initialize();
    mesh.normalize();
    mesh.reset_transform();
    mesh
}

/// Load and prepare an OBJ file
pub fn load_model(path: &Path) -> anyhow::Result<Mesh> {
    let mesh = obj::load(path).with_context(|| format!("could not load {}", path.display()))?;
    log::info!(
        "loaded {}: {} vertices, {} polygons",
        path.display(),
        mesh.vertices.len(),
        mesh.polygons.len()
    );
    Ok(prepare(mesh))
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    mesh: Option<Mesh>,
    camera: Camera,
    config: ViewerConfig,
    buffer: Framebuffer,
    running: bool,
    dirty: bool,
    /// Cell of the last left-button press or drag
    drag_from: Option<(u16, u16)>,
}

impl TerminalApp {
    pub fn new(mesh: Option<Mesh>, config: ViewerConfig) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_size(mesh, config, columns, rows))
    }

    /// Viewer for a `columns × rows` cell grid
    pub fn with_size(mesh: Option<Mesh>, config: ViewerConfig, columns: u16, rows: u16) -> Self {
        Self {
            mesh,
            camera: Camera::default(),
            config,
            buffer: Framebuffer::new(columns as usize, renderer::buffer_height(rows)),
            running: true,
            dirty: true,
            drag_from: None,
        }
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn buffer(&self) -> &Framebuffer {
        &self.buffer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                self.render_frame();
                self.present()?;
                self.dirty = false;
            }

            if event::poll(Duration::from_millis(250))? {
                self.handle_event(event::read()?);
            }
        }

        Ok(())
    }

    /// Apply one terminal event; state changes mark the frame for redraw
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    self.running = false;
                } else {
                    self.dirty |= self.apply_key(code);
                }
            }
            Event::Mouse(mouse) => self.dirty |= self.apply_mouse(mouse),
            Event::Resize(columns, rows) => {
                log::debug!("resized to {}x{} cells", columns, rows);
                self.buffer
                    .resize(columns as usize, renderer::buffer_height(rows));
                self.dirty = true;
            }
            _ => {}
        }
    }

    /// Returns whether the key changed anything visible
    fn apply_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Esc {
            self.running = false;
            return false;
        }

        let Some(mesh) = self.mesh.as_mut() else {
            return false;
        };
        let ViewerConfig {
            translate_step: t,
            scale_step,
            min_scale,
            rotate_step: r,
            ..
        } = self.config;
        let transform = &mut mesh.transform;

        match code {
            KeyCode::Left => transform.translate(-t, 0.0, 0.0),
            KeyCode::Right => transform.translate(t, 0.0, 0.0),
            KeyCode::Up => transform.translate(0.0, t, 0.0),
            KeyCode::Down => transform.translate(0.0, -t, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => transform.rescale(scale_step, min_scale),
            KeyCode::Char('-') => transform.rescale(-scale_step, min_scale),
            KeyCode::Char('w') => transform.rotate(r, 0.0, 0.0),
            KeyCode::Char('s') => transform.rotate(-r, 0.0, 0.0),
            KeyCode::Char('a') => transform.rotate(0.0, -r, 0.0),
            KeyCode::Char('d') => transform.rotate(0.0, r, 0.0),
            KeyCode::Char('q') => transform.rotate(0.0, 0.0, r),
            KeyCode::Char('e') => transform.rotate(0.0, 0.0, -r),
            KeyCode::Char('r') => mesh.reset_transform(),
            KeyCode::Char('c') => self.mesh = None,
            _ => return false,
        }
        true
    }

    /// Left drag rotates about X and Y (Shift: about Z), the wheel zooms.
    /// Returns whether the model changed.
    fn apply_mouse(&mut self, mouse: MouseEvent) -> bool {
        let position = (mouse.column, mouse.row);
        let config = &self.config;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_from = Some(position);
                false
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_from = None;
                false
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(from) = self.drag_from.replace(position) else {
                    return false;
                };
                let Some(mesh) = self.mesh.as_mut() else {
                    return false;
                };
                // Framebuffer pixels: one per column, two per row
                let dx = (position.0 as f32 - from.0 as f32) * config.drag_sensitivity;
                let dy = (position.1 as f32 - from.1 as f32) * 2.0 * config.drag_sensitivity;

                if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    mesh.transform.rotate(0.0, 0.0, dx);
                } else {
                    mesh.transform.rotate(dy, dx, 0.0);
                }
                true
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let Some(mesh) = self.mesh.as_mut() else {
                    return false;
                };
                let step = if mouse.kind == MouseEventKind::ScrollUp {
                    config.wheel_step
                } else {
                    -config.wheel_step
                };
                mesh.transform.rescale(step, config.wheel_min_scale);
                true
            }
            _ => false,
        }
    }

    /// Clear, transform and draw into the framebuffer
    pub fn render_frame(&mut self) {
        raster::clear(&mut self.buffer, self.config.background);

        if let Some(mesh) = self.mesh.as_mut() {
            let (width, height) = (self.buffer.width() as u32, self.buffer.height() as u32);
            pipeline::transform(mesh, &self.camera, width, height);
            raster::draw_model(&mut self.buffer, mesh, self.config.foreground);
        }
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        renderer::draw(&self.buffer, &mut stdout)?;

        // Draw UI overlay
        let status = match &self.mesh {
            Some(mesh) => format!(
                "wire3d | {} vertices, {} polygons | Arrows=Move +/-=Scale WASDQE/Drag=Rotate Wheel=Zoom R=Reset C=Clear Esc=Quit",
                mesh.vertices.len(),
                mesh.polygons.len()
            ),
            None => "wire3d | no model | Esc=Quit".to_string(),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()
    }
}
