/// wire3d terminal viewer
///
/// Usage: wire3d-terminal [path/to/model.obj]
///
/// Without a path a cube is shown.
/// Controls:
///   - Arrow keys: Move the model
///   - +/-: Scale
///   - W/S, A/D, Q/E: Rotate around X, Y, Z
///   - Left drag: Rotate around X/Y (Shift: Z), Wheel: Scale
///   - R: Reset transform, C: Clear model
///   - ESC: Quit
use std::env;
use std::path::PathBuf;
use wire3d_core::Mesh;
use wire3d_terminal::{load_model, prepare, TerminalApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mesh = match env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_model(&path)?,
        None => {
            log::info!("no model given, showing the default cube");
            prepare(Mesh::cube(2.0))
        }
    };

    let mut app = TerminalApp::new(Some(mesh), ViewerConfig::default())?;
    app.run()?;
    Ok(())
}
