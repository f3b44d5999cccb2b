//! meshview - terminal viewer for a wireframe cube or a lit OBJ mesh
//!
//! Controls are listed along the bottom of the screen; Esc or Ctrl-C quits.
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Error, WrapErr};
use meshview_core::{load_obj, CubeConfig, CubeScene, MeshConfig, MeshScene, Scene};
use meshview_terminal::TerminalApp;
use nalgebra::Point3;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive 3D viewers for the terminal
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    viewer: Viewer,

    /// Write logs here instead of stderr (stderr is hidden while viewing)
    #[arg(long, global = true, env = "MESHVIEW_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, global = true, default_value_t = 30)]
    fps: u32,
}

#[derive(Debug, Subcommand)]
enum Viewer {
    /// Wireframe cube with transforms baked into its vertices
    Cube {
        /// Edge length of the cube
        #[arg(long, default_value_t = 60.0)]
        side: f32,

        /// Distance moved per arrow or depth key
        #[arg(long, default_value_t = 10.0)]
        step: f32,

        /// Radians per rotation key
        #[arg(long, default_value_t = 0.1)]
        rotate_step: f32,
    },
    /// Lit Wavefront OBJ mesh
    View {
        /// Path to the .obj file
        path: PathBuf,

        /// Initial distance from the eye to the model
        #[arg(long, default_value_t = 105.0)]
        distance: f32,

        /// Degrees per rotation key
        #[arg(long, default_value_t = 5.0)]
        rotate_step: f32,

        /// Distance moved per translation key
        #[arg(long, default_value_t = 2.0)]
        move_step: f32,
    },
}

impl Args {
    fn run(self) -> Result<(), Error> {
        match self.viewer {
            Viewer::Cube {
                side,
                step,
                rotate_step,
            } => {
                let config = CubeConfig {
                    center: Point3::origin(),
                    side_length: side,
                    move_step: step,
                    rotate_step,
                    ..CubeConfig::default()
                };
                run_scene(CubeScene::new(config), self.fps)
            }
            Viewer::View {
                path,
                distance,
                rotate_step,
                move_step,
            } => {
                println!("Loading OBJ file: {}", path.display());
                let mesh = load_obj(&path)
                    .wrap_err_with(|| format!("cannot show {}", path.display()))?;
                println!(
                    "Loaded {} vertices, {} faces",
                    mesh.vertices.len(),
                    mesh.faces.len()
                );

                let config = MeshConfig {
                    distance,
                    rotate_step,
                    move_step,
                    ..MeshConfig::default()
                };
                run_scene(MeshScene::new(&mesh, config), self.fps)
            }
        }
    }
}

fn run_scene<S: Scene>(scene: S, fps: u32) -> Result<(), Error> {
    let mut app = TerminalApp::new(scene, fps)?;
    app.run()?;
    info!("viewer closed");
    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), Error> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;
    args.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_view_requires_path() {
        assert!(Args::try_parse_from(["meshview", "view"]).is_err());
        let args =
            Args::try_parse_from(["meshview", "view", "teapot.obj", "--distance", "50"]).unwrap();
        match args.viewer {
            Viewer::View { path, distance, .. } => {
                assert_eq!(path, PathBuf::from("teapot.obj"));
                assert_eq!(distance, 50.0);
            }
            other => panic!("unexpected viewer {other:?}"),
        }
    }

    #[test]
    fn test_cube_defaults() {
        let args = Args::try_parse_from(["meshview", "cube"]).unwrap();
        assert_eq!(args.fps, 30);
        assert!(matches!(args.viewer, Viewer::Cube { side, .. } if side == 60.0));
    }
}
