/// Command line and TOML configuration for the terminal viewer
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use polyblock_core::notation::parse_piece;
use polyblock_core::{Catalog, CubeCoord, PieceDefinition, SpinSettings, Style};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Parser)]
#[command(name = "polyblock-terminal", version, about = "Spin procedurally built polycube pieces in the terminal")]
pub struct Args {
    /// TOML file with [style], [spin] and [[pieces]] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for piece selection (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frame rate
    #[arg(long)]
    pub fps: Option<u32>,

    /// Start with auto-spin paused
    #[arg(long)]
    pub no_spin: bool,

    /// Start with an orthographic camera
    #[arg(long)]
    pub orthographic: bool,

    /// Custom piece, e.g. "tee: 0,0 1,0 2,0 1,1" (repeatable, replaces the catalog)
    #[arg(short, long = "piece", value_name = "NOTATION")]
    pub pieces: Vec<String>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PieceConfig {
    pub name: String,
    /// `[x, z, h]` triples
    pub cubes: Vec<[i32; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fps: u32,
    /// Width-to-height ratio of one terminal cell.
    pub cell_aspect: f32,
    pub orthographic: bool,
    pub style: Style,
    pub spin: SpinSettings,
    pub pieces: Vec<PieceConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            cell_aspect: 0.5,
            orthographic: false,
            style: Style::default(),
            spin: SpinSettings::default(),
            pieces: Vec::new(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    /// Load the config file named on the command line (if any) and apply
    /// command line overrides on top.
    pub fn resolve(args: &Args) -> Result<Self, AppError> {
        let mut config = match &args.config {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                Self::from_path(path)?
            }
            None => Self::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(fps) = args.fps {
            self.fps = fps;
        }
        if args.no_spin {
            self.spin.auto_spin = false;
        }
        if args.orthographic {
            self.orthographic = true;
        }
        if self.fps == 0 {
            log::warn!("fps must be positive, using 30");
            self.fps = 30;
        }
        if !(self.cell_aspect.is_finite() && self.cell_aspect > 0.0) {
            log::warn!("cell_aspect must be a positive number, got {}; using 0.5", self.cell_aspect);
            self.cell_aspect = 0.5;
        }
    }

    /// Command line pieces win over config pieces; with neither, the
    /// builtin catalog is used.
    pub fn build_catalog(&self, notations: &[String]) -> Result<Catalog, AppError> {
        if !notations.is_empty() {
            let pieces = notations
                .iter()
                .map(|n| parse_piece(n))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Catalog::new(pieces)?);
        }
        if !self.pieces.is_empty() {
            let pieces = self
                .pieces
                .iter()
                .map(|p| PieceDefinition::new(p.name.clone(), p.cubes.iter().copied().map(CubeCoord::from)))
                .collect();
            return Ok(Catalog::new(pieces)?);
        }
        Ok(Catalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyblock_core::Camera;

    #[test]
    fn test_defaults_without_file() {
        let args = Args::parse_from(["polyblock-terminal"]);
        let config = ViewerConfig::resolve(&args).unwrap();
        assert_eq!(config.fps, 30);
        assert!(config.spin.auto_spin);
        assert_eq!(config.build_catalog(&args.pieces).unwrap().len(), Catalog::builtin().len());
    }

    #[test]
    fn test_file_values_and_overrides() {
        let mut config = ViewerConfig::from_toml_str(
            r#"
            fps = 20

            [spin]
            spin_speed = 1.5

            [style.bar_color]
            r = 255
            g = 0
            b = 0

            [[pieces]]
            name = "corner"
            cubes = [[0, 0, 0], [1, 0, 0], [0, 1, 0]]
            "#,
        )
        .unwrap();
        assert_eq!(config.fps, 20);
        assert!((config.spin.spin_speed - 1.5).abs() < 1e-6);
        assert!(config.spin.auto_spin);
        assert_eq!(config.style.bar_color.r, 255);

        let args = Args::parse_from(["polyblock-terminal", "--fps", "60", "--no-spin"]);
        config.apply_args(&args);
        assert_eq!(config.fps, 60);
        assert!(!config.spin.auto_spin);

        let catalog = config.build_catalog(&[]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("corner").map(|p| p.cubes.len()), Some(3));
    }

    #[test]
    fn test_degenerate_cell_aspect_falls_back() {
        let args = Args::parse_from(["polyblock-terminal"]);
        for bad in ["0.0", "-1.5", "nan", "inf"] {
            let mut config = ViewerConfig::from_toml_str(&format!("cell_aspect = {bad}\n")).unwrap();
            config.apply_args(&args);
            assert_eq!(config.cell_aspect, 0.5, "cell_aspect = {bad}");
            let camera = Camera::for_terminal(80, 40, config.cell_aspect);
            assert!(camera.aspect > 0.0);
            camera.projection_matrix();
        }

        let mut config = ViewerConfig::from_toml_str("cell_aspect = 0.45\n").unwrap();
        config.apply_args(&args);
        assert!((config.cell_aspect - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_cli_pieces_replace_catalog() {
        let args = Args::parse_from(["polyblock-terminal", "-p", "a: 0,0 1,0", "--piece", "0,0,0 0,0,1"]);
        let catalog = ViewerConfig::default().build_catalog(&args.pieces).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("custom").is_some());
    }

    #[test]
    fn test_bad_notation_is_reported() {
        let err = ViewerConfig::default()
            .build_catalog(&["0,0 1".to_string()])
            .unwrap_err();
        assert!(matches!(err, AppError::Piece(polyblock_core::Error::Notation { .. })));
    }

    #[test]
    fn test_empty_config_piece_is_rejected() {
        let config = ViewerConfig::from_toml_str("[[pieces]]\nname = \"void\"\ncubes = []\n").unwrap();
        let err = config.build_catalog(&[]).unwrap_err();
        assert!(matches!(err, AppError::Piece(polyblock_core::Error::EmptyPiece { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let err = ViewerConfig::from_path("/nonexistent/polyblock.toml").unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
