/// Polyblock Terminal - interactive polycube viewer
///
/// Shows a randomly chosen piece as an open-topped wireframe-and-panel
/// solid spinning in the terminal.
/// Controls:
///   - Mouse drag / WASD / Arrow Keys: Rotate the piece
///   - N/Enter: New random piece
///   - Space/P: Pause or resume auto-spin
///   - O: Toggle orthographic projection
///   - Q/ESC: Quit

use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Env, Target};
use polyblock_terminal::{AppError, Args, TerminalApp, ViewerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logging(args: &Args) -> Result<(), AppError> {
    // The viewer owns the screen, so only warnings go to stderr unless a
    // log file is given.
    let mut builder = match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::LogFile {
                path: path.clone(),
                source,
            })?;
            let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("warn")),
    };
    builder.init();
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    init_logging(&args)?;

    let config = ViewerConfig::resolve(&args)?;
    let catalog = config.build_catalog(&args.pieces)?;
    log::info!("catalog holds {} pieces", catalog.len());

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut app = TerminalApp::new(config, catalog, rng)?;
    app.run()?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("polyblock-terminal: {e}");
            ExitCode::FAILURE
        }
    }
}
