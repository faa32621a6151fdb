/// Example: Render a piece given in notation form
///
/// Usage: cargo run --example custom_piece -- "hook: 0,0 1,0 1,1 1,1,1"

use std::env;
use std::io;

use polyblock_core::notation::parse_piece;
use polyblock_core::Catalog;
use polyblock_terminal::{TerminalApp, ViewerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let catalog = match args.get(1) {
        Some(notation) => {
            let piece = parse_piece(notation)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            println!("Loaded `{}` with {} cubes", piece.name, piece.cubes.len());
            Catalog::new(vec![piece])
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?
        }
        None => {
            eprintln!("Usage: {} <piece-notation>", args[0]);
            eprintln!("\nNo piece provided, using the builtin catalog...");
            Catalog::builtin()
        }
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(ViewerConfig::default(), catalog, StdRng::from_entropy())?;
    app.run()?;

    println!("Thank you for using Polyblock!");
    Ok(())
}
