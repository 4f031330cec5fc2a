//! Quadtree demo - feeds click/draw commands from a script or stdin into a viewer session.
//!
//! Usage: `quadtree-demo [SCRIPT]`

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::{Command, Config, Outcome, Session};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadtree demo v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Loaded configuration");
    info!("  Size: {}", config.tree.size);
    info!("  Min quadrant size: {}", config.tree.min_quadrant_size);
    info!("  Removal: {:?}", config.tree.removal);

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading commands from {}", path);
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut session = Session::new(&config);
    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("line {}: {}", line_no + 1, e);
                continue;
            }
        };
        report(&session.apply(command)?);
    }

    let tree = session.tree();
    info!(
        "Done: {} points in {} nodes, depth {}",
        tree.len(),
        tree.node_count(),
        tree.depth()
    );
    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Inserted(true) => println!("inserted"),
        Outcome::Inserted(false) => println!("rejected"),
        Outcome::Removed(Some(p)) => println!("removed ({}, {})", p.x, p.y),
        Outcome::Removed(None) => println!("nothing to remove"),
        Outcome::Drawn(path) => println!("drew {}", path.display()),
        Outcome::Dumped(text) => print!("{text}"),
        Outcome::Scattered { attempted, inserted } => {
            println!("scattered {inserted}/{attempted}")
        }
        Outcome::Cleared => println!("cleared"),
        Outcome::Stats { points, nodes, depth } => {
            println!("points={points} nodes={nodes} depth={depth}")
        }
    }
}
