//! Console entry point for the book collection.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, LevelFilter};

use book_collection_core::app_config::AppConfig;
use book_collection_core::collection_manager::CollectionManager;
use book_collection_core::console::Console;

/// Manage a personal book collection from the terminal
#[derive(Parser, Debug)]
#[command(name = "book_collection", version, about)]
struct Args {
    /// Data file holding the saved collection (overrides BOOK_COLLECTION_FILE)
    #[arg(short, long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Log collection activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match args.data_file {
        Some(path) => AppConfig::with_data_file(path),
        None => AppConfig::from_env(),
    };

    let mut manager = CollectionManager::new(&config);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    if let Err(e) = console.run(&mut manager) {
        error!("Console I/O failed: {e}");
        process::exit(1);
    }
}
