//! # Voxel Sandbox Entry Point
//!
//! Parses the command line and hands off to the library's `run()`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --seed 42
//! cargo run --release -- --headless 600
//! ```

use clap::Parser;
use voxel_sandbox::cli::Cli;

fn main() {
    if let Err(err) = voxel_sandbox::run(Cli::parse()) {
        log::error!("{}", err);
        eprintln!("voxel-sandbox: {}", err);
        std::process::exit(1);
    }
}
