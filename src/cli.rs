//! Command line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SandboxConfig;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "voxel-sandbox", version, about = "Procedural voxel sandbox with survival and a day/night cycle")]
pub struct Cli {
    /// JSON configuration file; defaults are used when omitted
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// World seed, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run this many ticks without a window and log a summary
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,
}

impl Cli {
    /// Applies command line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut SandboxConfig) {
        if let Some(seed) = self.seed {
            config.world.seed = Some(seed);
        }
    }
}
