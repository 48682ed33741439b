use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::ComplexityTier;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// The target configuration text only
    Yaml,
    /// Full machine-readable translation report
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TierArg {
    Simple,
    Moderate,
    Complex,
}

impl From<TierArg> for ComplexityTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Simple => ComplexityTier::Simple,
            TierArg::Moderate => ComplexityTier::Moderate,
            TierArg::Complex => ComplexityTier::Complex,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cimorph")]
#[command(about = "Jenkins pipeline to GitLab CI translation engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a source pipeline script into a target configuration
    Translate {
        /// Path to the source pipeline script (Jenkinsfile)
        script: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Complexity tier hint for stage topology
        #[arg(long, value_enum)]
        tier: Option<TierArg>,

        /// Also write variable-provisioning artifacts into this directory
        #[arg(long = "vars-dir")]
        vars_dir: Option<PathBuf>,

        /// Config file (defaults to ./cimorph.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render the migration checklist only
    Checklist {
        /// Path to the source pipeline script
        script: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render variable-provisioning artifacts only
    Vars {
        /// Path to the source pipeline script
        script: PathBuf,

        /// Directory to write the .env template and provisioning script
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}
