//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use mmf_model::DEFAULT_ALIGNMENT_SEED;

#[derive(Parser)]
#[command(
    name = "mmf",
    version,
    about = "Multimodal feature fusion - merge tabular, image and audio features",
    long_about = "Merge independently produced per-entity feature tables into one\n\
                  row-aligned, normalized, namespaced dataset.\n\n\
                  Absent secondary modalities are replaced by seeded synthetic data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Integrate all modalities found under a base directory.
    Integrate(IntegrateArgs),

    /// List the configured modalities.
    Modalities(ModalitiesArgs),
}

#[derive(Parser)]
pub struct IntegrateArgs {
    /// Directory against which modality files are resolved.
    #[arg(value_name = "BASE_PATH", default_value = ".")]
    pub base_path: PathBuf,

    /// Output directory for artifacts (default: <BASE_PATH>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Modality registry file (TOML) replacing the built-in modalities.
    #[arg(long = "modalities", value_name = "FILE")]
    pub modalities: Option<PathBuf>,

    /// Seed for subsampling and synthetic data.
    #[arg(long = "seed", default_value_t = DEFAULT_ALIGNMENT_SEED)]
    pub seed: u64,

    /// Run the pipeline without writing artifacts.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N rows of the fused table.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Parser)]
pub struct ModalitiesArgs {
    /// Modality registry file (TOML) replacing the built-in modalities.
    #[arg(long = "modalities", value_name = "FILE")]
    pub modalities: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
