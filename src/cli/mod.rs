pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pipeline_stats")]
#[command(about = "Stage tallies and JSONL checks for the training-data pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count files per channel in every stage and total output lines
    Status {
        /// Pipeline data root (overrides the config file)
        #[arg(long)]
        root: Option<PathBuf>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only report these channels (repeatable)
        #[arg(long = "channel")]
        channels: Vec<String>,
        /// Count files behind symlinked directories too
        #[arg(long)]
        follow_symlinks: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check JSONL files for parse errors, NaN tokens and label balance
    Validate {
        /// Files or directories (directories are searched for *.jsonl)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Label field to tally (repeatable, replaces configured fields)
        #[arg(long = "label-field")]
        label_fields: Vec<String>,
        /// Maximum issues listed per file
        #[arg(long)]
        max_errors: Option<usize>,
        /// Follow symlinks when expanding directories
        #[arg(long)]
        follow_symlinks: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count lines in files or directories
    CountLines {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Extension filter applied inside directories
        #[arg(long, default_value = "jsonl")]
        extension: String,
        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    ShowConfig {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status {
            root,
            config,
            channels,
            follow_symlinks,
            json,
        } => commands::status(root, config, channels, follow_symlinks, json),
        Commands::Validate {
            paths,
            config,
            label_fields,
            max_errors,
            follow_symlinks,
            json,
        } => commands::validate(paths, config, label_fields, max_errors, follow_symlinks, json),
        Commands::CountLines {
            paths,
            extension,
            json,
        } => commands::count_lines(paths, extension, json),
        Commands::ShowConfig { root, config } => commands::show_config(root, config),
    }
}
