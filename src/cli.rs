use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediafacts")]
#[command(author, version, about = "Fuse exiftool and mediainfo output into one JSON media record")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Indent the JSON record
    #[arg(long)]
    pub pretty: bool,

    /// Digest algorithm to compute (repeatable; overrides the config file)
    #[arg(short = 'a', long = "algorithm", value_name = "NAME")]
    pub algorithms: Vec<String>,

    /// Media file to inspect
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that exiftool and mediainfo are available
    CheckTools,
}
