use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nordata",
    about = "Batch copy, list and delete objects with single-wildcard patterns",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory whose subdirectories are buckets
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Bucket name
    #[arg(short, long, global = true)]
    pub bucket: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List keys matching a pattern such as `tmp/*.csv`
    Ls(LsArgs),
    /// Download objects to local paths
    Download(TransferArgs),
    /// Upload local files to keys
    Upload(TransferArgs),
    /// Delete keys
    Delete(DeleteArgs),
    /// Print the COPY/UNLOAD credential string from the environment
    Creds,
}

#[derive(Args)]
pub struct LsArgs {
    pub pattern: String,
}

#[derive(Args)]
pub struct TransferArgs {
    /// One path (may contain a single `*`) or several literal paths
    #[arg(required = true)]
    pub sources: Vec<String>,
    /// One destination, or as many as there are sources
    #[arg(long = "to", required = true, num_args = 1..)]
    pub destinations: Vec<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// One key (may contain a single `*`) or several literal keys
    #[arg(required = true)]
    pub keys: Vec<String>,
}
