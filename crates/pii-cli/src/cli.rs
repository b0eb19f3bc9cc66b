use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pii")]
#[command(about = "Detect and redact personal identifiers in documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan files or directories and write a findings report
    Scan(ScanArgs),

    /// Redact a single text (file or stdin) to stdout
    Redact(RedactArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// File or directory to scan
    #[arg(long)]
    pub input: PathBuf,

    /// Recurse into subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Report raw values instead of masked ones
    #[arg(long)]
    pub no_mask: bool,

    /// Path to the JSON report output
    #[arg(long, default_value = "report.json")]
    pub output: PathBuf,

    /// Directory to write redacted text files into
    #[arg(long)]
    pub redact_output_dir: Option<PathBuf>,

    /// Drop findings below this score (1-5, default from config)
    #[arg(long)]
    pub min_score: Option<u8>,
}

#[derive(Args)]
pub struct RedactArgs {
    /// File to redact (stdin when omitted)
    #[arg(long)]
    pub input: Option<PathBuf>,
}
