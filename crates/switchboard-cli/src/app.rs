//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "switchboard",
    about = "Intent-routed assistant: ask about the weather or your documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question; it is routed to the weather or document handler
    Ask(AskArgs),

    /// Ingest a document (PDF or plain text) into the index
    Ingest(IngestArgs),

    /// Print the resolved configuration (keys redacted)
    Config,
}

#[derive(Args)]
pub struct AskArgs {
    /// The question to ask
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print the full trace state as JSON after the response
    #[arg(long)]
    pub show_state: bool,

    /// Cancel the run after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Args)]
pub struct IngestArgs {
    /// Path to the document
    pub path: PathBuf,
}
