//! # Gleaner CLI Module
//!
//! This module implements the CLI interface for Gleaner.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default when no command is given)
//! - `keywords` - Rank the keywords of a text
//! - `confidence` - Score a text with the confidence heuristic
//! - `analyze` - Run the full pipeline once and store the result
//! - `search` - Search the configured store

mod commands;

use crate::config::Settings;
use clap::{Args, Parser, Subcommand};
use gleaner_core::GleanerError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Gleaner - LLM knowledge extractor
///
/// Summarizes free-form text, tags it with topics, sentiment and keywords,
/// stores the result, and searches it later by topic or keyword.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML settings file
    #[arg(short, long, global = true, env = "GLEANER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Text given inline or read from a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TextSource {
    /// Text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// File containing the text
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Rank the keywords of a text
    Keywords {
        #[command(flatten)]
        source: TextSource,

        /// Number of keywords to show
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Score a text with the confidence heuristic
    Confidence {
        /// Text to score
        #[arg(short, long)]
        text: String,

        /// Score as if the summarizer had failed
        #[arg(long)]
        summarizer_failed: bool,
    },

    /// Analyze a text and store the result
    Analyze {
        #[command(flatten)]
        source: TextSource,
    },

    /// Search stored analyses by topic or keyword
    Search {
        /// Topic or keyword (blank lists recent analyses)
        #[arg(short, long, default_value = "")]
        topic: String,
    },
}

/// Default bind address when no subcommand is given.
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), GleanerError> {
    let json_mode = cli.json_mode;
    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Server { host, port }) => {
            cmd_server(Settings::load(config)?, &host, port).await
        }
        Some(Commands::Keywords { source, limit }) => {
            cmd_keywords(&source.read()?, limit, json_mode)
        }
        Some(Commands::Confidence {
            text,
            summarizer_failed,
        }) => cmd_confidence(&text, !summarizer_failed, json_mode),
        Some(Commands::Analyze { source }) => {
            cmd_analyze(Settings::load(config)?, &source.read()?, json_mode).await
        }
        Some(Commands::Search { topic }) => {
            cmd_search(Settings::load(config)?, &topic, json_mode).await
        }
        None => cmd_server(Settings::load(config)?, DEFAULT_HOST, DEFAULT_PORT).await,
    }
}

// =============================================================================
// TESTS
// =============================================================================
