//! # Gleaner - LLM Knowledge Extractor
//!
//! The main binary for Gleaner.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     apps/gleaner (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐    │
//! │  │   CLI       │    │   HTTP API  │    │   Summarizer /   │    │
//! │  │  (clap)     │    │   (axum)    │    │   Remote store   │    │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘    │
//! │         │                  │                    │              │
//! │         └──────────────────┼────────────────────┘              │
//! │                            ▼                                   │
//! │                    ┌───────────────┐                           │
//! │                    │  gleaner-core │                           │
//! │                    │  (THE LOGIC)  │                           │
//! │                    └───────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server with the mock summarizer and in-memory store
//! USE_MOCK_LLM=true USE_INMEM_DB=true gleaner server --port 8000
//!
//! # Offline heuristics
//! gleaner keywords --text "OpenAI released a powerful model."
//! gleaner confidence --text "one two three four five"
//! ```

use clap::Parser;
use gleaner::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // GLEANER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GLEANER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gleaner=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Gleaner startup banner.
fn print_banner() {
    println!(
        r#"
   ██████╗ ██╗     ███████╗ █████╗ ███╗   ██╗███████╗██████╗
  ██╔════╝ ██║     ██╔════╝██╔══██╗████╗  ██║██╔════╝██╔══██╗
  ██║  ███╗██║     █████╗  ███████║██╔██╗ ██║█████╗  ██████╔╝
  ██║   ██║██║     ██╔══╝  ██╔══██║██║╚██╗██║██╔══╝  ██╔══██╗
  ╚██████╔╝███████╗███████╗██║  ██║██║ ╚████║███████╗██║  ██║
   ╚═════╝ ╚══════╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝

  LLM Knowledge Extractor v{}

  Summaries • Topics • Keywords
"#,
        env!("CARGO_PKG_VERSION")
    );
}
