//! # gleaner
//!
//! The Gleaner application - THE BINARY.
//!
//! Wires the deterministic heuristics of `gleaner-core` to the outside
//! world:
//! - `api`: axum HTTP server (`/api/analyze`, `/api/search`)
//! - `cli`: clap command-line interface
//! - `config`: layered settings (defaults, TOML, `.env`, environment)
//! - `summarizer`: Gemini client and a deterministic mock
//! - `storage`: in-memory and PostgREST backends behind one enum
//! - `analyze`: the pipeline tying them together
//! - `http`: outbound client construction with deadlines

pub mod analyze;
pub mod api;
pub mod cli;
pub mod config;
pub mod http;
pub mod storage;
pub mod summarizer;
