//! Orchestrator crate for the director tally.
//!
//! This crate contains the orchestrator that runs the archive → cache →
//! pipeline → report sequence, plus its configuration and error types.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{TallyConfig, DEFAULT_OUTPUT_FILE};
pub use error::TallyError;
pub use orchestrator::{RunSummary, TallyOrchestrator};
