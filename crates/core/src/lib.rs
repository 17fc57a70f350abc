//! docexec - Run code blocks embedded in documentation and capture their output
//!
//! This crate provides functionality to:
//! - Execute a block of source text with a language-specific runner
//!   (in-process Starlark, piped interpreters, compile-then-run, project builds)
//! - Keep Starlark bindings alive across the blocks of one document
//! - Cache captured output on disk, keyed by a stable block identifier
//! - Parse per-block directive options into execution requests
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod interfaces;
pub mod options;
pub mod runners;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use cache::{OutputCache, compute_identifier};
pub use config::Config;
pub use context::ExecutionContext;
pub use executor::Executor;
pub use interfaces::{ProcessAdapter, ProcessOutput};
pub use options::BlockOptions;
pub use runners::{LanguageRunner, RunnerRegistry};
pub use services::{MockProcess, SystemProcess};
