//! Core interfaces
//!
//! Trait seams between the runners and the operating system.

pub mod process;

pub use process::{CommandLine, ProcessAdapter, ProcessOutput, TempFileJob};
