//! Recording process adapter
//!
//! Never spawns anything. Every call is recorded and answered from a queue of
//! canned outputs, which makes it usable as a spy in tests and as a dry-run
//! backend for hosts.

use crate::{
    error::Result,
    interfaces::{CommandLine, ProcessAdapter, ProcessOutput, TempFileJob},
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// One recorded adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Pipe {
        command: String,
        args: Vec<String>,
        input: String,
    },
    TempFile {
        source: String,
        suffix: String,
        prepare: Vec<CommandLine>,
        command: CommandLine,
    },
    Directory {
        command: String,
        args: Vec<String>,
        directory: PathBuf,
    },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<ProcessCall>,
    responses: VecDeque<ProcessOutput>,
    fallback: ProcessOutput,
}

/// Adapter that records calls instead of running processes
#[derive(Debug, Default)]
pub struct MockProcess {
    state: Mutex<MockState>,
}

impl MockProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call that has no queued response with `stdout`
    pub fn with_stdout(self, stdout: impl Into<String>) -> Self {
        self.lock().fallback = ProcessOutput::new(stdout, "");
        self
    }

    /// Queue a response for the next unanswered call
    pub fn push_response(&self, output: ProcessOutput) {
        self.lock().responses.push_back(output);
    }

    pub fn calls(&self) -> Vec<ProcessCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: ProcessCall) -> ProcessOutput {
        let mut state = self.lock();
        state.calls.push(call);
        match state.responses.pop_front() {
            Some(output) => output,
            None => state.fallback.clone(),
        }
    }
}

impl ProcessAdapter for MockProcess {
    fn run_via_pipe(&self, command: &str, args: &[String], input: &str) -> Result<ProcessOutput> {
        Ok(self.record(ProcessCall::Pipe {
            command: command.to_string(),
            args: args.to_vec(),
            input: input.to_string(),
        }))
    }

    fn run_via_tempfile(&self, job: &TempFileJob<'_>) -> Result<ProcessOutput> {
        Ok(self.record(ProcessCall::TempFile {
            source: job.source.to_string(),
            suffix: job.suffix.to_string(),
            prepare: job.prepare.clone(),
            command: job.command.clone(),
        }))
    }

    fn run_via_directory_command(
        &self,
        command: &str,
        args: &[String],
        directory: &Path,
    ) -> Result<ProcessOutput> {
        Ok(self.record(ProcessCall::Directory {
            command: command.to_string(),
            args: args.to_vec(),
            directory: directory.to_path_buf(),
        }))
    }
}
