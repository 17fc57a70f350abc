//! Python as an external interpreter

use crate::{
    error::Result,
    types::{ExecutionRequest, ExecutionResult},
};

use super::traits::{LanguageRunner, RunEnv};

const EXECUTABLES: &[&str] = &["python3", "python"];

/// Each block runs in a fresh interpreter; use `starlark` for bindings that
/// persist across blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonRunner;

impl LanguageRunner for PythonRunner {
    fn language(&self) -> &'static str {
        "python"
    }

    fn default_executable(&self) -> &'static str {
        "python3"
    }

    fn executables(&self) -> &'static [&'static str] {
        EXECUTABLES
    }

    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult> {
        if !EXECUTABLES.contains(&executable) {
            return Err(self.unsupported(executable));
        }
        let mut args = request.arguments.clone();
        // Read the program from stdin
        args.push("-".to_string());
        env.process
            .run_via_pipe(executable, &args, &request.source_text)
            .map(Into::into)
    }
}
