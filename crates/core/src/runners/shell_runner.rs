//! Shell scripts piped to the chosen shell

use crate::{
    error::Result,
    types::{ExecutionRequest, ExecutionResult},
};

use super::traits::{LanguageRunner, RunEnv};

const EXECUTABLES: &[&str] = &["sh", "bash", "zsh", "fish"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl LanguageRunner for ShellRunner {
    fn language(&self) -> &'static str {
        "shell"
    }

    fn default_executable(&self) -> &'static str {
        "sh"
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
        env.process
            .run_via_pipe(executable, &request.arguments, &request.source_text)
            .map(Into::into)
    }
}
