//! MATLAB in batch mode

use crate::{
    error::Result,
    interfaces::{CommandLine, TempFileJob, process::STEM_PLACEHOLDER},
    types::{ExecutionRequest, ExecutionResult},
};

use super::traits::{LanguageRunner, RunEnv};

const EXECUTABLES: &[&str] = &["matlab"];

/// `matlab -batch` takes a script name rather than a path, so the snippet is
/// written to a file and run by its stem from the file's directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatlabRunner;

impl LanguageRunner for MatlabRunner {
    fn language(&self) -> &'static str {
        "matlab"
    }

    fn default_executable(&self) -> &'static str {
        "matlab"
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
        if executable != "matlab" {
            return Err(self.unsupported(executable));
        }
        let mut args = request.arguments.clone();
        args.push("-batch".to_string());
        args.push(STEM_PLACEHOLDER.to_string());

        let job = TempFileJob::new(&request.source_text, ".m", CommandLine::new("matlab", args));
        env.process.run_via_tempfile(&job).map(Into::into)
    }
}
