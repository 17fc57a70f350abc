//! OCaml through the toplevel, utop, or a dune project

use crate::{
    error::Result,
    interfaces::{CommandLine, TempFileJob, process::FILE_PLACEHOLDER},
    types::{ExecutionRequest, ExecutionResult},
};
use tracing::info;

use super::traits::{LanguageRunner, RunEnv};

const EXECUTABLES: &[&str] = &["ocaml", "utop", "dune"];

#[derive(Debug, Default, Clone, Copy)]
pub struct OcamlRunner;

impl LanguageRunner for OcamlRunner {
    fn language(&self) -> &'static str {
        "ocaml"
    }

    fn default_executable(&self) -> &'static str {
        "ocaml"
    }

    fn executables(&self) -> &'static [&'static str] {
        EXECUTABLES
    }

    fn requires_project_dir(&self, executable: &str) -> bool {
        executable == "dune"
    }

    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult> {
        match executable {
            "ocaml" => {
                // The toplevel echoes piped phrases, a script file keeps the output clean
                let mut args = request.arguments.clone();
                args.push(FILE_PLACEHOLDER.to_string());
                let job =
                    TempFileJob::new(&request.source_text, ".ml", CommandLine::new("ocaml", args));
                env.process.run_via_tempfile(&job).map(Into::into)
            }
            "utop" => env
                .process
                .run_via_pipe("utop", &request.arguments, &request.source_text)
                .map(Into::into),
            "dune" => {
                let dir = self.project_dir(executable, request)?;
                info!("Running dune {:?} in {}", request.arguments, dir.display());
                env.process
                    .run_via_directory_command("dune", &request.arguments, dir)
                    .map(Into::into)
            }
            other => Err(self.unsupported(other)),
        }
    }
}
