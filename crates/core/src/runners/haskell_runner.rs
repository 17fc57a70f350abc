//! Haskell through the interpreter, GHCi, or a cabal/stack project

use crate::{
    error::Result,
    types::{ExecutionRequest, ExecutionResult},
};
use tracing::info;

use super::{
    post_process::{strip_build_preamble, strip_ghci_session},
    traits::{LanguageRunner, RunEnv},
};

const EXECUTABLES: &[&str] = &["runghc", "ghci", "cabal", "stack"];

#[derive(Debug, Default, Clone, Copy)]
pub struct HaskellRunner;

impl LanguageRunner for HaskellRunner {
    fn language(&self) -> &'static str {
        "haskell"
    }

    fn default_executable(&self) -> &'static str {
        "runghc"
    }

    fn executables(&self) -> &'static [&'static str] {
        EXECUTABLES
    }

    fn requires_project_dir(&self, executable: &str) -> bool {
        matches!(executable, "cabal" | "stack")
    }

    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult> {
        match executable {
            "runghc" => env
                .process
                .run_via_pipe("runghc", &request.arguments, &request.source_text)
                .map(Into::into),
            "ghci" => {
                let mut args = vec!["-ignore-dot-ghci".to_string()];
                args.extend(request.arguments.iter().cloned());
                let output = env.process.run_via_pipe("ghci", &args, &request.source_text)?;
                Ok(ExecutionResult::new(strip_ghci_session(&output.stdout), output.stderr))
            }
            "cabal" | "stack" => {
                let dir = self.project_dir(executable, request)?;
                info!("Running {} {:?} in {}", executable, request.arguments, dir.display());
                let output = env
                    .process
                    .run_via_directory_command(executable, &request.arguments, dir)?;
                Ok(ExecutionResult::new(strip_build_preamble(&output.stdout), output.stderr))
            }
            other => Err(self.unsupported(other)),
        }
    }
}
