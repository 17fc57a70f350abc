//! Core traits for the runner architecture

use crate::{
    context::ExecutionContext,
    error::{Error, Result},
    interfaces::ProcessAdapter,
    types::{ExecutionRequest, ExecutionResult},
};
use std::path::Path;

/// Everything a runner may touch while executing a request
pub struct RunEnv<'a> {
    pub process: &'a dyn ProcessAdapter,
    pub context: &'a mut ExecutionContext,
}

/// Core trait that every language runner must implement
pub trait LanguageRunner: Send + Sync {
    /// Language tag this runner is registered under
    fn language(&self) -> &'static str;

    /// Executable used when a request does not name one
    fn default_executable(&self) -> &'static str;

    /// Every executable this runner knows how to drive
    fn executables(&self) -> &'static [&'static str];

    /// Whether bindings made by one block are visible to the next
    fn keeps_context(&self) -> bool {
        false
    }

    /// Whether `executable` builds a project and so needs a project directory
    fn requires_project_dir(&self, _executable: &str) -> bool {
        false
    }

    /// Execute the request with an already validated executable
    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult>;

    /// Pick the requested executable or the default, and check it is known
    fn resolve_executable(&self, requested: Option<&str>) -> Result<&'static str> {
        let executable = requested.unwrap_or(self.default_executable());
        self.executables()
            .iter()
            .copied()
            .find(|known| *known == executable)
            .ok_or_else(|| self.unsupported(executable))
    }

    /// Full pre-spawn validation of a request
    fn validate(&self, request: &ExecutionRequest) -> Result<&'static str> {
        let executable = self.resolve_executable(request.executable.as_deref())?;
        if self.requires_project_dir(executable) {
            self.project_dir(executable, request)?;
        }
        Ok(executable)
    }

    /// The request's project directory, required for build-tool executables
    fn project_dir<'r>(&self, executable: &str, request: &'r ExecutionRequest) -> Result<&'r Path> {
        request
            .working_directory
            .as_deref()
            .ok_or_else(|| Error::MissingProjectDir {
                language: self.language().to_string(),
                executable: executable.to_string(),
            })
    }

    fn unsupported(&self, executable: &str) -> Error {
        Error::UnsupportedExecutable {
            executable: executable.to_string(),
            language: self.language().to_string(),
        }
    }
}
