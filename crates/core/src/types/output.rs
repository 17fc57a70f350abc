use serde::{Deserialize, Serialize};

/// Captured output of one execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout_text: String,
    pub stderr_text: String,
}

impl ExecutionResult {
    pub fn new(stdout_text: impl Into<String>, stderr_text: impl Into<String>) -> Self {
        Self {
            stdout_text: stdout_text.into(),
            stderr_text: stderr_text.into(),
        }
    }
}

/// Whether a block may read from and write to the output cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub enabled: bool,
}

impl CachePolicy {
    pub const ENABLED: CachePolicy = CachePolicy { enabled: true };
    pub const DISABLED: CachePolicy = CachePolicy { enabled: false };
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::ENABLED
    }
}

/// The two texts handed to the rendering layer for a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockOutput {
    pub input: String,
    /// Highlighting language of the input text
    pub input_language: String,
    /// `None` when the block produced no visible output
    pub output: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub stderr: String,
    pub cached: bool,
}

impl BlockOutput {
    pub fn new(
        input: &str,
        input_language: &str,
        output: String,
        stderr: String,
        cached: bool,
    ) -> Self {
        let output = if output.trim().is_empty() {
            None
        } else {
            Some(output)
        };
        Self {
            input: input.trim_end_matches(['\n', '\r']).to_string(),
            input_language: input_language.to_string(),
            output,
            stderr,
            cached,
        }
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}
