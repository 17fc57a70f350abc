use std::io;

/// Errors that can occur while executing a code block
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No runner for language '{0}'.")]
    UnsupportedLanguage(String),

    #[error("The executable '{executable}' is not recognised for the language '{language}'.")]
    UnsupportedExecutable { executable: String, language: String },

    #[error("'{executable}' for '{language}' needs a project directory (set project_dir).")]
    MissingProjectDir { language: String, executable: String },

    #[error("Invalid option: {0}")]
    OptionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}:\n{stderr}")]
    StepFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{language} evaluation failed: {message}")]
    Evaluation { language: String, message: String },

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was raised while validating a request, before any
    /// process could have been spawned.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedLanguage(_)
                | Error::UnsupportedExecutable { .. }
                | Error::MissingProjectDir { .. }
                | Error::OptionError(_)
                | Error::ConfigError(_)
        )
    }
}

/// Result type alias for docexec operations
pub type Result<T> = std::result::Result<T, Error>;
