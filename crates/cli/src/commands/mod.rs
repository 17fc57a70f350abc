pub mod clean;
pub mod languages;
pub mod run;

pub use clean::clean_command;
pub use languages::languages_command;
pub use run::run_command;

use anyhow::{Context, Result};
use docexec_core::Config;
use std::path::Path;

/// The explicit config file, or the nearest one above the current directory
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Config::load_or_default(&cwd).context("Failed to load config")
        }
    }
}
