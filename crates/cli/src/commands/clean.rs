use anyhow::{Context, Result};
use docexec_core::OutputCache;
use std::path::Path;
use tracing::info;

use super::load_config;

pub fn clean_command(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let cache = OutputCache::new(config.cache_dir());

    if !cache.dir().exists() {
        println!("Nothing to clean at {}", cache.dir().display());
        return Ok(());
    }

    info!("Removing cache directory {}", cache.dir().display());
    cache
        .clear()
        .with_context(|| format!("Failed to remove {}", cache.dir().display()))?;
    println!("Removed {}", cache.dir().display());
    Ok(())
}
