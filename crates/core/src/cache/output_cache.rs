use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Directory of captured outputs, one plain-text file per identifier
#[derive(Debug, Clone)]
pub struct OutputCache {
    dir: PathBuf,
}

impl OutputCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(identifier)
    }

    /// A cache file is valid only if it is strictly newer than its source.
    /// Missing files on either side, or unreadable timestamps, count as stale.
    pub fn is_valid(&self, cache_path: &Path, source_path: &Path) -> bool {
        match (modified(cache_path), modified(source_path)) {
            (Some(cached), Some(source)) => cached > source,
            _ => false,
        }
    }

    pub fn load(&self, identifier: &str) -> Result<String> {
        let path = self.path_for(identifier);
        fs::read_to_string(&path)
            .map_err(|e| Error::CacheError(format!("Failed to read {}: {}", path.display(), e)))
    }

    /// Write `output` for `identifier`, creating the cache directory if needed
    pub fn store(&self, identifier: &str, output: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(identifier);
        fs::write(&path, output)?;
        debug!("Stored output in {}", path.display());
        Ok(())
    }

    /// Remove the whole cache directory. A missing directory is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_store_creates_directory_and_loads() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = OutputCache::new(temp.path().join("_build/.docexec_cache"));
        assert!(!cache.dir().exists());

        cache.store("doc-shell-sh-inline-abc", "hello\n")?;
        assert!(cache.path_for("doc-shell-sh-inline-abc").is_file());
        assert_eq!(cache.load("doc-shell-sh-inline-abc")?, "hello\n");
        Ok(())
    }

    #[test]
    fn test_path_has_no_extension() {
        let cache = OutputCache::new("/cache");
        assert_eq!(cache.path_for("a-c-gcc-file"), PathBuf::from("/cache/a-c-gcc-file"));
    }

    #[test]
    fn test_validity_is_strict() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = OutputCache::new(temp.path().join("cache"));
        let source = temp.path().join("doc.md");
        fs::write(&source, "text")?;
        cache.store("id", "out")?;
        let cached = cache.path_for("id");

        let now = SystemTime::now();
        set_mtime(&source, now - Duration::from_secs(60));
        set_mtime(&cached, now);
        assert!(cache.is_valid(&cached, &source));

        // Equal timestamps are stale
        set_mtime(&source, now);
        assert!(!cache.is_valid(&cached, &source));

        set_mtime(&source, now + Duration::from_secs(60));
        assert!(!cache.is_valid(&cached, &source));
        Ok(())
    }

    #[test]
    fn test_missing_files_are_stale() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = OutputCache::new(temp.path());
        let source = temp.path().join("doc.md");
        fs::write(&source, "text")?;
        assert!(!cache.is_valid(&cache.path_for("absent"), &source));
        assert!(!cache.is_valid(&source, &temp.path().join("gone.md")));
        Ok(())
    }

    #[test]
    fn test_load_missing_is_cache_error() {
        let cache = OutputCache::new("/nonexistent/docexec/cache");
        assert!(matches!(cache.load("id"), Err(Error::CacheError(_))));
    }

    #[test]
    fn test_clear() -> Result<()> {
        let temp = TempDir::new()?;
        let cache = OutputCache::new(temp.path().join("cache"));
        cache.store("id", "out")?;
        cache.clear()?;
        assert!(!cache.dir().exists());
        // Clearing twice is fine
        cache.clear()?;
        Ok(())
    }
}
