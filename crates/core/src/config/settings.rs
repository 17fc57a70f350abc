use crate::error::{Error, Result};
use crate::services::working_dir::expand_home;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched for, in order, in every directory
pub const CONFIG_FILE_NAMES: &[&str] = &[".docexec.json", "docexec.json"];

const DEFAULT_BUILD_DIR: &str = "_build";
const DEFAULT_CACHE_DIR_NAME: &str = ".docexec_cache";
const DEFAULT_LANGUAGE: &str = "starlark";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Root that `filename` and `project_dir` options are relative to
    pub source_root: PathBuf,
    pub build_dir: PathBuf,
    /// Name of the cache directory inside `build_dir`
    pub cache_dir_name: String,
    /// Master switch for output caching
    pub cache: bool,
    /// Language of blocks that do not set one
    pub default_language: String,

    // Directory of the loaded config file, relative paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            cache_dir_name: DEFAULT_CACHE_DIR_NAME.to_string(),
            cache: true,
            default_language: DEFAULT_LANGUAGE.to_string(),
            base_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config above `start_path`, or defaults rooted at
    /// `start_path` when there is none
    pub fn load_or_default(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::rooted_at(start_path)),
        }
    }

    /// Defaults with relative paths resolved against `dir`
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            base_dir: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let path = expand_home(path);
        match &self.base_dir {
            Some(base) => base.join(path),
            None => path,
        }
    }

    pub fn source_root(&self) -> PathBuf {
        self.resolve(&self.source_root)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.resolve(&self.build_dir)
    }

    /// Directory cached outputs are written to
    pub fn cache_dir(&self) -> PathBuf {
        self.build_dir().join(&self.cache_dir_name)
    }
}
