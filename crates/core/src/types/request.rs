use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The document a code block lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Absolute path of the document on disk
    pub path: PathBuf,
    /// Path relative to the source root, used for cache identifiers
    pub relative: PathBuf,
}

impl DocumentRef {
    pub fn new(path: impl Into<PathBuf>, relative: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            relative: relative.into(),
        }
    }

    /// Build a reference from a path and the root it should be relative to.
    /// Paths outside the root keep their full form.
    pub fn under_root(path: &Path, root: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        Self::new(path, relative)
    }
}

/// Where the source text of a block came from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SourceOrigin {
    /// Written directly inside the document
    #[default]
    Inline,
    /// Read from a file referenced by the block
    File { path: PathBuf, relative: PathBuf },
}

/// A single request to execute a block of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub source_text: String,
    pub language: String,
    /// `None` selects the runner's default executable
    pub executable: Option<String>,
    pub arguments: Vec<String>,
    /// Project directory for build-tool executables
    pub working_directory: Option<PathBuf>,
    pub use_persistent_context: bool,
    pub document: Option<DocumentRef>,
    #[serde(default)]
    pub origin: SourceOrigin,
}

impl ExecutionRequest {
    pub fn new(language: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            language: language.into(),
            executable: None,
            arguments: Vec::new(),
            working_directory: None,
            use_persistent_context: false,
            document: None,
            origin: SourceOrigin::Inline,
        }
    }

    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_persistent_context(mut self, persist: bool) -> Self {
        self.use_persistent_context = persist;
        self
    }

    pub fn with_document(mut self, document: DocumentRef) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_origin(mut self, origin: SourceOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// The file whose modification time decides cache validity: the backing
    /// file for file-sourced blocks, the containing document otherwise.
    pub fn source_path(&self) -> Option<&Path> {
        match &self.origin {
            SourceOrigin::File { path, .. } => Some(path),
            SourceOrigin::Inline => self.document.as_ref().map(|doc| doc.path.as_path()),
        }
    }
}
