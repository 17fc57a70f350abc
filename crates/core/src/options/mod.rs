//! Per-block options as written in a document directive
//!
//! Options arrive as `key` / optional `value` pairs. Flags may be written
//! without a value, so a missing or blank boolean counts as `true`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    services::working_dir::expand_home,
    types::{CachePolicy, DocumentRef, ExecutionRequest, SourceOrigin},
};

/// Parsed options of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOptions {
    pub context: bool,
    pub cache: bool,
    pub language: String,
    pub executable: Option<String>,
    pub args: Vec<String>,
    pub project_dir: Option<PathBuf>,
    pub filename: Option<PathBuf>,
}

impl BlockOptions {
    /// Options of a block that sets nothing
    pub fn new(default_language: &str) -> Self {
        Self {
            context: false,
            cache: true,
            language: parse_language(None, default_language),
            executable: None,
            args: Vec::new(),
            project_dir: None,
            filename: None,
        }
    }

    pub fn parse<'a, I>(pairs: I, default_language: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut options = Self::new(default_language);

        for (key, value) in pairs {
            match key.trim() {
                "context" => options.context = parse_bool(key, value)?,
                "cache" => options.cache = parse_bool(key, value)?,
                "language" | "process" => {
                    options.language = parse_language(value, default_language)
                }
                "executable" | "with" => {
                    options.executable = non_empty(key, value)?.map(str::to_string)
                }
                "args" => options.args = parse_args(value),
                "project_dir" => options.project_dir = non_empty(key, value)?.map(PathBuf::from),
                "filename" | "file" => options.filename = non_empty(key, value)?.map(PathBuf::from),
                other => return Err(Error::OptionError(format!("Unknown option '{other}'"))),
            }
        }

        Ok(options)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        if self.cache { CachePolicy::ENABLED } else { CachePolicy::DISABLED }
    }

    /// Build the request for a block whose inline body is `content`.
    ///
    /// `project_dir` and `filename` are resolved against `source_root`; a
    /// referenced file replaces the inline body, so having both is an error.
    pub fn into_request(
        self,
        content: &str,
        document: Option<DocumentRef>,
        source_root: &Path,
    ) -> Result<ExecutionRequest> {
        let (source_text, origin) = match &self.filename {
            Some(filename) => {
                if !content.trim().is_empty() {
                    return Err(Error::OptionError(format!(
                        "Block references '{}' and also has inline content",
                        filename.display()
                    )));
                }
                let path = source_root.join(expand_home(filename));
                let text = fs::read_to_string(&path).map_err(|e| {
                    Error::OptionError(format!("Cannot read '{}': {}", path.display(), e))
                })?;
                let relative = path.strip_prefix(source_root).unwrap_or(filename).to_path_buf();
                (text, SourceOrigin::File { path, relative })
            }
            None => (content.to_string(), SourceOrigin::Inline),
        };

        let mut request = ExecutionRequest::new(self.language, source_text)
            .with_args(self.args)
            .with_persistent_context(self.context)
            .with_origin(origin);
        if let Some(executable) = self.executable {
            request = request.with_executable(executable);
        }
        if let Some(dir) = self.project_dir {
            request = request.with_working_directory(source_root.join(expand_home(&dir)));
        }
        if let Some(document) = document {
            request = request.with_document(document);
        }
        Ok(request)
    }
}

/// Flag-style boolean: missing or blank means `true`
pub fn parse_bool(key: &str, value: Option<&str>) -> Result<bool> {
    let Some(raw) = value else {
        return Ok(true);
    };
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(true),
        "no" | "0" | "false" => Ok(false),
        "yes" | "1" | "true" => Ok(true),
        _ => Err(Error::OptionError(format!(
            "Expected boolean value for '{key}', but got '{raw}'"
        ))),
    }
}

/// Language tags are case-insensitive
pub fn parse_language(value: Option<&str>, default_language: &str) -> String {
    match value.map(str::trim) {
        Some(tag) if !tag.is_empty() => tag.to_lowercase(),
        _ => default_language.to_lowercase(),
    }
}

/// Whitespace-separated argument list
pub fn parse_args(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| raw.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn non_empty<'a>(key: &str, value: Option<&'a str>) -> Result<Option<&'a str>> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(Some(v)),
        _ => Err(Error::OptionError(format!("Option '{key}' needs a value"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bool_flag_semantics() {
        assert!(parse_bool("context", None).unwrap());
        assert!(parse_bool("context", Some("  ")).unwrap());
        assert!(parse_bool("context", Some(" Yes ")).unwrap());
        assert!(parse_bool("context", Some("1")).unwrap());
        assert!(!parse_bool("context", Some("FALSE")).unwrap());
        assert!(!parse_bool("context", Some("no")).unwrap());
        assert!(!parse_bool("context", Some("0")).unwrap());

        let err = parse_bool("context", Some("maybe")).unwrap_err();
        assert!(matches!(err, Error::OptionError(_)));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_language_lowercased_with_default() {
        assert_eq!(parse_language(Some("Haskell"), "starlark"), "haskell");
        assert_eq!(parse_language(None, "starlark"), "starlark");
        assert_eq!(parse_language(Some(""), "Starlark"), "starlark");
    }

    #[test]
    fn test_args_split_on_whitespace() {
        assert_eq!(parse_args(Some(" -O2   -Wall\t-g ")), vec!["-O2", "-Wall", "-g"]);
        assert!(parse_args(None).is_empty());
    }

    #[test]
    fn test_parse_all_keys() {
        let options = BlockOptions::parse(
            [
                ("context", None),
                ("cache", Some("no")),
                ("process", Some("Haskell")),
                ("with", Some("stack")),
                ("args", Some("run demo")),
                ("project_dir", Some("hs/demo")),
            ],
            "starlark",
        )
        .unwrap();
        assert!(options.context);
        assert!(!options.cache);
        assert_eq!(options.language, "haskell");
        assert_eq!(options.executable.as_deref(), Some("stack"));
        assert_eq!(options.args, vec!["run", "demo"]);
        assert_eq!(options.project_dir, Some(PathBuf::from("hs/demo")));
        assert_eq!(options.cache_policy(), CachePolicy::DISABLED);
    }

    #[test]
    fn test_defaults() {
        let options = BlockOptions::parse(Vec::<(&str, Option<&str>)>::new(), "starlark").unwrap();
        assert_eq!(options, BlockOptions::new("starlark"));
        assert!(!options.context);
        assert_eq!(options.cache_policy(), CachePolicy::ENABLED);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = BlockOptions::parse([("timeout", Some("5"))], "starlark").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_into_request_resolves_paths() {
        let root = TempDir::new().unwrap();
        let options = BlockOptions::parse(
            [("language", Some("c")), ("with", Some("make")), ("project_dir", Some("proj"))],
            "starlark",
        )
        .unwrap();
        let document = DocumentRef::under_root(&root.path().join("index.md"), root.path());
        let request = options
            .into_request("", Some(document.clone()), root.path())
            .unwrap();
        assert_eq!(request.working_directory, Some(root.path().join("proj")));
        assert_eq!(request.executable.as_deref(), Some("make"));
        assert_eq!(request.document, Some(document));
        assert_eq!(request.origin, SourceOrigin::Inline);
    }

    #[test]
    fn test_into_request_reads_referenced_file() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("code")).unwrap();
        std::fs::write(root.path().join("code/hello.sh"), "echo hello\n").unwrap();

        let options = BlockOptions::parse(
            [("language", Some("shell")), ("file", Some("code/hello.sh"))],
            "starlark",
        )
        .unwrap();
        let request = options.into_request("\n", None, root.path()).unwrap();
        assert_eq!(request.source_text, "echo hello\n");
        assert_eq!(
            request.origin,
            SourceOrigin::File {
                path: root.path().join("code/hello.sh"),
                relative: PathBuf::from("code/hello.sh"),
            }
        );
    }

    #[test]
    fn test_file_and_inline_content_conflict() {
        let root = TempDir::new().unwrap();
        let options = BlockOptions::parse([("filename", Some("a.c"))], "c").unwrap();
        let err = options.into_request("int x;", None, root.path()).unwrap_err();
        assert!(matches!(err, Error::OptionError(_)));
    }
}
