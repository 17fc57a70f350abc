use anyhow::{Context, Result};
use docexec_core::{BlockOptions, DocumentRef, Executor};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::load_config;
use crate::cli::RunArgs;
use crate::display::{print_block, print_block_json};

/// Translate command-line flags into directive-style option pairs
fn option_pairs(args: &RunArgs, file: Option<&str>) -> Vec<(&'static str, Option<String>)> {
    let mut pairs = Vec::new();
    if let Some(language) = &args.language {
        pairs.push(("language", Some(language.clone())));
    }
    if let Some(executable) = &args.executable {
        pairs.push(("executable", Some(executable.clone())));
    }
    if let Some(extra) = &args.args {
        pairs.push(("args", Some(extra.clone())));
    }
    if let Some(dir) = &args.project_dir {
        pairs.push(("project_dir", Some(dir.to_string_lossy().into_owned())));
    }
    if let Some(file) = file {
        pairs.push(("filename", Some(file.to_string())));
    }
    if args.context {
        pairs.push(("context", None));
    }
    if args.no_cache {
        pairs.push(("cache", Some("no".to_string())));
    }
    pairs
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn run_command(args: &RunArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let source_root = config.source_root();
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    // Paths given on the command line are relative to where the user is
    let file = args.file.as_deref().map(|f| absolute(f, &cwd));
    let file_arg = file.as_ref().map(|f| f.to_string_lossy().into_owned());
    let content = match &file {
        Some(_) => String::new(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read block from stdin")?;
            buffer
        }
    };

    let owned_pairs = option_pairs(args, file_arg.as_deref());
    let pairs = owned_pairs
        .iter()
        .map(|(key, value)| (*key, value.as_deref()));
    let options = BlockOptions::parse(pairs, &config.default_language)?;
    let policy = options.cache_policy();

    let document = args
        .document
        .as_deref()
        .map(|doc| DocumentRef::under_root(&absolute(doc, &cwd), &source_root));
    let project_dir = args.project_dir.as_deref().map(|dir| absolute(dir, &cwd));
    let mut request = options.into_request(&content, document, &source_root)?;
    if let Some(dir) = project_dir {
        request.working_directory = Some(dir);
    }
    debug!("Executing request: {:?}", request);

    let mut executor = Executor::new(&config);
    let block = executor
        .execute(&request, policy)
        .with_context(|| format!("Failed to execute {} block", request.language))?;

    if args.json {
        print_block_json(&block)?;
    } else {
        print_block(&block);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_pairs_from_flags() {
        let args = RunArgs {
            language: Some("C".to_string()),
            executable: Some("clang".to_string()),
            args: Some("-O2 -Wall".to_string()),
            no_cache: true,
            context: true,
            ..RunArgs::default()
        };
        let pairs = option_pairs(&args, None);
        let options = BlockOptions::parse(
            pairs.iter().map(|(key, value)| (*key, value.as_deref())),
            "starlark",
        )
        .unwrap();
        assert_eq!(options.language, "c");
        assert_eq!(options.executable.as_deref(), Some("clang"));
        assert_eq!(options.args, vec!["-O2", "-Wall"]);
        assert!(options.context);
        assert!(!options.cache);
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let cwd = Path::new("/work");
        assert_eq!(absolute(Path::new("/etc/x"), cwd), PathBuf::from("/etc/x"));
        assert_eq!(absolute(Path::new("doc.md"), cwd), PathBuf::from("/work/doc.md"));
    }
}
