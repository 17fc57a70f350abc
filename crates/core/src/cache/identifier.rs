//! Stable names for cached outputs

use std::path::{Component, Path};

use crate::types::{ExecutionRequest, SourceOrigin};

/// Separator replacing path separators in identifiers
const PATH_JOIN: &str = "__";

/// Flatten a relative path into a single file-name-safe token, dropping the
/// final suffix: `guide/intro.md` becomes `guide__intro`.
pub fn flatten_path(path: &Path) -> String {
    let stripped = path.with_extension("");
    stripped
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => None,
        })
        .collect::<Vec<_>>()
        .join(PATH_JOIN)
}

/// Hex md5 digest of the block source
pub fn content_hash(source: &str) -> String {
    format!("{:x}", md5::compute(source.as_bytes()))
}

/// Compute the cache identifier for a request run with `executable`.
///
/// File-backed blocks are keyed by the backing file, inline blocks by their
/// document plus a digest of the source. Inline blocks outside any document
/// have no stable identity and return `None`.
pub fn compute_identifier(request: &ExecutionRequest, executable: &str) -> Option<String> {
    match &request.origin {
        SourceOrigin::File { relative, .. } => Some(format!(
            "{}-{}-{}-file",
            flatten_path(relative),
            request.language,
            executable
        )),
        SourceOrigin::Inline => {
            let document = request.document.as_ref()?;
            Some(format!(
                "{}-{}-{}-inline-{}",
                flatten_path(&document.relative),
                request.language,
                executable,
                content_hash(&request.source_text)
            ))
        }
    }
}
