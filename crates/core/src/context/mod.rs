//! Persistent bindings for in-process evaluation
//!
//! Bindings only make sense within one document, so the context remembers
//! which document it belongs to and starts over whenever that changes.

use starlark::environment::Module;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Variable bindings shared by consecutive evaluations of one document
pub struct ExecutionContext {
    document: Option<PathBuf>,
    module: Module,
    evaluations: usize,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self {
            document: None,
            module: Module::new(),
            evaluations: 0,
        }
    }

    /// Switch to `document`, dropping all bindings if it differs from the
    /// previous one. Returns `true` when the context was cleared.
    pub fn enter_document(&mut self, document: Option<&Path>) -> bool {
        if self.document.as_deref() == document {
            return false;
        }
        debug!(
            "Document changed ({:?} -> {:?}), clearing execution context",
            self.document, document
        );
        self.document = document.map(Path::to_path_buf);
        self.clear();
        true
    }

    /// Drop every binding
    pub fn clear(&mut self) {
        self.module = Module::new();
        self.evaluations = 0;
    }

    /// No evaluation has run against the bindings since the last clear
    pub fn is_empty(&self) -> bool {
        self.evaluations == 0
    }

    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// Render the current value of a binding
    pub fn binding(&self, name: &str) -> Option<String> {
        self.module.get(name).map(|value| value.to_str())
    }

    /// Namespace evaluations run against
    pub(crate) fn module(&self) -> &Module {
        &self.module
    }

    pub(crate) fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("document", &self.document)
            .field("evaluations", &self.evaluations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let context = ExecutionContext::new();
        assert!(context.is_empty());
        assert_eq!(context.document(), None);
        assert_eq!(context.binding("x"), None);
    }

    #[test]
    fn test_document_switch_clears() {
        let mut context = ExecutionContext::new();
        assert!(context.enter_document(Some(Path::new("a.md"))));
        context.record_evaluation();
        assert!(!context.is_empty());

        // Same document keeps bindings
        assert!(!context.enter_document(Some(Path::new("a.md"))));
        assert!(!context.is_empty());

        assert!(context.enter_document(Some(Path::new("b.md"))));
        assert!(context.is_empty());
        assert_eq!(context.document(), Some(Path::new("b.md")));
    }

    #[test]
    fn test_clear_keeps_document() {
        let mut context = ExecutionContext::new();
        context.enter_document(Some(Path::new("a.md")));
        context.record_evaluation();
        context.clear();
        assert!(context.is_empty());
        assert_eq!(context.document(), Some(Path::new("a.md")));
    }
}
