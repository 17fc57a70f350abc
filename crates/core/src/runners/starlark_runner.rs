//! In-process evaluation of Starlark blocks

use std::cell::RefCell;

use starlark::environment::{Globals, GlobalsBuilder, LibraryExtension};
use starlark::eval::Evaluator;
use starlark::syntax::{AstModule, Dialect};
use starlark::PrintHandler;
use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{ExecutionRequest, ExecutionResult},
};

use super::traits::{LanguageRunner, RunEnv};

const EXECUTABLES: &[&str] = &["exec"];

/// Collects everything `print` writes during one evaluation
#[derive(Default)]
struct CaptureSink {
    buffer: RefCell<String>,
}

impl CaptureSink {
    fn into_text(self) -> String {
        self.buffer.into_inner()
    }
}

impl PrintHandler for CaptureSink {
    fn println(&self, text: &str) -> anyhow::Result<()> {
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(text);
        buffer.push('\n');
        Ok(())
    }
}

/// Runs Starlark source against the bindings held by the execution context
#[derive(Debug, Default, Clone, Copy)]
pub struct StarlarkRunner;

impl StarlarkRunner {
    pub fn new() -> Self {
        Self
    }

    fn globals() -> Globals {
        GlobalsBuilder::extended_by(&[
            LibraryExtension::Print,
            LibraryExtension::Json,
            LibraryExtension::StructType,
            LibraryExtension::Map,
            LibraryExtension::Filter,
        ])
        .build()
    }

    fn dialect() -> Dialect {
        Dialect {
            enable_def: true,
            enable_lambda: true,
            enable_load: false,
            enable_top_level_stmt: true,
            ..Dialect::Standard
        }
    }

    fn evaluation_error(message: impl ToString) -> Error {
        Error::Evaluation {
            language: "starlark".to_string(),
            message: message.to_string(),
        }
    }
}

impl LanguageRunner for StarlarkRunner {
    fn language(&self) -> &'static str {
        "starlark"
    }

    fn default_executable(&self) -> &'static str {
        "exec"
    }

    fn executables(&self) -> &'static [&'static str] {
        EXECUTABLES
    }

    fn keeps_context(&self) -> bool {
        true
    }

    fn run(
        &self,
        executable: &str,
        request: &ExecutionRequest,
        env: RunEnv<'_>,
    ) -> Result<ExecutionResult> {
        if executable != "exec" {
            return Err(self.unsupported(executable));
        }

        let filename = request
            .document
            .as_ref()
            .map(|doc| doc.relative.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<block>".to_string());
        let ast = AstModule::parse(&filename, request.source_text.clone(), &Self::dialect())
            .map_err(Self::evaluation_error)?;

        env.context.record_evaluation();
        let globals = Self::globals();
        let sink = CaptureSink::default();
        {
            let mut eval = Evaluator::new(env.context.module());
            eval.set_print_handler(&sink);
            eval.eval_module(ast, &globals)
                .map_err(Self::evaluation_error)?;
        }

        let stdout = sink.into_text();
        debug!("Starlark evaluation printed {} bytes", stdout.len());
        Ok(ExecutionResult::new(stdout, String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use crate::services::MockProcess;

    fn eval(
        runner: &StarlarkRunner,
        context: &mut ExecutionContext,
        source: &str,
    ) -> Result<ExecutionResult> {
        let process = MockProcess::new();
        let request = ExecutionRequest::new("starlark", source);
        runner.run("exec", &request, RunEnv { process: &process, context })
    }

    #[test]
    fn test_print_is_captured() {
        let runner = StarlarkRunner::new();
        let mut context = ExecutionContext::new();
        let result = eval(&runner, &mut context, "print(1 + 2)\nprint('done')").unwrap();
        assert_eq!(result.stdout_text, "3\ndone\n");
        assert!(result.stderr_text.is_empty());
    }

    #[test]
    fn test_bindings_survive_between_blocks() {
        let runner = StarlarkRunner::new();
        let mut context = ExecutionContext::new();
        eval(&runner, &mut context, "x = 20").unwrap();
        assert!(!context.is_empty());
        assert_eq!(context.binding("x").as_deref(), Some("20"));

        let result = eval(&runner, &mut context, "print(x + 1)").unwrap();
        assert_eq!(result.stdout_text, "21\n");
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let runner = StarlarkRunner::new();
        let mut context = ExecutionContext::new();
        let err = eval(&runner, &mut context, "def (").unwrap_err();
        assert!(matches!(err, Error::Evaluation { .. }));
        assert!(context.is_empty());
    }

    #[test]
    fn test_runtime_error_is_reported() {
        let runner = StarlarkRunner::new();
        let mut context = ExecutionContext::new();
        let err = eval(&runner, &mut context, "print(undefined_name)").unwrap_err();
        assert!(err.to_string().contains("starlark"));
    }

    #[test]
    fn test_no_process_is_spawned() {
        let runner = StarlarkRunner::new();
        let mut context = ExecutionContext::new();
        let process = MockProcess::new();
        let request = ExecutionRequest::new("starlark", "print('hi')");
        runner
            .run("exec", &request, RunEnv { process: &process, context: &mut context })
            .unwrap();
        assert_eq!(process.call_count(), 0);
    }
}
