//! Dispatch facade: validation, caching and context handling around runners

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    cache::{OutputCache, compute_identifier},
    config::Config,
    context::ExecutionContext,
    error::Result,
    interfaces::ProcessAdapter,
    runners::{LanguageRunner, RunEnv, RunnerRegistry},
    services::SystemProcess,
    types::{BlockOutput, CachePolicy, ExecutionRequest},
};

/// Executes blocks for one document build.
///
/// Owns the persistent context, so one executor serves one sequence of
/// documents; parallel builds need one executor each.
pub struct Executor {
    registry: RunnerRegistry,
    process: Arc<dyn ProcessAdapter>,
    context: ExecutionContext,
    cache: Option<OutputCache>,
}

impl Executor {
    /// Executor with every built-in runner, real processes, and the cache
    /// directory from `config` when caching is enabled
    pub fn new(config: &Config) -> Self {
        let cache = config.cache.then(|| OutputCache::new(config.cache_dir()));
        Self::with_parts(RunnerRegistry::with_defaults(), Arc::new(SystemProcess::new()), cache)
    }

    pub fn with_parts(
        registry: RunnerRegistry,
        process: Arc<dyn ProcessAdapter>,
        cache: Option<OutputCache>,
    ) -> Self {
        Self {
            registry,
            process,
            context: ExecutionContext::new(),
            cache,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn registry(&self) -> &RunnerRegistry {
        &self.registry
    }

    pub fn cache(&self) -> Option<&OutputCache> {
        self.cache.as_ref()
    }

    /// Run one block and package its output for rendering.
    ///
    /// Configuration problems are reported before anything is spawned. A
    /// valid cache entry is returned without running the block.
    pub fn execute(
        &mut self,
        request: &ExecutionRequest,
        policy: CachePolicy,
    ) -> Result<BlockOutput> {
        let runner = self.registry.get(&request.language)?;
        let executable = runner.validate(request)?;
        if request.use_persistent_context && !runner.keeps_context() {
            warn!(
                "{} blocks run in a fresh process; the context option has no effect",
                request.language
            );
        }

        self.context
            .enter_document(request.document.as_ref().map(|doc| doc.path.as_path()));

        let cache_slot = self.cache_slot(request, executable, policy);
        if let Some((cache, identifier)) = &cache_slot {
            let cache_path = cache.path_for(identifier);
            let fresh = request
                .source_path()
                .is_some_and(|source| cache.is_valid(&cache_path, source));
            if fresh {
                debug!("Using cached output {}", cache_path.display());
                let output = cache.load(identifier)?;
                return Ok(BlockOutput::new(
                    &request.source_text,
                    &request.language,
                    output,
                    String::new(),
                    true,
                ));
            }
        }

        info!("Executing {} block with {}", request.language, executable);
        let env = RunEnv {
            process: self.process.as_ref(),
            context: &mut self.context,
        };
        let outcome = runner.run(executable, request, env);

        // Failed blocks do not leave partial bindings behind either
        if !request.use_persistent_context {
            self.context.clear();
        }
        let result = outcome?;

        if !result.stderr_text.is_empty() {
            warn!("{} ({}) wrote to stderr:\n{}", request.language, executable, result.stderr_text);
        }

        if let Some((cache, identifier)) = &cache_slot {
            if let Err(e) = cache.store(identifier, &result.stdout_text) {
                warn!("Could not cache output of {} block: {}", request.language, e);
            }
        }

        Ok(BlockOutput::new(
            &request.source_text,
            &request.language,
            result.stdout_text,
            result.stderr_text,
            false,
        ))
    }

    /// The cache and identifier to use, when caching applies to this request
    fn cache_slot(
        &self,
        request: &ExecutionRequest,
        executable: &str,
        policy: CachePolicy,
    ) -> Option<(OutputCache, String)> {
        if !policy.enabled || request.use_persistent_context || !self.context.is_empty() {
            return None;
        }
        let cache = self.cache.as_ref()?;
        let identifier = compute_identifier(request, executable)?;
        Some((cache.clone(), identifier))
    }
}

/// One-line summary of a runner for listings
pub fn describe_runner(runner: &dyn LanguageRunner) -> String {
    format!(
        "{} (default: {}; executables: {})",
        runner.language(),
        runner.default_executable(),
        runner.executables().join(", ")
    )
}
