//! Language tag to runner lookup

use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::{
    c_family::CFamilyRunner, haskell_runner::HaskellRunner, matlab_runner::MatlabRunner,
    ocaml_runner::OcamlRunner, python_runner::PythonRunner, shell_runner::ShellRunner,
    starlark_runner::StarlarkRunner, traits::LanguageRunner,
};

/// Registered runners keyed by language tag
pub struct RunnerRegistry {
    runners: BTreeMap<&'static str, Box<dyn LanguageRunner>>,
}

impl RunnerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            runners: BTreeMap::new(),
        }
    }

    /// Every built-in language
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StarlarkRunner::new()));
        registry.register(Box::new(CFamilyRunner::c()));
        registry.register(Box::new(CFamilyRunner::cpp()));
        registry.register(Box::new(HaskellRunner));
        registry.register(Box::new(MatlabRunner));
        registry.register(Box::new(OcamlRunner));
        registry.register(Box::new(ShellRunner));
        registry.register(Box::new(PythonRunner));
        registry
    }

    /// Add a runner, replacing any runner already registered for its language
    pub fn register(&mut self, runner: Box<dyn LanguageRunner>) {
        self.runners.insert(runner.language(), runner);
    }

    pub fn get(&self, language: &str) -> Result<&dyn LanguageRunner> {
        self.runners
            .get(language)
            .map(|runner| runner.as_ref())
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
    }

    /// Registered runners, sorted by language tag
    pub fn languages(&self) -> impl Iterator<Item = &dyn LanguageRunner> + '_ {
        self.runners
            .values()
            .map(|runner| runner.as_ref() as &dyn LanguageRunner)
    }
}

impl Default for RunnerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
