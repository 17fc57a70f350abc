//! Language runners and the registry that dispatches to them

pub mod c_family;
pub mod haskell_runner;
pub mod matlab_runner;
pub mod ocaml_runner;
pub mod post_process;
pub mod python_runner;
pub mod registry;
pub mod shell_runner;
pub mod starlark_runner;
pub mod traits;

// Re-export main types
pub use c_family::CFamilyRunner;
pub use haskell_runner::HaskellRunner;
pub use matlab_runner::MatlabRunner;
pub use ocaml_runner::OcamlRunner;
pub use python_runner::PythonRunner;
pub use registry::RunnerRegistry;
pub use shell_runner::ShellRunner;
pub use starlark_runner::StarlarkRunner;
pub use traits::{LanguageRunner, RunEnv};
