use anyhow::Result;
use docexec_core::{RunnerRegistry, executor::describe_runner};

pub fn languages_command() -> Result<()> {
    let registry = RunnerRegistry::with_defaults();
    for runner in registry.languages() {
        println!("{}", describe_runner(runner));
    }
    Ok(())
}
