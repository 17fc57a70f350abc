//! Process adapter backed by `std::process`

use crate::{
    error::{Error, Result},
    interfaces::{CommandLine, ProcessAdapter, ProcessOutput, TempFileJob},
    services::working_dir::{WorkingDirGuard, expand_home},
};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use tracing::{debug, info};

/// Spawns real operating-system processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

impl SystemProcess {
    pub fn new() -> Self {
        Self
    }
}

fn spawn_error(command: &str) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Spawn {
        command: command.to_string(),
        source,
    }
}

fn capture(output: Output, command: &str) -> ProcessOutput {
    if !output.status.success() {
        debug!("'{}' exited with {}", command, output.status);
    }
    ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn run_captured(line: &CommandLine) -> Result<Output> {
    Command::new(&line.program)
        .args(&line.args)
        .stdin(Stdio::null())
        .output()
        .map_err(spawn_error(&line.program))
}

impl ProcessAdapter for SystemProcess {
    fn run_via_pipe(&self, command: &str, args: &[String], input: &str) -> Result<ProcessOutput> {
        info!("Running (pipe): {}", CommandLine::new(command, args.iter().cloned()));

        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error(command))?;

        let stdin = child.stdin.take();
        let output = thread::scope(|scope| -> Result<Output> {
            // Feed stdin on its own thread so a child filling its stdout pipe
            // cannot block us mid-write
            let writer =
                stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(input.as_bytes())));
            let output = child.wait_with_output()?;

            if let Some(writer) = writer {
                match writer.join() {
                    // The child may exit without reading all of its input
                    Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e.into()),
                    Ok(_) => {}
                    Err(_) => return Err(io::Error::other("stdin writer panicked").into()),
                }
            }
            Ok(output)
        })?;

        Ok(capture(output, command))
    }

    fn run_via_tempfile(&self, job: &TempFileJob<'_>) -> Result<ProcessOutput> {
        let workspace = tempfile::Builder::new().prefix("docexec-").tempdir()?;
        let mut file = tempfile::Builder::new()
            .prefix("snippet_")
            .suffix(job.suffix)
            .tempfile_in(workspace.path())?;
        file.write_all(job.source.as_bytes())?;
        file.flush()?;
        let path = file.path().to_path_buf();
        debug!("Wrote snippet to {}", path.display());

        // Declared last so the directory is restored before the files go away
        let _cwd = WorkingDirGuard::enter(workspace.path())?;

        for step in &job.prepare {
            let step = step.expand(&path);
            info!("Running (prepare): {}", step);
            let output = run_captured(&step)?;
            if !output.status.success() {
                return Err(Error::StepFailed {
                    command: step.to_string(),
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
            let diagnostics = String::from_utf8_lossy(&output.stderr);
            if !diagnostics.trim().is_empty() {
                debug!("{} reported:\n{}", step.program, diagnostics);
            }
        }

        let command = job.command.expand(&path);
        info!("Running (temp file): {}", command);
        let output = run_captured(&command)?;
        Ok(capture(output, &command.program))
    }

    fn run_via_directory_command(
        &self,
        command: &str,
        args: &[String],
        directory: &Path,
    ) -> Result<ProcessOutput> {
        let directory = expand_home(directory);
        let line = CommandLine::new(command, args.iter().cloned());
        info!("Running (in {}): {}", directory.display(), line);

        let _cwd = WorkingDirGuard::enter(&directory)?;
        let output = run_captured(&line)?;
        Ok(capture(output, command))
    }
}
