use crate::metadata::ToolMetadata;
use crate::ExecError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How an input file should be registered with the execution environment.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct InputOptions {
    /// Register the file's parent directory instead of the file itself.
    pub resolve_parent: bool,
    /// The local copy/mount must be writable; a backend may propagate
    /// writes back to the host path after `run`.
    pub mutable: bool,
}

/// How an expected output file should be declared.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputOptions {
    /// Absence of the file after `run` is not an error.
    pub optional: bool,
}

/// Callback fed chunks of one process output stream.
///
/// A backend may invoke hooks from a thread other than the one that called
/// `run` (e.g. a background pipe reader), but never after `run` has returned.
/// Chunks within one stream arrive in production order; interleaving between
/// stdout and stderr is not guaranteed.
pub type StreamHook<'a> = &'a mut (dyn FnMut(&[u8]) + Send);

/// Optional stdout/stderr hooks passed to [`Execution::run`].
#[derive(Default)]
pub struct StreamHooks<'a> {
    pub stdout: Option<StreamHook<'a>>,
    pub stderr: Option<StreamHook<'a>>,
}

/// One tool invocation in progress.
///
/// An execution is single-use and owned by one caller. The operations must
/// be invoked in order: zero or more `input_file` calls, then zero or more
/// `output_file` calls, then at most one `params` call, then exactly one
/// `run`. A backend may tolerate reordering or reject it, but it must never
/// silently produce an incorrect path mapping; each backend documents its
/// policy.
pub trait Execution {
    /// Register a host file (or, with `resolve_parent`, its parent
    /// directory) needed by the command. Returns the path under which the
    /// file will be visible inside the execution environment. The result is
    /// stable for the lifetime of this execution.
    fn input_file(&mut self, host_path: &Path, opts: InputOptions) -> Result<PathBuf, ExecError>;

    /// Declare that the command is expected to produce a file at
    /// `local_path` inside the execution environment. Returns the host path
    /// where the result will be discoverable after `run`, known in advance
    /// regardless of whether the file ever materializes. If `optional` is
    /// false and the file is missing after `run`, the backend reports
    /// [`ExecError::MissingOutput`].
    fn output_file(&mut self, local_path: &Path, opts: OutputOptions) -> Result<PathBuf, ExecError>;

    /// Observe the fully-assembled tool parameter record, at most once.
    /// Strict passthrough: the value is returned unchanged. A backend that
    /// normalizes must document the deviation.
    fn params(&mut self, params: serde_json::Value) -> Result<serde_json::Value, ExecError>;

    /// Execute the command, exactly once. `command` is the full argument
    /// vector with the program name first. Returns `Ok(())` on a zero exit;
    /// a non-zero exit or a launch failure surfaces
    /// [`ExecError::CommandFailed`].
    fn run(&mut self, command: &[String], hooks: StreamHooks<'_>) -> Result<(), ExecError>;
}

/// Factory for [`Execution`] instances; one implementation per backend.
///
/// A runner may be shared freely; concurrent `start_execution` calls yield
/// independent, non-interfering executions. The factory itself performs no
/// file or process work — all side effects happen through the returned
/// execution.
pub trait Runner: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn start_execution(&self, metadata: &ToolMetadata) -> Box<dyn Execution>;
}

/// Backend names accepted by [`select_runner`].
pub const RUNNER_NAMES: &[&str] = &["dry"];

pub fn select_runner(name: &str) -> Result<Arc<dyn Runner>, ExecError> {
    match name {
        "dry" => Ok(Arc::new(crate::dry::DryRunner::new())),
        other => Err(ExecError::UnknownRunner(other.to_owned())),
    }
}
