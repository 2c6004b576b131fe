//! Execution layer contract for wrapped command-line tools.
//!
//! This crate defines the pluggable execution abstraction: the `Runner` and
//! `Execution` traits that backends implement, the `ToolMetadata` record that
//! identifies a tool invocation, the process-wide default-runner registry, the
//! structured `RunFailure` diagnostic for failed commands, and the `DryRunner`
//! reference backend that records invocations without executing anything.

pub mod dry;
pub mod error;
pub mod execution;
pub mod metadata;
pub mod registry;

pub use dry::{DryRunner, RecordedInput, RecordedInvocation, RecordedOutput};
pub use error::RunFailure;
pub use execution::{
    select_runner, Execution, InputOptions, OutputOptions, Runner, StreamHook, StreamHooks,
    RUNNER_NAMES,
};
pub use metadata::ToolMetadata;
pub use registry::{default_runner, set_default_runner};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid tool metadata: {0}")]
    InvalidMetadata(String),
    #[error("input file not available: {0}")]
    InputUnavailable(PathBuf),
    #[error("output path cannot be mapped: {0}")]
    UnresolvableOutput(PathBuf),
    #[error("expected output file was not produced: {0}")]
    MissingOutput(PathBuf),
    #[error("execution contract violated: {0}")]
    ContractViolation(String),
    #[error("no runner named '{0}'")]
    UnknownRunner(String),
    #[error(transparent)]
    CommandFailed(#[from] RunFailure),
}
