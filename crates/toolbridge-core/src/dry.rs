use crate::execution::{Execution, InputOptions, OutputOptions, Runner, StreamHooks};
use crate::metadata::ToolMetadata;
use crate::ExecError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Reference backend: records invocations without executing anything.
///
/// Path mapping is the identity in both directions, `params` is stored and
/// returned unchanged, and `run` appends the completed invocation to the
/// runner's journal without launching a process or touching the filesystem.
/// Input paths are not required to exist.
///
/// Call-order policy: this backend fails fast. `input_file` after any
/// `output_file`, a file declaration after `params` has been observed, a
/// second `params`, a second `run`, and any operation after `run` are all
/// rejected with [`ExecError::ContractViolation`].
#[derive(Debug)]
pub struct DryRunner {
    journal: Arc<Mutex<Vec<RecordedInvocation>>>,
}

impl Default for DryRunner {
    fn default() -> Self {
        Self {
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl DryRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every invocation completed through this runner, in
    /// completion order.
    pub fn recorded(&self) -> Vec<RecordedInvocation> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Runner for DryRunner {
    fn name(&self) -> &'static str {
        "dry"
    }

    fn start_execution(&self, metadata: &ToolMetadata) -> Box<dyn Execution> {
        Box::new(DryExecution {
            tool: metadata.clone(),
            journal: Arc::clone(&self.journal),
            inputs: Vec::new(),
            outputs: Vec::new(),
            params: None,
            ran: false,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RecordedInput {
    pub host_path: PathBuf,
    pub options: InputOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RecordedOutput {
    pub local_path: PathBuf,
    pub options: OutputOptions,
}

/// One completed dry invocation: everything the caller declared, in the
/// order the contract delivers it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RecordedInvocation {
    pub tool: ToolMetadata,
    pub inputs: Vec<RecordedInput>,
    pub outputs: Vec<RecordedOutput>,
    pub params: Option<serde_json::Value>,
    pub command: Vec<String>,
}

struct DryExecution {
    tool: ToolMetadata,
    journal: Arc<Mutex<Vec<RecordedInvocation>>>,
    inputs: Vec<RecordedInput>,
    outputs: Vec<RecordedOutput>,
    params: Option<serde_json::Value>,
    ran: bool,
}

impl DryExecution {
    fn reject_if_finished(&self, operation: &str) -> Result<(), ExecError> {
        if self.ran {
            return Err(ExecError::ContractViolation(format!(
                "{operation} called after run on tool '{}'",
                self.tool.id
            )));
        }
        Ok(())
    }
}

impl Execution for DryExecution {
    fn input_file(&mut self, host_path: &Path, opts: InputOptions) -> Result<PathBuf, ExecError> {
        self.reject_if_finished("input_file")?;
        if self.params.is_some() {
            return Err(ExecError::ContractViolation(format!(
                "input_file called after params on tool '{}'",
                self.tool.id
            )));
        }
        if !self.outputs.is_empty() {
            return Err(ExecError::ContractViolation(format!(
                "input_file called after output_file on tool '{}'",
                self.tool.id
            )));
        }
        self.inputs.push(RecordedInput {
            host_path: host_path.to_path_buf(),
            options: opts,
        });
        Ok(host_path.to_path_buf())
    }

    fn output_file(&mut self, local_path: &Path, opts: OutputOptions) -> Result<PathBuf, ExecError> {
        self.reject_if_finished("output_file")?;
        if self.params.is_some() {
            return Err(ExecError::ContractViolation(format!(
                "output_file called after params on tool '{}'",
                self.tool.id
            )));
        }
        self.outputs.push(RecordedOutput {
            local_path: local_path.to_path_buf(),
            options: opts,
        });
        Ok(local_path.to_path_buf())
    }

    fn params(&mut self, params: serde_json::Value) -> Result<serde_json::Value, ExecError> {
        self.reject_if_finished("params")?;
        if self.params.is_some() {
            return Err(ExecError::ContractViolation(format!(
                "params called twice on tool '{}'",
                self.tool.id
            )));
        }
        self.params = Some(params.clone());
        Ok(params)
    }

    fn run(&mut self, command: &[String], _hooks: StreamHooks<'_>) -> Result<(), ExecError> {
        self.reject_if_finished("run")?;
        self.ran = true;
        debug!(tool = %self.tool.id, argc = command.len(), "recording dry invocation");
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedInvocation {
                tool: self.tool.clone(),
                inputs: std::mem::take(&mut self.inputs),
                outputs: std::mem::take(&mut self.outputs),
                params: self.params.take(),
                command: command.to_vec(),
            });
        Ok(())
    }
}
