use super::{json_pretty, EXIT_SUCCESS};
use std::path::PathBuf;
use std::sync::Arc;
use toolbridge_core::{
    select_runner, DryRunner, InputOptions, OutputOptions, RecordedInvocation, Runner,
    StreamHooks, ToolMetadata,
};

pub struct RecordArgs<'a> {
    pub tool_id: &'a str,
    pub tool_name: Option<&'a str>,
    pub tool_package: Option<&'a str>,
    pub inputs: &'a [PathBuf],
    pub mutable_inputs: &'a [PathBuf],
    pub outputs: &'a [PathBuf],
    pub optional_outputs: &'a [PathBuf],
    pub params: Option<&'a str>,
    pub command: &'a [String],
}

pub fn run(args: &RecordArgs<'_>, runner_name: &str, json: bool) -> Result<u8, String> {
    let metadata = ToolMetadata::new(
        args.tool_id,
        args.tool_name.unwrap_or(args.tool_id),
        args.tool_package.unwrap_or(args.tool_id),
    )
    .map_err(|e| e.to_string())?;

    // The dry backend journals what it sees so the invocation can be shown
    // afterwards; any other selected backend just runs the sequence.
    let (runner, journal): (Arc<dyn Runner>, Option<Arc<DryRunner>>) = if runner_name == "dry" {
        let dry = Arc::new(DryRunner::new());
        (Arc::clone(&dry) as Arc<dyn Runner>, Some(dry))
    } else {
        (select_runner(runner_name).map_err(|e| e.to_string())?, None)
    };
    let mut exec = runner.start_execution(&metadata);

    for path in args.inputs {
        exec.input_file(path, InputOptions::default())
            .map_err(|e| e.to_string())?;
    }
    for path in args.mutable_inputs {
        exec.input_file(
            path,
            InputOptions {
                resolve_parent: false,
                mutable: true,
            },
        )
        .map_err(|e| e.to_string())?;
    }
    for path in args.outputs {
        exec.output_file(path, OutputOptions::default())
            .map_err(|e| e.to_string())?;
    }
    for path in args.optional_outputs {
        exec.output_file(path, OutputOptions { optional: true })
            .map_err(|e| e.to_string())?;
    }
    if let Some(raw) = args.params {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| format!("invalid params JSON: {e}"))?;
        exec.params(value).map_err(|e| e.to_string())?;
    }
    exec.run(args.command, StreamHooks::default())
        .map_err(|e| e.to_string())?;
    tracing::debug!(tool = %metadata.id, runner = runner.name(), "invocation completed");

    match journal {
        Some(dry) => {
            let recorded = dry.recorded();
            let invocation = recorded
                .last()
                .ok_or_else(|| "dry runner recorded nothing".to_owned())?;
            if json {
                println!("{}", json_pretty(invocation)?);
            } else {
                print_invocation(invocation);
            }
        }
        None => {
            if json {
                let payload = serde_json::json!({
                    "tool": metadata.id,
                    "runner": runner.name(),
                    "status": "completed"
                });
                println!("{}", json_pretty(&payload)?);
            } else {
                println!(
                    "completed '{}' through the '{}' runner",
                    metadata.id,
                    runner.name()
                );
            }
        }
    }
    Ok(EXIT_SUCCESS)
}

fn print_invocation(invocation: &RecordedInvocation) {
    println!(
        "tool:     {} ({}, package {})",
        invocation.tool.id, invocation.tool.name, invocation.tool.package
    );
    if let Some(tag) = &invocation.tool.container_image_tag {
        println!("image:    {tag}");
    }
    println!("command:  {}", invocation.command.join(" "));
    println!("inputs:   {}", invocation.inputs.len());
    for input in &invocation.inputs {
        let note = if input.options.mutable { " (mutable)" } else { "" };
        println!("  < {}{note}", input.host_path.display());
    }
    println!("outputs:  {}", invocation.outputs.len());
    for output in &invocation.outputs {
        let note = if output.options.optional {
            " (optional)"
        } else {
            ""
        };
        println!("  > {}{note}", output.local_path.display());
    }
    match &invocation.params {
        Some(params) => println!("params:   {params}"),
        None => println!("params:   (none)"),
    }
}
