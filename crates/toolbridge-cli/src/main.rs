mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{record::RecordArgs, EXIT_FAILURE, EXIT_USAGE_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "toolbridge",
    version,
    about = "Inspect tool invocations through the toolbridge dry runner"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    /// Runner backend used to start executions.
    #[arg(long, default_value = "dry", global = true)]
    runner: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a tool invocation without executing it.
    Record {
        /// Tool identifier stored in the invocation metadata.
        #[arg(long, default_value = "adhoc")]
        tool_id: String,
        /// Human-readable tool name (defaults to the tool id).
        #[arg(long)]
        tool_name: Option<String>,
        /// Package the tool ships in (defaults to the tool id).
        #[arg(long)]
        tool_package: Option<String>,
        /// Host file the command reads (repeatable).
        #[arg(long = "input", value_name = "PATH")]
        inputs: Vec<PathBuf>,
        /// Host file the command reads and may modify in place (repeatable).
        #[arg(long = "mutable-input", value_name = "PATH")]
        mutable_inputs: Vec<PathBuf>,
        /// File the command is expected to produce (repeatable).
        #[arg(long = "output", value_name = "PATH")]
        outputs: Vec<PathBuf>,
        /// Expected output whose absence is tolerated (repeatable).
        #[arg(long = "optional-output", value_name = "PATH")]
        optional_outputs: Vec<PathBuf>,
        /// Tool parameter record as a JSON object.
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
        /// Command and arguments, program name first (after --).
        #[arg(required = true, last = true)]
        command: Vec<String>,
    },
    /// List available runner backends.
    Runners,
    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("TOOLBRIDGE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let json_output = cli.json;
    let runner_name = cli.runner;

    let result = match cli.command {
        Commands::Record {
            tool_id,
            tool_name,
            tool_package,
            inputs,
            mutable_inputs,
            outputs,
            optional_outputs,
            params,
            command,
        } => commands::record::run(
            &RecordArgs {
                tool_id: &tool_id,
                tool_name: tool_name.as_deref(),
                tool_package: tool_package.as_deref(),
                inputs: &inputs,
                mutable_inputs: &mutable_inputs,
                outputs: &outputs,
                optional_outputs: &optional_outputs,
                params: params.as_deref(),
                command: &command,
            },
            &runner_name,
            json_output,
        ),
        Commands::Runners => commands::runners::run(json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("invalid tool metadata:")
                || msg.starts_with("invalid params JSON:")
                || msg.starts_with("no runner named")
            {
                EXIT_USAGE_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
