use std::{io::stderr, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use color_eyre::owo_colors::OwoColorize;
use fgbridge::{
    registry, shim, AlwaysReady, ArgsFrame, Bridge, BridgeConfig, Mode, Operation, ScriptValue,
};
use fgbridge_protocol::ScriptFunction;
use fgbridge_telemetry::TelemetryConfig;
use tracing::debug;

use crate::{commands::Commands, output::OutputBuilder};

mod commands;
pub mod output;

#[derive(Parser)]
#[command(
    name = "fgbridge",
    version,
    about = "Query and control a frame generation library",
    propagate_version = true,
    flatten_help = true
)]
struct Cli {
    /// Name or path of the library to bind.
    #[clap(short, long)]
    library: Option<String>,

    /// Log warnings and debug lines.
    #[clap(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Log extended debug lines as well.
    #[clap(long, action = ArgAction::SetTrue)]
    debug_ext: bool,

    #[clap(long)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> color_eyre::Result<BridgeConfig> {
        let config = BridgeConfig::load_with_file(self.config_file.as_deref())?;

        Ok(BridgeConfig {
            library: self.library.clone().unwrap_or(config.library),
            debug: config.debug || self.debug,
            debug_ext: config.debug_ext || self.debug_ext,
            ..config
        })
    }
}

fn format_bound(bound: bool) -> String {
    if bound {
        "Bound".green().to_string()
    } else {
        "Not bound".red().to_string()
    }
}

fn call(bridge: &mut Bridge, operation: Operation, args: Vec<ScriptValue>) -> ScriptValue {
    let mut frame = ArgsFrame::new(args);
    shim::dispatch(bridge, operation, &mut frame)
}

fn status(bridge: &mut Bridge) -> String {
    let mut output = OutputBuilder::new("Frame generation bridge");
    output.property("Library", &bridge.config().library);
    output.property("Binding", format_bound(bridge.is_bound()));
    output.property("Version", call(bridge, Operation::GetVersionAsString, vec![]));
    output.property("Verbosity", format!("{:?}", bridge.config().verbosity()));

    if bridge.is_bound() {
        let mode = call(bridge, Operation::GetFrameGenerationMode, vec![]);
        let state = call(bridge, Operation::GetFrameGenerationState, vec![]);
        let dynamic_state = call(bridge, Operation::GetDynamicFrameGenerationState, vec![]);

        output.section("Frame generation", |builder| {
            builder.property("Mode", describe_mode(&mode));
            builder.property("Enabled", state);
            builder.property("Dynamic enabled", dynamic_state);
        });
    }

    output.build()
}

fn describe_mode(value: &ScriptValue) -> String {
    match value {
        ScriptValue::Int32(raw) => match Mode::from_raw(*raw) {
            Ok(mode) => format!("{raw} ({mode})"),
            Err(_) => raw.to_string(),
        },
        other => other.to_string(),
    }
}

fn functions() -> String {
    let mut functions: Vec<ScriptFunction> = Vec::new();
    registry::register_functions(&mut functions);

    let mut output = OutputBuilder::new("Script functions");
    for (index, function) in functions.iter().enumerate() {
        output.property(index, function);
    }

    output.build()
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.config()?;

    let mut telemetry = TelemetryConfig::default()
        .verbosity(config.verbosity())
        .with_console_writer(stderr);

    if let Some(path) = &config.log_file {
        telemetry = telemetry.with_log_file(path)?;
    }

    let _telemetry_guard = fgbridge_telemetry::install(telemetry)?;

    debug!(version = env!("CARGO_PKG_VERSION"), library = %config.library);

    let mut bridge = Bridge::new(config).with_readiness(AlwaysReady);

    let Some((operation, args)) = cli.command.call() else {
        match cli.command {
            Commands::Status => {
                bridge.attach();
                print!("{}", status(&mut bridge));
            }
            _ => print!("{}", functions()),
        }

        return Ok(ExitCode::SUCCESS);
    };

    if operation != Operation::GetVersionAsString {
        bridge.attach();
    }

    let value = call(&mut bridge, operation, args);
    println!("{value}");

    let failed = match operation {
        Operation::GetVersionAsString => false,
        operation if operation.is_mutating() => value == ScriptValue::Bool(false),
        _ => !bridge.is_bound(),
    };

    bridge.detach();

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
