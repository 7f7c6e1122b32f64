//! The process-wide bridge a scripting host talks to.
//!
//! The host loads the plugin once, registers the script functions and then calls
//! [`invoke`] from its script thread. Everything goes through a single attached [`Bridge`].

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use eyre::WrapErr;
use fgbridge_protocol::{Operation, PluginInfo, PluginVersion};
use fgbridge_telemetry::{TelemetryConfig, TelemetryGuard, Verbosity};
use tracing::warn;

use crate::{
    bridge::Bridge,
    config::BridgeConfig,
    frame::{ScriptFrame, ScriptValue},
    log::BridgeLog,
    readiness::Readiness,
    registry::{self, FunctionRegistry},
    shim,
};

const fn version_part(part: &str) -> u32 {
    match u32::from_str_radix(part, 10) {
        Ok(value) => value,
        Err(_) => panic!("package version is not numeric"),
    }
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "Frame Generation Control Bridge",
    author: "gramern",
    version: PluginVersion {
        major: version_part(env!("CARGO_PKG_VERSION_MAJOR")) as u8,
        minor: version_part(env!("CARGO_PKG_VERSION_MINOR")) as u16,
        patch: version_part(env!("CARGO_PKG_VERSION_PATCH")),
    },
};

static ATTACHED: Mutex<Option<Bridge>> = Mutex::new(None);

static TELEMETRY: OnceLock<Option<TelemetryGuard>> = OnceLock::new();

/// Gates calls that arrive while nothing is loaded.
static UNLOADED_LOG: Mutex<BridgeLog> = Mutex::new(BridgeLog::new(Verbosity::Quiet));

fn attached() -> MutexGuard<'static, Option<Bridge>> {
    ATTACHED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unloaded_log() -> MutexGuard<'static, BridgeLog> {
    UNLOADED_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Answers the host's plugin query.
pub fn query() -> PluginInfo {
    PLUGIN_INFO
}

/// Resolves configuration from the process environment and attaches a bridge.
///
/// Configuration errors are logged and the defaults are used instead.
pub fn load<R: Readiness + 'static>(readiness: R) -> bool {
    let (config, report) = BridgeConfig::load_or_default();
    let attached = load_with(config, readiness);

    if let Some(report) = report {
        with_attached(|bridge| bridge.log().error("Load", format_args!("{report:#}")));
    }

    attached
}

/// Attaches a bridge for `config`, replacing the current one.
///
/// Logging is installed by the first call only. Returns whether the native library was bound;
/// the bridge stays attached either way.
pub fn load_with<R: Readiness + 'static>(config: BridgeConfig, readiness: R) -> bool {
    TELEMETRY.get_or_init(|| {
        install_telemetry(&config)
            .inspect_err(|report| warn!("logging not installed: {report:#}"))
            .ok()
    });

    let mut bridge = Bridge::new(config).with_readiness(readiness);
    let bound = bridge.attach();

    if let Some(mut previous) = attached().replace(bridge) {
        previous.detach();
    }
    unloaded_log().reset();

    bound
}

fn install_telemetry(config: &BridgeConfig) -> eyre::Result<TelemetryGuard> {
    let mut telemetry = TelemetryConfig::default()
        .verbosity(config.verbosity())
        .with_console_writer(std::io::stderr);

    if let Some(path) = &config.log_file {
        telemetry = telemetry
            .with_log_file(path)
            .wrap_err_with(|| format!("failed to open {}", path.display()))?;
    }

    Ok(fgbridge_telemetry::install(telemetry)?)
}

/// Declares the script functions. Called once the host's type system is ready for them.
pub fn post_register_types(registry: &mut dyn FunctionRegistry) {
    registry::register_functions(registry);
}

/// Detaches and drops the bridge. Does nothing when nothing is loaded.
pub fn unload() {
    if let Some(mut bridge) = attached().take() {
        bridge.detach();
    }
    unloaded_log().reset();
}

pub fn is_loaded() -> bool {
    attached().is_some()
}

/// Runs `f` against the attached bridge, if there is one.
pub fn with_attached<R>(f: impl FnOnce(&mut Bridge) -> R) -> Option<R> {
    attached().as_mut().map(f)
}

/// Runs `operation` for a script call.
///
/// Before [`load`] or after [`unload`] the frame is still finished and the safe default returned.
pub fn invoke(operation: Operation, frame: &mut dyn ScriptFrame) -> ScriptValue {
    let mut guard = attached();
    match guard.as_mut() {
        Some(bridge) => shim::dispatch(bridge, operation, frame),
        None => {
            frame.finish();
            unloaded_log().error(operation.script_name(), "bridge is not loaded");
            shim::safe_default(operation)
        }
    }
}

#[cfg(test)]
mod test {
    use super::PLUGIN_INFO;

    #[test]
    fn version_matches_the_package() {
        assert_eq!(env!("CARGO_PKG_VERSION"), PLUGIN_INFO.version.to_string());
    }
}
