//! Exposes a native frame generation control library to a game's scripting runtime.
//!
//! The native library is loaded at runtime and driven through two exported functions. Scripts
//! see eight global functions (see [`Operation`]) that never fail across the host boundary: a
//! failed call logs an error and returns a safe default instead.

pub mod binding;
pub mod bridge;
pub mod config;
pub mod error;
pub mod frame;
pub mod host;
pub mod log;
pub mod log_gate;
pub mod native;
pub mod readiness;
pub mod registry;
pub mod shim;

pub use fgbridge_protocol::{Mode, Operation, PluginInfo};

pub use self::{
    binding::{Binding, FrameGenerationApi},
    bridge::Bridge,
    config::BridgeConfig,
    error::BridgeError,
    frame::{ArgsFrame, ScriptFrame, ScriptValue},
    readiness::{AlwaysReady, HostState, Readiness},
    registry::FunctionRegistry,
};
