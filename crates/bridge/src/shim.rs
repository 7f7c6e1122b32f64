//! Entry points called by the scripting host, one per [`Operation`].
//!
//! Every entry point reads its arguments, advances the frame, runs the operation against the
//! bridge and writes exactly one value to `out`. Failures become the operation's safe
//! default: `-1`, `false` or `"Unknown"`.

use fgbridge_protocol::{Axis, Mode, Operation, ScriptType};

use crate::{
    binding::FrameGenerationApi,
    bridge::Bridge,
    error::BridgeError,
    frame::{ScriptFrame, ScriptValue},
    host::PLUGIN_INFO,
};

pub const UNKNOWN_VERSION: &str = "Unknown";

pub const UNKNOWN_MODE: i32 = -1;

/// The value an operation reports when it fails.
pub fn safe_default(operation: Operation) -> ScriptValue {
    match operation.return_type() {
        ScriptType::String => ScriptValue::String(UNKNOWN_VERSION.to_string()),
        ScriptType::Int32 => ScriptValue::Int32(UNKNOWN_MODE),
        ScriptType::Bool => ScriptValue::Bool(false),
    }
}

fn write_out<T>(bridge: &mut Bridge, operation: Operation, out: Option<&mut T>, value: T) {
    match out {
        Some(slot) => *slot = value,
        None => bridge
            .log()
            .error(operation.script_name(), BridgeError::NullOutputTarget),
    }
}

pub fn get_version_as_string(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut String>,
) {
    let operation = Operation::GetVersionAsString;
    frame.finish();

    let version = bridge
        .run(operation, |_| Ok(PLUGIN_INFO.version.to_string()))
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

    write_out(bridge, operation, out, version);
}

pub fn get_frame_generation_mode(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut i32>,
) {
    let operation = Operation::GetFrameGenerationMode;
    frame.finish();

    let mode = bridge
        .run(operation, |binding| binding.get_mode())
        .map_or(UNKNOWN_MODE, Mode::raw);

    write_out(bridge, operation, out, mode);
}

pub fn get_frame_generation_state(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    let operation = Operation::GetFrameGenerationState;
    frame.finish();

    let state = bridge
        .run(operation, |binding| binding.get_mode())
        .is_some_and(Mode::frame_generation_state);

    write_out(bridge, operation, out, state);
}

pub fn get_dynamic_frame_generation_state(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    let operation = Operation::GetDynamicFrameGenerationState;
    frame.finish();

    let state = bridge
        .run(operation, |binding| binding.get_mode())
        .is_some_and(Mode::dynamic_frame_generation_state);

    write_out(bridge, operation, out, state);
}

/// Out-of-range modes are rejected before the native library is called.
pub fn set_frame_generation_mode(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    let operation = Operation::SetFrameGenerationMode;
    let raw = frame.read_i32();
    frame.finish();

    let success = bridge
        .run(operation, |binding| {
            let mode = Mode::from_raw(raw.ok_or(BridgeError::MissingArgument("mode"))?)?;
            binding.set_mode(mode)
        })
        .is_some();

    write_out(bridge, operation, out, success);
}

pub fn set_frame_generation_state(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    set_axis(
        bridge,
        frame,
        out,
        Operation::SetFrameGenerationState,
        Axis::FrameGeneration,
    );
}

pub fn set_dynamic_frame_generation_state(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    set_axis(
        bridge,
        frame,
        out,
        Operation::SetDynamicFrameGenerationState,
        Axis::DynamicFrameGeneration,
    );
}

fn set_axis(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
    operation: Operation,
    axis: Axis,
) {
    let should_enable = frame.read_bool();
    frame.finish();

    let success = bridge
        .run(operation, |binding| {
            let enabled = should_enable.ok_or(BridgeError::MissingArgument("shouldEnable"))?;
            binding.set_mode(Mode::new(axis, enabled))
        })
        .is_some();

    write_out(bridge, operation, out, success);
}

pub fn toggle_frame_generation_state(
    bridge: &mut Bridge,
    frame: &mut dyn ScriptFrame,
    out: Option<&mut bool>,
) {
    let operation = Operation::ToggleFrameGenerationState;
    frame.finish();

    let success = bridge
        .run(operation, |binding| binding.toggle())
        .is_some();

    write_out(bridge, operation, out, success);
}

/// Calls the entry point for `operation` and returns the value it wrote.
pub fn dispatch(
    bridge: &mut Bridge,
    operation: Operation,
    frame: &mut dyn ScriptFrame,
) -> ScriptValue {
    fn bool_out(
        entry: fn(&mut Bridge, &mut dyn ScriptFrame, Option<&mut bool>),
        bridge: &mut Bridge,
        frame: &mut dyn ScriptFrame,
    ) -> ScriptValue {
        let mut out = false;
        entry(bridge, frame, Some(&mut out));
        ScriptValue::Bool(out)
    }

    match operation {
        Operation::GetVersionAsString => {
            let mut out = String::new();
            get_version_as_string(bridge, frame, Some(&mut out));
            ScriptValue::String(out)
        }
        Operation::GetFrameGenerationMode => {
            let mut out = 0;
            get_frame_generation_mode(bridge, frame, Some(&mut out));
            ScriptValue::Int32(out)
        }
        Operation::GetFrameGenerationState => {
            bool_out(get_frame_generation_state, bridge, frame)
        }
        Operation::GetDynamicFrameGenerationState => {
            bool_out(get_dynamic_frame_generation_state, bridge, frame)
        }
        Operation::SetFrameGenerationMode => bool_out(set_frame_generation_mode, bridge, frame),
        Operation::SetFrameGenerationState => bool_out(set_frame_generation_state, bridge, frame),
        Operation::SetDynamicFrameGenerationState => {
            bool_out(set_dynamic_frame_generation_state, bridge, frame)
        }
        Operation::ToggleFrameGenerationState => {
            bool_out(toggle_frame_generation_state, bridge, frame)
        }
    }
}
