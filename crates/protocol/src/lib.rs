//! Data exchanged across the bridge's two boundaries: frame generation modes and result codes
//! shared with the native library, and the script function declarations shared with the host.

pub mod function;
pub mod mode;
pub mod result;

pub use function::{Operation, ScriptFunction, ScriptParam, ScriptType};
pub use mode::{Axis, InvalidMode, Mode, ParseModeError};
pub use result::NativeResult;

/// Identification reported to the host when it queries the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub version: PluginVersion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PluginVersion {
    pub major: u8,
    pub minor: u16,
    pub patch: u32,
}

impl std::fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
