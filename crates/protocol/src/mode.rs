use std::{error::Error, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, VariantArray};

/// Frame generation mode as exchanged with the native library.
///
/// The discriminants are part of the native ABI and must not change.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    VariantArray,
)]
#[repr(i32)]
pub enum Mode {
    #[serde(rename = "disabled")]
    Disabled = 0,

    #[serde(rename = "enabled")]
    Enabled = 1,

    #[serde(rename = "dynamic-disabled")]
    DynamicDisabled = 2,

    #[serde(rename = "dynamic-enabled")]
    DynamicEnabled = 3,
}

/// The two independent switches encoded in a [`Mode`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Axis {
    #[serde(rename = "frame-generation")]
    FrameGeneration,

    #[serde(rename = "dynamic-frame-generation")]
    DynamicFrameGeneration,
}

impl Mode {
    /// Builds the mode that sets `axis` to `enabled`.
    pub const fn new(axis: Axis, enabled: bool) -> Self {
        use Mode::*;
        match (axis, enabled) {
            (Axis::FrameGeneration, false) => Disabled,
            (Axis::FrameGeneration, true) => Enabled,
            (Axis::DynamicFrameGeneration, false) => DynamicDisabled,
            (Axis::DynamicFrameGeneration, true) => DynamicEnabled,
        }
    }

    /// Converts a raw native value, rejecting anything outside `0..=3`.
    pub const fn from_raw(raw: i32) -> Result<Self, InvalidMode> {
        use Mode::*;
        match raw {
            0 => Ok(Disabled),
            1 => Ok(Enabled),
            2 => Ok(DynamicDisabled),
            3 => Ok(DynamicEnabled),
            other => Err(InvalidMode(other)),
        }
    }

    pub const fn raw(self) -> i32 {
        self as i32
    }

    pub const fn axis(self) -> Axis {
        use Mode::*;
        match self {
            Disabled | Enabled => Axis::FrameGeneration,
            DynamicDisabled | DynamicEnabled => Axis::DynamicFrameGeneration,
        }
    }

    pub const fn is_enabled(self) -> bool {
        matches!(self, Mode::Enabled | Mode::DynamicEnabled)
    }

    /// The complementary mode on the same axis.
    ///
    /// Toggling never moves a mode from one axis to the other.
    pub const fn toggled(self) -> Self {
        Self::new(self.axis(), !self.is_enabled())
    }

    /// Whether plain frame generation is switched on.
    pub const fn frame_generation_state(self) -> bool {
        matches!(self, Mode::Enabled)
    }

    /// Whether dynamic frame generation is switched on.
    pub const fn dynamic_frame_generation_state(self) -> bool {
        matches!(self, Mode::DynamicEnabled)
    }

    /// The human readable name of a mode, one distinct string per variant.
    pub const fn display_name(self) -> &'static str {
        use Mode::*;
        match self {
            Disabled => "Disabled",
            Enabled => "Enabled",
            DynamicDisabled => "Dynamic Disabled",
            DynamicEnabled => "Dynamic Enabled",
        }
    }

    /// Kebab-case name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        use Mode::*;
        match self {
            Disabled => "disabled",
            Enabled => "enabled",
            DynamicDisabled => "dynamic-disabled",
            DynamicEnabled => "dynamic-enabled",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        use strum::VariantArray;

        let trimmed = input.trim();
        if let Ok(raw) = trimmed.parse::<i32>() {
            return Mode::from_raw(raw).map_err(|_| ParseModeError(input.to_string()));
        }

        let name = trimmed.to_ascii_lowercase();
        Mode::VARIANTS
            .iter()
            .copied()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| ParseModeError(input.to_string()))
    }
}

/// A raw mode value outside of the enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMode(pub i32);

impl Display for InvalidMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a valid frame generation mode (expected 0..=3)", self.0)
    }
}

impl Error for InvalidMode {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseModeError(String);

impl Display for ParseModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} is not a frame generation mode", self.0)
    }
}

impl Error for ParseModeError {}
