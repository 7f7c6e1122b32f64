//! The native library's exported interface.
//!
//! Both functions use the C calling convention and exchange the mode and result enums as 32-bit
//! integers. The getter takes its out-parameter by reference, which is a pointer at the ABI level.

/// Library bound when no other name is configured.
pub const DEFAULT_LIBRARY: &str = "dlss-enabler.dll";

pub const GET_MODE_SYMBOL: &str = "GetFrameGenerationMode";
pub const SET_MODE_SYMBOL: &str = "SetFrameGenerationMode";

/// `DLSS_ENABLER_RESULT GetFrameGenerationMode(DLSS_ENABLER_FRAMEGENERATION_MODE& mode)`
pub type GetFrameGenerationModeFn = unsafe extern "C" fn(mode: *mut i32) -> i32;

/// `DLSS_ENABLER_RESULT SetFrameGenerationMode(DLSS_ENABLER_FRAMEGENERATION_MODE mode)`
pub type SetFrameGenerationModeFn = unsafe extern "C" fn(mode: i32) -> i32;

/// Written into the getter's out-parameter before the call so that a library that reports
/// success without writing a value is caught as an unrecognized mode.
pub(crate) const UNSET_MODE: i32 = -1;
