use std::{fmt::Display, io};

use fgbridge_protocol::{InvalidMode, NativeResult};
use thiserror::Error;

/// Platform error code captured when loading or resolving failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorCode(pub Option<i32>);

impl ErrorCode {
    /// The platform error code libloading captured for `error`.
    ///
    /// Only Windows reports a numeric code for library loading, other platforms describe the
    /// failure in the error message instead.
    pub fn of(error: &libloading::Error) -> Self {
        let code = std::error::Error::source(error)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .and_then(io::Error::raw_os_error);

        ErrorCode(code)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => write!(f, "error code {code}"),
            None => f.write_str("no error code"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to load {library} ({code}): {source}")]
    LoadFailed {
        library: String,
        code: ErrorCode,
        #[source]
        source: libloading::Error,
    },

    #[error("failed to get {symbol} function address ({code}): {source}")]
    SymbolResolutionFailed {
        symbol: &'static str,
        code: ErrorCode,
        #[source]
        source: libloading::Error,
    },

    #[error("native library is not bound")]
    NotBound,

    #[error("operation is not supported by the native library")]
    Unsupported,

    #[error("native library rejected the argument")]
    BadArgument,

    #[error("native library returned an unrecognized result ({0})")]
    UnexpectedResult(i32),

    #[error("native library reported an unrecognized mode ({0})")]
    UnrecognizedMode(i32),

    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),

    #[error("missing {0} argument")]
    MissingArgument(&'static str),

    #[error("game is not ready")]
    HostNotReady,

    #[error("output target is null")]
    NullOutputTarget,
}

impl BridgeError {
    /// Maps a native result code, returning `Ok` only for success.
    pub fn check(result: NativeResult) -> Result<(), BridgeError> {
        match result {
            NativeResult::Success => Ok(()),
            NativeResult::Unsupported => Err(BridgeError::Unsupported),
            NativeResult::BadArgument => Err(BridgeError::BadArgument),
            NativeResult::Unrecognized(raw) => Err(BridgeError::UnexpectedResult(raw)),
        }
    }
}

#[cfg(test)]
mod test {
    use fgbridge_protocol::NativeResult;

    use super::{BridgeError, ErrorCode};

    #[test]
    fn maps_every_failure() {
        assert!(BridgeError::check(NativeResult::Success).is_ok());
        assert!(matches!(
            BridgeError::check(NativeResult::from_raw(0)),
            Err(BridgeError::Unsupported)
        ));
        assert!(matches!(
            BridgeError::check(NativeResult::from_raw(-1)),
            Err(BridgeError::BadArgument)
        ));
        assert!(matches!(
            BridgeError::check(NativeResult::from_raw(9)),
            Err(BridgeError::UnexpectedResult(9))
        ));
    }

    #[test]
    fn error_code_display() {
        assert_eq!("error code 126", ErrorCode(Some(126)).to_string());
        assert_eq!("no error code", ErrorCode(None).to_string());
    }

    #[test]
    fn code_comes_from_the_load_error() {
        let error = unsafe { libloading::Library::new("fgbridge-missing-library-for-tests.dll") }
            .unwrap_err();

        #[cfg(windows)]
        assert_eq!(ErrorCode(Some(126)), ErrorCode::of(&error));

        #[cfg(not(windows))]
        assert_eq!(ErrorCode(None), ErrorCode::of(&error));
    }
}
