use std::fmt::Display;

/// Outcome reported by every call into the native library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeResult {
    Success,
    Unsupported,
    BadArgument,
    /// A value the native library is not documented to return.
    Unrecognized(i32),
}

impl NativeResult {
    pub const SUCCESS: i32 = 1;
    pub const FAIL_UNSUPPORTED: i32 = 0;
    pub const FAIL_BAD_ARGUMENT: i32 = -1;

    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            Self::SUCCESS => Self::Success,
            Self::FAIL_UNSUPPORTED => Self::Unsupported,
            Self::FAIL_BAD_ARGUMENT => Self::BadArgument,
            other => Self::Unrecognized(other),
        }
    }
}

impl Display for NativeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Unsupported => f.write_str("unsupported"),
            Self::BadArgument => f.write_str("bad argument"),
            Self::Unrecognized(raw) => write!(f, "unrecognized result {raw}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::NativeResult;

    #[test]
    fn only_one_is_success() {
        assert_eq!(NativeResult::Success, NativeResult::from_raw(1));

        for raw in [0, -1, 2, -2, i32::MAX] {
            assert_ne!(NativeResult::Success, NativeResult::from_raw(raw), "{raw}");
        }
    }

    #[test]
    fn unknown_values_are_preserved() {
        assert_eq!(NativeResult::Unrecognized(42), NativeResult::from_raw(42));
        assert_eq!(NativeResult::BadArgument, NativeResult::from_raw(-1));
    }
}
