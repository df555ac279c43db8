//! Exit code definitions for h3cp
//!
//! Scripts rely on these values. Changing an existing code is a breaking change.

use h3cp_core::Error;

/// Exit codes for the h3cp binaries.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: wrong argument count, invalid path combination, etc.
    UsageError = 2,

    /// The store could not be initialized from the given target
    StoreInitError = 3,

    /// The store's read or write call failed
    TransferError = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::StoreInitError),
            4 => Some(Self::TransferError),
            _ => None,
        }
    }

    /// Map a core error to its exit code
    pub const fn from_error(error: &Error) -> Self {
        match Self::from_i32(error.exit_code()) {
            Some(code) => code,
            None => Self::GeneralError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::StoreInitError.as_i32(), 3);
        assert_eq!(ExitCode::TransferError.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_from_i32() {
        assert_eq!(ExitCode::from_i32(0), Some(ExitCode::Success));
        assert_eq!(ExitCode::from_i32(3), Some(ExitCode::StoreInitError));
        assert_eq!(ExitCode::from_i32(4), Some(ExitCode::TransferError));
        assert_eq!(ExitCode::from_i32(99), None);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&Error::InvalidPath("x".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from_error(&Error::StoreInit("x".into())),
            ExitCode::StoreInitError
        );
        assert_eq!(
            ExitCode::from_error(&Error::Transfer("x".into())),
            ExitCode::TransferError
        );
    }
}
