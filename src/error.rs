//! Error types for codec operations.

use thiserror::Error;

use crate::codec::opus::ffi;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for codec operations.
///
/// Variants that originate in libopus carry the library's raw negative
/// status code unchanged, so callers that speak the C convention can
/// recover it through [`Error::status`].
#[derive(Error, Debug)]
pub enum Error {
    /// Handle creation rejected (unsupported sample rate, channel count
    /// or application combination).
    #[error("opus: create failed: {message} (code={code})")]
    CreateFailed { code: i32, message: String },

    /// Operation requires an encoder or decoder handle that does not exist.
    #[error("opus: {0} is not initialized")]
    NotInitialized(&'static str),

    /// Encoding failed inside libopus.
    #[error("opus: encode failed: {message} (code={code})")]
    EncodeFailed { code: i32, message: String },

    /// Decoding failed inside libopus (corrupt packet, buffer too small).
    #[error("opus: decode failed: {message} (code={code})")]
    DecodeFailed { code: i32, message: String },

    /// CTL request rejected.
    #[error("opus: set option failed: {message} (code={code})")]
    SetOptionFailed { code: i32, message: String },

    /// Odd byte count presented for i16 sample conversion.
    #[error("pcm: byte length {0} is not a multiple of 2")]
    OddLength(usize),
}

impl Error {
    /// Wraps a raw libopus status code from handle creation.
    pub(crate) fn create(code: i32) -> Self {
        Error::CreateFailed {
            code,
            message: ffi::error_string(code),
        }
    }

    /// Wraps a raw libopus status code from an encode call.
    pub(crate) fn encode(code: i32) -> Self {
        Error::EncodeFailed {
            code,
            message: ffi::error_string(code),
        }
    }

    /// Wraps a raw libopus status code from a decode call.
    pub(crate) fn decode(code: i32) -> Self {
        Error::DecodeFailed {
            code,
            message: ffi::error_string(code),
        }
    }

    /// Wraps a raw libopus status code from a CTL call.
    pub(crate) fn set_option(code: i32) -> Self {
        Error::SetOptionFailed {
            code,
            message: ffi::error_string(code),
        }
    }

    /// Returns the negative status code for this error.
    ///
    /// Errors carrying a libopus code return it unchanged; the others map
    /// onto the closest libopus convention (`OPUS_INVALID_STATE` for a
    /// missing handle, `OPUS_BAD_ARG` for malformed input).
    pub fn status(&self) -> i32 {
        match self {
            Error::CreateFailed { code, .. }
            | Error::EncodeFailed { code, .. }
            | Error::DecodeFailed { code, .. }
            | Error::SetOptionFailed { code, .. } => *code,
            Error::NotInitialized(_) => ffi::OPUS_INVALID_STATE,
            Error::OddLength(_) => ffi::OPUS_BAD_ARG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::NotInitialized("encoder").status(),
            ffi::OPUS_INVALID_STATE
        );
        assert_eq!(Error::OddLength(3).status(), ffi::OPUS_BAD_ARG);
        assert_eq!(Error::create(ffi::OPUS_BAD_ARG).status(), ffi::OPUS_BAD_ARG);
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotInitialized("decoder");
        assert!(format!("{}", err).contains("not initialized"));

        let err = Error::OddLength(7);
        assert!(format!("{}", err).contains("7"));
    }
}
