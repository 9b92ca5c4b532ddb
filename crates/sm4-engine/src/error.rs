//! Error taxonomy for engine operations.

use sm4_core::{Direction, InvalidLength};
use thiserror::Error;

use crate::config::Mode;

/// Invalid or missing key/IV settings. Raised before any cipher work starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No key was supplied.
    #[error("key is not set")]
    MissingKey,
    /// No IV was supplied.
    #[error("IV is not set")]
    MissingIv,
    /// Key is not 16 bytes.
    #[error("key must be 16 bytes, got {actual}")]
    KeyLength {
        /// Supplied length in bytes.
        actual: usize,
    },
    /// IV is not 16 bytes.
    #[error("IV must be 16 bytes, got {actual}")]
    IvLength {
        /// Supplied length in bytes.
        actual: usize,
    },
}

impl ConfigError {
    pub(crate) fn key_length(err: InvalidLength) -> Self {
        ConfigError::KeyLength { actual: err.actual }
    }

    pub(crate) fn iv_length(err: InvalidLength) -> Self {
        ConfigError::IvLength { actual: err.actual }
    }
}

/// Trailing padding of a decrypted ECB/CBC message is not well formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PaddingError {
    /// Last byte is 0 or larger than the block size.
    #[error("pad length byte {0:#04x} is out of range 1..=16")]
    InvalidPadByte(u8),
    /// Fewer than `n` trailing bytes hold the value `n`.
    #[error("last {0} bytes do not all equal {0}")]
    InconsistentPad(u8),
}

/// Every failure the engine surfaces to its caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Key or IV missing or of the wrong length.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    /// Mode name is not one of ECB, CBC, CFB, OFB.
    #[error("unsupported mode `{0}` (expected ECB, CBC, CFB or OFB)")]
    UnsupportedMode(String),
    /// Invalid padding found while decrypting.
    #[error("padding error: {0}")]
    Padding(#[from] PaddingError),
    /// Block-mode input is empty or not a multiple of the block size.
    #[error("{mode} input length {len} is not a non-zero multiple of 16 bytes")]
    MalformedCiphertext {
        /// Mode that rejected the input.
        mode: Mode,
        /// Offending length in bytes.
        len: usize,
    },
    /// Round trip did not reproduce the input.
    #[error("round-trip verification failed ({mode} {direction})")]
    VerificationMismatch {
        /// Configured mode.
        mode: Mode,
        /// Operation whose output failed verification.
        direction: Direction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let padding = CipherError::from(PaddingError::InvalidPadByte(0));
        assert_eq!(
            padding.to_string(),
            "padding error: pad length byte 0x00 is out of range 1..=16"
        );

        let mismatch = CipherError::VerificationMismatch {
            mode: Mode::Cbc,
            direction: Direction::Encrypt,
        };
        assert_eq!(
            mismatch.to_string(),
            "round-trip verification failed (CBC encrypt)"
        );

        let config = CipherError::from(ConfigError::KeyLength { actual: 5 });
        assert_eq!(
            config.to_string(),
            "configuration error: key must be 16 bytes, got 5"
        );
    }
}
