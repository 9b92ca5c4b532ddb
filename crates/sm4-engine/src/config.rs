//! Immutable engine configuration.

use core::fmt;
use core::str::FromStr;

use sm4_core::{block_from_slice, Block, Sm4Key};

use crate::error::{CipherError, ConfigError};

/// Chaining mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook: blocks are independent.
    #[default]
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Full-block cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
}

impl Mode {
    /// All supported modes.
    pub const ALL: [Mode; 4] = [Mode::Ecb, Mode::Cbc, Mode::Cfb, Mode::Ofb];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
        }
    }

    /// Whether the mode pads plaintext to whole blocks.
    pub fn uses_padding(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CipherError::UnsupportedMode(s.to_string()))
    }
}

/// Key, IV and mode for one engine instance.
///
/// The IV is required for every mode, ECB included, where it is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherConfig {
    key: Sm4Key,
    iv: Block,
    mode: Mode,
}

impl CipherConfig {
    /// Validates raw key and IV bytes.
    pub fn new(key: &[u8], iv: &[u8], mode: Mode) -> Result<Self, CipherError> {
        let key = Sm4Key::try_from(key).map_err(ConfigError::key_length)?;
        let iv = block_from_slice(iv).map_err(ConfigError::iv_length)?;
        Ok(Self { key, iv, mode })
    }

    /// Resolves textual settings, where key and IV are taken as raw bytes.
    ///
    /// Empty strings count as unset. A missing mode means ECB.
    pub fn from_parts(
        key: Option<&str>,
        iv: Option<&str>,
        mode: Option<&str>,
    ) -> Result<Self, CipherError> {
        let key = key
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingKey)?;
        let iv = iv.filter(|v| !v.is_empty()).ok_or(ConfigError::MissingIv)?;
        let mode = match mode.map(str::trim).filter(|m| !m.is_empty()) {
            Some(name) => name.parse()?,
            None => Mode::default(),
        };
        Self::new(key.as_bytes(), iv.as_bytes(), mode)
    }

    /// Returns a copy with a different mode and the same key and IV.
    pub fn with_mode(&self, mode: Mode) -> Self {
        Self { mode, ..self.clone() }
    }

    /// Cipher key.
    pub fn key(&self) -> &Sm4Key {
        &self.key
    }

    /// Initialization vector.
    pub fn iv(&self) -> &Block {
        &self.iv
    }

    /// Chaining mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "1234123412341234";
    const IV: &str = "0000111122223333";

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("CBC".parse::<Mode>(), Ok(Mode::Cbc));
        assert_eq!("ofb".parse::<Mode>(), Ok(Mode::Ofb));
        assert_eq!(" Cfb ".parse::<Mode>(), Ok(Mode::Cfb));
        assert_eq!(
            "CTR".parse::<Mode>(),
            Err(CipherError::UnsupportedMode("CTR".into()))
        );
    }

    #[test]
    fn mode_defaults_to_ecb() {
        assert_eq!(Mode::default(), Mode::Ecb);
        for mode in [None, Some(""), Some("  ")] {
            let config = CipherConfig::from_parts(Some(KEY), Some(IV), mode).unwrap();
            assert_eq!(config.mode(), Mode::Ecb);
        }
    }

    #[test]
    fn from_parts_reports_missing_settings() {
        assert_eq!(
            CipherConfig::from_parts(None, Some(IV), None),
            Err(ConfigError::MissingKey.into())
        );
        assert_eq!(
            CipherConfig::from_parts(Some(KEY), Some(""), None),
            Err(ConfigError::MissingIv.into())
        );
    }

    #[test]
    fn lengths_are_validated_even_for_ecb() {
        assert_eq!(
            CipherConfig::new(b"short", b"0000111122223333", Mode::Ecb),
            Err(ConfigError::KeyLength { actual: 5 }.into())
        );
        assert_eq!(
            CipherConfig::new(b"1234123412341234", b"0000", Mode::Ecb),
            Err(ConfigError::IvLength { actual: 4 }.into())
        );
    }

    #[test]
    fn unknown_mode_is_reported_before_lengths() {
        let result = CipherConfig::from_parts(Some("k"), Some("v"), Some("XTS"));
        assert_eq!(result, Err(CipherError::UnsupportedMode("XTS".into())));
    }

    #[test]
    fn with_mode_keeps_key_and_iv() {
        let config = CipherConfig::new(KEY.as_bytes(), IV.as_bytes(), Mode::Ecb).unwrap();
        let cbc = config.with_mode(Mode::Cbc);
        assert_eq!(cbc.mode(), Mode::Cbc);
        assert_eq!(cbc.key(), config.key());
        assert_eq!(cbc.iv(), config.iv());
    }
}
