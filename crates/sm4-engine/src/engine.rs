//! Engine instance owning a configuration and its derived round keys.

use log::{debug, trace};
use sm4_core::{expand_key, RoundKeys};

use crate::config::{CipherConfig, Mode};
use crate::error::CipherError;
use crate::modes::{cbc, cfb, ecb, ofb};
use crate::padding::{pad, unpad};

/// SM4 cipher bound to one key, IV and mode.
///
/// Round keys are derived once in [`Sm4Engine::new`] and only read afterwards,
/// so a shared engine can serve concurrent callers. To change the
/// configuration, build a new engine.
#[derive(Clone, Debug)]
pub struct Sm4Engine {
    config: CipherConfig,
    round_keys: RoundKeys,
}

impl Sm4Engine {
    /// Derives round keys for `config`.
    pub fn new(config: CipherConfig) -> Self {
        let round_keys = expand_key(config.key());
        debug!("sm4 engine ready, mode {}", config.mode());
        Self { config, round_keys }
    }

    /// Configured chaining mode.
    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    /// Round keys derived from the configured key.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts `plaintext`. ECB and CBC output is padded to whole blocks;
    /// CFB and OFB output has the plaintext's length.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        trace!("{} encrypt, {} bytes", self.mode(), plaintext.len());
        let rks = &self.round_keys;
        let iv = self.config.iv();
        match self.mode() {
            Mode::Ecb => ecb::encrypt(rks, pad(plaintext)),
            Mode::Cbc => cbc::encrypt(rks, iv, pad(plaintext)),
            Mode::Cfb => Ok(cfb::encrypt(rks, iv, plaintext)),
            Mode::Ofb => Ok(ofb::encrypt(rks, iv, plaintext)),
        }
    }

    /// Decrypts `ciphertext`, removing padding for ECB and CBC.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        trace!("{} decrypt, {} bytes", self.mode(), ciphertext.len());
        let rks = &self.round_keys;
        let iv = self.config.iv();
        match self.mode() {
            Mode::Ecb => strip_padding(ecb::decrypt(rks, ciphertext.to_vec())?),
            Mode::Cbc => strip_padding(cbc::decrypt(rks, iv, ciphertext.to_vec())?),
            Mode::Cfb => Ok(cfb::decrypt(rks, iv, ciphertext)),
            Mode::Ofb => Ok(ofb::decrypt(rks, iv, ciphertext)),
        }
    }
}

fn strip_padding(mut padded: Vec<u8>) -> Result<Vec<u8>, CipherError> {
    let len = unpad(&padded)?.len();
    padded.truncate(len);
    Ok(padded)
}

/// One-shot encryption with explicit key, IV and mode.
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    iv: &[u8],
    mode: Mode,
) -> Result<Vec<u8>, CipherError> {
    Sm4Engine::new(CipherConfig::new(key, iv, mode)?).encrypt(plaintext)
}

/// One-shot decryption with explicit key, IV and mode.
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
    mode: Mode,
) -> Result<Vec<u8>, CipherError> {
    Sm4Engine::new(CipherConfig::new(key, iv, mode)?).decrypt(ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, PaddingError};

    const KEY: &[u8] = b"1234123412341234";
    const IV: &[u8] = b"0000111122223333";

    fn engine(mode: Mode) -> Sm4Engine {
        Sm4Engine::new(CipherConfig::new(KEY, IV, mode).expect("valid config"))
    }

    #[test]
    fn cbc_hello_round_trip() {
        let ct = encrypt(b"hello", KEY, IV, Mode::Cbc).unwrap();
        assert_eq!(ct.len(), 16);
        assert_eq!(decrypt(&ct, KEY, IV, Mode::Cbc).unwrap(), b"hello");
    }

    #[test]
    fn output_lengths_follow_mode() {
        for len in [0usize, 1, 15, 16, 17, 32] {
            let data = vec![0xa5u8; len];
            for mode in Mode::ALL {
                let ct = engine(mode).encrypt(&data).unwrap();
                if mode.uses_padding() {
                    assert_eq!(ct.len(), (len / 16 + 1) * 16, "{mode} len {len}");
                } else {
                    assert_eq!(ct.len(), len, "{mode} len {len}");
                }
                let pt = engine(mode).decrypt(&ct).unwrap();
                assert_eq!(pt, data, "{mode} len {len}");
            }
        }
    }

    #[test]
    fn ecb_ignores_iv() {
        let other = Sm4Engine::new(CipherConfig::new(KEY, &[0u8; 16], Mode::Ecb).unwrap());
        let data = b"sixteen byte msg and more";
        assert_eq!(
            engine(Mode::Ecb).encrypt(data).unwrap(),
            other.encrypt(data).unwrap()
        );
    }

    #[test]
    fn chained_modes_depend_on_iv() {
        let data = b"sixteen byte msg and more";
        for mode in [Mode::Cbc, Mode::Cfb, Mode::Ofb] {
            let other = Sm4Engine::new(CipherConfig::new(KEY, &[0u8; 16], mode).unwrap());
            assert_ne!(
                engine(mode).encrypt(data).unwrap(),
                other.encrypt(data).unwrap(),
                "{mode}"
            );
        }
    }

    #[test]
    fn bad_padding_is_reported() {
        let engine = engine(Mode::Ecb);
        // A zero block encrypted without padding decrypts to pad byte 0x00.
        let raw = ecb::encrypt(engine.round_keys(), vec![0u8; 16]).unwrap();
        assert_eq!(
            engine.decrypt(&raw),
            Err(CipherError::Padding(PaddingError::InvalidPadByte(0)))
        );
    }

    #[test]
    fn corrupted_ciphertext_never_decrypts_to_original() {
        for mode in Mode::ALL {
            let engine = engine(mode);
            let plaintext = b"corrupt me, please";
            let mut ct = engine.encrypt(plaintext).unwrap();
            let last = ct.len() - 1;
            ct[last] ^= 0x01;
            match engine.decrypt(&ct) {
                Ok(pt) => assert_ne!(pt, plaintext, "{mode}"),
                Err(err) => assert!(matches!(err, CipherError::Padding(_)), "{mode}: {err}"),
            }
        }
    }

    #[test]
    fn one_shot_functions_validate_config() {
        assert_eq!(
            encrypt(b"x", b"short", IV, Mode::Ofb),
            Err(ConfigError::KeyLength { actual: 5 }.into())
        );
        assert_eq!(
            decrypt(b"x", KEY, b"", Mode::Cfb),
            Err(ConfigError::IvLength { actual: 0 }.into())
        );
    }

    #[test]
    fn truncated_block_ciphertext_is_malformed() {
        let ct = engine(Mode::Cbc).encrypt(b"hello").unwrap();
        assert_eq!(
            engine(Mode::Cbc).decrypt(&ct[..15]),
            Err(CipherError::MalformedCiphertext {
                mode: Mode::Cbc,
                len: 15
            })
        );
        assert!(matches!(
            engine(Mode::Ecb).decrypt(&[]),
            Err(CipherError::MalformedCiphertext { .. })
        ));
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sm4Engine>();

        let engine = std::sync::Arc::new(engine(Mode::Cbc));
        let expected = engine.encrypt(b"shared").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || engine.encrypt(b"shared").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
