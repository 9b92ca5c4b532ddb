//! Round-trip verification gate.

use log::warn;
use sm4_core::Direction;

use crate::config::Mode;
use crate::engine::Sm4Engine;
use crate::error::CipherError;

/// Variable-length cipher the verifier can wrap.
pub trait MessageCipher {
    /// Mode reported in verification errors.
    fn mode(&self) -> Mode;
    /// Encrypts a message.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;
    /// Decrypts a message.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl MessageCipher for Sm4Engine {
    fn mode(&self) -> Mode {
        Sm4Engine::mode(self)
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        Sm4Engine::encrypt(self, plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        Sm4Engine::decrypt(self, ciphertext)
    }
}

/// Releases output only after running it back through the inverse operation
/// and getting the input back byte for byte.
///
/// This guards against a misconfigured or faulty cipher path. It is not an
/// integrity check on received ciphertext.
#[derive(Clone, Debug)]
pub struct Verifier<C = Sm4Engine> {
    cipher: C,
}

impl<C: MessageCipher> Verifier<C> {
    /// Wraps `cipher`.
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    /// Wrapped cipher.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Encrypts, then decrypts the result and compares it with `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let ciphertext = self.cipher.encrypt(plaintext)?;
        let recovered = self.cipher.decrypt(&ciphertext);
        self.release(ciphertext, recovered, plaintext, Direction::Encrypt)
    }

    /// Decrypts, then re-encrypts the result and compares it with `ciphertext`.
    ///
    /// Errors from the decryption itself (bad padding, malformed input) are
    /// returned unchanged because they describe the input.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let plaintext = self.cipher.decrypt(ciphertext)?;
        let reencrypted = self.cipher.encrypt(&plaintext);
        self.release(plaintext, reencrypted, ciphertext, Direction::Decrypt)
    }

    fn release(
        &self,
        output: Vec<u8>,
        check: Result<Vec<u8>, CipherError>,
        input: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, CipherError> {
        let mode = self.cipher.mode();
        match check {
            Ok(back) if back == input => Ok(output),
            Ok(_) => {
                warn!("{mode} {direction} output did not round-trip");
                Err(CipherError::VerificationMismatch { mode, direction })
            }
            Err(err) => {
                warn!("{mode} {direction} round trip failed: {err}");
                Err(CipherError::VerificationMismatch { mode, direction })
            }
        }
    }
}
