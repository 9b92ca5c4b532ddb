//! SM4 engine: chaining modes, padding and round-trip verification.
//!
//! An [`Sm4Engine`] is built once from an immutable [`CipherConfig`] and owns
//! the round keys derived from it. [`Verifier`] layers the encrypt → decrypt →
//! compare gate on top of an engine without changing the primitives.
//!
//! ECB leaks equality of plaintext blocks. OFB and CFB keystreams repeat when
//! a key/IV pair is reused, exposing the XOR of the plaintexts. None of the
//! modes authenticate the ciphertext.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod engine;
mod error;
pub mod modes;
pub mod padding;
mod verify;

pub use crate::config::{CipherConfig, Mode};
pub use crate::engine::{decrypt, encrypt, Sm4Engine};
pub use crate::error::{CipherError, ConfigError, PaddingError};
pub use crate::verify::{MessageCipher, Verifier};
pub use sm4_core::{Block, Direction, RoundKeys, Sm4Key, BLOCK_SIZE};
