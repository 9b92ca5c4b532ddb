//! Reference SM4 block cipher used by the sm4 engine and CLI.
//!
//! This crate follows GB/T 32907-2016 and provides:
//! - Key schedule expanding a 128-bit key into 32 round keys.
//! - Single-block encryption and decryption.
//! - Public types shared across the workspace.
//!
//! S-box lookups index a table with secret data, so the implementation is not
//! constant-time; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{block_from_slice, xor_in_place, Block, InvalidLength, BLOCK_SIZE};
pub use crate::cipher::{crypt_block, decrypt_block, encrypt_block, expand_key, Direction};
pub use crate::key::{RoundKeys, Sm4Key, ROUNDS};
