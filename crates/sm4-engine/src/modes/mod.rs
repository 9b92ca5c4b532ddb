//! Chaining-mode drivers built on the single-block transform.
//!
//! ECB and CBC take ownership of input that is already a non-empty multiple of
//! the block size and transform it in place; padding is applied by the engine.
//! CFB and OFB process any length and XOR a trailing partial chunk with only
//! as many keystream bytes as it needs.

pub mod cbc;
pub mod cfb;
pub mod ecb;
pub mod ofb;

use sm4_core::{Block, BLOCK_SIZE};

use crate::config::Mode;
use crate::error::CipherError;

fn check_aligned(mode: Mode, data: &[u8]) -> Result<(), CipherError> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(CipherError::MalformedCiphertext {
            mode,
            len: data.len(),
        });
    }
    Ok(())
}

fn load_block(chunk: &[u8]) -> Block {
    core::array::from_fn(|i| chunk[i])
}
