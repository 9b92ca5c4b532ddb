//! Electronic codebook mode.
//!
//! Every block is transformed on its own, so equal plaintext blocks give equal
//! ciphertext blocks under one key. The IV is not used.

use sm4_core::{crypt_block, Direction, RoundKeys, BLOCK_SIZE};

use super::{check_aligned, load_block};
use crate::config::Mode;
use crate::error::CipherError;

fn transform(
    round_keys: &RoundKeys,
    mut data: Vec<u8>,
    direction: Direction,
) -> Result<Vec<u8>, CipherError> {
    check_aligned(Mode::Ecb, &data)?;
    for chunk in data.chunks_exact_mut(BLOCK_SIZE) {
        let block = crypt_block(&load_block(chunk), round_keys, direction);
        chunk.copy_from_slice(&block);
    }
    Ok(data)
}

/// Encrypts block-aligned data in place.
pub fn encrypt(round_keys: &RoundKeys, plaintext: Vec<u8>) -> Result<Vec<u8>, CipherError> {
    transform(round_keys, plaintext, Direction::Encrypt)
}

/// Decrypts block-aligned data in place.
pub fn decrypt(round_keys: &RoundKeys, ciphertext: Vec<u8>) -> Result<Vec<u8>, CipherError> {
    transform(round_keys, ciphertext, Direction::Decrypt)
}
