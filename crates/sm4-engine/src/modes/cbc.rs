//! Cipher block chaining mode.
//!
//! `C_i = E(P_i ⊕ C_{i-1})` with `C_{-1} = IV`. Encryption is strictly
//! sequential; each decrypted block needs only its predecessor's ciphertext.

use sm4_core::{decrypt_block, encrypt_block, xor_in_place, Block, RoundKeys, BLOCK_SIZE};

use super::{check_aligned, load_block};
use crate::config::Mode;
use crate::error::CipherError;

/// Encrypts block-aligned data in place.
pub fn encrypt(
    round_keys: &RoundKeys,
    iv: &Block,
    mut plaintext: Vec<u8>,
) -> Result<Vec<u8>, CipherError> {
    check_aligned(Mode::Cbc, &plaintext)?;
    let mut prev = *iv;
    for chunk in plaintext.chunks_exact_mut(BLOCK_SIZE) {
        xor_in_place(chunk, &prev);
        prev = encrypt_block(&load_block(chunk), round_keys);
        chunk.copy_from_slice(&prev);
    }
    Ok(plaintext)
}

/// Decrypts block-aligned data in place.
pub fn decrypt(
    round_keys: &RoundKeys,
    iv: &Block,
    mut ciphertext: Vec<u8>,
) -> Result<Vec<u8>, CipherError> {
    check_aligned(Mode::Cbc, &ciphertext)?;
    let mut prev = *iv;
    for chunk in ciphertext.chunks_exact_mut(BLOCK_SIZE) {
        let block = load_block(chunk);
        let mut plain = decrypt_block(&block, round_keys);
        xor_in_place(&mut plain, &prev);
        chunk.copy_from_slice(&plain);
        prev = block;
    }
    Ok(ciphertext)
}
