//! Full-block cipher feedback mode.
//!
//! `S_i = E(C_{i-1})` with `C_{-1} = IV` and `C_i = P_i ⊕ S_i`. The feedback is
//! always ciphertext, so decryption recomputes the keystream from the received
//! bytes and resynchronises after a corrupted block. No padding is used.

use sm4_core::{encrypt_block, xor_in_place, Block, Direction, RoundKeys, BLOCK_SIZE};

fn transform(round_keys: &RoundKeys, iv: &Block, data: &[u8], direction: Direction) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut feedback = *iv;
    for chunk in data.chunks(BLOCK_SIZE) {
        let keystream = encrypt_block(&feedback, round_keys);
        let start = out.len();
        out.extend_from_slice(chunk);
        xor_in_place(&mut out[start..], &keystream);
        // A short chunk can only be the last one, so the stale tail of
        // `feedback` is never encrypted.
        let cipher_chunk = match direction {
            Direction::Encrypt => &out[start..],
            Direction::Decrypt => chunk,
        };
        feedback[..cipher_chunk.len()].copy_from_slice(cipher_chunk);
    }
    out
}

/// Encrypts data of any length.
pub fn encrypt(round_keys: &RoundKeys, iv: &Block, plaintext: &[u8]) -> Vec<u8> {
    transform(round_keys, iv, plaintext, Direction::Encrypt)
}

/// Decrypts data of any length.
pub fn decrypt(round_keys: &RoundKeys, iv: &Block, ciphertext: &[u8]) -> Vec<u8> {
    transform(round_keys, iv, ciphertext, Direction::Decrypt)
}
