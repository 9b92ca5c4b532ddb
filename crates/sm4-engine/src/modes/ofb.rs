//! Output feedback mode.
//!
//! `S_i = E(S_{i-1})` with `S_{-1} = IV` and `C_i = P_i ⊕ S_i` in both
//! directions. The keystream depends only on key and IV, so reusing an IV
//! with the same key leaks the XOR of the two plaintexts.

use sm4_core::{encrypt_block, xor_in_place, Block, RoundKeys, BLOCK_SIZE};

/// Generates `len` keystream bytes.
pub fn keystream(round_keys: &RoundKeys, iv: &Block, len: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(len.next_multiple_of(BLOCK_SIZE));
    let mut state = *iv;
    while stream.len() < len {
        state = encrypt_block(&state, round_keys);
        stream.extend_from_slice(&state);
    }
    stream.truncate(len);
    stream
}

// Encryption and decryption are the same XOR with the keystream.
fn apply(round_keys: &RoundKeys, iv: &Block, data: &[u8]) -> Vec<u8> {
    let mut out = keystream(round_keys, iv, data.len());
    xor_in_place(&mut out, data);
    out
}

/// Encrypts data of any length.
pub fn encrypt(round_keys: &RoundKeys, iv: &Block, plaintext: &[u8]) -> Vec<u8> {
    apply(round_keys, iv, plaintext)
}

/// Decrypts data of any length.
pub fn decrypt(round_keys: &RoundKeys, iv: &Block, ciphertext: &[u8]) -> Vec<u8> {
    apply(round_keys, iv, ciphertext)
}
