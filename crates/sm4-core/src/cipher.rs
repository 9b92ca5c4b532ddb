//! SM4 key schedule and block encryption/decryption.

use crate::block::Block;
use crate::key::{RoundKeys, Sm4Key, ROUNDS};
use crate::round::{t, t_key};
use crate::sbox::{CK, FK};

/// Direction of a block operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Round keys applied in schedule order.
    Encrypt,
    /// Round keys applied in reverse order.
    Decrypt,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        })
    }
}

fn load_words(bytes: &[u8; 16]) -> [u32; 4] {
    core::array::from_fn(|i| {
        u32::from_be_bytes([
            bytes[4 * i],
            bytes[4 * i + 1],
            bytes[4 * i + 2],
            bytes[4 * i + 3],
        ])
    })
}

/// Expands a 128-bit key into 32 round keys.
pub fn expand_key(key: &Sm4Key) -> RoundKeys {
    let mut k = load_words(&key.0);
    for (word, fk) in k.iter_mut().zip(FK) {
        *word ^= fk;
    }

    let mut round_keys = [0u32; ROUNDS];
    for (i, rk) in round_keys.iter_mut().enumerate() {
        let next = k[0] ^ t_key(k[1] ^ k[2] ^ k[3] ^ CK[i]);
        k = [k[1], k[2], k[3], next];
        *rk = next;
    }

    RoundKeys(round_keys)
}

fn rounds(block: &Block, keys: impl Iterator<Item = u32>) -> Block {
    let mut x = load_words(block);
    for rk in keys {
        let next = x[0] ^ t(x[1] ^ x[2] ^ x[3] ^ rk);
        x = [x[1], x[2], x[3], next];
    }

    // Final reverse transform R: output is (X35, X34, X33, X32).
    let mut out = [0u8; 16];
    for (chunk, word) in out.chunks_exact_mut(4).zip(x.iter().rev()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Runs the block transform in the requested direction.
pub fn crypt_block(block: &Block, round_keys: &RoundKeys, direction: Direction) -> Block {
    match direction {
        Direction::Encrypt => rounds(block, round_keys.forward()),
        Direction::Decrypt => rounds(block, round_keys.reverse()),
    }
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt_block(block, round_keys, Direction::Encrypt)
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    crypt_block(block, round_keys, Direction::Decrypt)
}
