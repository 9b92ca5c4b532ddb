//! SM4 round transformations.

use crate::sbox::sbox;

/// Non-linear substitution `τ`: the S-box applied to each byte of a word.
#[inline]
pub fn tau(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Linear diffusion `L` used by the round function.
#[inline]
pub fn linear(b: u32) -> u32 {
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Linear diffusion `L'` used by the key schedule.
#[inline]
pub fn linear_key(b: u32) -> u32 {
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// Round mixer `T = L ∘ τ`.
#[inline]
pub fn t(word: u32) -> u32 {
    linear(tau(word))
}

/// Key schedule mixer `T' = L' ∘ τ`.
#[inline]
pub fn t_key(word: u32) -> u32 {
    linear_key(tau(word))
}
