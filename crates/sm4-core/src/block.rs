//! Block representation helpers.

use thiserror::Error;

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// SM4 block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// A byte slice did not have the fixed length a key or block requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("expected {expected} bytes, got {actual}")]
pub struct InvalidLength {
    /// Required length.
    pub expected: usize,
    /// Length that was supplied.
    pub actual: usize,
}

/// Copies a 16-byte slice into a [`Block`].
pub fn block_from_slice(bytes: &[u8]) -> Result<Block, InvalidLength> {
    bytes.try_into().map_err(|_| InvalidLength {
        expected: BLOCK_SIZE,
        actual: bytes.len(),
    })
}

/// XORs `rhs` into `dst`. Only the overlapping prefix is touched, which lets
/// callers combine a trailing partial chunk with a full keystream block.
#[inline]
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
