//! Key types for SM4.

use crate::block::InvalidLength;

/// Key size in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of rounds, and therefore of round keys.
pub const ROUNDS: usize = 32;

/// SM4 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm4Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Sm4Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Sm4Key {
    type Error = InvalidLength;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value.try_into().map_err(|_| InvalidLength {
            expected: KEY_SIZE,
            actual: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

/// Expanded round keys for SM4, in encryption order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [u32; ROUNDS]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..32).
    #[inline]
    pub fn get(&self, round: usize) -> u32 {
        self.0[round]
    }

    /// Iterates the round keys in encryption order.
    pub fn forward(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Iterates the round keys in decryption order.
    pub fn reverse(&self) -> impl Iterator<Item = u32> + '_ {
        self.forward().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_slice_requires_sixteen_bytes() {
        let key = Sm4Key::try_from(&b"1234123412341234"[..]).expect("valid key");
        assert_eq!(&key.0, b"1234123412341234");

        let err = Sm4Key::try_from(&b"short"[..]).unwrap_err();
        assert_eq!(err.actual, 5);
        assert!(Sm4Key::try_from(&[0u8; 17][..]).is_err());
    }

    #[test]
    fn reverse_walks_backwards() {
        let mut words = [0u32; ROUNDS];
        for (i, w) in words.iter_mut().enumerate() {
            *w = i as u32;
        }
        let rks = RoundKeys(words);
        let rev: Vec<u32> = rks.reverse().collect();
        assert_eq!(rev.first(), Some(&31));
        assert_eq!(rev.last(), Some(&0));
        assert_eq!(rks.get(5), 5);
    }
}
