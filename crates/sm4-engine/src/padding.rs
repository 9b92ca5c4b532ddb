//! PKCS#7-style padding for the block-aligned modes (ECB, CBC).
//!
//! A full block of padding is appended when the input is already aligned, so
//! padded output is never empty and removal is always unambiguous.

use sm4_core::BLOCK_SIZE;

use crate::error::PaddingError;

/// Appends `n` bytes of value `n`, with `n` in `1..=16`.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let n = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + n);
    padded.extend_from_slice(data);
    padded.resize(data.len() + n, n as u8);
    padded
}

/// Strips padding added by [`pad`].
pub fn unpad(data: &[u8]) -> Result<&[u8], PaddingError> {
    let Some(&last) = data.last() else {
        return Err(PaddingError::InvalidPadByte(0));
    };
    let n = usize::from(last);
    if n == 0 || n > BLOCK_SIZE || n > data.len() {
        return Err(PaddingError::InvalidPadByte(last));
    }
    let (body, tail) = data.split_at(data.len() - n);
    if tail.iter().any(|&b| b != last) {
        return Err(PaddingError::InconsistentPad(last));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_input_to_one_block() {
        let padded = pad(b"hello");
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn aligned_input_gets_a_full_block() {
        assert_eq!(pad(&[]), vec![16u8; 16]);
        let padded = pad(&[1u8; 32]);
        assert_eq!(padded.len(), 48);
        assert_eq!(&padded[32..], &[16u8; 16]);
    }

    #[test]
    fn unpad_reverses_pad() {
        for len in 0..=40 {
            let data: Vec<u8> = (0..len as u8).collect();
            let padded = pad(&data);
            assert_eq!(padded.len() % BLOCK_SIZE, 0);
            assert!(padded.len() > data.len());
            assert_eq!(unpad(&padded), Ok(&data[..]));
        }
    }

    #[test]
    fn rejects_out_of_range_pad_byte() {
        let mut block = [3u8; 16];
        block[15] = 0;
        assert_eq!(unpad(&block), Err(PaddingError::InvalidPadByte(0)));
        block[15] = 17;
        assert_eq!(unpad(&block), Err(PaddingError::InvalidPadByte(17)));
        assert_eq!(unpad(&[]), Err(PaddingError::InvalidPadByte(0)));
    }

    #[test]
    fn rejects_inconsistent_tail() {
        let mut block = [4u8; 16];
        block[13] = 9;
        assert_eq!(unpad(&block), Err(PaddingError::InconsistentPad(4)));
    }
}
