//! PCM (Pulse Code Modulation) sample format conversion.
//!
//! Converts between raw little-endian byte streams and i16 sample streams,
//! the interchange formats on either side of the codec. Both directions are
//! exact: `samples_to_bytes(bytes_to_samples(b)?) == b` for any even-length
//! `b`, and the reverse holds for any sample slice.

use crate::error::{Error, Result};

/// Reinterprets consecutive little-endian byte pairs as i16 samples.
///
/// An odd byte count is rejected with [`Error::OddLength`] rather than
/// truncated; a trailing byte always indicates a framing bug upstream.
pub fn bytes_to_samples(bytes: &[u8]) -> Result<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        return Err(Error::OddLength(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Decomposes each i16 sample into two little-endian bytes.
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
