//! Opus decoder.

use std::ptr;

use super::ffi::{self, OpusDecoder as OpusDecoderHandle};
use crate::error::{Error, Result};

/// Longest frame libopus can produce: 120ms at 48kHz, per channel.
pub const MAX_FRAME_SIZE: i32 = 5760;

/// Safe owner of one native Opus decoder handle.
///
/// Symmetric to [`Encoder`](super::Encoder): the handle lives from
/// [`Decoder::new`] until drop, packet input is borrowed per call and
/// decoded PCM is returned as an owned buffer.
pub struct Decoder {
    sample_rate: i32,
    channels: i32,
    handle: *mut OpusDecoderHandle,
}

// Safety: The decoder handle is not shared across threads.
unsafe impl Send for Decoder {}

impl Drop for Decoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_decoder_destroy(self.handle) };
    }
}

impl Decoder {
    /// Creates a new Opus decoder.
    ///
    /// # Parameters
    /// - `sample_rate`: Sample rate to decode at (8000, 12000, 16000, 24000, or 48000)
    /// - `channels`: Number of channels (1 or 2)
    pub fn new(sample_rate: i32, channels: i32) -> Result<Self> {
        let mut error: i32 = 0;
        let handle = unsafe { ffi::opus_decoder_create(sample_rate, channels, &mut error) };

        if handle.is_null() || error != ffi::OPUS_OK {
            return Err(Error::create(error));
        }

        Ok(Self {
            sample_rate,
            channels,
            handle,
        })
    }

    /// Returns the sample rate.
    pub fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    /// Returns the number of channels.
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Decodes one compressed packet into PCM samples.
    ///
    /// # Parameters
    /// - `packet`: Compressed packet. An empty packet invokes packet loss
    ///   concealment and synthesizes `frame_size` samples per channel.
    /// - `frame_size`: Number of samples per channel to reconstruct
    /// - `fec`: Request in-band forward error correction data from this
    ///   packet, for use when the previous packet was lost
    ///
    /// Returns `n * channels` samples, where `n` is the per-channel sample
    /// count reported by libopus (equal to `frame_size` for a matching
    /// packet).
    pub fn decode(&mut self, packet: &[u8], frame_size: i32, fec: bool) -> Result<Vec<i16>> {
        // The output buffer is sized before libopus can validate the
        // argument, so a frame size outside the codec's range (at most
        // 120ms, 5760 samples per channel at 48kHz) is rejected here with
        // the code libopus would have used.
        if !(1..=MAX_FRAME_SIZE).contains(&frame_size) {
            return Err(Error::decode(ffi::OPUS_BAD_ARG));
        }
        let mut buf = vec![0i16; (frame_size * self.channels) as usize];

        // Null packet pointer selects the concealment path in libopus.
        let (data_ptr, data_len) = if packet.is_empty() {
            (ptr::null(), 0)
        } else {
            (packet.as_ptr(), packet.len() as i32)
        };

        let n = unsafe {
            ffi::opus_decode(
                self.handle,
                data_ptr,
                data_len,
                buf.as_mut_ptr(),
                frame_size,
                fec as i32,
            )
        };

        if n < 0 {
            return Err(Error::decode(n));
        }

        buf.truncate((n * self.channels) as usize);
        Ok(buf)
    }

    /// Decodes one compressed packet into little-endian i16 bytes.
    pub fn decode_bytes(&mut self, packet: &[u8], frame_size: i32, fec: bool) -> Result<Vec<u8>> {
        let samples = self.decode(packet, frame_size, fec)?;
        Ok(crate::pcm::samples_to_bytes(&samples))
    }
}
