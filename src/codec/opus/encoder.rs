//! Opus encoder.

use super::ffi::{self, OpusEncoder as OpusEncoderHandle};
use crate::error::{Error, Result};

/// Maximum size of a single compressed Opus packet.
pub const MAX_PACKET_SIZE: usize = 4000;

/// Opus application type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    /// Best quality for voice signals.
    VoIP,
    /// Best quality for non-voice signals.
    Audio,
    /// Minimum possible coding delay.
    RestrictedLowdelay,
}

impl Application {
    fn to_ffi(self) -> i32 {
        match self {
            Self::VoIP => ffi::OPUS_APPLICATION_VOIP,
            Self::Audio => ffi::OPUS_APPLICATION_AUDIO,
            Self::RestrictedLowdelay => ffi::OPUS_APPLICATION_RESTRICTED_LOWDELAY,
        }
    }
}

/// Safe owner of one native Opus encoder handle.
///
/// The handle is created by [`Encoder::new`] and destroyed on drop, so it
/// is released on every exit path. Input PCM is borrowed for the duration
/// of a call; compressed output is returned as an owned buffer.
#[derive(Debug)]
pub struct Encoder {
    sample_rate: i32,
    channels: i32,
    handle: *mut OpusEncoderHandle,
}

// Safety: The encoder handle is not shared across threads.
unsafe impl Send for Encoder {}

impl Drop for Encoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_encoder_destroy(self.handle) };
    }
}

impl Encoder {
    /// Creates a new Opus encoder.
    ///
    /// # Parameters
    /// - `sample_rate`: Sample rate (8000, 12000, 16000, 24000, or 48000)
    /// - `channels`: Number of channels (1 or 2)
    /// - `application`: Intended application type
    ///
    /// Rejected combinations surface as [`Error::CreateFailed`] carrying
    /// the raw libopus code.
    pub fn new(sample_rate: i32, channels: i32, application: Application) -> Result<Self> {
        let mut error: i32 = 0;
        let handle = unsafe {
            ffi::opus_encoder_create(sample_rate, channels, application.to_ffi(), &mut error)
        };

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

    /// Encodes one PCM frame into a compressed packet.
    ///
    /// # Parameters
    /// - `pcm`: Input PCM samples (`frame_size * channels` samples)
    /// - `frame_size`: Number of samples per channel
    ///
    /// Frame-size validation is left to libopus and surfaces as
    /// [`Error::EncodeFailed`]; a buffer holding fewer than
    /// `frame_size * channels` samples is rejected up front, since the C
    /// signature gives libopus no way to see the buffer length.
    pub fn encode(&mut self, pcm: &[i16], frame_size: i32) -> Result<Vec<u8>> {
        if (pcm.len() as i64) < (frame_size as i64) * (self.channels as i64) {
            return Err(Error::encode(ffi::OPUS_BAD_ARG));
        }

        let mut buf = vec![0u8; MAX_PACKET_SIZE];
        let n = unsafe {
            ffi::opus_encode(
                self.handle,
                pcm.as_ptr(),
                frame_size,
                buf.as_mut_ptr(),
                buf.len() as i32,
            )
        };

        if n < 0 {
            return Err(Error::encode(n));
        }

        buf.truncate(n as usize);
        Ok(buf)
    }

    /// Encodes one PCM frame given as little-endian i16 bytes.
    pub fn encode_bytes(&mut self, pcm: &[u8], frame_size: i32) -> Result<Vec<u8>> {
        let samples = crate::pcm::bytes_to_samples(pcm)?;
        self.encode(&samples, frame_size)
    }

    /// Sets the target bitrate in bits per second.
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        let ret =
            unsafe { ffi::opus_encoder_ctl(self.handle, ffi::OPUS_SET_BITRATE_REQUEST, bitrate) };

        if ret != ffi::OPUS_OK {
            return Err(Error::set_option(ret));
        }

        Ok(())
    }

    /// Sets the encoder complexity (0-10).
    pub fn set_complexity(&mut self, complexity: i32) -> Result<()> {
        let ret = unsafe {
            ffi::opus_encoder_ctl(self.handle, ffi::OPUS_SET_COMPLEXITY_REQUEST, complexity)
        };

        if ret != ffi::OPUS_OK {
            return Err(Error::set_option(ret));
        }

        Ok(())
    }
}
