//! Opus audio codec.
//!
//! Safe owned-handle wrappers over libopus via FFI. Each [`Encoder`] and
//! [`Decoder`] owns exactly one native handle and releases it on drop.
//!
//! # Example
//!
//! ```ignore
//! use easyopus::codec::opus::{Encoder, Decoder, Application};
//!
//! // Create an encoder
//! let mut encoder = Encoder::new(16000, 1, Application::VoIP)?;
//! encoder.set_bitrate(24000)?;
//!
//! // Encode PCM samples
//! let pcm: Vec<i16> = vec![0i16; 320]; // 20ms at 16kHz
//! let packet = encoder.encode(&pcm, 320)?;
//!
//! // Create a decoder
//! let mut decoder = Decoder::new(16000, 1)?;
//! let decoded = decoder.decode(&packet, 320, false)?;
//! ```

pub(crate) mod ffi;
mod decoder;
mod encoder;

pub use decoder::*;
pub use encoder::*;
pub use ffi::{OPUS_BAD_ARG, OPUS_INVALID_STATE, OPUS_OK};
