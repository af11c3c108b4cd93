//! Safe Opus codec session manager.
//!
//! This crate wraps libopus behind two surfaces:
//!
//! - `codec::opus`: owned [`Encoder`](codec::opus::Encoder) and
//!   [`Decoder`](codec::opus::Decoder) handles with `Result`-based calls
//! - [`CodecSession`]: a stateful facade holding one optional encoder and
//!   one optional decoder, speaking the C status-code convention
//! - `pcm`: little-endian byte ↔ i16 sample conversion
//!
//! # Example
//!
//! ```no_run
//! use easyopus::{Application, CodecSession};
//!
//! let mut session = CodecSession::new();
//! assert_eq!(session.encoder_init(48000, 1, Application::VoIP), 0);
//! assert_eq!(session.encoder_set_bitrate(24000), 0);
//!
//! let pcm = vec![0i16; 960]; // 20ms at 48kHz
//! let packet = session.encode(&pcm, 960);
//! assert!(!packet.is_empty());
//!
//! assert_eq!(session.decoder_init(48000, 1), 0);
//! let decoded = session.decode(&packet, 960, false);
//! assert_eq!(decoded.len(), 960);
//! ```

pub mod codec;
pub mod error;
pub mod pcm;
pub mod session;

pub use codec::opus::Application;
pub use error::{Error, Result};
pub use session::CodecSession;
