//! Stateful codec session facade.

use tracing::warn;

use crate::codec::opus::{Application, Decoder, Encoder, OPUS_INVALID_STATE, OPUS_OK};

/// A codec session owning at most one encoder and one decoder handle.
///
/// This is the C-convention surface of the crate: init and configuration
/// calls return raw status codes (0 success, negative libopus error) and
/// data calls signal failure with an empty buffer. Callers that prefer
/// `Result`s can use [`Encoder`] and [`Decoder`] directly.
///
/// The two sides are independent: either can be initialized, used and
/// released without the other. Dropping the session releases whatever
/// handles are still open. No internal locking is performed; a session
/// must be driven from one thread at a time.
pub struct CodecSession {
    encoder: Option<Encoder>,
    decoder: Option<Decoder>,
    decoder_channels: i32,
}

impl Default for CodecSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecSession {
    /// Creates a session with neither side initialized.
    pub fn new() -> Self {
        Self {
            encoder: None,
            decoder: None,
            decoder_channels: -1,
        }
    }

    /// Creates the encoder handle.
    ///
    /// If an encoder already exists it is released first and replaced;
    /// the old handle is never leaked. Returns 0 on success or the
    /// libopus error code for a rejected configuration.
    pub fn encoder_init(&mut self, sample_rate: i32, channels: i32, app: Application) -> i32 {
        self.encoder_release();

        match Encoder::new(sample_rate, channels, app) {
            Ok(enc) => {
                self.encoder = Some(enc);
                OPUS_OK
            }
            Err(e) => {
                warn!(sample_rate, channels, "encoder init failed: {}", e);
                e.status()
            }
        }
    }

    /// Sets the encoder bitrate in bits per second.
    ///
    /// Returns `OPUS_INVALID_STATE` when no encoder exists.
    pub fn encoder_set_bitrate(&mut self, bitrate: i32) -> i32 {
        let Some(enc) = self.encoder.as_mut() else {
            return OPUS_INVALID_STATE;
        };
        match enc.set_bitrate(bitrate) {
            Ok(()) => OPUS_OK,
            Err(e) => e.status(),
        }
    }

    /// Sets the encoder complexity (0-10).
    ///
    /// Returns `OPUS_INVALID_STATE` when no encoder exists.
    pub fn encoder_set_complexity(&mut self, complexity: i32) -> i32 {
        let Some(enc) = self.encoder.as_mut() else {
            return OPUS_INVALID_STATE;
        };
        match enc.set_complexity(complexity) {
            Ok(()) => OPUS_OK,
            Err(e) => e.status(),
        }
    }

    /// Encodes one PCM frame (`frame_size` samples per channel) into a
    /// compressed packet.
    ///
    /// Returns an empty buffer when no encoder exists or encoding fails;
    /// a successful encode always produces at least one byte.
    pub fn encode(&mut self, pcm: &[i16], frame_size: i32) -> Vec<u8> {
        let Some(enc) = self.encoder.as_mut() else {
            warn!("encode called without encoder");
            return Vec::new();
        };
        match enc.encode(pcm, frame_size) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(frame_size, "encode failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Encodes one PCM frame given as little-endian i16 bytes.
    ///
    /// Same failure convention as [`CodecSession::encode`].
    pub fn encode_bytes(&mut self, pcm: &[u8], frame_size: i32) -> Vec<u8> {
        let Some(enc) = self.encoder.as_mut() else {
            warn!("encode_bytes called without encoder");
            return Vec::new();
        };
        match enc.encode_bytes(pcm, frame_size) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(frame_size, "encode_bytes failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Releases the encoder handle. Safe to call any number of times.
    pub fn encoder_release(&mut self) {
        self.encoder = None;
    }

    /// Creates the decoder handle and records its channel count.
    ///
    /// Same replace-on-reinit and status conventions as
    /// [`CodecSession::encoder_init`].
    pub fn decoder_init(&mut self, sample_rate: i32, channels: i32) -> i32 {
        self.decoder_release();

        match Decoder::new(sample_rate, channels) {
            Ok(dec) => {
                self.decoder = Some(dec);
                self.decoder_channels = channels;
                OPUS_OK
            }
            Err(e) => {
                warn!(sample_rate, channels, "decoder init failed: {}", e);
                e.status()
            }
        }
    }

    /// Decodes one compressed packet into `frame_size * channels` PCM
    /// samples.
    ///
    /// `fec` requests in-band forward error correction from this packet
    /// when the previous packet was lost. An empty `packet` invokes
    /// packet loss concealment. Returns an empty buffer when no decoder
    /// exists or the packet is rejected.
    pub fn decode(&mut self, packet: &[u8], frame_size: i32, fec: bool) -> Vec<i16> {
        let Some(dec) = self.decoder.as_mut() else {
            warn!("decode called without decoder");
            return Vec::new();
        };
        match dec.decode(packet, frame_size, fec) {
            Ok(samples) => samples,
            Err(e) => {
                warn!(frame_size, fec, "decode failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Decodes one compressed packet into little-endian i16 bytes.
    ///
    /// Same conventions as [`CodecSession::decode`].
    pub fn decode_bytes(&mut self, packet: &[u8], frame_size: i32, fec: bool) -> Vec<u8> {
        let Some(dec) = self.decoder.as_mut() else {
            warn!("decode_bytes called without decoder");
            return Vec::new();
        };
        match dec.decode_bytes(packet, frame_size, fec) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(frame_size, fec, "decode_bytes failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Releases the decoder handle. Safe to call any number of times.
    pub fn decoder_release(&mut self) {
        self.decoder = None;
        self.decoder_channels = -1;
    }

    /// Channel count of the active decoder, or -1 when uninitialized.
    pub fn decoder_channels(&self) -> i32 {
        self.decoder_channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voip_roundtrip() {
        let mut session = CodecSession::new();

        assert_eq!(session.encoder_init(48000, 1, Application::VoIP), 0);
        assert_eq!(session.encoder_set_bitrate(24000), 0);

        let pcm = vec![0i16; 960]; // 20ms at 48kHz
        let packet = session.encode(&pcm, 960);
        assert!(!packet.is_empty());

        assert_eq!(session.decoder_init(48000, 1), 0);
        let decoded = session.decode(&packet, 960, false);
        assert_eq!(decoded.len(), 960);
    }

    #[test]
    fn test_encode_after_release_fails() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_init(16000, 1, Application::VoIP), 0);
        session.encoder_release();

        let pcm = vec![0i16; 320];
        assert!(session.encode(&pcm, 320).is_empty());
    }

    #[test]
    fn test_set_bitrate_without_encoder() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_set_bitrate(24000), OPUS_INVALID_STATE);
        assert_eq!(session.encoder_set_complexity(5), OPUS_INVALID_STATE);
    }

    #[test]
    fn test_encoder_init_rejects_bad_rate() {
        let mut session = CodecSession::new();
        assert!(session.encoder_init(44100, 1, Application::VoIP) < 0);

        let pcm = vec![0i16; 320];
        assert!(session.encode(&pcm, 320).is_empty());
    }

    #[test]
    fn test_release_idempotent() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_init(16000, 1, Application::VoIP), 0);
        assert_eq!(session.decoder_init(16000, 1), 0);

        session.encoder_release();
        session.encoder_release();
        session.decoder_release();
        session.decoder_release();
        assert_eq!(session.decoder_channels(), -1);
    }

    #[test]
    fn test_release_without_init() {
        let mut session = CodecSession::new();
        session.encoder_release();
        session.decoder_release();
    }

    #[test]
    fn test_decode_without_decoder() {
        let mut session = CodecSession::new();
        assert!(session.decode(&[0x48, 0x00], 320, false).is_empty());
    }

    #[test]
    fn test_decode_bad_frame_size_returns_empty() {
        let mut session = CodecSession::new();
        assert_eq!(session.decoder_init(16000, 1), 0);

        let packet = vec![0x48, 0x00];
        assert!(session.decode(&packet, -1, false).is_empty());
        assert!(session.decode(&packet, i32::MAX, false).is_empty());
    }

    #[test]
    fn test_encode_short_input_returns_empty() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_init(48000, 1, Application::VoIP), 0);

        assert!(session.encode(&[], 960).is_empty());
        assert!(session.encode_bytes(&[], 960).is_empty());
    }

    #[test]
    fn test_reinit_replaces_encoder() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_init(16000, 1, Application::VoIP), 0);
        assert_eq!(session.encoder_init(48000, 2, Application::Audio), 0);

        // The replacement encoder is the live one: 20ms stereo at 48kHz.
        let pcm = vec![0i16; 960 * 2];
        assert!(!session.encode(&pcm, 960).is_empty());
    }

    #[test]
    fn test_reinit_replaces_decoder() {
        let mut session = CodecSession::new();
        assert_eq!(session.decoder_init(16000, 1), 0);
        assert_eq!(session.decoder_init(48000, 2), 0);
        assert_eq!(session.decoder_channels(), 2);
    }

    #[test]
    fn test_decoder_channels_tracks_init() {
        let mut session = CodecSession::new();
        assert_eq!(session.decoder_channels(), -1);
        assert_eq!(session.decoder_init(16000, 1), 0);
        assert_eq!(session.decoder_channels(), 1);
        session.decoder_release();
        assert_eq!(session.decoder_channels(), -1);
    }

    #[test]
    fn test_byte_overloads_roundtrip() {
        let mut session = CodecSession::new();
        assert_eq!(session.encoder_init(16000, 1, Application::VoIP), 0);
        assert_eq!(session.decoder_init(16000, 1), 0);

        let pcm_bytes = vec![0u8; 320 * 2];
        let packet = session.encode_bytes(&pcm_bytes, 320);
        assert!(!packet.is_empty());

        let decoded = session.decode_bytes(&packet, 320, false);
        assert_eq!(decoded.len(), 320 * 2);
    }

    #[test]
    fn test_sides_are_independent() {
        let mut session = CodecSession::new();
        assert_eq!(session.decoder_init(16000, 1), 0);

        // Decoder alone cannot encode.
        let pcm = vec![0i16; 320];
        assert!(session.encode(&pcm, 320).is_empty());

        // Releasing the encoder side leaves the decoder usable.
        session.encoder_release();
        let decoded = session.decode(&[], 320, false);
        assert_eq!(decoded.len(), 320);
    }
}
