//! Audio codec implementations.
//!
//! - `opus`: Opus audio codec (RFC 6716) via libopus

pub mod opus;
