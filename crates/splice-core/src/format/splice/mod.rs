//! SPLICE drum-pattern decoding.
//!
//! A file is the `SPLICE` magic, a big-endian u64 payload length and the
//! payload itself; anything after the payload is a trailer and is never
//! read. The payload starts with a 32-byte NUL-padded hardware version and a
//! little-endian f32 tempo, followed by length-prefixed instrument records
//! until the payload is exhausted.
//!
//! Step bytes other than 0 and 1 are rejected at decode time so the
//! renderer never sees a step it cannot draw.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::decode;
