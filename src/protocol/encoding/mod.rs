//! Typed little-endian readers and writers with sticky error state and
//! pluggable text transcoding.

mod decoder;
mod encoder;
mod transcode;

pub use self::decoder::Decoder;
pub use self::encoder::Encoder;
pub use self::transcode::{Cesu8Transcoder, Transcoder};

pub(crate) use self::transcode::cesu8_length;
