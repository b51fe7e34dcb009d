//! Reader side of the codec: framing auto-detection, lazy frame iteration,
//! mirror lookup tables and row decoding into an adapter.

pub mod decode;
pub mod ioutils;
pub mod lookup;

pub use decode::{Adapter, Decoder, DecoderConfig};
pub use ioutils::{delimited_jelly_hint, options_and_frames, options_from_frame, Frames};
pub use lookup::LookupDecoder;
