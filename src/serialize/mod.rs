//! Writer side of the codec: lookup tables, term and statement encoding,
//! frame flow and frame output.

pub mod encode;
pub mod flow;
pub mod lookup;
pub mod stream;
pub mod writer;

pub use encode::{split_iri, RepeatedTerms, TermEncoder};
pub use flow::{FrameFlow, DEFAULT_FRAME_SIZE};
pub use lookup::{Lookup, LookupEncoder};
pub use stream::{SerializerOptions, StreamEncoder};
pub use writer::FrameWriter;
