//! Jelly RDF stream format — encoder, decoder and stream I/O.
//!
//! Jelly is a binary RDF stream format: a sequence of framed
//! protocol-buffer messages carrying triples or quads, compressed with
//! three bounded LRU lookup tables (prefixes, local names, datatypes) and
//! per-slot repetition of subject/predicate/object/graph terms.
//!
//! The crate is organised around the data flow of the codec:
//!
//! - [`serialize`]: writer side. Lookup tables, term/statement encoding,
//!   frame flow and the frame writer.
//! - [`parse`]: reader side. Framing auto-detection, lazy frame iteration,
//!   mirror lookup tables and the row decoder with its [`parse::Adapter`]
//!   contract.
//! - [`generic`]: a self-contained statement model integration. Flat and
//!   grouped stream readers, an in-memory sink, and an N-Triples/N-Quads
//!   bridge.
//! - [`pb`]: the protobuf wire types of the published schema.
//! - [`options`]: stream options, lookup presets and validation.

pub mod cli;
pub mod error;
pub mod generic;
pub mod model;
pub mod options;
pub mod parse;
pub mod pb;
pub mod serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// Error type shared by every fallible operation in the crate.
pub use error::{JellyError, Result};

/// The generic RDF statement model.
pub use model::{Quad, Statement, Term, Triple};

/// Stream options and validation.
pub use options::{
    LookupPreset, ParserOptions, StreamParameters, StreamTypes, JELLY_EXTENSION, JELLY_MIME_TYPE,
    MIN_NAME_LOOKUP_SIZE, PROTOCOL_VERSION, STRING_DATATYPE_IRI,
};

/// Writer-side entry points.
pub use serialize::{FrameFlow, FrameWriter, SerializerOptions, StreamEncoder, DEFAULT_FRAME_SIZE};

/// Reader-side entry points.
pub use parse::{options_and_frames, Adapter, Decoder, DecoderConfig};

/// Generic-model stream reading.
pub use generic::{parse_flat, parse_grouped, parse_to_sink, FlatEvent, GenericStatementSink};
