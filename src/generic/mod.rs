//! Generic RDF integration: an in-memory statement sink, flat and grouped
//! stream readers producing the generic model, and a minimal
//! N-Triples/N-Quads bridge for the CLI and tests.

pub mod nt;
pub mod parse;
pub mod sink;

pub use parse::{
    parse_flat, parse_flat_with, parse_grouped, parse_grouped_with, parse_to_sink, FlatEvent,
    FlatParser, GroupedParser,
};
pub use sink::GenericStatementSink;
