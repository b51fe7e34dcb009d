//! Protocol buffer types for the Jelly wire format.
//!
//! The message definitions in [`rdf_v1`] are vendored generated code for the
//! published `rdf.proto` schema; field numbers and enum values are part of
//! the wire contract and must never change. This module adds a few small
//! helpers on top of the generated types.

mod rdf_v1;

pub use rdf_v1::*;

impl rdf_stream_row::Row {
    /// Short, human-readable name of the row kind (used by `jelly inspect`).
    pub fn kind_name(&self) -> &'static str {
        match self {
            rdf_stream_row::Row::Options(_) => "options",
            rdf_stream_row::Row::Triple(_) => "triple",
            rdf_stream_row::Row::Quad(_) => "quad",
            rdf_stream_row::Row::GraphStart(_) => "graph_start",
            rdf_stream_row::Row::GraphEnd(_) => "graph_end",
            rdf_stream_row::Row::Namespace(_) => "namespace",
            rdf_stream_row::Row::Name(_) => "name",
            rdf_stream_row::Row::Prefix(_) => "prefix",
            rdf_stream_row::Row::Datatype(_) => "datatype",
        }
    }
}

impl RdfStreamRow {
    /// Wraps a row kind into a stream row.
    pub fn from_kind(row: rdf_stream_row::Row) -> Self {
        RdfStreamRow { row: Some(row) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    /// The first field of `RdfStreamFrame` must encode with tag byte 0x0A:
    /// the delimited/non-delimited auto-detection logic depends on it.
    #[test]
    fn frame_rows_field_tag_is_0x0a() {
        let frame = RdfStreamFrame {
            rows: vec![RdfStreamRow::from_kind(rdf_stream_row::Row::GraphEnd(
                RdfGraphEnd {},
            ))],
            metadata: Default::default(),
        };
        let bytes = frame.encode_to_vec();
        assert_eq!(bytes[0], 0x0A);
    }

    #[test]
    fn enum_values_match_schema() {
        assert_eq!(PhysicalStreamType::Triples as i32, 1);
        assert_eq!(PhysicalStreamType::Quads as i32, 2);
        assert_eq!(PhysicalStreamType::Graphs as i32, 3);
        assert_eq!(LogicalStreamType::FlatTriples as i32, 1);
        assert_eq!(LogicalStreamType::FlatQuads as i32, 2);
        assert_eq!(LogicalStreamType::Graphs as i32, 3);
        assert_eq!(LogicalStreamType::Datasets as i32, 4);
        assert_eq!(LogicalStreamType::SubjectGraphs as i32, 13);
        assert_eq!(LogicalStreamType::NamedGraphs as i32, 14);
        assert_eq!(LogicalStreamType::TimestampedNamedGraphs as i32, 114);
    }
}
