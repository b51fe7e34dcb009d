//! Stream options: lookup table sizes, stream types and parameters, plus
//! the validation rules tying them together.

use crate::error::{JellyError, Result};
use crate::pb::{LogicalStreamType, PhysicalStreamType, RdfStreamOptions};

/// Smallest legal size for the name lookup table.
pub const MIN_NAME_LOOKUP_SIZE: u32 = 8;

/// The default (implicit) datatype of plain literals. This IRI is never
/// entered into the datatype lookup table; index 0 stands for it.
pub const STRING_DATATYPE_IRI: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Highest protocol version this implementation reads and writes.
/// Version 1 is the base protocol; version 2 adds namespace declarations
/// and frame metadata.
pub const PROTOCOL_VERSION: u32 = 2;

/// Conventional file extension for Jelly streams.
pub const JELLY_EXTENSION: &str = ".jelly";

/// Registered MIME type for Jelly streams.
pub const JELLY_MIME_TYPE: &str = "application/x-jelly-rdf";

// ── Lookup table sizes ───────────────────────────────────────────────────────

/// Maximum sizes of the three lookup tables negotiated for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPreset {
    /// Name table size. Required; must be at least [`MIN_NAME_LOOKUP_SIZE`].
    pub max_names: u32,
    /// Prefix table size. 0 disables IRI prefix compression.
    pub max_prefixes: u32,
    /// Datatype table size. 0 disables typed literals other than xsd:string.
    pub max_datatypes: u32,
}

impl LookupPreset {
    /// Small tables: a good default for short streams.
    pub fn small() -> Self {
        LookupPreset {
            max_names: 128,
            max_prefixes: 16,
            max_datatypes: 16,
        }
    }

    /// Large tables: better compression for long streams with many terms.
    pub fn big() -> Self {
        LookupPreset {
            max_names: 4000,
            max_prefixes: 150,
            max_datatypes: 32,
        }
    }

    /// Checks the size constraints shared by both ends of a stream.
    pub fn validate(&self) -> Result<()> {
        if self.max_names < MIN_NAME_LOOKUP_SIZE {
            return Err(JellyError::conformance(format!(
                "name lookup size must be at least {MIN_NAME_LOOKUP_SIZE}, got {}",
                self.max_names
            )));
        }
        Ok(())
    }
}

impl Default for LookupPreset {
    fn default() -> Self {
        LookupPreset::small()
    }
}

// ── Stream parameters ────────────────────────────────────────────────────────

/// Stream-level parameters that do not affect row encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamParameters {
    /// Optional stream name carried in the options row.
    pub stream_name: String,
    /// Whether the stream may contain generalized statements.
    pub generalized_statements: bool,
    /// Whether the stream may contain RDF-star quoted triples.
    pub rdf_star: bool,
    /// Protocol version written to the options row.
    pub version: u32,
}

impl Default for StreamParameters {
    fn default() -> Self {
        StreamParameters {
            stream_name: String::new(),
            generalized_statements: false,
            rdf_star: false,
            version: PROTOCOL_VERSION,
        }
    }
}

// ── Stream types and the compatibility matrix ────────────────────────────────

/// The physical/logical type pair of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTypes {
    pub physical_type: PhysicalStreamType,
    pub logical_type: LogicalStreamType,
}

impl StreamTypes {
    pub fn new(physical_type: PhysicalStreamType, logical_type: LogicalStreamType) -> Self {
        StreamTypes {
            physical_type,
            logical_type,
        }
    }

    /// Verifies the physical/logical pair against the compatibility matrix.
    /// Incompatible pairs are internal errors: no valid construction path
    /// produces them from good inputs.
    pub fn validate(&self) -> Result<()> {
        use LogicalStreamType as L;
        use PhysicalStreamType as P;
        let compatible = match self.physical_type {
            P::Unspecified => true,
            P::Triples => matches!(
                self.logical_type,
                L::Unspecified | L::FlatTriples | L::Graphs | L::SubjectGraphs
            ),
            P::Quads | P::Graphs => matches!(
                self.logical_type,
                L::Unspecified
                    | L::FlatQuads
                    | L::Datasets
                    | L::NamedGraphs
                    | L::TimestampedNamedGraphs
            ),
        };
        if !compatible {
            return Err(JellyError::assertion(format!(
                "physical type {} is incompatible with logical type {}",
                self.physical_type.as_str_name(),
                self.logical_type.as_str_name()
            )));
        }
        Ok(())
    }

    /// Whether the logical type belongs to the flat family.
    pub fn is_flat(&self) -> bool {
        matches!(
            self.logical_type,
            LogicalStreamType::FlatTriples | LogicalStreamType::FlatQuads
        )
    }

    /// Whether the logical type belongs to the grouped family.
    pub fn is_grouped(&self) -> bool {
        matches!(
            self.logical_type,
            LogicalStreamType::Graphs
                | LogicalStreamType::Datasets
                | LogicalStreamType::SubjectGraphs
                | LogicalStreamType::NamedGraphs
                | LogicalStreamType::TimestampedNamedGraphs
        )
    }
}

// ── Options as read from a stream ────────────────────────────────────────────

/// Options extracted from the options row of an incoming stream, plus the
/// framing mode detected from the first bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub stream_types: StreamTypes,
    pub lookup_preset: LookupPreset,
    pub params: StreamParameters,
    /// Whether the byte stream carries length-prefixed frames.
    pub delimited: bool,
}

impl ParserOptions {
    /// Builds and validates options from a decoded options row.
    pub fn from_options_row(row: &RdfStreamOptions, delimited: bool) -> Result<Self> {
        if row.version > PROTOCOL_VERSION {
            return Err(JellyError::conformance(format!(
                "unsupported protocol version {} (this implementation supports up to {})",
                row.version, PROTOCOL_VERSION
            )));
        }
        let lookup_preset = LookupPreset {
            max_names: row.max_name_table_size,
            max_prefixes: row.max_prefix_table_size,
            max_datatypes: row.max_datatype_table_size,
        };
        lookup_preset.validate()?;
        let stream_types = StreamTypes::new(row.physical_type(), row.logical_type());
        stream_types.validate()?;
        Ok(ParserOptions {
            stream_types,
            lookup_preset,
            params: StreamParameters {
                stream_name: row.stream_name.clone(),
                generalized_statements: row.generalized_statements,
                rdf_star: row.rdf_star,
                version: row.version,
            },
            delimited,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_matrix() {
        use LogicalStreamType as L;
        use PhysicalStreamType as P;
        let ok = [
            (P::Triples, L::FlatTriples),
            (P::Triples, L::Graphs),
            (P::Triples, L::SubjectGraphs),
            (P::Triples, L::Unspecified),
            (P::Quads, L::FlatQuads),
            (P::Quads, L::Datasets),
            (P::Quads, L::NamedGraphs),
            (P::Quads, L::TimestampedNamedGraphs),
            (P::Graphs, L::FlatQuads),
            (P::Graphs, L::Datasets),
            (P::Unspecified, L::FlatTriples),
            (P::Unspecified, L::TimestampedNamedGraphs),
        ];
        for (p, l) in ok {
            assert!(StreamTypes::new(p, l).validate().is_ok(), "{p:?}/{l:?}");
        }
        let bad = [
            (P::Triples, L::FlatQuads),
            (P::Triples, L::Datasets),
            (P::Triples, L::NamedGraphs),
            (P::Quads, L::FlatTriples),
            (P::Quads, L::Graphs),
            (P::Quads, L::SubjectGraphs),
            (P::Graphs, L::FlatTriples),
            (P::Graphs, L::Graphs),
        ];
        for (p, l) in bad {
            assert!(
                matches!(
                    StreamTypes::new(p, l).validate(),
                    Err(JellyError::Assertion(_))
                ),
                "{p:?}/{l:?}"
            );
        }
    }

    #[test]
    fn name_lookup_size_minimum() {
        let mut preset = LookupPreset::small();
        preset.max_names = MIN_NAME_LOOKUP_SIZE;
        assert!(preset.validate().is_ok());
        preset.max_names = MIN_NAME_LOOKUP_SIZE - 1;
        assert!(matches!(
            preset.validate(),
            Err(JellyError::Conformance(_))
        ));
    }

    #[test]
    fn rejects_future_protocol_version() {
        let row = RdfStreamOptions {
            max_name_table_size: 128,
            version: PROTOCOL_VERSION + 1,
            ..Default::default()
        };
        assert!(matches!(
            ParserOptions::from_options_row(&row, true),
            Err(JellyError::Conformance(_))
        ));
    }
}
