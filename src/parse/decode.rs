//! Row decoding and the adapter contract.
//!
//! The [`Decoder`] maintains the mirror lookup tables and per-slot term
//! caches for one incoming stream and replays every row into an
//! [`Adapter`], the bridge to an external RDF data model. Adapters
//! implement only the callbacks their stream's physical type requires;
//! everything else fails with a structured "not implemented" error.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{JellyError, Result};
use crate::options::ParserOptions;
use crate::parse::lookup::LookupDecoder;
use crate::pb;
use crate::pb::rdf_stream_row::Row;

/// Decoder-side configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderConfig {
    /// In strict mode the chosen reading mode (flat or grouped) must match
    /// the family of the stream's logical type; a mismatch fails before any
    /// row is delivered. Non-strict mode accepts any logical type.
    pub strict: bool,
}

impl DecoderConfig {
    pub fn strict() -> Self {
        DecoderConfig { strict: true }
    }
}

/// Bridge between the decoder and an external RDF data model.
///
/// Term callbacks build nodes; statement callbacks deliver them. The
/// decoder calls only the methods the stream's physical type requires, so
/// unused callbacks are never reached.
pub trait Adapter {
    /// The external model's term type.
    type Node: Clone;

    fn iri(&mut self, iri: String) -> Result<Self::Node> {
        let _ = iri;
        Err(JellyError::not_implemented("iri terms"))
    }

    fn bnode(&mut self, id: String) -> Result<Self::Node> {
        let _ = id;
        Err(JellyError::not_implemented("blank node terms"))
    }

    fn literal(
        &mut self,
        lex: String,
        language: Option<String>,
        datatype: Option<String>,
    ) -> Result<Self::Node> {
        let _ = (lex, language, datatype);
        Err(JellyError::not_implemented("literal terms"))
    }

    fn default_graph(&mut self) -> Result<Self::Node> {
        Err(JellyError::not_implemented("the default graph term"))
    }

    /// RDF-star quoted triple used as a term.
    fn quoted_triple(
        &mut self,
        s: Self::Node,
        p: Self::Node,
        o: Self::Node,
    ) -> Result<Self::Node> {
        let _ = (s, p, o);
        Err(JellyError::not_implemented("quoted triple terms"))
    }

    fn triple(&mut self, s: Self::Node, p: Self::Node, o: Self::Node) -> Result<()> {
        let _ = (s, p, o);
        Err(JellyError::not_implemented("triple statements"))
    }

    fn quad(
        &mut self,
        s: Self::Node,
        p: Self::Node,
        o: Self::Node,
        g: Self::Node,
    ) -> Result<()> {
        let _ = (s, p, o, g);
        Err(JellyError::not_implemented("quad statements"))
    }

    fn graph_start(&mut self, graph: Self::Node) -> Result<()> {
        let _ = graph;
        Err(JellyError::not_implemented("graph boundaries"))
    }

    fn graph_end(&mut self) -> Result<()> {
        Err(JellyError::not_implemented("graph boundaries"))
    }

    fn namespace_declaration(&mut self, name: &str, iri: Self::Node) -> Result<()> {
        let _ = (name, iri);
        Err(JellyError::not_implemented("namespace declarations"))
    }

    /// Called once per frame, after its rows, with the frame's metadata.
    fn frame(&mut self, metadata: &HashMap<String, Vec<u8>>) -> Result<()> {
        let _ = metadata;
        Ok(())
    }
}

/// Borrowed view of a term carried in any statement slot.
enum PbTerm<'a> {
    Iri(&'a pb::RdfIri),
    Bnode(&'a str),
    Literal(&'a pb::RdfLiteral),
    TripleTerm(&'a pb::RdfTriple),
    DefaultGraph,
}

fn triple_subject_term(term: &pb::rdf_triple::Subject) -> PbTerm<'_> {
    use pb::rdf_triple::Subject;
    match term {
        Subject::SIri(iri) => PbTerm::Iri(iri),
        Subject::SBnode(id) => PbTerm::Bnode(id),
        Subject::SLiteral(lit) => PbTerm::Literal(lit),
        Subject::STripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn triple_predicate_term(term: &pb::rdf_triple::Predicate) -> PbTerm<'_> {
    use pb::rdf_triple::Predicate;
    match term {
        Predicate::PIri(iri) => PbTerm::Iri(iri),
        Predicate::PBnode(id) => PbTerm::Bnode(id),
        Predicate::PLiteral(lit) => PbTerm::Literal(lit),
        Predicate::PTripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn triple_object_term(term: &pb::rdf_triple::Object) -> PbTerm<'_> {
    use pb::rdf_triple::Object;
    match term {
        Object::OIri(iri) => PbTerm::Iri(iri),
        Object::OBnode(id) => PbTerm::Bnode(id),
        Object::OLiteral(lit) => PbTerm::Literal(lit),
        Object::OTripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn quad_subject_term(term: &pb::rdf_quad::Subject) -> PbTerm<'_> {
    use pb::rdf_quad::Subject;
    match term {
        Subject::SIri(iri) => PbTerm::Iri(iri),
        Subject::SBnode(id) => PbTerm::Bnode(id),
        Subject::SLiteral(lit) => PbTerm::Literal(lit),
        Subject::STripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn quad_predicate_term(term: &pb::rdf_quad::Predicate) -> PbTerm<'_> {
    use pb::rdf_quad::Predicate;
    match term {
        Predicate::PIri(iri) => PbTerm::Iri(iri),
        Predicate::PBnode(id) => PbTerm::Bnode(id),
        Predicate::PLiteral(lit) => PbTerm::Literal(lit),
        Predicate::PTripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn quad_object_term(term: &pb::rdf_quad::Object) -> PbTerm<'_> {
    use pb::rdf_quad::Object;
    match term {
        Object::OIri(iri) => PbTerm::Iri(iri),
        Object::OBnode(id) => PbTerm::Bnode(id),
        Object::OLiteral(lit) => PbTerm::Literal(lit),
        Object::OTripleTerm(t) => PbTerm::TripleTerm(t),
    }
}

fn quad_graph_term(term: &pb::rdf_quad::Graph) -> PbTerm<'_> {
    use pb::rdf_quad::Graph;
    match term {
        Graph::GIri(iri) => PbTerm::Iri(iri),
        Graph::GBnode(id) => PbTerm::Bnode(id),
        Graph::GDefaultGraph(_) => PbTerm::DefaultGraph,
        Graph::GLiteral(lit) => PbTerm::Literal(lit),
    }
}

fn graph_start_term(term: &pb::rdf_graph_start::Graph) -> PbTerm<'_> {
    use pb::rdf_graph_start::Graph;
    match term {
        Graph::GIri(iri) => PbTerm::Iri(iri),
        Graph::GBnode(id) => PbTerm::Bnode(id),
        Graph::GDefaultGraph(_) => PbTerm::DefaultGraph,
        Graph::GLiteral(lit) => PbTerm::Literal(lit),
    }
}

/// Decoder for a single incoming stream.
///
/// Not safe for concurrent use; the mirror tables and per-slot caches are
/// mutable state shared by all rows of the stream. Tables and caches live
/// for the whole stream and are never reset between frames.
pub struct Decoder<A: Adapter> {
    adapter: A,
    expected: ParserOptions,
    names: LookupDecoder,
    prefixes: LookupDecoder,
    datatypes: LookupDecoder,
    repeated_s: Option<A::Node>,
    repeated_p: Option<A::Node>,
    repeated_o: Option<A::Node>,
    repeated_g: Option<A::Node>,
}

impl<A: Adapter> Decoder<A> {
    pub fn new(expected: ParserOptions, adapter: A) -> Self {
        let preset = expected.lookup_preset;
        Decoder {
            adapter,
            expected,
            names: LookupDecoder::new(preset.max_names),
            prefixes: LookupDecoder::new(preset.max_prefixes),
            datatypes: LookupDecoder::new(preset.max_datatypes),
            repeated_s: None,
            repeated_p: None,
            repeated_o: None,
            repeated_g: None,
        }
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// Decodes all rows of a frame, then fires the adapter's `frame`
    /// callback with the frame metadata.
    pub fn decode_frame(&mut self, frame: &pb::RdfStreamFrame) -> Result<()> {
        if frame.rows.is_empty() {
            return Err(JellyError::conformance("a frame with zero rows is invalid"));
        }
        trace!(rows = frame.rows.len(), "decoding frame");
        for row in &frame.rows {
            let kind = row
                .row
                .as_ref()
                .ok_or_else(|| JellyError::conformance("stream row carries no row kind"))?;
            self.decode_row(kind)?;
        }
        self.adapter.frame(&frame.metadata)
    }

    fn decode_row(&mut self, row: &Row) -> Result<()> {
        match row {
            Row::Options(options) => self.validate_options(options),
            Row::Prefix(entry) => self.prefixes.assign_entry(entry.id, &entry.value),
            Row::Name(entry) => self.names.assign_entry(entry.id, &entry.value),
            Row::Datatype(entry) => self.datatypes.assign_entry(entry.id, &entry.value),
            Row::Triple(triple) => self.decode_triple(triple),
            Row::Quad(quad) => self.decode_quad(quad),
            Row::GraphStart(start) => self.decode_graph_start(start),
            Row::GraphEnd(_) => self.adapter.graph_end(),
            Row::Namespace(declaration) => self.decode_namespace(declaration),
        }
    }

    /// Validates a mid-stream options row against the options the decoder
    /// was created with.
    fn validate_options(&mut self, options: &pb::RdfStreamOptions) -> Result<()> {
        let preset = self.expected.lookup_preset;
        if options.max_name_table_size != preset.max_names
            || options.max_prefix_table_size != preset.max_prefixes
            || options.max_datatype_table_size != preset.max_datatypes
        {
            return Err(JellyError::conformance(
                "options row does not match the negotiated lookup table sizes",
            ));
        }
        if options.version > self.expected.params.version {
            return Err(JellyError::conformance(format!(
                "options row declares version {}, expected at most {}",
                options.version, self.expected.params.version
            )));
        }
        if options.stream_name != self.expected.params.stream_name {
            return Err(JellyError::conformance(
                "options row does not match the negotiated stream name",
            ));
        }
        debug!("options row validated");
        Ok(())
    }

    fn decode_term(&mut self, term: PbTerm<'_>) -> Result<A::Node> {
        match term {
            PbTerm::Iri(iri) => {
                let iri = {
                    let name = self.names.decode_name_term_index(iri.name_id)?;
                    let name = name.to_owned();
                    let prefix = self.prefixes.decode_prefix_term_index(iri.prefix_id)?;
                    format!("{prefix}{name}")
                };
                self.adapter.iri(iri)
            }
            PbTerm::Bnode(id) => self.adapter.bnode(id.to_owned()),
            PbTerm::Literal(literal) => {
                let mut language = None;
                let mut datatype = None;
                match &literal.literal_kind {
                    Some(pb::rdf_literal::LiteralKind::Langtag(tag)) => {
                        language = Some(tag.clone());
                    }
                    Some(pb::rdf_literal::LiteralKind::Datatype(index)) if *index != 0 => {
                        datatype =
                            Some(self.datatypes.decode_datatype_term_index(*index)?.to_owned());
                    }
                    // Index 0 or no kind at all: the default string datatype.
                    _ => {}
                }
                self.adapter.literal(literal.lex.clone(), language, datatype)
            }
            PbTerm::DefaultGraph => self.adapter.default_graph(),
            PbTerm::TripleTerm(triple) => self.decode_quoted_triple(triple),
        }
    }

    /// Quoted triples carry all three terms inline; slot repetition does
    /// not apply inside them.
    fn decode_quoted_triple(&mut self, triple: &pb::RdfTriple) -> Result<A::Node> {
        let subject = triple
            .subject
            .as_ref()
            .ok_or_else(|| JellyError::conformance("quoted triple without a subject"))?;
        let s = self.decode_term(triple_subject_term(subject))?;
        let predicate = triple
            .predicate
            .as_ref()
            .ok_or_else(|| JellyError::conformance("quoted triple without a predicate"))?;
        let p = self.decode_term(triple_predicate_term(predicate))?;
        let object = triple
            .object
            .as_ref()
            .ok_or_else(|| JellyError::conformance("quoted triple without an object"))?;
        let o = self.decode_term(triple_object_term(object))?;
        self.adapter.quoted_triple(s, p, o)
    }

    fn repeated(slot: &Option<A::Node>, name: &str) -> Result<A::Node> {
        slot.clone().ok_or_else(|| {
            JellyError::conformance(format!(
                "statement repeats the {name} slot but no previous term exists"
            ))
        })
    }

    fn decode_triple(&mut self, triple: &pb::RdfTriple) -> Result<()> {
        let s = match &triple.subject {
            Some(term) => {
                let node = self.decode_term(triple_subject_term(term))?;
                self.repeated_s = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_s, "subject")?,
        };
        let p = match &triple.predicate {
            Some(term) => {
                let node = self.decode_term(triple_predicate_term(term))?;
                self.repeated_p = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_p, "predicate")?,
        };
        let o = match &triple.object {
            Some(term) => {
                let node = self.decode_term(triple_object_term(term))?;
                self.repeated_o = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_o, "object")?,
        };
        self.adapter.triple(s, p, o)
    }

    fn decode_quad(&mut self, quad: &pb::RdfQuad) -> Result<()> {
        let s = match &quad.subject {
            Some(term) => {
                let node = self.decode_term(quad_subject_term(term))?;
                self.repeated_s = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_s, "subject")?,
        };
        let p = match &quad.predicate {
            Some(term) => {
                let node = self.decode_term(quad_predicate_term(term))?;
                self.repeated_p = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_p, "predicate")?,
        };
        let o = match &quad.object {
            Some(term) => {
                let node = self.decode_term(quad_object_term(term))?;
                self.repeated_o = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_o, "object")?,
        };
        let g = match &quad.graph {
            Some(term) => {
                let node = self.decode_term(quad_graph_term(term))?;
                self.repeated_g = Some(node.clone());
                node
            }
            None => Self::repeated(&self.repeated_g, "graph")?,
        };
        self.adapter.quad(s, p, o, g)
    }

    fn decode_graph_start(&mut self, start: &pb::RdfGraphStart) -> Result<()> {
        let graph = start
            .graph
            .as_ref()
            .ok_or_else(|| JellyError::conformance("graph start without a graph name"))?;
        let node = self.decode_term(graph_start_term(graph))?;
        self.adapter.graph_start(node)
    }

    fn decode_namespace(&mut self, declaration: &pb::RdfNamespaceDeclaration) -> Result<()> {
        // A missing value decodes like an all-default IRI message.
        let value = declaration.value.unwrap_or_default();
        let node = self.decode_term(PbTerm::Iri(&value))?;
        self.adapter.namespace_declaration(&declaration.name, node)
    }
}
