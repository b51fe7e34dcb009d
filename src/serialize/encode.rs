//! Term and statement encoding.
//!
//! [`TermEncoder`] turns RDF terms into their wire representation, emitting
//! the lookup entry rows that must precede the statement row. The free
//! functions below assemble whole statement rows, applying per-slot
//! repetition: a term equal to the one last written in the same slot is
//! omitted entirely, and the lookup tables are left untouched for it.

use crate::error::{JellyError, Result};
use crate::model::{Quad, Term, Triple};
use crate::options::{LookupPreset, StreamParameters, StreamTypes, STRING_DATATYPE_IRI};
use crate::pb;
use crate::pb::rdf_stream_row::Row;
use crate::serialize::lookup::LookupEncoder;

/// Splits an IRI into prefix (including the separator) and local name.
///
/// The split happens at the last `#` if present, else at the last `/`.
/// IRIs containing neither become all-name with an empty prefix.
pub fn split_iri(iri: &str) -> (&str, &str) {
    for sep in ['#', '/'] {
        if let Some(position) = iri.rfind(sep) {
            return (&iri[..=position], &iri[position + 1..]);
        }
    }
    ("", iri)
}

/// Wire form of a single term, before it is placed into a statement slot.
#[derive(Debug, Clone)]
pub(crate) enum EncodedTerm {
    Iri(pb::RdfIri),
    Bnode(String),
    Literal(pb::RdfLiteral),
    DefaultGraph,
    TripleTerm(pb::RdfTriple),
}

/// Encoder for RDF terms, owning the three lookup tables of a stream.
#[derive(Debug)]
pub struct TermEncoder {
    pub names: LookupEncoder,
    pub prefixes: LookupEncoder,
    pub datatypes: LookupEncoder,
}

impl TermEncoder {
    pub fn new(preset: &LookupPreset) -> Self {
        TermEncoder {
            names: LookupEncoder::new(preset.max_names),
            prefixes: LookupEncoder::new(preset.max_prefixes),
            datatypes: LookupEncoder::new(preset.max_datatypes),
        }
    }

    /// Encodes an IRI, appending any needed prefix/name entry rows to
    /// `rows`, and returns the index pair to embed in the term.
    pub fn encode_iri(&mut self, iri: &str, rows: &mut Vec<pb::RdfStreamRow>) -> pb::RdfIri {
        let (mut prefix, mut name) = split_iri(iri);
        if !self.prefixes.enabled() {
            // Prefix compression disabled: the whole IRI is the name.
            prefix = "";
            name = iri;
        }
        if !prefix.is_empty() {
            if let Some(id) = self.prefixes.encode_entry_index(prefix) {
                rows.push(pb::RdfStreamRow::from_kind(Row::Prefix(
                    pb::RdfPrefixEntry {
                        id,
                        value: prefix.to_owned(),
                    },
                )));
            }
        }
        if let Some(id) = self.names.encode_entry_index(name) {
            rows.push(pb::RdfStreamRow::from_kind(Row::Name(pb::RdfNameEntry {
                id,
                value: name.to_owned(),
            })));
        }
        let prefix_id = if self.prefixes.enabled() {
            self.prefixes.encode_prefix_term_index(prefix)
        } else {
            0
        };
        let name_id = self.names.encode_name_term_index(name);
        pb::RdfIri { prefix_id, name_id }
    }

    /// Encodes a literal, appending a datatype entry row when a new
    /// datatype enters the table.
    ///
    /// Fails when the literal carries both a language tag and a datatype,
    /// or a non-string datatype while the datatype table is disabled.
    pub fn encode_literal(
        &mut self,
        lex: &str,
        language: Option<&str>,
        datatype: Option<&str>,
        rows: &mut Vec<pb::RdfStreamRow>,
    ) -> Result<pb::RdfLiteral> {
        if language.is_some() && datatype.is_some() {
            return Err(JellyError::conformance(
                "a literal cannot carry both a language tag and a datatype",
            ));
        }
        let mut literal_kind = None;
        if let Some(language) = language {
            literal_kind = Some(pb::rdf_literal::LiteralKind::Langtag(language.to_owned()));
        } else if let Some(datatype) = datatype.filter(|dt| *dt != STRING_DATATYPE_IRI) {
            if !self.datatypes.enabled() {
                return Err(JellyError::conformance(format!(
                    "cannot encode a literal with datatype {datatype}: \
                     the datatype lookup is disabled (size 0)"
                )));
            }
            if let Some(id) = self.datatypes.encode_entry_index(datatype) {
                rows.push(pb::RdfStreamRow::from_kind(Row::Datatype(
                    pb::RdfDatatypeEntry {
                        id,
                        value: datatype.to_owned(),
                    },
                )));
            }
            let datatype_id = self.datatypes.encode_datatype_term_index(datatype);
            literal_kind = Some(pb::rdf_literal::LiteralKind::Datatype(datatype_id));
        }
        Ok(pb::RdfLiteral {
            lex: lex.to_owned(),
            literal_kind,
        })
    }

    /// Encodes any term into its wire form, collecting preceding entry rows.
    pub(crate) fn encode_term(
        &mut self,
        term: &Term,
        rows: &mut Vec<pb::RdfStreamRow>,
    ) -> Result<EncodedTerm> {
        match term {
            Term::Iri(iri) => Ok(EncodedTerm::Iri(self.encode_iri(iri, rows))),
            Term::BlankNode(id) => Ok(EncodedTerm::Bnode(id.clone())),
            Term::Literal {
                lex,
                language,
                datatype,
            } => Ok(EncodedTerm::Literal(self.encode_literal(
                lex,
                language.as_deref(),
                datatype.as_deref(),
                rows,
            )?)),
            Term::DefaultGraph => Ok(EncodedTerm::DefaultGraph),
            // Quoted triples never participate in slot repetition; their
            // terms still go through the lookup tables.
            Term::Triple(quoted) => {
                let s = self.encode_term(&quoted.s, rows)?;
                let p = self.encode_term(&quoted.p, rows)?;
                let o = self.encode_term(&quoted.o, rows)?;
                Ok(EncodedTerm::TripleTerm(pb::RdfTriple {
                    subject: Some(triple_subject(s)?),
                    predicate: Some(triple_predicate(p)?),
                    object: Some(triple_object(o)?),
                }))
            }
        }
    }
}

// ── Slot mapping ─────────────────────────────────────────────────────────────

fn bad_slot(slot: &str) -> JellyError {
    JellyError::conformance(format!(
        "the default graph term is only valid in the graph slot, not {slot}"
    ))
}

fn triple_subject(term: EncodedTerm) -> Result<pb::rdf_triple::Subject> {
    use pb::rdf_triple::Subject;
    match term {
        EncodedTerm::Iri(iri) => Ok(Subject::SIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Subject::SBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Subject::SLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Subject::STripleTerm(Box::new(t))),
        EncodedTerm::DefaultGraph => Err(bad_slot("subject")),
    }
}

fn triple_predicate(term: EncodedTerm) -> Result<pb::rdf_triple::Predicate> {
    use pb::rdf_triple::Predicate;
    match term {
        EncodedTerm::Iri(iri) => Ok(Predicate::PIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Predicate::PBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Predicate::PLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Predicate::PTripleTerm(Box::new(t))),
        EncodedTerm::DefaultGraph => Err(bad_slot("predicate")),
    }
}

fn triple_object(term: EncodedTerm) -> Result<pb::rdf_triple::Object> {
    use pb::rdf_triple::Object;
    match term {
        EncodedTerm::Iri(iri) => Ok(Object::OIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Object::OBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Object::OLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Object::OTripleTerm(Box::new(t))),
        EncodedTerm::DefaultGraph => Err(bad_slot("object")),
    }
}

fn quad_subject(term: EncodedTerm) -> Result<pb::rdf_quad::Subject> {
    use pb::rdf_quad::Subject;
    match term {
        EncodedTerm::Iri(iri) => Ok(Subject::SIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Subject::SBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Subject::SLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Subject::STripleTerm(t)),
        EncodedTerm::DefaultGraph => Err(bad_slot("subject")),
    }
}

fn quad_predicate(term: EncodedTerm) -> Result<pb::rdf_quad::Predicate> {
    use pb::rdf_quad::Predicate;
    match term {
        EncodedTerm::Iri(iri) => Ok(Predicate::PIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Predicate::PBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Predicate::PLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Predicate::PTripleTerm(t)),
        EncodedTerm::DefaultGraph => Err(bad_slot("predicate")),
    }
}

fn quad_object(term: EncodedTerm) -> Result<pb::rdf_quad::Object> {
    use pb::rdf_quad::Object;
    match term {
        EncodedTerm::Iri(iri) => Ok(Object::OIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Object::OBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Object::OLiteral(lit)),
        EncodedTerm::TripleTerm(t) => Ok(Object::OTripleTerm(t)),
        EncodedTerm::DefaultGraph => Err(bad_slot("object")),
    }
}

fn quad_graph(term: EncodedTerm) -> Result<pb::rdf_quad::Graph> {
    use pb::rdf_quad::Graph;
    match term {
        EncodedTerm::Iri(iri) => Ok(Graph::GIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Graph::GBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Graph::GLiteral(lit)),
        EncodedTerm::DefaultGraph => Ok(Graph::GDefaultGraph(pb::RdfDefaultGraph {})),
        EncodedTerm::TripleTerm(_) => Err(JellyError::conformance(
            "a quoted triple is not a valid graph name",
        )),
    }
}

fn graph_start_graph(term: EncodedTerm) -> Result<pb::rdf_graph_start::Graph> {
    use pb::rdf_graph_start::Graph;
    match term {
        EncodedTerm::Iri(iri) => Ok(Graph::GIri(iri)),
        EncodedTerm::Bnode(id) => Ok(Graph::GBnode(id)),
        EncodedTerm::Literal(lit) => Ok(Graph::GLiteral(lit)),
        EncodedTerm::DefaultGraph => Ok(Graph::GDefaultGraph(pb::RdfDefaultGraph {})),
        EncodedTerm::TripleTerm(_) => Err(JellyError::conformance(
            "a quoted triple is not a valid graph name",
        )),
    }
}

// ── Statement encoding with slot repetition ──────────────────────────────────

/// Per-slot cache of the last term written, kept for the whole stream.
#[derive(Debug, Default)]
pub struct RepeatedTerms {
    s: Option<Term>,
    p: Option<Term>,
    o: Option<Term>,
    g: Option<Term>,
}

fn encode_slot(
    term: &Term,
    remembered: &mut Option<Term>,
    encoder: &mut TermEncoder,
    rows: &mut Vec<pb::RdfStreamRow>,
) -> Result<Option<EncodedTerm>> {
    if remembered.as_ref() == Some(term) {
        // Repeated slot: nothing on the wire, lookups untouched.
        return Ok(None);
    }
    let encoded = encoder.encode_term(term, rows)?;
    *remembered = Some(term.clone());
    Ok(Some(encoded))
}

/// Encodes one triple, returning its entry rows followed by the triple row.
pub fn encode_triple(
    triple: &Triple,
    encoder: &mut TermEncoder,
    repeated: &mut RepeatedTerms,
) -> Result<Vec<pb::RdfStreamRow>> {
    let mut rows = Vec::new();
    let mut out = pb::RdfTriple::default();
    if let Some(term) = encode_slot(&triple.s, &mut repeated.s, encoder, &mut rows)? {
        out.subject = Some(triple_subject(term)?);
    }
    if let Some(term) = encode_slot(&triple.p, &mut repeated.p, encoder, &mut rows)? {
        out.predicate = Some(triple_predicate(term)?);
    }
    if let Some(term) = encode_slot(&triple.o, &mut repeated.o, encoder, &mut rows)? {
        out.object = Some(triple_object(term)?);
    }
    rows.push(pb::RdfStreamRow::from_kind(Row::Triple(out)));
    Ok(rows)
}

/// Encodes one quad, returning its entry rows followed by the quad row.
pub fn encode_quad(
    quad: &Quad,
    encoder: &mut TermEncoder,
    repeated: &mut RepeatedTerms,
) -> Result<Vec<pb::RdfStreamRow>> {
    let mut rows = Vec::new();
    let mut out = pb::RdfQuad::default();
    if let Some(term) = encode_slot(&quad.s, &mut repeated.s, encoder, &mut rows)? {
        out.subject = Some(quad_subject(term)?);
    }
    if let Some(term) = encode_slot(&quad.p, &mut repeated.p, encoder, &mut rows)? {
        out.predicate = Some(quad_predicate(term)?);
    }
    if let Some(term) = encode_slot(&quad.o, &mut repeated.o, encoder, &mut rows)? {
        out.object = Some(quad_object(term)?);
    }
    if let Some(term) = encode_slot(&quad.g, &mut repeated.g, encoder, &mut rows)? {
        out.graph = Some(quad_graph(term)?);
    }
    rows.push(pb::RdfStreamRow::from_kind(Row::Quad(out)));
    Ok(rows)
}

/// Encodes a graph boundary start. Graph names are always written in full;
/// they do not participate in slot repetition.
pub fn encode_graph_start(
    graph: &Term,
    encoder: &mut TermEncoder,
) -> Result<Vec<pb::RdfStreamRow>> {
    let mut rows = Vec::new();
    let term = encoder.encode_term(graph, &mut rows)?;
    rows.push(pb::RdfStreamRow::from_kind(Row::GraphStart(
        pb::RdfGraphStart {
            graph: Some(graph_start_graph(term)?),
        },
    )));
    Ok(rows)
}

/// Encodes a graph boundary end.
pub fn encode_graph_end() -> pb::RdfStreamRow {
    pb::RdfStreamRow::from_kind(Row::GraphEnd(pb::RdfGraphEnd {}))
}

/// Encodes a namespace declaration. The namespace IRI goes through the
/// lookup tables like any other IRI, but the slot-repetition caches are
/// not involved.
pub fn encode_namespace_declaration(
    name: &str,
    iri: &str,
    encoder: &mut TermEncoder,
) -> Vec<pb::RdfStreamRow> {
    let mut rows = Vec::new();
    let value = encoder.encode_iri(iri, &mut rows);
    rows.push(pb::RdfStreamRow::from_kind(Row::Namespace(
        pb::RdfNamespaceDeclaration {
            name: name.to_owned(),
            value: Some(value),
        },
    )));
    rows
}

/// Encodes the stream options row.
pub fn encode_options(
    preset: &LookupPreset,
    stream_types: &StreamTypes,
    params: &StreamParameters,
) -> pb::RdfStreamRow {
    pb::RdfStreamRow::from_kind(Row::Options(pb::RdfStreamOptions {
        stream_name: params.stream_name.clone(),
        physical_type: stream_types.physical_type as i32,
        generalized_statements: params.generalized_statements,
        rdf_star: params.rdf_star,
        max_name_table_size: preset.max_names,
        max_prefix_table_size: preset.max_prefixes,
        max_datatype_table_size: preset.max_datatypes,
        logical_type: stream_types.logical_type as i32,
        version: params.version,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_at_hash() {
        assert_eq!(
            split_iri("http://example.org/ns#label"),
            ("http://example.org/ns#", "label")
        );
    }

    #[test]
    fn split_at_last_slash() {
        assert_eq!(
            split_iri("http://example.org/a/b"),
            ("http://example.org/a/", "b")
        );
    }

    /// A hash wins over a later slash.
    #[test]
    fn hash_preferred_over_slash() {
        assert_eq!(split_iri("http://x#a/b"), ("http://x#", "a/b"));
    }

    #[test]
    fn split_without_separator() {
        assert_eq!(split_iri("foo"), ("", "foo"));
    }

    #[test]
    fn split_trailing_separator() {
        assert_eq!(split_iri("http://example.org/"), ("http://example.org/", ""));
    }
}
