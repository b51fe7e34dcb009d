//! Generic statement sink: an ordered, in-memory collection of statements
//! with namespace bindings and per-frame metadata.

use std::collections::HashMap;
use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Statement, Term};

/// An ordered in-memory statement store.
///
/// Used as the per-frame sink in grouped reading mode and as the staging
/// area of the N-Triples/N-Quads bridge. Statement order is preserved.
#[derive(Debug, Default)]
pub struct GenericStatementSink {
    store: Vec<Statement>,
    namespaces: IndexMap<String, String>,
    identifier: Option<Term>,
    metadata: HashMap<String, Vec<u8>>,
}

impl GenericStatementSink {
    pub fn new() -> Self {
        GenericStatementSink::default()
    }

    pub fn with_identifier(identifier: Term) -> Self {
        GenericStatementSink {
            identifier: Some(identifier),
            ..Default::default()
        }
    }

    pub fn add(&mut self, statement: impl Into<Statement>) {
        self.store.push(statement.into());
    }

    /// Binds a prefix label to a namespace IRI. Rebinding overwrites.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.namespaces.insert(prefix.into(), namespace.into());
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.store.iter()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    pub fn identifier(&self) -> Option<&Term> {
        self.identifier.as_ref()
    }

    /// Metadata of the frame this sink was filled from (grouped mode).
    pub fn metadata(&self) -> &HashMap<String, Vec<u8>> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: HashMap<String, Vec<u8>>) {
        self.metadata = metadata;
    }

    /// True when the first stored statement is a triple.
    pub fn is_triples_sink(&self) -> bool {
        matches!(self.store.first(), Some(Statement::Triple(_)))
    }

    /// Writes the sink contents as N-Triples/N-Quads lines, namespace
    /// bindings first as `@prefix` lines.
    pub fn serialize<W: Write>(&self, mut out: W) -> Result<()> {
        for (prefix, iri) in self.namespaces() {
            writeln!(out, "@prefix {prefix}: <{iri}> .")?;
        }
        for statement in &self.store {
            writeln!(out, "{statement}")?;
        }
        Ok(())
    }
}

impl IntoIterator for GenericStatementSink {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.into_iter()
    }
}

impl Extend<Statement> for GenericStatementSink {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.store.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quad, Triple};

    #[test]
    fn preserves_statement_order() {
        let mut sink = GenericStatementSink::new();
        for i in 0..5 {
            sink.add(Triple::new(
                Term::iri(format!("http://example.org/{i}")),
                Term::iri("http://example.org/p"),
                Term::literal(i.to_string()),
            ));
        }
        let subjects: Vec<_> = sink
            .statements()
            .map(|s| match s {
                Statement::Triple(t) => t.s.clone(),
                Statement::Quad(q) => q.s.clone(),
            })
            .collect();
        assert_eq!(subjects[0], Term::iri("http://example.org/0"));
        assert_eq!(subjects[4], Term::iri("http://example.org/4"));
    }

    #[test]
    fn serializes_quads_and_prefixes() {
        let mut sink = GenericStatementSink::new();
        sink.bind("ex", "http://example.org/");
        sink.add(Quad::new(
            Term::bnode("b0"),
            Term::iri("http://example.org/p"),
            Term::lang_literal("hi", "en"),
            Term::iri("http://example.org/g"),
        ));
        let mut out = Vec::new();
        sink.serialize(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "@prefix ex: <http://example.org/> .\n\
             _:b0 <http://example.org/p> \"hi\"@en <http://example.org/g> .\n"
        );
    }
}
