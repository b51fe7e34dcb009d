//! Generic RDF statement model.
//!
//! A small, self-contained term model used by the encoder input side, the
//! generic statement sink, and the N-Triples/N-Quads bridge. External RDF
//! libraries integrate through the [`crate::parse::Adapter`] trait instead
//! and never need these types.

use std::fmt;

/// A single RDF term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An IRI, stored as its full string form.
    Iri(String),
    /// A blank node, stored as its bare identifier (without the `_:`).
    BlankNode(String),
    /// A literal: lexical form plus at most one of language tag / datatype.
    Literal {
        lex: String,
        language: Option<String>,
        datatype: Option<String>,
    },
    /// The default graph of a dataset (valid only in the graph slot).
    DefaultGraph,
    /// An RDF-star quoted triple.
    Triple(Box<Triple>),
}

impl Term {
    /// Plain literal with the default string datatype.
    pub fn literal(lex: impl Into<String>) -> Self {
        Term::Literal {
            lex: lex.into(),
            language: None,
            datatype: None,
        }
    }

    /// Language-tagged string literal.
    pub fn lang_literal(lex: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal {
            lex: lex.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// Typed literal.
    pub fn typed_literal(lex: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            lex: lex.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn bnode(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }
}

/// An RDF triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub s: Term,
    pub p: Term,
    pub o: Term,
}

impl Triple {
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Triple { s, p, o }
    }
}

/// An RDF quad. `g` may be [`Term::DefaultGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub s: Term,
    pub p: Term,
    pub o: Term,
    pub g: Term,
}

impl Quad {
    pub fn new(s: Term, p: Term, o: Term, g: Term) -> Self {
        Quad { s, p, o, g }
    }
}

/// Either a triple or a quad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Triple(Triple),
    Quad(Quad),
}

impl Statement {
    /// Upgrades a triple to a quad in the default graph; quads pass through.
    pub fn into_quad(self) -> Quad {
        match self {
            Statement::Triple(t) => Quad::new(t.s, t.p, t.o, Term::DefaultGraph),
            Statement::Quad(q) => q,
        }
    }
}

impl From<Triple> for Statement {
    fn from(t: Triple) -> Self {
        Statement::Triple(t)
    }
}

impl From<Quad> for Statement {
    fn from(q: Quad) -> Self {
        Statement::Quad(q)
    }
}

// ── N-Triples display forms ──────────────────────────────────────────────────

fn write_escaped(f: &mut fmt::Formatter<'_>, lex: &str) -> fmt::Result {
    for c in lex.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal {
                lex,
                language,
                datatype,
            } => {
                f.write_str("\"")?;
                write_escaped(f, lex)?;
                f.write_str("\"")?;
                if let Some(language) = language {
                    write!(f, "@{language}")?;
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
            // The default graph has no surface syntax; an empty token only
            // ever appears in the graph position of a quad line.
            Term::DefaultGraph => Ok(()),
            Term::Triple(t) => write!(f, "<< {} {} {} >>", t.s, t.p, t.o),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.g {
            Term::DefaultGraph => write!(f, "{} {} {} .", self.s, self.p, self.o),
            _ => write!(f, "{} {} {} {} .", self.s, self.p, self.o, self.g),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Triple(t) => t.fmt(f),
            Statement::Quad(q) => q.fmt(f),
        }
    }
}
