//! Minimal N-Triples / N-Quads bridge.
//!
//! A line-oriented reader for the subset of the N-Triples and N-Quads
//! grammars the test suite and the CLI need, including RDF-star quoted
//! triples (`<< s p o >>`) and `@prefix` lines. Terms are not validated
//! against the full RDF grammar. Writing goes through the `Display` forms
//! of the statement model.

use std::io::BufRead;

use crate::error::{JellyError, Result};
use crate::model::{Quad, Statement, Term, Triple};

/// One meaningful line of an N-Triples/N-Quads document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NtLine {
    Statement(Statement),
    Prefix { name: String, iri: String },
}

fn parse_error(line: &str, what: &str) -> JellyError {
    JellyError::conformance(format!("failed to parse input line ({what}): {line}"))
}

/// Character cursor over one input line.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Consumes up to (and including) `end`, returning the text before it.
    fn until(&mut self, end: char) -> Option<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == end {
                let text = &self.input[start..self.pos];
                self.bump();
                return Some(text);
            }
            self.bump();
        }
        None
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_term(cursor: &mut Cursor<'_>) -> Result<Term> {
    cursor.skip_ws();
    let line = cursor.input;

    // Quoted triple: << s p o >>
    if cursor.eat("<<") {
        let s = parse_term(cursor)?;
        let p = parse_term(cursor)?;
        let o = parse_term(cursor)?;
        cursor.skip_ws();
        if !cursor.eat(">>") {
            return Err(parse_error(line, "unterminated quoted triple"));
        }
        return Ok(Term::Triple(Box::new(Triple::new(s, p, o))));
    }

    // IRI: <...>
    if cursor.eat("<") {
        let iri = cursor
            .until('>')
            .ok_or_else(|| parse_error(line, "unterminated IRI"))?;
        return Ok(Term::iri(iri));
    }

    // Blank node: _:label
    if cursor.eat("_:") {
        let start = cursor.pos;
        while matches!(cursor.peek(), Some(c) if !c.is_whitespace()) {
            cursor.bump();
        }
        let label = &cursor.input[start..cursor.pos];
        if label.is_empty() {
            return Err(parse_error(line, "empty blank node label"));
        }
        return Ok(Term::bnode(label));
    }

    // Literal: "lex" with optional @lang or ^^<datatype>
    if cursor.eat("\"") {
        let start = cursor.pos;
        loop {
            match cursor.bump() {
                Some('\\') => {
                    cursor.bump();
                }
                Some('"') => break,
                Some(_) => {}
                None => return Err(parse_error(line, "unterminated literal")),
            }
        }
        let lex = unescape(&cursor.input[start..cursor.pos - 1]);
        if cursor.eat("@") {
            let start = cursor.pos;
            while matches!(cursor.peek(), Some(c) if !c.is_whitespace()) {
                cursor.bump();
            }
            let tag = &cursor.input[start..cursor.pos];
            if tag.is_empty() {
                return Err(parse_error(line, "empty language tag"));
            }
            return Ok(Term::lang_literal(lex, tag));
        }
        if cursor.eat("^^") {
            if !cursor.eat("<") {
                return Err(parse_error(line, "datatype must be an IRI"));
            }
            let datatype = cursor
                .until('>')
                .ok_or_else(|| parse_error(line, "unterminated datatype IRI"))?;
            return Ok(Term::typed_literal(lex, datatype));
        }
        return Ok(Term::literal(lex));
    }

    Err(parse_error(line, "unrecognized term"))
}

/// Parses one statement line (without the `@prefix` case). `quads` selects
/// the N-Quads grammar: three-term lines then land in the default graph.
pub fn parse_statement(line: &str, quads: bool) -> Result<Statement> {
    let trimmed = line.trim_end();
    let body = trimmed
        .strip_suffix('.')
        .ok_or_else(|| parse_error(line, "missing terminating dot"))?;
    let mut cursor = Cursor::new(body);
    let mut terms = Vec::new();
    loop {
        cursor.skip_ws();
        if cursor.at_end() {
            break;
        }
        terms.push(parse_term(&mut cursor)?);
    }
    let count = terms.len();
    let mut it = terms.into_iter();
    match (it.next(), it.next(), it.next(), it.next(), it.next()) {
        (Some(s), Some(p), Some(o), None, None) if !quads => {
            Ok(Statement::Triple(Triple::new(s, p, o)))
        }
        (Some(s), Some(p), Some(o), None, None) => {
            Ok(Statement::Quad(Quad::new(s, p, o, Term::DefaultGraph)))
        }
        (Some(s), Some(p), Some(o), Some(g), None) if quads => {
            Ok(Statement::Quad(Quad::new(s, p, o, g)))
        }
        _ => Err(parse_error(line, &format!("unexpected term count {count}"))),
    }
}

/// Parses an `@prefix name: <iri> .` line.
pub fn parse_prefix(line: &str) -> Result<(String, String)> {
    let trimmed = line.trim_end();
    let body = trimmed
        .strip_prefix("@prefix")
        .and_then(|rest| rest.trim_end().strip_suffix('.'))
        .ok_or_else(|| parse_error(line, "malformed namespace declaration"))?;
    let mut cursor = Cursor::new(body);
    cursor.skip_ws();
    let start = cursor.pos;
    while matches!(cursor.peek(), Some(c) if c != ':' && !c.is_whitespace()) {
        cursor.bump();
    }
    let name = cursor.input[start..cursor.pos].to_owned();
    if !cursor.eat(":") {
        return Err(parse_error(line, "malformed namespace declaration"));
    }
    cursor.skip_ws();
    if !cursor.eat("<") {
        return Err(parse_error(line, "malformed namespace declaration"));
    }
    let iri = cursor
        .until('>')
        .ok_or_else(|| parse_error(line, "unterminated IRI"))?
        .to_owned();
    Ok((name, iri))
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str, quads: bool) -> Result<Option<NtLine>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    if trimmed.starts_with("@prefix") {
        let (name, iri) = parse_prefix(trimmed)?;
        return Ok(Some(NtLine::Prefix { name, iri }));
    }
    Ok(Some(NtLine::Statement(parse_statement(trimmed, quads)?)))
}

/// Iterator over the meaningful lines of an N-Triples/N-Quads document.
pub struct NtReader<R: BufRead> {
    lines: std::io::Lines<R>,
    quads: bool,
}

impl<R: BufRead> NtReader<R> {
    pub fn new(reader: R, quads: bool) -> Self {
        NtReader {
            lines: reader.lines(),
            quads,
        }
    }
}

impl<R: BufRead> Iterator for NtReader<R> {
    type Item = Result<NtLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            match parse_line(&line, self.quads) {
                Ok(None) => continue,
                Ok(Some(parsed)) => return Some(Ok(parsed)),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triple_line() {
        let statement = parse_statement(
            "<http://a/s> <http://a/p> \"v\"^^<http://www.w3.org/2001/XMLSchema#int> .",
            false,
        )
        .unwrap();
        assert_eq!(
            statement,
            Statement::Triple(Triple::new(
                Term::iri("http://a/s"),
                Term::iri("http://a/p"),
                Term::typed_literal("v", "http://www.w3.org/2001/XMLSchema#int"),
            ))
        );
    }

    #[test]
    fn parses_quad_line_with_default_graph() {
        let statement =
            parse_statement("_:b <http://a/p> \"x\"@en .", true).unwrap();
        match statement {
            Statement::Quad(quad) => assert_eq!(quad.g, Term::DefaultGraph),
            other => panic!("expected a quad, got {other:?}"),
        }
    }

    #[test]
    fn parses_quoted_triple() {
        let statement = parse_statement(
            "<< <http://a/s> <http://a/p> \"o\" >> <http://a/says> _:who .",
            false,
        )
        .unwrap();
        match statement {
            Statement::Triple(t) => match t.s {
                Term::Triple(inner) => assert_eq!(inner.p, Term::iri("http://a/p")),
                other => panic!("expected a quoted triple subject, got {other:?}"),
            },
            other => panic!("expected a triple, got {other:?}"),
        }
    }

    #[test]
    fn display_roundtrip_with_escapes() {
        let original = Statement::Triple(Triple::new(
            Term::iri("http://a/s"),
            Term::iri("http://a/p"),
            Term::literal("line\nbreak \"quoted\" back\\slash"),
        ));
        let line = original.to_string();
        let parsed = parse_statement(&line, false).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn parses_prefix_line() {
        let parsed = parse_line("@prefix ex: <http://example.org/> .", false)
            .unwrap()
            .unwrap();
        assert_eq!(
            parsed,
            NtLine::Prefix {
                name: "ex".to_owned(),
                iri: "http://example.org/".to_owned()
            }
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        assert_eq!(parse_line("# comment", false).unwrap(), None);
        assert_eq!(parse_line("   ", false).unwrap(), None);
    }

    #[test]
    fn rejects_bad_arity() {
        assert!(parse_statement("<http://a/s> <http://a/p> .", false).is_err());
        assert!(parse_statement(
            "<http://a/s> <http://a/p> <http://a/o> <http://a/g> .",
            false
        )
        .is_err());
    }
}
