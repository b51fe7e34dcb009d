// Row-level tests for term and statement encoding: IRI splitting through
// the lookup tables, entry-row emission order, slot repetition, and the
// datatype rules.

use jelly::model::{Term, Triple};
use jelly::options::{LookupPreset, STRING_DATATYPE_IRI};
use jelly::pb;
use jelly::pb::rdf_stream_row::Row;
use jelly::serialize::encode::{encode_triple, TermEncoder};
use jelly::serialize::RepeatedTerms;
use jelly::JellyError;

fn encoder(prefixes: u32, names: u32, datatypes: u32) -> TermEncoder {
    TermEncoder::new(&LookupPreset {
        max_names: names,
        max_prefixes: prefixes,
        max_datatypes: datatypes,
    })
}

fn prefix_entry(row: &pb::RdfStreamRow) -> &pb::RdfPrefixEntry {
    match &row.row {
        Some(Row::Prefix(entry)) => entry,
        other => panic!("expected a prefix entry, got {other:?}"),
    }
}

fn name_entry(row: &pb::RdfStreamRow) -> &pb::RdfNameEntry {
    match &row.row {
        Some(Row::Name(entry)) => entry,
        other => panic!("expected a name entry, got {other:?}"),
    }
}

fn triple_row(row: &pb::RdfStreamRow) -> &pb::RdfTriple {
    match &row.row {
        Some(Row::Triple(triple)) => triple,
        other => panic!("expected a triple row, got {other:?}"),
    }
}

/// A fresh encoder splits an IRI into a prefix entry, a name entry and a
/// term referencing them; both entry ids compress to the 0 sentinel.
#[test]
fn first_iri_emits_both_entries() {
    let mut enc = encoder(16, 16, 16);
    let mut rows = Vec::new();
    let iri = enc.encode_iri("http://example.org/foo", &mut rows);

    assert_eq!(rows.len(), 2);
    let prefix = prefix_entry(&rows[0]);
    assert_eq!(prefix.id, 0);
    assert_eq!(prefix.value, "http://example.org/");
    let name = name_entry(&rows[1]);
    assert_eq!(name.id, 0);
    assert_eq!(name.value, "foo");

    assert_eq!(iri, pb::RdfIri { prefix_id: 1, name_id: 0 });
}

/// Two IRIs sharing a prefix: the second emits only a name entry, with the
/// prefix repeated via the 0 sentinel and the name contiguous.
#[test]
fn shared_prefix_compresses_to_sentinels() {
    let mut enc = encoder(16, 16, 16);
    let mut rows = Vec::new();
    let first = enc.encode_iri("http://x/a", &mut rows);
    assert_eq!(rows.len(), 2);
    assert_eq!(first, pb::RdfIri { prefix_id: 1, name_id: 0 });

    rows.clear();
    let second = enc.encode_iri("http://x/b", &mut rows);
    assert_eq!(rows.len(), 1);
    assert_eq!(name_entry(&rows[0]).id, 0);
    assert_eq!(name_entry(&rows[0]).value, "b");
    assert_eq!(second, pb::RdfIri { prefix_id: 0, name_id: 0 });
}

/// With the prefix table disabled the whole IRI is stored as the name and
/// the prefix index is always 0.
#[test]
fn disabled_prefix_table_stores_whole_iri() {
    let mut enc = encoder(0, 16, 16);
    let mut rows = Vec::new();
    let iri = enc.encode_iri("http://example.org/foo", &mut rows);
    assert_eq!(rows.len(), 1);
    assert_eq!(name_entry(&rows[0]).value, "http://example.org/foo");
    assert_eq!(iri.prefix_id, 0);
}

/// The default string datatype never produces a datatype entry and leaves
/// the literal's datatype field at its default.
#[test]
fn string_datatype_is_implicit() {
    let mut enc = encoder(16, 16, 16);
    let mut rows = Vec::new();
    let literal = enc
        .encode_literal("hello", None, Some(STRING_DATATYPE_IRI), &mut rows)
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(literal.literal_kind, None);
    assert!(enc.datatypes.lookup().is_empty());
}

/// Typed literals fail when the datatype table is disabled.
#[test]
fn typed_literal_with_disabled_table_fails() {
    let mut enc = encoder(16, 16, 0);
    let mut rows = Vec::new();
    let result = enc.encode_literal(
        "1",
        None,
        Some("http://www.w3.org/2001/XMLSchema#int"),
        &mut rows,
    );
    assert!(matches!(result, Err(JellyError::Conformance(_))));
}

/// A literal cannot carry both a language tag and a datatype.
#[test]
fn literal_with_language_and_datatype_fails() {
    let mut enc = encoder(16, 16, 16);
    let mut rows = Vec::new();
    let result = enc.encode_literal(
        "x",
        Some("en"),
        Some("http://www.w3.org/2001/XMLSchema#int"),
        &mut rows,
    );
    assert!(matches!(result, Err(JellyError::Conformance(_))));
}

fn example_triple(n: u32) -> Triple {
    Triple::new(
        Term::iri("http://example.org/s"),
        Term::iri("http://example.org/p"),
        Term::literal(format!("{n}")),
    )
}

/// Identical consecutive statements elide every slot: the second statement
/// row carries no term fields at all.
#[test]
fn full_slot_elision() {
    let mut enc = encoder(16, 16, 16);
    let mut repeated = RepeatedTerms::default();
    let triple = example_triple(0);

    let rows = encode_triple(&triple, &mut enc, &mut repeated).unwrap();
    let first = triple_row(rows.last().unwrap());
    assert!(first.subject.is_some());
    assert!(first.predicate.is_some());
    assert!(first.object.is_some());

    let rows = encode_triple(&triple, &mut enc, &mut repeated).unwrap();
    assert_eq!(rows.len(), 1, "repeat emits only the statement row");
    let second = triple_row(&rows[0]);
    assert!(second.subject.is_none());
    assert!(second.predicate.is_none());
    assert!(second.object.is_none());
}

/// When only some slots repeat, the row carries exactly the changed ones.
#[test]
fn partial_slot_elision() {
    let mut enc = encoder(16, 16, 16);
    let mut repeated = RepeatedTerms::default();
    encode_triple(&example_triple(0), &mut enc, &mut repeated).unwrap();

    let rows = encode_triple(&example_triple(1), &mut enc, &mut repeated).unwrap();
    let row = triple_row(rows.last().unwrap());
    assert!(row.subject.is_none(), "subject repeats");
    assert!(row.predicate.is_none(), "predicate repeats");
    assert!(row.object.is_some(), "object changed");
}

/// Entry rows always precede the statement row that references them.
#[test]
fn entry_rows_precede_statement_row() {
    let mut enc = encoder(16, 16, 16);
    let mut repeated = RepeatedTerms::default();
    let rows = encode_triple(&example_triple(0), &mut enc, &mut repeated).unwrap();
    let statement_position = rows
        .iter()
        .position(|row| matches!(row.row, Some(Row::Triple(_))))
        .unwrap();
    assert_eq!(statement_position, rows.len() - 1);
    for row in &rows[..statement_position] {
        assert!(matches!(
            row.row,
            Some(Row::Prefix(_)) | Some(Row::Name(_)) | Some(Row::Datatype(_))
        ));
    }
}

/// Quoted triples pass through the lookup tables but never touch the
/// slot-repetition caches.
#[test]
fn quoted_triple_does_not_affect_repetition() {
    let mut enc = encoder(16, 16, 16);
    let mut repeated = RepeatedTerms::default();
    let quoted = Term::Triple(Box::new(Triple::new(
        Term::iri("http://example.org/qs"),
        Term::iri("http://example.org/qp"),
        Term::literal("inner"),
    )));
    let outer = Triple::new(
        quoted.clone(),
        Term::iri("http://example.org/says"),
        Term::bnode("who"),
    );
    let rows = encode_triple(&outer, &mut enc, &mut repeated).unwrap();
    let row = triple_row(rows.last().unwrap());
    match &row.subject {
        Some(pb::rdf_triple::Subject::STripleTerm(inner)) => {
            assert!(inner.subject.is_some());
            assert!(inner.predicate.is_some());
            assert!(inner.object.is_some());
        }
        other => panic!("expected a quoted triple subject, got {other:?}"),
    }
    // Encoding the same outer triple again elides the whole subject.
    let rows = encode_triple(&outer, &mut enc, &mut repeated).unwrap();
    assert!(triple_row(rows.last().unwrap()).subject.is_none());
}
