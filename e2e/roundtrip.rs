// e2e/roundtrip.rs — whole-codec roundtrips (encode → write → detect →
// read → decode) under eviction pressure, disabled tables, both framing
// modes, and cross-graph slot compression.

use std::io::Cursor;

use jelly::generic::{parse_flat, FlatEvent};
use jelly::model::{Quad, Statement, Term, Triple};
use jelly::options::LookupPreset;
use jelly::pb::PhysicalStreamType;
use jelly::serialize::{FrameFlow, FrameWriter, SerializerOptions, StreamEncoder};

fn encode_flat_triples(
    triples: &[Triple],
    preset: LookupPreset,
    frame_size: Option<usize>,
    delimited: bool,
) -> Vec<u8> {
    let flow = if delimited {
        FrameFlow::flat_triples(frame_size)
    } else {
        FrameFlow::manual()
    };
    let mut encoder = StreamEncoder::new(
        PhysicalStreamType::Triples,
        flow,
        SerializerOptions {
            lookup_preset: preset,
            ..Default::default()
        },
    )
    .unwrap();
    let mut writer = FrameWriter::new(Vec::new(), delimited);
    for triple in triples {
        if let Some(frame) = encoder.triple(triple).unwrap() {
            writer.write_frame(&frame).unwrap();
        }
    }
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame).unwrap();
    }
    writer.into_inner().unwrap()
}

fn decode_statements(bytes: Vec<u8>) -> Vec<Statement> {
    parse_flat(Cursor::new(bytes))
        .unwrap()
        .map(|event| match event.unwrap() {
            FlatEvent::Statement(statement) => statement,
            other => panic!("expected a statement, got {other:?}"),
        })
        .collect()
}

fn as_triples(statements: Vec<Statement>) -> Vec<Triple> {
    statements
        .into_iter()
        .map(|statement| match statement {
            Statement::Triple(triple) => triple,
            other => panic!("expected a triple, got {other:?}"),
        })
        .collect()
}

/// Triples with many distinct names and a few shared prefixes.
fn varied_triples(count: usize) -> Vec<Triple> {
    (0..count)
        .map(|n| {
            Triple::new(
                Term::iri(format!("http://example.org/ns{}/subject{n}", n % 3)),
                Term::iri(format!("http://example.org/vocab#p{}", n % 5)),
                match n % 4 {
                    0 => Term::literal(format!("plain {n}")),
                    1 => Term::lang_literal(format!("lang {n}"), "en-GB"),
                    2 => Term::typed_literal(
                        format!("{n}"),
                        "http://www.w3.org/2001/XMLSchema#integer",
                    ),
                    _ => Term::bnode(format!("b{n}")),
                },
            )
        })
        .collect()
}

/// decode(encode(G)) == G for a mixed-term graph with default tables.
#[test]
fn flat_triples_roundtrip() {
    let triples = varied_triples(64);
    let bytes = encode_flat_triples(&triples, LookupPreset::default(), Some(10), true);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// The minimum legal name table (8 entries) still roundtrips inputs with
/// far more distinct names, through continuous eviction.
#[test]
fn minimum_name_table_roundtrips_under_eviction() {
    let preset = LookupPreset {
        max_names: 8,
        max_prefixes: 4,
        max_datatypes: 2,
    };
    let triples = varied_triples(100);
    let bytes = encode_flat_triples(&triples, preset, Some(7), true);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// Revisiting early terms after eviction forces re-entry under fresh
/// indices and must still decode exactly.
#[test]
fn eviction_and_revisit_roundtrip() {
    let mut triples = varied_triples(30);
    let revisit: Vec<_> = varied_triples(30).into_iter().take(10).collect();
    triples.extend(revisit);
    let preset = LookupPreset {
        max_names: 8,
        max_prefixes: 2,
        max_datatypes: 2,
    };
    let bytes = encode_flat_triples(&triples, preset, Some(11), true);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// With the prefix table disabled, whole IRIs travel as names and still
/// roundtrip.
#[test]
fn disabled_prefix_table_roundtrip() {
    let preset = LookupPreset {
        max_names: 32,
        max_prefixes: 0,
        max_datatypes: 8,
    };
    let triples = varied_triples(40);
    let bytes = encode_flat_triples(&triples, preset, Some(10), true);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// Non-delimited mode: one frame, detected and decoded identically.
#[test]
fn non_delimited_roundtrip() {
    let triples = varied_triples(20);
    let bytes = encode_flat_triples(&triples, LookupPreset::default(), None, false);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// RDF-star: quoted triples nest and roundtrip.
#[test]
fn quoted_triples_roundtrip() {
    let inner = Triple::new(
        Term::iri("http://example.org/alice"),
        Term::iri("http://example.org/age"),
        Term::typed_literal("42", "http://www.w3.org/2001/XMLSchema#integer"),
    );
    let nested = Triple::new(
        Term::Triple(Box::new(inner.clone())),
        Term::iri("http://example.org/statedBy"),
        Term::Triple(Box::new(Triple::new(
            Term::iri("http://example.org/bob"),
            Term::iri("http://example.org/on"),
            Term::lang_literal("yesterday", "en"),
        ))),
    );
    let triples = vec![inner, nested];
    let bytes = encode_flat_triples(&triples, LookupPreset::default(), None, true);
    assert_eq!(as_triples(decode_statements(bytes)), triples);
}

/// Cross-graph slot compression: the s/p/o caches survive graph
/// boundaries, and the decoder mirrors that.
#[test]
fn graph_boundaries_do_not_reset_slot_caches() {
    let shared = Triple::new(
        Term::iri("http://example.org/s"),
        Term::iri("http://example.org/p"),
        Term::literal("same"),
    );
    let mut encoder = StreamEncoder::new(
        PhysicalStreamType::Graphs,
        FrameFlow::graphs(),
        SerializerOptions::default(),
    )
    .unwrap();
    let mut writer = FrameWriter::delimited(Vec::new());
    for graph in 1..=2 {
        encoder
            .graph_start(&Term::iri(format!("http://example.org/g{graph}")))
            .unwrap();
        if let Some(frame) = encoder.triple(&shared).unwrap() {
            writer.write_frame(&frame).unwrap();
        }
        if let Some(frame) = encoder.graph_end().unwrap() {
            writer.write_frame(&frame).unwrap();
        }
    }
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    let statements = decode_statements(bytes);
    assert_eq!(statements.len(), 2);
    let expected: Vec<Statement> = (1..=2)
        .map(|graph| {
            Statement::Quad(Quad::new(
                shared.s.clone(),
                shared.p.clone(),
                shared.o.clone(),
                Term::iri(format!("http://example.org/g{graph}")),
            ))
        })
        .collect();
    assert_eq!(statements, expected);
}

/// Quads streams roundtrip with graph-slot repetition across statements.
#[test]
fn flat_quads_roundtrip() {
    let quads: Vec<Quad> = (0..30)
        .map(|n| {
            Quad::new(
                Term::iri(format!("http://example.org/s{n}")),
                Term::iri("http://example.org/p"),
                Term::literal(format!("{n}")),
                match n % 3 {
                    0 => Term::DefaultGraph,
                    1 => Term::iri("http://example.org/g1"),
                    _ => Term::bnode("g2"),
                },
            )
        })
        .collect();
    let mut encoder = StreamEncoder::new(
        PhysicalStreamType::Quads,
        FrameFlow::flat_quads(Some(9)),
        SerializerOptions::default(),
    )
    .unwrap();
    let mut writer = FrameWriter::delimited(Vec::new());
    for quad in &quads {
        if let Some(frame) = encoder.quad(quad).unwrap() {
            writer.write_frame(&frame).unwrap();
        }
    }
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    let decoded: Vec<Quad> = decode_statements(bytes)
        .into_iter()
        .map(|statement| match statement {
            Statement::Quad(quad) => quad,
            other => panic!("expected a quad, got {other:?}"),
        })
        .collect();
    assert_eq!(decoded, quads);
}
