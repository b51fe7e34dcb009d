// Stream-level reader tests: framing auto-detection against real encoder
// output, frame iteration in both modes, and the conformance errors for
// malformed streams.

use std::io::Cursor;

use prost::Message;

use jelly::pb;
use jelly::pb::rdf_stream_row::Row;
use jelly::model::{Term, Triple};
use jelly::options::StreamParameters;
use jelly::parse::options_and_frames;
use jelly::pb::PhysicalStreamType;
use jelly::serialize::{FrameFlow, FrameWriter, SerializerOptions, StreamEncoder};
use jelly::JellyError;

fn triple(n: usize) -> Triple {
    Triple::new(
        Term::iri(format!("http://example.org/s{n}")),
        Term::iri("http://example.org/p"),
        Term::literal(n.to_string()),
    )
}

/// Encodes `count` triples as a flat stream; `frame_size` rows per frame.
fn flat_triples_stream(count: usize, frame_size: usize, delimited: bool) -> Vec<u8> {
    let flow = if delimited {
        FrameFlow::flat_triples(Some(frame_size))
    } else {
        FrameFlow::manual()
    };
    let mut encoder =
        StreamEncoder::new(PhysicalStreamType::Triples, flow, SerializerOptions::default())
            .unwrap();
    let mut writer = FrameWriter::new(Vec::new(), delimited);
    for n in 0..count {
        if let Some(frame) = encoder.triple(&triple(n)).unwrap() {
            writer.write_frame(&frame).unwrap();
        }
    }
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame).unwrap();
    }
    writer.into_inner().unwrap()
}

#[test]
fn detects_delimited_stream() {
    let bytes = flat_triples_stream(10, 4, true);
    let (options, frames) = options_and_frames(Cursor::new(bytes)).unwrap();
    assert!(options.delimited);
    // 23 rows total (options + entries + statements), cut at 4-row bounds
    // after each statement batch, plus the final flush.
    assert_eq!(frames.count(), 6);
}

#[test]
fn detects_non_delimited_stream() {
    let bytes = flat_triples_stream(10, 4, false);
    let (options, frames) = options_and_frames(Cursor::new(bytes)).unwrap();
    assert!(!options.delimited);
    let frames: Vec<_> = frames.collect::<Result<_, _>>().unwrap();
    assert_eq!(frames.len(), 1);
}

/// Non-delimited write then read yields the single frame byte-for-byte.
#[test]
fn non_delimited_roundtrip_is_byte_exact() {
    let bytes = flat_triples_stream(5, 0, false);
    let (_, mut frames) = options_and_frames(Cursor::new(bytes.clone())).unwrap();
    let frame = frames.next().unwrap().unwrap();
    assert_eq!(frame.encode_to_vec(), bytes);
    assert!(frames.next().is_none());
}

/// Concatenated delimited streams read back as the concatenation of their
/// frames, in order.
#[test]
fn delimited_concatenation() {
    let a = flat_triples_stream(4, 3, true);
    let b = flat_triples_stream(2, 3, true);
    let frames_in = |bytes: &[u8]| {
        let (_, frames) = options_and_frames(Cursor::new(bytes.to_vec())).unwrap();
        frames.map(|f| f.unwrap()).collect::<Vec<_>>()
    };
    let expected: Vec<_> = frames_in(&a).into_iter().chain(frames_in(&b)).collect();

    let mut joined = a.clone();
    joined.extend_from_slice(&b);
    let got = frames_in(&joined);
    assert_eq!(got.len(), expected.len());
    assert_eq!(got, expected);
}

/// A first row that is not an options row is a conformance error.
#[test]
fn missing_options_row() {
    let frame = pb::RdfStreamFrame {
        rows: vec![pb::RdfStreamRow::from_kind(Row::GraphEnd(pb::RdfGraphEnd {}))],
        metadata: Default::default(),
    };
    let bytes = frame.encode_to_vec();
    assert!(matches!(
        options_and_frames(Cursor::new(bytes)),
        Err(JellyError::Conformance(_))
    ));
}

/// A frame with zero rows is invalid wherever it appears.
#[test]
fn empty_first_frame() {
    let frame = pb::RdfStreamFrame::default();
    let bytes = frame.encode_length_delimited_to_vec();
    assert!(matches!(
        options_and_frames(Cursor::new(bytes)),
        Err(JellyError::Conformance(_))
    ));
}

/// A delimited stream cut off mid-frame fails with a conformance error.
#[test]
fn truncated_delimited_stream() {
    let mut bytes = flat_triples_stream(4, 3, true);
    bytes.truncate(bytes.len() - 4);
    let (_, frames) = options_and_frames(Cursor::new(bytes)).unwrap();
    let results: Vec<_> = frames.collect();
    assert!(results
        .iter()
        .any(|result| matches!(result, Err(JellyError::Conformance(_)))));
}

/// Truncation inside the very first frame fails at open time.
#[test]
fn truncated_first_frame() {
    let mut bytes = flat_triples_stream(3, 100, true);
    bytes.truncate(bytes.len() - 4);
    assert!(matches!(
        options_and_frames(Cursor::new(bytes)),
        Err(JellyError::Conformance(_))
    ));
}

/// Writing a second frame in non-delimited mode is refused.
#[test]
fn non_delimited_single_frame_constraint() {
    let frame = pb::RdfStreamFrame {
        rows: vec![pb::RdfStreamRow::from_kind(Row::GraphEnd(pb::RdfGraphEnd {}))],
        metadata: Default::default(),
    };
    let mut writer = FrameWriter::new(Vec::new(), false);
    writer.write_frame(&frame).unwrap();
    assert!(matches!(
        writer.write_frame(&frame),
        Err(JellyError::Conformance(_))
    ));
}

/// The options row of the stream reflects the negotiated parameters.
#[test]
fn options_carry_stream_parameters() {
    let mut encoder = StreamEncoder::new(
        PhysicalStreamType::Triples,
        FrameFlow::flat_triples(None),
        SerializerOptions {
            params: StreamParameters {
                stream_name: "test-stream".to_owned(),
                rdf_star: true,
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .unwrap();
    let mut writer = FrameWriter::delimited(Vec::new());
    encoder.triple(&triple(0)).unwrap();
    if let Some(frame) = encoder.flush() {
        writer.write_frame(&frame).unwrap();
    }
    let bytes = writer.into_inner().unwrap();
    let (options, _) = options_and_frames(Cursor::new(bytes)).unwrap();
    assert_eq!(options.params.stream_name, "test-stream");
    assert!(options.params.rdf_star);
    assert_eq!(
        options.stream_types.physical_type,
        PhysicalStreamType::Triples
    );
}
