//! Byte-level input handling: framing auto-detection and lazy frame
//! iteration over delimited and non-delimited streams.

use std::io::{Cursor, ErrorKind, Read};

use prost::Message;
use tracing::debug;

use crate::error::{JellyError, Result};
use crate::options::ParserOptions;
use crate::pb::rdf_stream_row::Row;
use crate::pb::RdfStreamFrame;

/// Field tag of the first row in a frame. The first byte of a
/// non-delimited stream is always this value, which is what the framing
/// auto-detection below keys on.
const ROW_TAG: u8 = 0x0A;

/// Detects whether a stream is delimited from its first three bytes.
///
/// Truth table (`0A` = `0x0A`, `NN` = anything else, `??` = don't care):
///
/// | Byte 1 | Byte 2 | Byte 3 | Result                                   |
/// |--------|--------|--------|------------------------------------------|
/// | `NN`   |  `??`  |  `??`  | Delimited                                |
/// | `0A`   |  `NN`  |  `??`  | Non-delimited                            |
/// | `0A`   |  `0A`  |  `NN`  | Delimited (frame size = 10)              |
/// | `0A`   |  `0A`  |  `0A`  | Non-delimited (options row size = 10)    |
pub fn delimited_jelly_hint(header: &[u8]) -> bool {
    header.len() == 3 && (header[0] != ROW_TAG || (header[1] == ROW_TAG && header[2] != ROW_TAG))
}

/// Reads one base-128 varint. `Ok(None)` on clean EOF before the first
/// byte; truncation in the middle of a varint is a conformance error.
fn read_varint<R: Read>(reader: &mut R) -> Result<Option<u64>> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => {
                return if shift == 0 {
                    Ok(None)
                } else {
                    Err(JellyError::conformance("truncated frame length prefix"))
                };
            }
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
        value |= u64::from(byte[0] & 0x7F) << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(Some(value));
        }
        shift += 7;
        if shift >= 64 {
            return Err(JellyError::conformance("frame length prefix overflows"));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    Delimited,
    Single,
}

/// Lazily yields the frames of a byte stream, in either framing mode.
///
/// Every yielded frame is checked to contain at least one row; empty
/// frames are invalid.
pub struct FrameIterator<R: Read> {
    input: std::io::Chain<Cursor<Vec<u8>>, R>,
    framing: Framing,
    done: bool,
}

impl<R: Read> FrameIterator<R> {
    fn read_delimited_frame(&mut self) -> Result<Option<RdfStreamFrame>> {
        let length = match read_varint(&mut self.input)? {
            Some(length) => length,
            None => return Ok(None),
        };
        let mut buf = Vec::new();
        (&mut self.input).take(length).read_to_end(&mut buf)?;
        if (buf.len() as u64) < length {
            return Err(JellyError::conformance(format!(
                "frame truncated: expected {length} bytes, got {}",
                buf.len()
            )));
        }
        Ok(Some(RdfStreamFrame::decode(buf.as_slice())?))
    }

    fn read_single_frame(&mut self) -> Result<RdfStreamFrame> {
        let mut buf = Vec::new();
        self.input.read_to_end(&mut buf)?;
        Ok(RdfStreamFrame::decode(buf.as_slice())?)
    }
}

impl<R: Read> Iterator for FrameIterator<R> {
    type Item = Result<RdfStreamFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let frame = match self.framing {
            Framing::Delimited => match self.read_delimited_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            },
            Framing::Single => {
                self.done = true;
                match self.read_single_frame() {
                    Ok(frame) => frame,
                    Err(err) => return Some(Err(err)),
                }
            }
        };
        if frame.rows.is_empty() {
            self.done = true;
            return Some(Err(JellyError::conformance(
                "a frame with zero rows is invalid",
            )));
        }
        Some(Ok(frame))
    }
}

/// The frames of one stream: the eagerly read first frame (from which the
/// options were extracted) followed by the remaining frames.
pub struct Frames<R: Read> {
    first: Option<RdfStreamFrame>,
    rest: FrameIterator<R>,
}

impl<R: Read> Iterator for Frames<R> {
    type Item = Result<RdfStreamFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(first) = self.first.take() {
            return Some(Ok(first));
        }
        self.rest.next()
    }
}

/// Extracts the stream options from the first row of the first frame.
pub fn options_from_frame(frame: &RdfStreamFrame, delimited: bool) -> Result<ParserOptions> {
    let first_row = frame
        .rows
        .first()
        .ok_or_else(|| JellyError::conformance("a frame with zero rows is invalid"))?;
    match &first_row.row {
        Some(Row::Options(options)) => ParserOptions::from_options_row(options, delimited),
        _ => Err(JellyError::conformance(
            "the first row of a stream must be an options row",
        )),
    }
}

/// Detects the framing mode of `input`, reads the first frame, and returns
/// the validated stream options together with a lazy iterator over all
/// frames (the first one included).
pub fn options_and_frames<R: Read>(mut input: R) -> Result<(ParserOptions, Frames<R>)> {
    let mut header = Vec::with_capacity(3);
    (&mut input).take(3).read_to_end(&mut header)?;
    let delimited = delimited_jelly_hint(&header);
    debug!(delimited, "auto-detected jelly framing");

    let mut iter = FrameIterator {
        input: Cursor::new(header).chain(input),
        framing: if delimited {
            Framing::Delimited
        } else {
            Framing::Single
        },
        done: false,
    };
    let first = match iter.next() {
        Some(frame) => frame?,
        None => {
            return Err(JellyError::conformance(
                "the stream contains no frames",
            ))
        }
    };
    let options = options_from_frame(&first, delimited)?;
    Ok((
        options,
        Frames {
            first: Some(first),
            rest: iter,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The complete eight-row truth table over {0x0A, NN} prefixes.
    #[test]
    fn delimited_hint_truth_table() {
        let nn = 0x00;
        let cases = [
            ([nn, nn, nn], true),
            ([nn, nn, 0x0A], true),
            ([nn, 0x0A, nn], true),
            ([nn, 0x0A, 0x0A], true),
            ([0x0A, nn, nn], false),
            ([0x0A, nn, 0x0A], false),
            ([0x0A, 0x0A, nn], true),
            ([0x0A, 0x0A, 0x0A], false),
        ];
        for (header, expected) in cases {
            assert_eq!(
                delimited_jelly_hint(&header),
                expected,
                "header {header:02X?}"
            );
        }
    }

    /// Inputs shorter than three bytes never look delimited.
    #[test]
    fn short_header_is_not_delimited() {
        assert!(!delimited_jelly_hint(&[]));
        assert!(!delimited_jelly_hint(&[0x00]));
        assert!(!delimited_jelly_hint(&[0x00, 0x00]));
    }

    #[test]
    fn varint_roundtrip() {
        let mut buf = Vec::new();
        prost::encoding::encode_varint(300, &mut buf);
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_varint(&mut cursor).unwrap(), Some(300));
        assert_eq!(read_varint(&mut cursor).unwrap(), None);
    }

    #[test]
    fn truncated_varint_is_conformance_error() {
        let mut cursor = Cursor::new(vec![0x80u8]);
        assert!(matches!(
            read_varint(&mut cursor),
            Err(JellyError::Conformance(_))
        ));
    }

    #[test]
    fn empty_input_is_conformance_error() {
        let result = options_and_frames(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(JellyError::Conformance(_))));
    }
}
