//! Frame writer: turns frames into bytes.
//!
//! Two modes, chosen at construction: delimited output prefixes every frame
//! with a base-128 varint length and is safe for concatenation and
//! streaming; non-delimited output writes exactly one frame with no prefix.

use std::io::Write;

use prost::Message;
use tracing::trace;

use crate::error::{JellyError, Result};
use crate::pb::RdfStreamFrame;

/// Writes stream frames to an underlying byte sink.
#[derive(Debug)]
pub struct FrameWriter<W: Write> {
    inner: W,
    delimited: bool,
    frames_written: u64,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W, delimited: bool) -> Self {
        FrameWriter {
            inner,
            delimited,
            frames_written: 0,
        }
    }

    /// Convenience constructor for the default (delimited) mode.
    pub fn delimited(inner: W) -> Self {
        FrameWriter::new(inner, true)
    }

    pub fn is_delimited(&self) -> bool {
        self.delimited
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Serializes one frame. In non-delimited mode only a single frame may
    /// ever be written.
    pub fn write_frame(&mut self, frame: &RdfStreamFrame) -> Result<()> {
        if !self.delimited && self.frames_written > 0 {
            return Err(JellyError::conformance(
                "a non-delimited stream contains exactly one frame",
            ));
        }
        let bytes = if self.delimited {
            frame.encode_length_delimited_to_vec()
        } else {
            frame.encode_to_vec()
        };
        self.inner.write_all(&bytes)?;
        self.frames_written += 1;
        trace!(
            rows = frame.rows.len(),
            bytes = bytes.len(),
            "wrote stream frame"
        );
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
