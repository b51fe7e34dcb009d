//! Stream-level encoder: ties term encoding, slot repetition and frame flow
//! together for one outgoing stream.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{JellyError, Result};
use crate::model::{Quad, Term, Triple};
use crate::options::{LookupPreset, StreamParameters, StreamTypes};
use crate::pb::{PhysicalStreamType, RdfStreamFrame};
use crate::serialize::encode::{
    encode_graph_end, encode_graph_start, encode_namespace_declaration, encode_options,
    encode_quad, encode_triple, RepeatedTerms, TermEncoder,
};
use crate::serialize::flow::FrameFlow;

/// Options for one outgoing stream.
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    pub lookup_preset: LookupPreset,
    pub params: StreamParameters,
}

/// Encoder for a single Jelly stream.
///
/// Not safe for concurrent use: the lookup tables and per-slot caches are
/// mutable state shared by every row of the stream. Independent streams run
/// on independent encoders.
#[derive(Debug)]
pub struct StreamEncoder {
    physical_type: PhysicalStreamType,
    flow: FrameFlow,
    encoder: TermEncoder,
    repeated: RepeatedTerms,
    pending_metadata: Option<HashMap<String, Vec<u8>>>,
}

impl StreamEncoder {
    /// Creates an encoder and enrolls the options row as the first row of
    /// the stream. Fails on an incompatible physical/logical pair or an
    /// invalid lookup preset.
    pub fn new(
        physical_type: PhysicalStreamType,
        flow: FrameFlow,
        options: SerializerOptions,
    ) -> Result<Self> {
        let stream_types = StreamTypes::new(physical_type, flow.logical_type());
        stream_types.validate()?;
        options.lookup_preset.validate()?;
        debug!(
            physical = physical_type.as_str_name(),
            logical = flow.logical_type().as_str_name(),
            "starting jelly stream"
        );
        let mut encoder = StreamEncoder {
            physical_type,
            flow,
            encoder: TermEncoder::new(&options.lookup_preset),
            repeated: RepeatedTerms::default(),
            pending_metadata: None,
        };
        encoder.flow.append(encode_options(
            &options.lookup_preset,
            &stream_types,
            &options.params,
        ));
        Ok(encoder)
    }

    pub fn physical_type(&self) -> PhysicalStreamType {
        self.physical_type
    }

    /// Attaches metadata to the next emitted frame.
    pub fn set_frame_metadata(&mut self, metadata: HashMap<String, Vec<u8>>) {
        self.pending_metadata = Some(metadata);
    }

    fn finish(&mut self, frame: Option<RdfStreamFrame>) -> Option<RdfStreamFrame> {
        let mut frame = frame?;
        if let Some(metadata) = self.pending_metadata.take() {
            frame.metadata = metadata;
        }
        Some(frame)
    }

    /// Encodes one triple. Returns a completed frame when the flow policy
    /// cut one.
    pub fn triple(&mut self, triple: &Triple) -> Result<Option<RdfStreamFrame>> {
        match self.physical_type {
            PhysicalStreamType::Triples | PhysicalStreamType::Graphs => {}
            other => {
                return Err(JellyError::assertion(format!(
                    "triple rows are not valid in a {} stream",
                    other.as_str_name()
                )))
            }
        }
        let rows = encode_triple(triple, &mut self.encoder, &mut self.repeated)?;
        self.flow.extend(rows);
        let frame = self.flow.frame_from_bounds();
        Ok(self.finish(frame))
    }

    /// Encodes one quad. Returns a completed frame when the flow policy
    /// cut one.
    pub fn quad(&mut self, quad: &Quad) -> Result<Option<RdfStreamFrame>> {
        if self.physical_type != PhysicalStreamType::Quads {
            return Err(JellyError::assertion(format!(
                "quad rows are not valid in a {} stream",
                self.physical_type.as_str_name()
            )));
        }
        let rows = encode_quad(quad, &mut self.encoder, &mut self.repeated)?;
        self.flow.extend(rows);
        let frame = self.flow.frame_from_bounds();
        Ok(self.finish(frame))
    }

    /// Starts a new graph in a GRAPHS stream. The s/p/o repetition caches
    /// are not reset at graph boundaries.
    pub fn graph_start(&mut self, graph: &Term) -> Result<()> {
        if self.physical_type != PhysicalStreamType::Graphs {
            return Err(JellyError::assertion(format!(
                "graph boundaries are not valid in a {} stream",
                self.physical_type.as_str_name()
            )));
        }
        let rows = encode_graph_start(graph, &mut self.encoder)?;
        self.flow.extend(rows);
        Ok(())
    }

    /// Ends the current graph. In a per-graph flow this completes a frame.
    pub fn graph_end(&mut self) -> Result<Option<RdfStreamFrame>> {
        if self.physical_type != PhysicalStreamType::Graphs {
            return Err(JellyError::assertion(format!(
                "graph boundaries are not valid in a {} stream",
                self.physical_type.as_str_name()
            )));
        }
        self.flow.append(encode_graph_end());
        let frame = self
            .flow
            .frame_from_graph()
            .or_else(|| self.flow.frame_from_bounds());
        Ok(self.finish(frame))
    }

    /// Signals a dataset boundary. In a per-dataset flow this completes a
    /// frame.
    pub fn dataset_boundary(&mut self) -> Option<RdfStreamFrame> {
        let frame = self.flow.frame_from_dataset();
        self.finish(frame)
    }

    /// Encodes a namespace declaration (prefix label → namespace IRI).
    pub fn namespace_declaration(
        &mut self,
        name: &str,
        iri: &str,
    ) -> Result<Option<RdfStreamFrame>> {
        let rows = encode_namespace_declaration(name, iri, &mut self.encoder);
        self.flow.extend(rows);
        let frame = self.flow.frame_from_bounds();
        Ok(self.finish(frame))
    }

    /// Flushes all buffered rows as a final frame. Must be called at stream
    /// end; returns `None` when nothing is buffered.
    pub fn flush(&mut self) -> Option<RdfStreamFrame> {
        let frame = self.flow.to_stream_frame();
        self.finish(frame)
    }
}
