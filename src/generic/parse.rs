//! Reading Jelly streams into the generic statement model.
//!
//! Two modes surface here. Flat reading yields one event per statement (or
//! namespace declaration) across all frames; grouped reading collects each
//! frame into a fresh [`GenericStatementSink`] and yields one sink per
//! frame. In strict mode the chosen mode must match the logical type family
//! declared by the stream, and a mismatch fails before any row is
//! delivered.

use std::collections::{HashMap, VecDeque};
use std::io::Read;

use crate::error::{JellyError, Result};
use crate::generic::sink::GenericStatementSink;
use crate::model::{Quad, Statement, Term, Triple};
use crate::options::ParserOptions;
use crate::parse::decode::{Adapter, Decoder, DecoderConfig};
use crate::parse::ioutils::{options_and_frames, Frames};
use crate::pb::PhysicalStreamType;

/// One event of a flat stream read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatEvent {
    Statement(Statement),
    Namespace { prefix: String, iri: Term },
}

/// Adapter producing generic-model events, buffered per frame.
///
/// For GRAPHS streams the current graph name is tracked and each triple is
/// widened into a quad, mirroring how flat consumers see graph streams.
#[derive(Debug)]
struct GenericAdapter {
    physical_type: PhysicalStreamType,
    graph_name: Option<Term>,
    events: VecDeque<FlatEvent>,
    metadata: HashMap<String, Vec<u8>>,
}

impl GenericAdapter {
    fn new(physical_type: PhysicalStreamType) -> Self {
        GenericAdapter {
            physical_type,
            graph_name: None,
            events: VecDeque::new(),
            metadata: HashMap::new(),
        }
    }
}

impl Adapter for GenericAdapter {
    type Node = Term;

    fn iri(&mut self, iri: String) -> Result<Term> {
        Ok(Term::Iri(iri))
    }

    fn bnode(&mut self, id: String) -> Result<Term> {
        Ok(Term::BlankNode(id))
    }

    fn literal(
        &mut self,
        lex: String,
        language: Option<String>,
        datatype: Option<String>,
    ) -> Result<Term> {
        Ok(Term::Literal {
            lex,
            language,
            datatype,
        })
    }

    fn default_graph(&mut self) -> Result<Term> {
        Ok(Term::DefaultGraph)
    }

    fn quoted_triple(&mut self, s: Term, p: Term, o: Term) -> Result<Term> {
        Ok(Term::Triple(Box::new(Triple::new(s, p, o))))
    }

    fn triple(&mut self, s: Term, p: Term, o: Term) -> Result<()> {
        let statement = if self.physical_type == PhysicalStreamType::Graphs {
            let g = self.graph_name.clone().ok_or_else(|| {
                JellyError::conformance("triple row outside a graph: no graph was started")
            })?;
            Statement::Quad(Quad::new(s, p, o, g))
        } else {
            Statement::Triple(Triple::new(s, p, o))
        };
        self.events.push_back(FlatEvent::Statement(statement));
        Ok(())
    }

    fn quad(&mut self, s: Term, p: Term, o: Term, g: Term) -> Result<()> {
        self.events
            .push_back(FlatEvent::Statement(Statement::Quad(Quad::new(s, p, o, g))));
        Ok(())
    }

    fn graph_start(&mut self, graph: Term) -> Result<()> {
        self.graph_name = Some(graph);
        Ok(())
    }

    fn graph_end(&mut self) -> Result<()> {
        self.graph_name = None;
        Ok(())
    }

    fn namespace_declaration(&mut self, name: &str, iri: Term) -> Result<()> {
        self.events.push_back(FlatEvent::Namespace {
            prefix: name.to_owned(),
            iri,
        });
        Ok(())
    }

    fn frame(&mut self, metadata: &HashMap<String, Vec<u8>>) -> Result<()> {
        self.metadata = metadata.clone();
        Ok(())
    }
}

fn check_physical_type(options: &ParserOptions) -> Result<()> {
    match options.stream_types.physical_type {
        PhysicalStreamType::Triples
        | PhysicalStreamType::Quads
        | PhysicalStreamType::Graphs => Ok(()),
        PhysicalStreamType::Unspecified => Err(JellyError::not_implemented(
            "streams with an unspecified physical type",
        )),
    }
}

// ── Flat reading ─────────────────────────────────────────────────────────────

/// Iterator over the statements (and namespace declarations) of a stream.
pub struct FlatParser<R: Read> {
    options: ParserOptions,
    decoder: Decoder<GenericAdapter>,
    frames: Frames<R>,
    failed: bool,
}

impl<R: Read> FlatParser<R> {
    /// Options read from the stream's first frame.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Metadata of the most recently decoded frame.
    pub fn frame_metadata(&mut self) -> &HashMap<String, Vec<u8>> {
        &self.decoder.adapter_mut().metadata
    }
}

impl<R: Read> Iterator for FlatParser<R> {
    type Item = Result<FlatEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(event) = self.decoder.adapter_mut().events.pop_front() {
                return Some(Ok(event));
            }
            match self.frames.next()? {
                Ok(frame) => {
                    if let Err(err) = self.decoder.decode_frame(&frame) {
                        self.failed = true;
                        return Some(Err(err));
                    }
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Opens a stream for flat (event-by-event) reading.
pub fn parse_flat<R: Read>(input: R) -> Result<FlatParser<R>> {
    parse_flat_with(input, DecoderConfig::default())
}

/// Opens a stream for flat reading with an explicit decoder configuration.
pub fn parse_flat_with<R: Read>(input: R, config: DecoderConfig) -> Result<FlatParser<R>> {
    let (options, frames) = options_and_frames(input)?;
    check_physical_type(&options)?;
    if config.strict && !options.stream_types.is_flat() {
        return Err(JellyError::conformance(format!(
            "flat reading of a {} stream requires non-strict mode",
            options.stream_types.logical_type.as_str_name()
        )));
    }
    let adapter = GenericAdapter::new(options.stream_types.physical_type);
    Ok(FlatParser {
        decoder: Decoder::new(options.clone(), adapter),
        options,
        frames,
        failed: false,
    })
}

/// Reads a whole stream into a single sink.
pub fn parse_to_sink<R: Read>(input: R) -> Result<GenericStatementSink> {
    let mut sink = GenericStatementSink::new();
    for event in parse_flat(input)? {
        match event? {
            FlatEvent::Statement(statement) => sink.add(statement),
            FlatEvent::Namespace { prefix, iri } => {
                if let Term::Iri(iri) = iri {
                    sink.bind(prefix, iri);
                }
            }
        }
    }
    Ok(sink)
}

// ── Grouped reading ──────────────────────────────────────────────────────────

/// Iterator yielding one sink per stream frame.
pub struct GroupedParser<R: Read, F = fn() -> GenericStatementSink>
where
    F: FnMut() -> GenericStatementSink,
{
    options: ParserOptions,
    decoder: Decoder<GenericAdapter>,
    frames: Frames<R>,
    sink_factory: F,
    failed: bool,
}

impl<R: Read, F: FnMut() -> GenericStatementSink> GroupedParser<R, F> {
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }
}

impl<R: Read, F: FnMut() -> GenericStatementSink> Iterator for GroupedParser<R, F> {
    type Item = Result<GenericStatementSink>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let frame = match self.frames.next()? {
            Ok(frame) => frame,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };
        if let Err(err) = self.decoder.decode_frame(&frame) {
            self.failed = true;
            return Some(Err(err));
        }
        let mut sink = (self.sink_factory)();
        let adapter = self.decoder.adapter_mut();
        while let Some(event) = adapter.events.pop_front() {
            match event {
                FlatEvent::Statement(statement) => sink.add(statement),
                FlatEvent::Namespace { prefix, iri } => {
                    if let Term::Iri(iri) = iri {
                        sink.bind(prefix, iri);
                    }
                }
            }
        }
        sink.set_metadata(std::mem::take(&mut adapter.metadata));
        Some(Ok(sink))
    }
}

/// Opens a stream for grouped (sink-per-frame) reading.
pub fn parse_grouped<R: Read>(input: R) -> Result<GroupedParser<R>> {
    let factory: fn() -> GenericStatementSink = GenericStatementSink::new;
    parse_grouped_with(input, DecoderConfig::default(), factory)
}

/// Opens a stream for grouped reading with an explicit configuration and
/// sink factory.
pub fn parse_grouped_with<R: Read, F: FnMut() -> GenericStatementSink>(
    input: R,
    config: DecoderConfig,
    sink_factory: F,
) -> Result<GroupedParser<R, F>> {
    let (options, frames) = options_and_frames(input)?;
    check_physical_type(&options)?;
    if config.strict && !options.stream_types.is_grouped() {
        return Err(JellyError::conformance(format!(
            "grouped reading of a {} stream requires non-strict mode",
            options.stream_types.logical_type.as_str_name()
        )));
    }
    let adapter = GenericAdapter::new(options.stream_types.physical_type);
    Ok(GroupedParser {
        decoder: Decoder::new(options.clone(), adapter),
        options,
        frames,
        sink_factory,
        failed: false,
    })
}
