//! Frame flow: grouping rows into stream frames.
//!
//! The policy is a function of the logical stream type. Flat streams cut a
//! frame every `frame_size` rows; graph and dataset streams cut at the
//! boundaries signalled by the statement encoder or the caller; manual flow
//! never cuts automatically and is used for non-delimited output.

use crate::error::{JellyError, Result};
use crate::pb::{LogicalStreamType, RdfStreamFrame, RdfStreamRow};

/// Default number of rows per frame in bounded (flat) flows.
pub const DEFAULT_FRAME_SIZE: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Frames are produced only on explicit flush.
    Manual,
    /// A frame is produced whenever `frame_size` rows have accumulated.
    Bounded,
    /// One frame per complete graph.
    PerGraph,
    /// One frame per dataset boundary.
    PerDataset,
}

/// Accumulates stream rows and produces frames according to the policy of
/// the stream's logical type.
#[derive(Debug)]
pub struct FrameFlow {
    rows: Vec<RdfStreamRow>,
    policy: Policy,
    logical_type: LogicalStreamType,
    frame_size: usize,
}

impl FrameFlow {
    /// Manual flow (logical type UNSPECIFIED): all rows stay buffered until
    /// [`FrameFlow::to_stream_frame`]. Required for non-delimited output.
    pub fn manual() -> Self {
        FrameFlow {
            rows: Vec::new(),
            policy: Policy::Manual,
            logical_type: LogicalStreamType::Unspecified,
            frame_size: 0,
        }
    }

    /// Bounded flow for flat triple streams.
    pub fn flat_triples(frame_size: Option<usize>) -> Self {
        FrameFlow::bounded(LogicalStreamType::FlatTriples, frame_size)
    }

    /// Bounded flow for flat quad streams.
    pub fn flat_quads(frame_size: Option<usize>) -> Self {
        FrameFlow::bounded(LogicalStreamType::FlatQuads, frame_size)
    }

    fn bounded(logical_type: LogicalStreamType, frame_size: Option<usize>) -> Self {
        FrameFlow {
            rows: Vec::new(),
            policy: Policy::Bounded,
            logical_type,
            frame_size: frame_size.unwrap_or(DEFAULT_FRAME_SIZE).max(1),
        }
    }

    /// One frame per graph; frames are cut at graph end rows.
    pub fn graphs() -> Self {
        FrameFlow {
            rows: Vec::new(),
            policy: Policy::PerGraph,
            logical_type: LogicalStreamType::Graphs,
            frame_size: 0,
        }
    }

    /// One frame per dataset; frames are cut by the caller.
    pub fn datasets() -> Self {
        FrameFlow {
            rows: Vec::new(),
            policy: Policy::PerDataset,
            logical_type: LogicalStreamType::Datasets,
            frame_size: 0,
        }
    }

    /// Flow for a given logical stream type.
    pub fn for_logical_type(
        logical_type: LogicalStreamType,
        frame_size: Option<usize>,
    ) -> Result<Self> {
        match logical_type {
            LogicalStreamType::Unspecified => Ok(FrameFlow::manual()),
            LogicalStreamType::FlatTriples => Ok(FrameFlow::flat_triples(frame_size)),
            LogicalStreamType::FlatQuads => Ok(FrameFlow::flat_quads(frame_size)),
            LogicalStreamType::Graphs => Ok(FrameFlow::graphs()),
            LogicalStreamType::Datasets => Ok(FrameFlow::datasets()),
            other => Err(JellyError::not_implemented(format!(
                "no frame flow for logical stream type {}",
                other.as_str_name()
            ))),
        }
    }

    pub fn logical_type(&self) -> LogicalStreamType {
        self.logical_type
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn append(&mut self, row: RdfStreamRow) {
        self.rows.push(row);
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = RdfStreamRow>) {
        self.rows.extend(rows);
    }

    /// Cuts a frame if the bounded policy says the buffer is large enough.
    pub fn frame_from_bounds(&mut self) -> Option<RdfStreamFrame> {
        if self.policy == Policy::Bounded && self.rows.len() >= self.frame_size {
            return self.to_stream_frame();
        }
        None
    }

    /// Cuts a frame at a graph boundary (per-graph policy only).
    pub fn frame_from_graph(&mut self) -> Option<RdfStreamFrame> {
        if self.policy == Policy::PerGraph {
            return self.to_stream_frame();
        }
        None
    }

    /// Cuts a frame at a dataset boundary (per-dataset policy only).
    pub fn frame_from_dataset(&mut self) -> Option<RdfStreamFrame> {
        if self.policy == Policy::PerDataset {
            return self.to_stream_frame();
        }
        None
    }

    /// Drains all buffered rows into a frame; `None` when nothing buffered.
    pub fn to_stream_frame(&mut self) -> Option<RdfStreamFrame> {
        if self.rows.is_empty() {
            return None;
        }
        Some(RdfStreamFrame {
            rows: std::mem::take(&mut self.rows),
            metadata: Default::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb;
    use crate::pb::rdf_stream_row::Row;

    fn row() -> RdfStreamRow {
        RdfStreamRow::from_kind(Row::GraphEnd(pb::RdfGraphEnd {}))
    }

    #[test]
    fn bounded_flow_cuts_at_frame_size() {
        let mut flow = FrameFlow::flat_triples(Some(3));
        flow.append(row());
        assert!(flow.frame_from_bounds().is_none());
        flow.append(row());
        assert!(flow.frame_from_bounds().is_none());
        flow.append(row());
        let frame = flow.frame_from_bounds().expect("frame at bound");
        assert_eq!(frame.rows.len(), 3);
        assert!(flow.is_empty());
    }

    #[test]
    fn manual_flow_never_cuts() {
        let mut flow = FrameFlow::manual();
        for _ in 0..1000 {
            flow.append(row());
        }
        assert!(flow.frame_from_bounds().is_none());
        assert!(flow.frame_from_graph().is_none());
        let frame = flow.to_stream_frame().expect("manual flush");
        assert_eq!(frame.rows.len(), 1000);
    }

    #[test]
    fn graph_flow_cuts_on_graph_boundary_only() {
        let mut flow = FrameFlow::graphs();
        flow.append(row());
        assert!(flow.frame_from_bounds().is_none());
        assert!(flow.frame_from_dataset().is_none());
        assert!(flow.frame_from_graph().is_some());
    }

    #[test]
    fn unsupported_logical_type() {
        assert!(matches!(
            FrameFlow::for_logical_type(LogicalStreamType::SubjectGraphs, None),
            Err(JellyError::NotImplemented(_))
        ));
    }

    #[test]
    fn empty_flush_yields_no_frame() {
        let mut flow = FrameFlow::manual();
        assert!(flow.to_stream_frame().is_none());
    }
}
