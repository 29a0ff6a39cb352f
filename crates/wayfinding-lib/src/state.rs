//! Per-query search labels kept apart from the graph topology.
//!
//! A [`SearchState`] is sized to one [`Graph`] and indexed in parallel to its
//! segments and portals. Each query owns its state, so a shared `&Graph` can
//! serve several queries at once.

use crate::graph::{FloorIndex, Graph};

/// How a segment or portal was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predecessor {
    /// Not reached yet.
    None,
    /// Seeded directly from the start door.
    Door,
    Segment { floor: FloorIndex, index: usize },
    Portal(usize),
}

/// Running shortest distance and the element it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub distance: f64,
    pub predecessor: Predecessor,
}

impl Label {
    pub const UNREACHED: Label = Label {
        distance: f64::INFINITY,
        predecessor: Predecessor::None,
    };

    pub fn is_reached(&self) -> bool {
        self.distance.is_finite() && self.predecessor != Predecessor::None
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::UNREACHED
    }
}

/// Labels for every segment and portal of one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    segments: Vec<Vec<Label>>,
    portals: Vec<Label>,
}

impl SearchState {
    /// Fresh state sized to `graph`, every label unreached.
    pub fn new(graph: &Graph) -> Self {
        Self {
            segments: graph
                .floors()
                .iter()
                .map(|floor| vec![Label::UNREACHED; graph.segments(floor.index).len()])
                .collect(),
            portals: vec![Label::UNREACHED; graph.portals().len()],
        }
    }

    /// Set every distance back to infinity and clear every predecessor.
    pub fn reset(&mut self) {
        self.segments
            .iter_mut()
            .flatten()
            .chain(self.portals.iter_mut())
            .for_each(|label| *label = Label::UNREACHED);
    }

    pub fn segment(&self, floor: FloorIndex, index: usize) -> &Label {
        &self.segments[floor][index]
    }

    pub fn segment_mut(&mut self, floor: FloorIndex, index: usize) -> &mut Label {
        &mut self.segments[floor][index]
    }

    pub fn portal(&self, index: usize) -> &Label {
        &self.portals[index]
    }

    pub fn portal_mut(&mut self, index: usize) -> &mut Label {
        &mut self.portals[index]
    }

    /// Labels of every segment on `floor`.
    pub fn floor_segments(&self, floor: FloorIndex) -> &[Label] {
        self.segments
            .get(floor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of labels (segments and portals).
    pub fn len(&self) -> usize {
        self.segments.iter().map(Vec::len).sum::<usize>() + self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
