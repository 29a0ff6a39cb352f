use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::plan::normalize_id;

/// Position of a floor within the building's ordered floor set.
pub type FloorIndex = usize;

/// Minimum Jaro-Winkler similarity for a door to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Planar coordinate on a floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Move `fraction` of the way from `self` towards `target`.
    pub fn towards(&self, target: &Point, fraction: f64) -> Point {
        Point::new(
            self.x + (target.x - self.x) * fraction,
            self.y + (target.y - self.y) * fraction,
        )
    }

    /// Hashable identity for exact-equality lookups. `-0.0` and `0.0` share a key.
    pub(crate) fn key(&self) -> (u64, u64) {
        fn bits(value: f64) -> u64 {
            if value == 0.0 {
                0.0f64.to_bits()
            } else {
                value.to_bits()
            }
        }
        (bits(self.x), bits(self.y))
    }
}

/// One level of the building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub index: FloorIndex,
    pub id: String,
}

/// Straight walkable corridor piece on one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub floor: FloorIndex,
    pub a: Point,
    pub b: Point,
    pub length: f64,
    /// Doors touching endpoint `a`.
    pub doors_a: Vec<String>,
    /// Doors touching endpoint `b`.
    pub doors_b: Vec<String>,
    /// Segments on the same floor sharing an endpoint, ascending.
    pub connections: Vec<usize>,
    /// Portals with an end on either endpoint.
    pub portals: Vec<usize>,
}

impl PathSegment {
    pub fn new(floor: FloorIndex, a: Point, b: Point) -> Self {
        Self {
            floor,
            a,
            b,
            length: a.distance_to(&b),
            doors_a: Vec::new(),
            doors_b: Vec::new(),
            connections: Vec::new(),
            portals: Vec::new(),
        }
    }

    pub fn touches_door(&self, door: &str) -> bool {
        self.doors_a.iter().chain(&self.doors_b).any(|id| id == door)
    }

    pub fn has_endpoint(&self, point: &Point) -> bool {
        self.a == *point || self.b == *point
    }

    /// The endpoint opposite `from`; `a` when `from` is not an endpoint.
    pub fn far_end(&self, from: &Point) -> Point {
        if self.a == *from {
            self.b
        } else {
            self.a
        }
    }
}

/// Kind of vertical or horizontal transition a portal represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    Elevator,
    Stair,
    Door,
    Other,
}

impl PortalKind {
    /// Classify the leading token of a portal identifier (`Elev`, `Stair`, `Door`).
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.to_ascii_lowercase();
        if lower.starts_with("elev") {
            PortalKind::Elevator
        } else if lower.starts_with("stair") {
            PortalKind::Stair
        } else if lower.starts_with("door") {
            PortalKind::Door
        } else {
            PortalKind::Other
        }
    }

    /// Elevators and same-level doors can be used without stairs.
    pub fn is_accessible(self) -> bool {
        matches!(self, PortalKind::Elevator | PortalKind::Door)
    }
}

/// Which end of a portal is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalSide {
    A,
    B,
}

impl PortalSide {
    pub fn opposite(self) -> Self {
        match self {
            PortalSide::A => PortalSide::B,
            PortalSide::B => PortalSide::A,
        }
    }
}

/// One end of a materialized portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalEnd {
    pub floor: FloorIndex,
    /// Identifier of the half this end was built from.
    pub id: String,
    pub point: Point,
    /// Segments on `floor` with an endpoint at `point`.
    pub segments: Vec<usize>,
}

/// Bidirectional link between two segment endpoints, usually on different floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub kind: PortalKind,
    pub accessible: bool,
    /// Sum of both halves' lengths.
    pub length: f64,
    pub a: PortalEnd,
    pub b: PortalEnd,
}

impl Portal {
    pub fn end(&self, side: PortalSide) -> &PortalEnd {
        match side {
            PortalSide::A => &self.a,
            PortalSide::B => &self.b,
        }
    }

    pub fn is_same_floor(&self) -> bool {
        self.a.floor == self.b.floor
    }

    /// The side whose segment list contains `segment` on `floor`. `A` wins when both do.
    pub fn side_touching(&self, floor: FloorIndex, segment: usize) -> Option<PortalSide> {
        if self.a.floor == floor && self.a.segments.contains(&segment) {
            Some(PortalSide::A)
        } else if self.b.floor == floor && self.b.segments.contains(&segment) {
            Some(PortalSide::B)
        } else {
            None
        }
    }
}

/// Entity counts for a built graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub floors: usize,
    pub segments: usize,
    pub doors: usize,
    pub portals: usize,
    pub accessible_portals: usize,
}

/// Fully linked routing graph for one building.
///
/// Topology is immutable once built; search state lives in
/// [`crate::state::SearchState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    floors: Vec<Floor>,
    segments: Vec<Vec<PathSegment>>,
    portals: Vec<Portal>,
    default_floor: FloorIndex,
}

impl Graph {
    pub(crate) fn from_parts(
        floors: Vec<Floor>,
        segments: Vec<Vec<PathSegment>>,
        portals: Vec<Portal>,
        default_floor: FloorIndex,
    ) -> Self {
        Self {
            floors,
            segments,
            portals,
            default_floor,
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, index: FloorIndex) -> Option<&Floor> {
        self.floors.get(index)
    }

    /// Identifier of a floor, or `"<unknown>"` for an out-of-range index.
    pub fn floor_id(&self, index: FloorIndex) -> &str {
        self.floor(index)
            .map(|floor| floor.id.as_str())
            .unwrap_or("<unknown>")
    }

    pub fn floor_index(&self, id: &str) -> Option<FloorIndex> {
        self.floors.iter().position(|floor| floor.id == id)
    }

    /// Floor a host UI should show first.
    pub fn default_floor(&self) -> FloorIndex {
        self.default_floor
    }

    /// Segments on a floor; empty for an unknown floor.
    pub fn segments(&self, floor: FloorIndex) -> &[PathSegment] {
        self.segments
            .get(floor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a segment. Panics on an index that did not come from this graph.
    pub fn segment(&self, floor: FloorIndex, index: usize) -> &PathSegment {
        &self.segments[floor][index]
    }

    /// Look up a segment that may belong to another graph.
    pub fn get_segment(&self, floor: FloorIndex, index: usize) -> Option<&PathSegment> {
        self.segments.get(floor)?.get(index)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Look up a portal. Panics on an index that did not come from this graph.
    pub fn portal(&self, index: usize) -> &Portal {
        &self.portals[index]
    }

    pub fn get_portal(&self, index: usize) -> Option<&Portal> {
        self.portals.get(index)
    }

    /// Every `(floor, segment)` touching `door`, in floor then segment order.
    pub fn door_segments(&self, door: &str) -> Vec<(FloorIndex, usize)> {
        let door = normalize_id(door);
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(floor, segments)| {
                segments
                    .iter()
                    .enumerate()
                    .filter(move |(_, segment)| segment.touches_door(door))
                    .map(move |(index, _)| (floor, index))
            })
            .collect()
    }

    pub fn has_door(&self, door: &str) -> bool {
        let door = normalize_id(door);
        self.segments
            .iter()
            .flatten()
            .any(|segment| segment.touches_door(door))
    }

    /// Sorted, de-duplicated door identifiers attached to any segment.
    pub fn door_ids(&self) -> Vec<String> {
        self.segments
            .iter()
            .flatten()
            .flat_map(|segment| segment.doors_a.iter().chain(&segment.doors_b))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Door identifiers similar to `name`, most similar first.
    pub fn door_suggestions(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, String)> = self
            .door_ids()
            .into_iter()
            .map(|id| (strsim::jaro_winkler(&needle, &id.to_lowercase()), id))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        scored.truncate(limit);
        scored.into_iter().map(|(_, id)| id).collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            floors: self.floors.len(),
            segments: self.segment_count(),
            doors: self.door_ids().len(),
            portals: self.portals.len(),
            accessible_portals: self.portals.iter().filter(|p| p.accessible).count(),
        }
    }
}
