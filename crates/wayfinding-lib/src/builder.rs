//! Turn extracted floor geometry into a linked [`Graph`].
//!
//! Matching is by exact coordinate equality: a door, portal end or
//! neighbouring segment is linked to a segment only when it lands precisely on
//! one of that segment's endpoints.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{
    Floor, FloorIndex, Graph, PathSegment, Point, Portal, PortalEnd, PortalKind,
};
use crate::plan::{normalize_id, BuildingPlan, FloorPlan, LineRecord};

/// Segment indices keyed by endpoint, one map per floor.
type EndpointIndex = HashMap<(u64, u64), Vec<usize>>;

/// Options applied while building a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Floor a host UI should show first. Must name a floor in the set.
    pub default_floor: Option<String>,
}

impl BuildOptions {
    pub fn from_plan(plan: &BuildingPlan) -> Self {
        Self {
            default_floor: plan.default_floor.clone(),
        }
    }
}

/// A portal line from one floor, waiting for its counterpart.
#[derive(Debug, Clone)]
struct PortalHalf {
    id: String,
    mate: String,
    floor: FloorIndex,
    point: Point,
    length: f64,
    matched: bool,
}

/// Build a routing graph from a building plan, honouring its default floor.
pub fn build_graph(plan: &BuildingPlan) -> Result<Graph> {
    build_graph_with_options(plan, &BuildOptions::from_plan(plan))
}

/// Build a routing graph with explicit options.
pub fn build_graph_with_options(plan: &BuildingPlan, options: &BuildOptions) -> Result<Graph> {
    if plan.floors.is_empty() {
        return Err(Error::EmptyFloorSet);
    }

    let floors = assign_floor_ids(&plan.floors);
    let default_floor = match options.default_floor.as_deref() {
        Some(id) => floors
            .iter()
            .position(|floor| floor.id == id)
            .ok_or_else(|| Error::UnknownDefaultFloor { id: id.to_string() })?,
        None => 0,
    };

    let mut segments = Vec::with_capacity(floors.len());
    let mut endpoints = Vec::with_capacity(floors.len());
    let mut halves = Vec::new();

    for (floor, floor_plan) in floors.iter().zip(&plan.floors) {
        validate_records(&floor.id, floor_plan)?;

        let mut floor_segments: Vec<PathSegment> = floor_plan
            .paths
            .iter()
            .map(|record| PathSegment::new(floor.index, record.start(), record.end()))
            .collect();
        attach_doors(&mut floor_segments, &floor_plan.doors);

        let index = index_endpoints(&floor_segments);
        halves.extend(
            floor_plan
                .portals
                .iter()
                .map(|record| portal_half(floor, record, &index)),
        );
        connect_segments(&mut floor_segments, &index);

        segments.push(floor_segments);
        endpoints.push(index);
    }

    let mut portals = pair_portal_halves(&floors, &mut halves)?;
    link_portals(&mut portals, &mut segments, &endpoints);

    let dropped = halves.iter().filter(|half| !half.matched).count();
    if dropped > 0 {
        debug!(dropped, "discarded portal halves without a counterpart");
    }

    let graph = Graph::from_parts(floors, segments, portals, default_floor);
    debug!(
        floors = graph.floors().len(),
        segments = graph.segment_count(),
        portals = graph.portals().len(),
        "built routing graph"
    );
    Ok(graph)
}

/// Keep floor identifiers unless two collide; then renumber every floor.
fn assign_floor_ids(plans: &[FloorPlan]) -> Vec<Floor> {
    let unique: BTreeSet<&str> = plans.iter().map(|plan| plan.id.as_str()).collect();
    let renumber = unique.len() != plans.len();
    if renumber {
        warn!(
            floors = plans.len(),
            "duplicate floor identifiers; renumbering every floor"
        );
    }

    plans
        .iter()
        .enumerate()
        .map(|(index, plan)| Floor {
            index,
            id: if renumber {
                format!("floor_{index}")
            } else {
                plan.id.clone()
            },
        })
        .collect()
}

fn validate_records(floor_id: &str, plan: &FloorPlan) -> Result<()> {
    let invalid = plan
        .paths
        .iter()
        .chain(&plan.doors)
        .chain(&plan.portals)
        .find(|record| !record.is_finite());

    match invalid {
        Some(record) => Err(Error::NonFiniteCoordinate {
            floor: floor_id.to_string(),
            id: record.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Register each door on the segment endpoints it lands on.
///
/// A door line may touch a segment with either of its ends. A segment whose
/// `a` endpoint matches does not also get the door on `b`.
fn attach_doors(segments: &mut [PathSegment], doors: &[LineRecord]) {
    for record in doors {
        let id = normalize_id(&record.id);
        let (start, end) = (record.start(), record.end());
        for segment in segments.iter_mut() {
            let list = if segment.a == start || segment.a == end {
                &mut segment.doors_a
            } else if segment.b == start || segment.b == end {
                &mut segment.doors_b
            } else {
                continue;
            };
            if !list.iter().any(|existing| existing == id) {
                list.push(id.to_string());
            }
        }
    }
}

fn index_endpoints(segments: &[PathSegment]) -> EndpointIndex {
    let mut index = EndpointIndex::new();
    for (position, segment) in segments.iter().enumerate() {
        index.entry(segment.a.key()).or_default().push(position);
        if segment.b != segment.a {
            index.entry(segment.b.key()).or_default().push(position);
        }
    }
    index
}

fn segments_at(index: &EndpointIndex, point: &Point) -> Vec<usize> {
    index.get(&point.key()).cloned().unwrap_or_default()
}

/// Derive the half's mate key and choose which of its endpoints meets the floor's paths.
///
/// Identifiers read `<type>.<pair>.<floor it leads to>`; the counterpart on
/// that floor names this floor in the same position.
fn portal_half(floor: &Floor, record: &LineRecord, index: &EndpointIndex) -> PortalHalf {
    let id = normalize_id(&record.id).to_string();
    let prefix: Vec<&str> = id.split('.').take(2).collect();
    let mate = format!("{}.{}", prefix.join("."), floor.id);

    let point = if index.contains_key(&record.start().key()) {
        record.start()
    } else {
        record.end()
    };

    PortalHalf {
        id,
        mate,
        floor: floor.index,
        point,
        length: record.length(),
        matched: false,
    }
}

/// Pair every half with its single mutual counterpart.
///
/// Partners are counted over all halves before anything is paired, so a half
/// with two counterparts is rejected whatever order the floors come in.
fn pair_portal_halves(floors: &[Floor], halves: &mut [PortalHalf]) -> Result<Vec<Portal>> {
    let partners: Vec<Vec<usize>> = halves
        .iter()
        .enumerate()
        .map(|(position, this)| {
            halves
                .iter()
                .enumerate()
                .filter(|&(other_position, other)| {
                    other_position != position && other.id == this.mate && other.mate == this.id
                })
                .map(|(other_position, _)| other_position)
                .collect()
        })
        .collect();

    if let Some((position, many)) = partners
        .iter()
        .enumerate()
        .find(|(_, candidates)| candidates.len() > 1)
    {
        return Err(Error::AmbiguousPortal {
            id: halves[position].id.clone(),
            floor: floors[halves[position].floor].id.clone(),
            candidates: many.len(),
        });
    }

    let mut portals = Vec::new();

    for (outer, candidates) in partners.iter().enumerate() {
        let inner = match candidates.as_slice() {
            [single] if *single > outer => *single,
            _ => continue,
        };

        halves[outer].matched = true;
        halves[inner].matched = true;

        let (first, second) = (&halves[outer], &halves[inner]);
        let kind = PortalKind::from_tag(first.id.split('.').next().unwrap_or_default());
        portals.push(Portal {
            kind,
            accessible: kind.is_accessible(),
            length: first.length + second.length,
            a: portal_end(first),
            b: portal_end(second),
        });
    }

    Ok(portals)
}

fn portal_end(half: &PortalHalf) -> PortalEnd {
    PortalEnd {
        floor: half.floor,
        id: half.id.clone(),
        point: half.point,
        segments: Vec::new(),
    }
}

/// Two segments on a floor are connected when any endpoints coincide.
fn connect_segments(segments: &mut [PathSegment], index: &EndpointIndex) {
    let mut neighbours: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); segments.len()];
    for bucket in index.values() {
        for &left in bucket {
            for &right in bucket {
                if left != right {
                    neighbours[left].insert(right);
                }
            }
        }
    }

    for (segment, links) in segments.iter_mut().zip(neighbours) {
        segment.connections = links.into_iter().collect();
    }
}

/// Record, on both sides, which segments meet each portal end.
fn link_portals(
    portals: &mut [Portal],
    segments: &mut [Vec<PathSegment>],
    endpoints: &[EndpointIndex],
) {
    for (position, portal) in portals.iter_mut().enumerate() {
        let at_a = segments_at(&endpoints[portal.a.floor], &portal.a.point);
        let at_b: Vec<usize> = segments_at(&endpoints[portal.b.floor], &portal.b.point)
            .into_iter()
            .filter(|index| !(portal.is_same_floor() && at_a.contains(index)))
            .collect();

        for &index in &at_a {
            segments[portal.a.floor][index].portals.push(position);
        }
        for &index in &at_b {
            segments[portal.b.floor][index].portals.push(position);
        }

        portal.a.segments = at_a;
        portal.b.segments = at_b;
    }
}
