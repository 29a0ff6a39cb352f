//! Raw per-floor geometry as handed over by the floor-plan extraction layer.
//!
//! Every record is a straight line with two endpoints and an identifier, the
//! same shape the drawing tools export for the `Paths`, `Doors` and `Portals`
//! layers. Nothing in this module interprets the geometry; see
//! [`crate::builder`] for that.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::Point;

/// A single line record with its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    #[serde(default)]
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineRecord {
    pub fn new(id: impl Into<String>, start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            id: id.into(),
            x1: start.0,
            y1: start.1,
            x2: end.0,
            y2: end.1,
        }
    }

    /// First endpoint of the line.
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Second endpoint of the line.
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Geometry extracted from a single floor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: String,
    #[serde(default)]
    pub paths: Vec<LineRecord>,
    #[serde(default)]
    pub doors: Vec<LineRecord>,
    #[serde(default)]
    pub portals: Vec<LineRecord>,
}

impl FloorPlan {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn path(mut self, start: (f64, f64), end: (f64, f64)) -> Self {
        let id = format!("path{}", self.paths.len());
        self.paths.push(LineRecord::new(id, start, end));
        self
    }

    pub fn door(mut self, id: impl Into<String>, start: (f64, f64), end: (f64, f64)) -> Self {
        self.doors.push(LineRecord::new(id, start, end));
        self
    }

    pub fn portal(mut self, id: impl Into<String>, start: (f64, f64), end: (f64, f64)) -> Self {
        self.portals.push(LineRecord::new(id, start, end));
        self
    }
}

/// Ordered floor set for one building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingPlan {
    pub floors: Vec<FloorPlan>,
    /// Floor a host UI should show first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_floor: Option<String>,
}

impl BuildingPlan {
    pub fn new(floors: Vec<FloorPlan>) -> Self {
        Self {
            floors,
            default_floor: None,
        }
    }

    /// Parse a plan from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON plan from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Strip the suffix drawing tools append after an underscore (`R125_2_` → `R125`).
///
/// A leading underscore is kept so that an identifier never collapses to an
/// empty string.
pub fn normalize_id(raw: &str) -> &str {
    match raw.find('_') {
        Some(pos) if pos > 0 => &raw[..pos],
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_generator_suffix() {
        assert_eq!(normalize_id("R125_3_"), "R125");
        assert_eq!(normalize_id("Elev.1.floor2_1_"), "Elev.1.floor2");
        assert_eq!(normalize_id("lobby"), "lobby");
        assert_eq!(normalize_id("_hidden"), "_hidden");
    }

    #[test]
    fn plan_parses_with_missing_layers() {
        let plan = BuildingPlan::from_json_str(
            r#"{"floors":[{"id":"floor1","paths":[{"x1":0,"y1":0,"x2":3,"y2":4}]}]}"#,
        )
        .expect("plan parses");

        assert_eq!(plan.floors.len(), 1);
        assert!(plan.floors[0].doors.is_empty());
        assert_eq!(plan.floors[0].paths[0].id, "");
        assert_eq!(plan.floors[0].paths[0].length(), 5.0);
        assert_eq!(plan.default_floor, None);
    }

    #[test]
    fn non_finite_coordinates_are_detected() {
        let record = LineRecord::new("bad", (0.0, f64::NAN), (1.0, 1.0));
        assert!(!record.is_finite());
        assert!(LineRecord::new("ok", (0.0, 0.0), (1.0, 1.0)).is_finite());
    }
}
