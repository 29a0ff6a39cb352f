//! Locate and load the building graph a command runs against.
//!
//! Command-line flags win over environment variables, and a plan wins over a
//! snapshot when both come from the same place.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use wayfinding_lib::{build_graph, BuildingPlan, Graph};

/// Environment variable naming a JSON building plan.
pub const PLAN_ENV: &str = "WAYFINDING_PLAN";

/// Environment variable naming a binary graph snapshot.
pub const SNAPSHOT_ENV: &str = "WAYFINDING_SNAPSHOT";

/// Where the graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// JSON building plan, built on load.
    Plan(PathBuf),
    /// Prebuilt binary snapshot.
    Snapshot(PathBuf),
}

impl GraphSource {
    /// Resolve the source from flags, falling back to the environment.
    pub fn resolve(plan: Option<&Path>, snapshot: Option<&Path>) -> Result<Self> {
        let env_plan = std::env::var_os(PLAN_ENV).map(PathBuf::from);
        let env_snapshot = std::env::var_os(SNAPSHOT_ENV).map(PathBuf::from);
        Self::choose(
            plan.map(Path::to_path_buf),
            snapshot.map(Path::to_path_buf),
            env_plan,
            env_snapshot,
        )
    }

    fn choose(
        plan: Option<PathBuf>,
        snapshot: Option<PathBuf>,
        env_plan: Option<PathBuf>,
        env_snapshot: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = plan {
            return Ok(GraphSource::Plan(path));
        }
        if let Some(path) = snapshot {
            return Ok(GraphSource::Snapshot(path));
        }
        if let Some(path) = env_plan {
            return Ok(GraphSource::Plan(path));
        }
        if let Some(path) = env_snapshot {
            return Ok(GraphSource::Snapshot(path));
        }
        bail!(
            "no building given; pass --plan or --snapshot, or set {} or {}",
            PLAN_ENV,
            SNAPSHOT_ENV
        )
    }

    pub fn path(&self) -> &Path {
        match self {
            GraphSource::Plan(path) | GraphSource::Snapshot(path) => path,
        }
    }

    /// Read the source and produce a routing graph.
    pub fn load(&self) -> Result<Graph> {
        let graph = match self {
            GraphSource::Plan(path) => {
                let plan = BuildingPlan::from_path(path).with_context(|| {
                    format!("failed to read building plan from {}", path.display())
                })?;
                build_graph(&plan).with_context(|| {
                    format!("failed to build routing graph from {}", path.display())
                })?
            }
            GraphSource::Snapshot(path) => Graph::load_snapshot(path)
                .with_context(|| format!("failed to load snapshot {}", path.display()))?,
        };
        debug!(source = %self, floors = graph.floors().len(), "graph ready");
        Ok(graph)
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphSource::Plan(path) => write!(f, "plan {}", path.display()),
            GraphSource::Snapshot(path) => write!(f, "snapshot {}", path.display()),
        }
    }
}
