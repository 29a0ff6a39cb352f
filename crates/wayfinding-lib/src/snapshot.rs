//! Compact binary snapshots of a built [`Graph`].
//!
//! Rebuilding from floor plans means re-matching every door, portal and
//! segment endpoint; a snapshot stores the finished topology instead. Search
//! state is never part of a snapshot. Cross references are stored as floor
//! and element indices, so a snapshot is independent of floor identifiers.
//!
//! # Format
//!
//! ```text
//! Header (16 bytes):
//!   - Magic: b"WFGS" (4 bytes)
//!   - Version: u8 (1 byte)
//!   - Flags: u8 (1 byte) - reserved, always 0
//!   - Floor count: u32 LE (4 bytes)
//!   - Portal count: u32 LE (4 bytes)
//!   - Reserved: 2 bytes
//!
//! Body:
//!   - postcard-serialized Graph
//!   - zstd compressed
//!
//! Footer (32 bytes):
//!   - SHA-256 checksum of compressed body
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Magic bytes identifying a graph snapshot.
const SNAPSHOT_MAGIC: &[u8; 4] = b"WFGS";

/// Current snapshot format version.
const SNAPSHOT_VERSION: u8 = 1;

/// Header size in bytes.
const HEADER_SIZE: usize = 16;

/// Checksum size in bytes (SHA-256).
const CHECKSUM_SIZE: usize = 32;

/// zstd compression level (balanced speed/ratio).
const COMPRESSION_LEVEL: i32 = 3;

impl Graph {
    /// Encode the graph topology as snapshot bytes.
    pub fn to_snapshot_bytes(&self) -> Result<Vec<u8>> {
        let serialized = postcard::to_allocvec(self).map_err(|e| Error::SnapshotSerialize {
            message: format!("postcard serialization failed: {}", e),
        })?;

        let compressed =
            zstd::encode_all(serialized.as_slice(), COMPRESSION_LEVEL).map_err(|e| {
                Error::SnapshotSerialize {
                    message: format!("zstd compression failed: {}", e),
                }
            })?;

        let checksum = Sha256::digest(&compressed);

        let mut header = [0u8; HEADER_SIZE];
        header[0..4].copy_from_slice(SNAPSHOT_MAGIC);
        header[4] = SNAPSHOT_VERSION;
        header[6..10].copy_from_slice(&(self.floors().len() as u32).to_le_bytes());
        header[10..14].copy_from_slice(&(self.portals().len() as u32).to_le_bytes());

        let mut bytes = Vec::with_capacity(HEADER_SIZE + compressed.len() + CHECKSUM_SIZE);
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&compressed);
        bytes.extend_from_slice(&checksum);
        Ok(bytes)
    }

    /// Decode a graph from snapshot bytes, verifying header and checksum.
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE + CHECKSUM_SIZE {
            return Err(deserialize_error("snapshot is truncated"));
        }

        let (header, rest) = bytes.split_at(HEADER_SIZE);
        if &header[0..4] != SNAPSHOT_MAGIC {
            return Err(deserialize_error("invalid magic bytes"));
        }

        let version = header[4];
        if version != SNAPSHOT_VERSION {
            return Err(deserialize_error(&format!(
                "unsupported version {} (expected {})",
                version, SNAPSHOT_VERSION
            )));
        }

        let floor_count = u32::from_le_bytes([header[6], header[7], header[8], header[9]]);
        let portal_count = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);

        let (compressed, stored_checksum) = rest.split_at(rest.len() - CHECKSUM_SIZE);
        let computed_checksum = Sha256::digest(compressed);
        if computed_checksum.as_slice() != stored_checksum {
            return Err(deserialize_error(
                "checksum mismatch - snapshot may be corrupted",
            ));
        }

        let decompressed = zstd::decode_all(compressed)
            .map_err(|e| deserialize_error(&format!("zstd decompression failed: {}", e)))?;

        let graph: Graph = postcard::from_bytes(&decompressed)
            .map_err(|e| deserialize_error(&format!("postcard deserialization failed: {}", e)))?;

        if graph.floors().len() != floor_count as usize
            || graph.portals().len() != portal_count as usize
        {
            warn!(
                expected_floors = floor_count,
                actual_floors = graph.floors().len(),
                expected_portals = portal_count,
                actual_portals = graph.portals().len(),
                "entity count mismatch in graph snapshot"
            );
        }

        if !references_in_range(&graph) {
            return Err(deserialize_error(
                "snapshot references a floor, segment or portal that does not exist",
            ));
        }

        Ok(graph)
    }

    /// Write a snapshot to `path`.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let bytes = self.to_snapshot_bytes()?;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;

        info!(
            path = %path.display(),
            file_size = bytes.len(),
            floors = self.floors().len(),
            "graph snapshot saved"
        );
        Ok(())
    }

    /// Load a snapshot previously written with [`Graph::save_snapshot`].
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading graph snapshot");

        let bytes = std::fs::read(path).map_err(|e| Error::SnapshotLoad {
            path: path.to_path_buf(),
            message: format!("failed to read file: {}", e),
        })?;

        Self::from_snapshot_bytes(&bytes).map_err(|e| match e {
            Error::SnapshotDeserialize { message } => Error::SnapshotLoad {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }
}

fn deserialize_error(message: &str) -> Error {
    Error::SnapshotDeserialize {
        message: message.to_string(),
    }
}

/// Every floor, segment and portal index stored in the graph points at something real.
fn references_in_range(graph: &Graph) -> bool {
    let floors = graph.floors().len();
    let portals = graph.portals().len();
    if graph.default_floor() >= floors.max(1) {
        return false;
    }

    let floor_ok = graph
        .floors()
        .iter()
        .enumerate()
        .all(|(position, floor)| floor.index == position);

    let segments_ok = graph.floors().iter().all(|floor| {
        let count = graph.segments(floor.index).len();
        graph.segments(floor.index).iter().all(|segment| {
            segment.floor == floor.index
                && segment.connections.iter().all(|&next| next < count)
                && segment.portals.iter().all(|&portal| portal < portals)
        })
    });

    let portals_ok = graph.portals().iter().all(|portal| {
        [&portal.a, &portal.b].iter().all(|end| {
            end.floor < floors
                && end
                    .segments
                    .iter()
                    .all(|&index| index < graph.segments(end.floor).len())
        })
    });

    floor_ok && segments_ok && portals_ok
}
