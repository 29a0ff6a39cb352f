use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the wayfinding library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a building plan does not contain any floors.
    #[error("building plan contains no floors")]
    EmptyFloorSet,

    /// Raised when the requested default floor is not part of the floor set.
    #[error("default floor {id} is not present in the floor set")]
    UnknownDefaultFloor { id: String },

    /// Raised when an input record carries a NaN or infinite coordinate.
    #[error("record {id} on floor {floor} has a non-finite coordinate")]
    NonFiniteCoordinate { floor: String, id: String },

    /// Raised when a portal half has more than one candidate counterpart.
    #[error("portal {id} on floor {floor} matches {candidates} counterparts; expected exactly one")]
    AmbiguousPortal {
        id: String,
        floor: String,
        candidates: usize,
    },

    /// Raised when a door identifier could not be found on any floor.
    #[error("unknown door: {name}{}", format_suggestions(.suggestions))]
    UnknownDoor {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when serializing a graph snapshot fails.
    #[error("failed to serialize graph snapshot: {message}")]
    SnapshotSerialize { message: String },

    /// Raised when deserializing a graph snapshot from bytes fails.
    #[error("failed to deserialize graph snapshot: {message}")]
    SnapshotDeserialize { message: String },

    /// Raised when loading a graph snapshot from a file fails.
    #[error("failed to load graph snapshot from {path}: {message}")]
    SnapshotLoad { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON plan parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
