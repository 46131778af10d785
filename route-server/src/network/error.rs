//! Network repository error types.

use std::path::PathBuf;

use crate::domain::InvalidId;

/// Errors produced when mapping stored records to domain entities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// A record carries a malformed identifier
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// An edge references a station that does not exist
    #[error("railway {railway} references unknown station {station}")]
    UnknownStation { railway: String, station: String },

    /// An edge distance is negative or not a finite number
    #[error("railway {railway} edge {from} -> {to} has invalid distance {distance}")]
    InvalidDistance {
        railway: String,
        from: String,
        to: String,
        distance: f64,
    },

    /// Two station records share an identifier
    #[error("duplicate station id {0}")]
    DuplicateStation(String),

    /// Two railway records share an identifier
    #[error("duplicate railway id {0}")]
    DuplicateRailway(String),

    /// Bare edges were found but no line was configured to hold them
    #[error("document has top-level edges but no line was configured for them")]
    MissingLine,
}

/// Errors that can occur when loading or storing network data.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document is not valid JSON for the network schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Records could not be mapped to domain entities
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
