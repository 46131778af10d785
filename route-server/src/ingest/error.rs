//! Ingestion error types.

use std::path::PathBuf;

/// Errors that can occur while building network artifacts.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A source returned an error status
    #[error("failed to fetch {url}: status {status}")]
    Status { url: String, status: u16 },

    /// The OSM response is not well-formed XML
    #[error("OSM XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The OSM response does not contain the requested relation
    #[error("relation {0} not found")]
    MissingRelation(String),

    /// Writing an artifact failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing an artifact failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::Status {
            url: "https://example.org/table".into(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.org/table: status 503"
        );

        let err = IngestError::MissingRelation("2052885".into());
        assert_eq!(err.to_string(), "relation 2052885 not found");
    }

    #[test]
    fn xml_error_converts() {
        let err: IngestError = roxmltree::Document::parse("<osm>").unwrap_err().into();
        assert!(err.to_string().starts_with("OSM XML error"));
    }
}
