//! HTTP client for the ingestion sources.

use std::time::Duration;

use tracing::debug;

use super::error::IngestError;
use super::osm::OsmRelation;

/// Default station table: the Hangzhou-Shenzhen line on jprailfan.
const DEFAULT_TABLE_URL: &str =
    "https://jprailfan.com/tools/stat/?linename=%E6%9D%AD%E6%B7%B1%E7%BA%BF";

/// Default line name as written in the station table.
const DEFAULT_LINE_NAME: &str = "杭深线";

/// Default OSM relation: the Hangzhou-Shenzhen railway.
const DEFAULT_RELATION_ID: &str = "2052885";

const DEFAULT_OSM_API_URL: &str = "https://www.openstreetmap.org/api/0.6";

/// Configuration for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Station table page
    pub table_url: String,
    /// Line name to select rows by
    pub line_name: String,
    /// OSM relation holding the line's route
    pub relation_id: String,
    /// OSM API base URL
    pub osm_api_url: String,
    /// Directory artifacts are written to
    pub output_dir: String,
    /// Artifact file name prefix
    pub file_prefix: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl IngestConfig {
    pub fn with_table_url(mut self, url: impl Into<String>) -> Self {
        self.table_url = url.into();
        self
    }

    pub fn with_line_name(mut self, name: impl Into<String>) -> Self {
        self.line_name = name.into();
        self
    }

    pub fn with_relation_id(mut self, id: impl Into<String>) -> Self {
        self.relation_id = id.into();
        self
    }

    /// Set a custom OSM API base URL, e.g. a mirror.
    pub fn with_osm_api_url(mut self, url: impl Into<String>) -> Self {
        self.osm_api_url = url.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// API URL of the relation with everything it references.
    pub fn relation_full_url(&self) -> String {
        format!(
            "{}/relation/{}/full",
            self.osm_api_url.trim_end_matches('/'),
            self.relation_id
        )
    }

    /// Public page of the relation.
    pub fn relation_page_url(&self) -> String {
        format!("https://www.openstreetmap.org/relation/{}", self.relation_id)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            table_url: DEFAULT_TABLE_URL.to_string(),
            line_name: DEFAULT_LINE_NAME.to_string(),
            relation_id: DEFAULT_RELATION_ID.to_string(),
            osm_api_url: DEFAULT_OSM_API_URL.to_string(),
            output_dir: "data".to_string(),
            file_prefix: "hangshen".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Client fetching the station table and OSM relation.
#[derive(Debug, Clone)]
pub struct IngestClient {
    http: reqwest::Client,
}

impl IngestClient {
    /// Create a new client.
    pub fn new(config: &IngestConfig) -> Result<Self, IngestError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// Fetch a page as text, failing on non-success status.
    pub async fn fetch_text(&self, url: &str) -> Result<String, IngestError> {
        debug!(url, "fetching");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the configured relation.
    pub async fn fetch_relation(&self, config: &IngestConfig) -> Result<OsmRelation, IngestError> {
        let xml = self.fetch_text(&config.relation_full_url()).await?;
        OsmRelation::parse(&xml, &config.relation_id)
    }

    /// Fetch the station table page and the relation concurrently.
    pub async fn fetch_sources(
        &self,
        config: &IngestConfig,
    ) -> Result<(String, OsmRelation), IngestError> {
        futures::try_join!(
            self.fetch_text(&config.table_url),
            self.fetch_relation(config)
        )
    }
}
