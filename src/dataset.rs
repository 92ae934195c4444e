//! Flat-source block loader.
//!
//! Fetches the block feed as JSON over blocking HTTP and runs the load-time
//! enrichment pass. The loader is the upstream validator: everything past it
//! only ever sees valid [`Block`] values.

use crate::block::{Block, RawBlock, enrich};

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/blocks.json".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug)]
pub enum DatasetError {
    Http(reqwest::Error),
    Parse(serde_json::Error),
}

impl From<reqwest::Error> for DatasetError {
    fn from(err: reqwest::Error) -> Self {
        DatasetError::Http(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Parse(err)
    }
}

#[derive(Debug)]
pub struct DatasetClient {
    config: DatasetConfig,
    client: reqwest::blocking::Client,
}

impl DatasetClient {
    pub fn new(config: DatasetConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Download and enrich the full block feed.
    pub fn fetch_blocks(&self) -> Result<Vec<Block>, DatasetError> {
        let raw: Vec<RawBlock> = self
            .client
            .get(&self.config.url)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(enrich_and_log(raw))
    }
}

/// Parse and enrich a feed already in memory (bundled data, tests).
pub fn blocks_from_slice(bytes: &[u8]) -> Result<Vec<Block>, DatasetError> {
    let raw: Vec<RawBlock> = serde_json::from_slice(bytes)?;
    Ok(enrich_and_log(raw))
}

fn enrich_and_log(raw: Vec<RawBlock>) -> Vec<Block> {
    let total = raw.len();
    let blocks = enrich(raw);
    tracing::info!(valid = blocks.len(), total, "loaded block feed");
    blocks
}
