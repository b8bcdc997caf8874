//! Result document sources: the live SerpAPI client and an offline file source

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the external SERP data source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected (check the API key)")]
    Auth,
    #[error("request quota exhausted")]
    Quota,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("no saved results for keyword {0:?}")]
    Missing(String),
    #[error("failed to read saved results: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid result document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A per-keyword provider of SERP result documents.
///
/// Keeps the fetch (and whatever blocking it involves) out of the extraction
/// core; tests and offline runs inject their own implementation.
pub trait ResultSource {
    fn fetch(&self, keyword: &str) -> Result<Value, SourceError>;
}

pub const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Live SerpAPI client. Blocking on purpose: the run loop is sequential and
/// throttled, so there is nothing to overlap.
pub struct SerpApiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    hl: String,
    gl: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            hl: "en".to_string(),
            gl: "us".to_string(),
        }
    }

    /// Override the interface language and geolocation sent with each query
    pub fn with_locale(mut self, hl: impl Into<String>, gl: impl Into<String>) -> Self {
        self.hl = hl.into();
        self.gl = gl.into();
        self
    }
}

impl ResultSource for SerpApiClient {
    fn fetch(&self, keyword: &str) -> Result<Value, SourceError> {
        let response = self
            .client
            .get(SERPAPI_ENDPOINT)
            .query(&[
                ("engine", "google"),
                ("q", keyword),
                ("hl", self.hl.as_str()),
                ("gl", self.gl.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()?;

        match response.status().as_u16() {
            200 => Ok(response.json()?),
            401 | 403 => Err(SourceError::Auth),
            429 => Err(SourceError::Quota),
            code => Err(SourceError::Status(code)),
        }
    }
}

/// Offline source reading saved SERP payloads, one `<keyword-slug>.json` per
/// keyword. Used by `--input` runs and the integration tests.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Filename slug for a keyword: lowercased, runs of non-alphanumeric
    /// characters collapsed to a single dash
    pub fn keyword_slug(keyword: &str) -> String {
        let mut slug = String::with_capacity(keyword.len());
        let mut pending_dash = false;
        for c in keyword.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        slug
    }
}

impl ResultSource for FileSource {
    fn fetch(&self, keyword: &str) -> Result<Value, SourceError> {
        let path = self
            .dir
            .join(format!("{}.json", Self::keyword_slug(keyword)));
        if !path.exists() {
            return Err(SourceError::Missing(keyword.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
