use crate::catalog::{NeoSummary, ObjectDetail};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date range driving a catalog feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FeedWindow {
    /// Parse a window from `YYYY-MM-DD` endpoint strings.
    pub fn parse(start: &str, end: &str) -> CatalogResult<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(Self { start, end })
    }

    /// Single-day window covering today, the default for an unparameterized feed.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self {
            start: today,
            end: today,
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(value: &str) -> CatalogResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CatalogError::InvalidRequest("Invalid date format. Use YYYY-MM-DD".into()))
}

/// Common error type for catalog operations.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Provider of catalog feeds and single-object lookups.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    async fn feed(&self, window: &FeedWindow) -> CatalogResult<Vec<NeoSummary>>;
    async fn lookup(&self, identifier: &str) -> CatalogResult<ObjectDetail>;
}
