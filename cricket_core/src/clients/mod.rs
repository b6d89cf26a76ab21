//! Upstream data-source abstractions.
//!
//! Defines the `CricketDataSource` trait so the dialogue engine can be
//! driven by the live HTTP client in production and by canned payloads in
//! tests.

use crate::error::DataError;
use async_trait::async_trait;
use serde_json::Value;

pub mod cricket_api;

pub use cricket_api::CricketApiClient;

/// A source of raw cricket payloads.
///
/// Both operations perform one full live fetch per call: no retries, no
/// caching. A failed call surfaces to the dialogue layer as "no data".
#[async_trait]
pub trait CricketDataSource: Send + Sync {
    /// All ongoing series.
    async fn ongoing_series(&self) -> Result<Value, DataError>;

    /// One team, exact-match filtered upstream by name.
    async fn team(&self, name: &str) -> Result<Value, DataError>;
}
