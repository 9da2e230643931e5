// src/ingest/types.rs
use chrono::{DateTime, Utc};

/// Canonical article shape shared by every provider.
///
/// `author` and `category` use `None` as the "unknown" sentinel: such
/// articles are excluded from the corresponding facet value sets but still
/// show up in unfiltered output.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Provider-qualified id, e.g. `"guardian:world/2026/..."`. Providers
    /// without a native id get a short hash of the URL instead.
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    /// Publication name; never empty.
    pub source: String,
    pub category: Option<String>,
    /// Records without a parseable date fall back to the UNIX epoch and
    /// therefore sort as oldest.
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("malformed payload from {provider}: {reason}")]
    MalformedPayload {
        provider: &'static str,
        reason: String,
    },
}

/// One normalizer per provider: maps that provider's already-fetched raw
/// payload into canonical articles. Fetching itself lives outside this crate.
pub trait SourceNormalizer: Send + Sync {
    /// Stable machine id, e.g. `"newsapi"`. Used as the `raw_by_provider` key.
    fn provider_id(&self) -> &'static str;
    /// Human-readable name for the provider picker.
    fn display_name(&self) -> &'static str;
    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Article>, NormalizeError>;
}
