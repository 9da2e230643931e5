// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod filter;
pub mod ingest;
pub mod pagination;
pub mod session;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{aggregate, Aggregate};
pub use crate::filter::{visible, Facet, FilterSelection, SortKey};
pub use crate::ingest::config::SessionConfig;
pub use crate::ingest::types::{Article, NormalizeError, SourceNormalizer};
pub use crate::pagination::{range, PageItem, PaginationState};
pub use crate::session::Session;
