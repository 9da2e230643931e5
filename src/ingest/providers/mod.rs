// src/ingest/providers/mod.rs
pub mod guardian;
pub mod newsapi;
pub mod nytimes;

pub use guardian::GuardianNormalizer;
pub use newsapi::NewsApiNormalizer;
pub use nytimes::NyTimesNormalizer;

use crate::ingest::types::SourceNormalizer;

/// The built-in provider registry, in deterministic aggregation order.
pub fn default_normalizers() -> Vec<Box<dyn SourceNormalizer>> {
    vec![
        Box::new(NewsApiNormalizer),
        Box::new(GuardianNormalizer),
        Box::new(NyTimesNormalizer),
    ]
}
