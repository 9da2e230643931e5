// src/aggregate.rs
use std::collections::{BTreeMap, BTreeSet};

use metrics::{counter, histogram};

use crate::ingest::ensure_metrics_described;
use crate::ingest::types::{Article, SourceNormalizer};

/// The merged article collection plus the facet universes observed in it.
/// Facet lists hold distinct non-unknown values, lexicographically sorted.
/// `failures` carries per-provider malformed-payload messages so the caller
/// can surface a provider-scoped error without losing everyone else's data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub articles: Vec<Article>,
    pub categories: Vec<String>,
    pub authors: Vec<String>,
    pub sources: Vec<String>,
    pub failures: BTreeMap<String, String>,
}

/// Merge normalized articles from every selected provider that has a stored
/// payload, in registry order. Pure over its inputs: identical inputs yield
/// `==` outputs. A provider whose payload fails to normalize contributes
/// zero articles and one `failures` entry; the rest proceed unaffected.
pub fn aggregate(
    normalizers: &[Box<dyn SourceNormalizer>],
    raw_by_provider: &BTreeMap<String, serde_json::Value>,
    selected: &BTreeSet<String>,
) -> Aggregate {
    ensure_metrics_described();
    let t0 = std::time::Instant::now();

    let mut out = Aggregate::default();
    for norm in normalizers {
        let id = norm.provider_id();
        if !selected.contains(id) {
            continue;
        }
        let Some(payload) = raw_by_provider.get(id) else {
            // Not fetched yet; contributes nothing.
            continue;
        };
        match norm.normalize(payload) {
            Ok(mut articles) => {
                counter!("newsdesk_articles_total").increment(articles.len() as u64);
                out.articles.append(&mut articles);
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = id, "provider payload malformed");
                counter!("newsdesk_malformed_payloads_total").increment(1);
                out.failures.insert(id.to_string(), e.to_string());
            }
        }
    }

    let mut categories = BTreeSet::new();
    let mut authors = BTreeSet::new();
    let mut sources = BTreeSet::new();
    for a in &out.articles {
        if let Some(c) = &a.category {
            categories.insert(c.clone());
        }
        if let Some(au) = &a.author {
            authors.insert(au.clone());
        }
        sources.insert(a.source.clone());
    }
    out.categories = categories.into_iter().collect();
    out.authors = authors.into_iter().collect();
    out.sources = sources.into_iter().collect();

    histogram!("newsdesk_aggregate_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    out
}
