// src/session.rs
use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::{aggregate, Aggregate};
use crate::filter::{visible, Facet, FilterSelection, SortKey};
use crate::ingest::config::SessionConfig;
use crate::ingest::providers::default_normalizers;
use crate::ingest::types::{Article, SourceNormalizer};
use crate::pagination::{range, PageItem, PaginationState};

/// Single authoritative holder of one browsing session's state.
///
/// Every mutation recomputes the derived `aggregate` and `visible` fields
/// synchronously before returning, so readers never observe a stale
/// derivation. One owned object per session, handed around by reference;
/// no global singleton, no locking. Hosts that parallelize provider fetches
/// funnel completions back through [`Session::set_provider_payload`] tagged
/// with the generation from [`Session::begin_fetch`].
pub struct Session {
    normalizers: Vec<Box<dyn SourceNormalizer>>,
    selected: BTreeSet<String>,
    raw_by_provider: BTreeMap<String, serde_json::Value>,
    filter: FilterSelection,
    sort: SortKey,
    pagination: PaginationState,
    generation: u64,
    loading: bool,
    error: Option<String>,
    // derived
    aggregate: Aggregate,
    visible: Vec<Article>,
}

impl Session {
    pub fn new(normalizers: Vec<Box<dyn SourceNormalizer>>, config: &SessionConfig) -> Self {
        let known: BTreeSet<String> = normalizers
            .iter()
            .map(|n| n.provider_id().to_string())
            .collect();
        // Everything starts selected unless the config narrows it down.
        let selected = if config.providers.is_empty() {
            known
        } else {
            let mut sel = BTreeSet::new();
            for id in &config.providers {
                if known.contains(id) {
                    sel.insert(id.clone());
                } else {
                    tracing::warn!(provider = %id, "unknown provider id in config, ignoring");
                }
            }
            sel
        };

        let mut s = Self {
            normalizers,
            selected,
            raw_by_provider: BTreeMap::new(),
            filter: FilterSelection::default(),
            sort: config.default_sort,
            pagination: PaginationState {
                current_page: 1,
                page_size: config.page_size.max(1),
                sibling_count: config.sibling_count,
            },
            generation: 0,
            loading: false,
            error: None,
            aggregate: Aggregate::default(),
            visible: Vec::new(),
        };
        s.rederive();
        s
    }

    /// Built-in provider registry + the `config/providers.*` fallback chain.
    pub fn from_default_config() -> anyhow::Result<Self> {
        let config = crate::ingest::config::load_config_default()?;
        Ok(Self::new(default_normalizers(), &config))
    }

    fn rederive(&mut self) {
        self.aggregate = aggregate(&self.normalizers, &self.raw_by_provider, &self.selected);
        self.visible = visible(&self.aggregate.articles, &self.filter, self.sort);
        // Keep the pagination-range caller contract: current page is always
        // valid for the derived total.
        let total = self.total_pages();
        self.pagination.current_page = self.pagination.current_page.clamp(1, total);
    }

    // ---- mutations ----

    /// Bump the fetch generation. Callers tag in-flight fetches with the
    /// returned value; completions from an older generation are dropped.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replace one provider's raw payload wholesale and re-derive. Returns
    /// `false` (and changes nothing) for a stale generation or an unknown
    /// provider id.
    pub fn set_provider_payload(
        &mut self,
        provider: &str,
        generation: u64,
        payload: serde_json::Value,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                provider,
                generation,
                current = self.generation,
                "dropping payload from stale fetch generation"
            );
            return false;
        }
        if !self
            .normalizers
            .iter()
            .any(|n| n.provider_id() == provider)
        {
            tracing::warn!(provider, "payload for unknown provider, ignoring");
            return false;
        }
        self.raw_by_provider.insert(provider.to_string(), payload);
        self.rederive();
        true
    }

    /// Replace the selected-provider set. Unknown ids are dropped with a
    /// warning. Filter values that only existed in a now-deselected
    /// provider's facets are intentionally left in place; they just match
    /// nothing until the provider returns.
    pub fn set_selected_providers(&mut self, ids: &[String]) {
        let mut sel = BTreeSet::new();
        for id in ids {
            if self.normalizers.iter().any(|n| n.provider_id() == id) {
                sel.insert(id.clone());
            } else {
                tracing::warn!(provider = %id, "unknown provider id in selection, ignoring");
            }
        }
        self.selected = sel;
        self.rederive();
    }

    /// Replace one facet's value set. A filter change invalidates the page
    /// position, so the current page resets to 1.
    pub fn set_filter(&mut self, facet: Facet, values: BTreeSet<String>) {
        *self.filter.facet_mut(facet) = values;
        self.pagination.current_page = 1;
        self.rederive();
    }

    /// Toggle one facet value's membership. Same page-reset semantics as
    /// [`Session::set_filter`].
    pub fn toggle_filter(&mut self, facet: Facet, value: &str) {
        let set = self.filter.facet_mut(facet);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        self.pagination.current_page = 1;
        self.rederive();
    }

    /// Change the sort key. The current page is left where it was.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.rederive();
    }

    /// Out-of-range requests are corrected by clamping, never surfaced as
    /// errors.
    pub fn set_page(&mut self, n: usize) {
        self.pagination.current_page = n.clamp(1, self.total_pages());
    }

    pub fn set_page_size(&mut self, n: usize) {
        if n == 0 {
            tracing::warn!("ignoring zero page size");
            return;
        }
        self.pagination.page_size = n;
        self.rederive();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    // ---- read accessors ----

    /// All aggregated articles, before filtering.
    pub fn articles(&self) -> &[Article] {
        &self.aggregate.articles
    }

    /// The filtered, sorted collection.
    pub fn visible(&self) -> &[Article] {
        &self.visible
    }

    /// The slice of the visible collection for the current page; this is
    /// what a renderer actually draws.
    pub fn visible_page(&self) -> &[Article] {
        let start = (self.pagination.current_page - 1) * self.pagination.page_size;
        let end = (start + self.pagination.page_size).min(self.visible.len());
        if start >= self.visible.len() {
            &[]
        } else {
            &self.visible[start..end]
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.aggregate.categories
    }

    pub fn authors(&self) -> &[String] {
        &self.aggregate.authors
    }

    pub fn sources(&self) -> &[String] {
        &self.aggregate.sources
    }

    /// Per-provider malformed-payload messages from the last aggregation.
    pub fn provider_failures(&self) -> &BTreeMap<String, String> {
        &self.aggregate.failures
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.visible.len())
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    /// Page-index layout for the current state.
    pub fn pagination_range(&self) -> Vec<PageItem> {
        range(
            self.total_pages(),
            self.pagination.current_page,
            self.pagination.sibling_count,
        )
    }

    pub fn selected_providers(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// `(id, display name)` pairs for the provider picker, in registry order.
    pub fn available_providers(&self) -> Vec<(&'static str, &'static str)> {
        self.normalizers
            .iter()
            .map(|n| (n.provider_id(), n.display_name()))
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
