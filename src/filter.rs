// src/filter.rs
use std::collections::BTreeSet;

use crate::ingest::types::Article;

/// The three filterable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    Author,
    Source,
}

/// Per-facet sets of toggled-on values. An empty set means "no constraint on
/// that facet". Values referencing facets no longer present in the aggregate
/// simply match nothing; pruning them (or not) is the session's call.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub authors: BTreeSet<String>,
    pub sources: BTreeSet<String>,
}

impl FilterSelection {
    pub fn facet(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Category => &self.categories,
            Facet::Author => &self.authors,
            Facet::Source => &self.sources,
        }
    }

    pub fn facet_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Category => &mut self.categories,
            Facet::Author => &mut self.authors,
            Facet::Source => &mut self.sources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.authors.is_empty() && self.sources.is_empty()
    }

    /// True iff the article satisfies every non-empty facet constraint.
    /// Articles with an unknown (None) author/category fail a non-empty
    /// constraint on that facet, since `None` is never a member of the set.
    pub fn matches(&self, article: &Article) -> bool {
        let pass_set = |set: &BTreeSet<String>, value: Option<&str>| -> bool {
            set.is_empty() || value.is_some_and(|v| set.contains(v))
        };
        pass_set(&self.categories, article.category.as_deref())
            && pass_set(&self.authors, article.author.as_deref())
            && pass_set(&self.sources, Some(article.source.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Aggregation order (the providers' own relevance ranking).
    #[default]
    Relevance,
    Newest,
    Oldest,
}

/// Filter then sort. The sort is stable, so equal-rank articles keep their
/// aggregation order; `Relevance` is a no-op sort. Input is not mutated.
pub fn visible(articles: &[Article], filter: &FilterSelection, sort: SortKey) -> Vec<Article> {
    let mut out: Vec<Article> = articles
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();
    match sort {
        SortKey::Relevance => {}
        SortKey::Newest => out.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        SortKey::Oldest => out.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
    }
    out
}
