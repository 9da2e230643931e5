// src/ingest/providers/newsapi.rs
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Deserialize;

use crate::ingest::types::{Article, NormalizeError, SourceNormalizer};
use crate::ingest::{clean_opt, clean_text, short_hash};

#[derive(Debug, Deserialize)]
struct Payload {
    articles: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    title: Option<String>,
    author: Option<String>,
    source: Option<RecordSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordSource {
    name: Option<String>,
}

fn parse_rfc3339(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// Normalizer for NewsAPI `/v2/everything` payloads. Records carry no native
/// id and no category taxonomy; ids are derived from the article URL.
pub struct NewsApiNormalizer;

impl SourceNormalizer for NewsApiNormalizer {
    fn provider_id(&self) -> &'static str {
        "newsapi"
    }

    fn display_name(&self) -> &'static str {
        "NewsAPI"
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Article>, NormalizeError> {
        let parsed: Payload = serde_json::from_value(payload.clone()).map_err(|e| {
            NormalizeError::MalformedPayload {
                provider: self.provider_id(),
                reason: e.to_string(),
            }
        })?;

        let mut out = Vec::with_capacity(parsed.articles.len());
        for rec in parsed.articles {
            let title = clean_text(rec.title.as_deref().unwrap_or_default());
            let url = match rec.url {
                Some(u) if !u.is_empty() => u,
                _ => {
                    tracing::debug!(provider = "newsapi", "record without url, skipping");
                    counter!("newsdesk_skipped_records_total").increment(1);
                    continue;
                }
            };
            if title.is_empty() {
                tracing::debug!(provider = "newsapi", url, "record without title, skipping");
                counter!("newsdesk_skipped_records_total").increment(1);
                continue;
            }

            out.push(Article {
                id: format!("newsapi:{}", short_hash(&url)),
                title,
                author: clean_opt(rec.author.as_deref()),
                source: rec
                    .source
                    .and_then(|s| s.name)
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| "NewsAPI".to_string()),
                category: None,
                published_at: rec
                    .published_at
                    .as_deref()
                    .map(parse_rfc3339)
                    .unwrap_or_default(),
                url,
                summary: clean_text(rec.description.as_deref().unwrap_or_default()),
            });
        }
        Ok(out)
    }
}
