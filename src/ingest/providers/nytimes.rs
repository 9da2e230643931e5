// src/ingest/providers/nytimes.rs
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Deserialize;

use crate::ingest::types::{Article, NormalizeError, SourceNormalizer};
use crate::ingest::{clean_opt, clean_text};

#[derive(Debug, Deserialize)]
struct Payload {
    response: Response,
}

#[derive(Debug, Deserialize)]
struct Response {
    docs: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "_id")]
    id: Option<String>,
    headline: Option<Headline>,
    #[serde(rename = "web_url")]
    web_url: Option<String>,
    #[serde(rename = "section_name")]
    section_name: Option<String>,
    #[serde(rename = "pub_date")]
    pub_date: Option<String>,
    byline: Option<Byline>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    snippet: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Headline {
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Byline {
    original: Option<String>,
}

// NYT pub_date uses an offset without a colon, e.g. "2026-02-21T08:00:00+0000".
fn parse_pub_date(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(ts))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn strip_by_prefix(byline: &str) -> &str {
    byline
        .strip_prefix("By ")
        .or_else(|| byline.strip_prefix("by "))
        .unwrap_or(byline)
}

/// Normalizer for NYT article-search payloads.
pub struct NyTimesNormalizer;

impl SourceNormalizer for NyTimesNormalizer {
    fn provider_id(&self) -> &'static str {
        "nytimes"
    }

    fn display_name(&self) -> &'static str {
        "The New York Times"
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Article>, NormalizeError> {
        let parsed: Payload = serde_json::from_value(payload.clone()).map_err(|e| {
            NormalizeError::MalformedPayload {
                provider: self.provider_id(),
                reason: e.to_string(),
            }
        })?;

        let mut out = Vec::with_capacity(parsed.response.docs.len());
        for rec in parsed.response.docs {
            let title = clean_text(
                rec.headline
                    .as_ref()
                    .and_then(|h| h.main.as_deref())
                    .unwrap_or_default(),
            );
            let url = match rec.web_url {
                Some(u) if !u.is_empty() => u,
                _ => {
                    tracing::debug!(provider = "nytimes", "record without url, skipping");
                    counter!("newsdesk_skipped_records_total").increment(1);
                    continue;
                }
            };
            if title.is_empty() {
                tracing::debug!(provider = "nytimes", url, "record without headline, skipping");
                counter!("newsdesk_skipped_records_total").increment(1);
                continue;
            }

            let author = rec
                .byline
                .as_ref()
                .and_then(|b| b.original.as_deref())
                .map(strip_by_prefix)
                .and_then(|b| clean_opt(Some(b)));

            out.push(Article {
                id: match rec.id {
                    Some(native) if !native.is_empty() => format!("nytimes:{native}"),
                    _ => format!("nytimes:{}", crate::ingest::short_hash(&url)),
                },
                title,
                author,
                source: rec
                    .source
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| "The New York Times".to_string()),
                category: clean_opt(rec.section_name.as_deref()),
                published_at: rec
                    .pub_date
                    .as_deref()
                    .map(parse_pub_date)
                    .unwrap_or_default(),
                url,
                summary: clean_text(
                    rec.abstract_text
                        .as_deref()
                        .or(rec.snippet.as_deref())
                        .unwrap_or_default(),
                ),
            });
        }
        Ok(out)
    }
}
