// src/ingest/providers/guardian.rs
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
    results: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: Option<String>,
    #[serde(rename = "webTitle")]
    web_title: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    #[serde(rename = "sectionName")]
    section_name: Option<String>,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: Option<String>,
    fields: Option<Fields>,
}

// Only present when the request asked for show-fields.
#[derive(Debug, Deserialize)]
struct Fields {
    byline: Option<String>,
    #[serde(rename = "trailText")]
    trail_text: Option<String>,
}

fn parse_rfc3339(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// Normalizer for Guardian content-search payloads. Section names map to the
/// flat category taxonomy; `trailText` arrives as HTML and goes through the
/// shared cleanup.
pub struct GuardianNormalizer;

impl SourceNormalizer for GuardianNormalizer {
    fn provider_id(&self) -> &'static str {
        "guardian"
    }

    fn display_name(&self) -> &'static str {
        "The Guardian"
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Article>, NormalizeError> {
        let parsed: Payload = serde_json::from_value(payload.clone()).map_err(|e| {
            NormalizeError::MalformedPayload {
                provider: self.provider_id(),
                reason: e.to_string(),
            }
        })?;

        let mut out = Vec::with_capacity(parsed.response.results.len());
        for rec in parsed.response.results {
            let title = clean_text(rec.web_title.as_deref().unwrap_or_default());
            let url = match rec.web_url {
                Some(u) if !u.is_empty() => u,
                _ => {
                    tracing::debug!(provider = "guardian", "record without url, skipping");
                    counter!("newsdesk_skipped_records_total").increment(1);
                    continue;
                }
            };
            if title.is_empty() {
                tracing::debug!(provider = "guardian", url, "record without title, skipping");
                counter!("newsdesk_skipped_records_total").increment(1);
                continue;
            }

            let fields = rec.fields.unwrap_or(Fields {
                byline: None,
                trail_text: None,
            });

            out.push(Article {
                id: match rec.id {
                    Some(native) if !native.is_empty() => format!("guardian:{native}"),
                    _ => format!("guardian:{}", crate::ingest::short_hash(&url)),
                },
                title,
                author: clean_opt(fields.byline.as_deref()),
                source: "The Guardian".to_string(),
                category: clean_opt(rec.section_name.as_deref()),
                published_at: rec
                    .web_publication_date
                    .as_deref()
                    .map(parse_rfc3339)
                    .unwrap_or_default(),
                url,
                summary: clean_text(fields.trail_text.as_deref().unwrap_or_default()),
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_section_to_category_and_strips_html_trail() {
        let payload = json!({
            "response": {
                "status": "ok",
                "results": [{
                    "id": "world/2026/feb/21/example",
                    "webTitle": "Example headline",
                    "webUrl": "https://www.theguardian.com/world/2026/feb/21/example",
                    "sectionName": "World news",
                    "webPublicationDate": "2026-02-21T08:00:00Z",
                    "fields": {
                        "byline": "Jane Doe",
                        "trailText": "<strong>Short</strong> trail&nbsp;text"
                    }
                }]
            }
        });
        let arts = GuardianNormalizer.normalize(&payload).unwrap();
        assert_eq!(arts.len(), 1);
        let a = &arts[0];
        assert_eq!(a.id, "guardian:world/2026/feb/21/example");
        assert_eq!(a.category.as_deref(), Some("World news"));
        assert_eq!(a.author.as_deref(), Some("Jane Doe"));
        assert_eq!(a.summary, "Short trail text");
        assert_eq!(a.source, "The Guardian");
    }

    #[test]
    fn tolerates_missing_fields_block() {
        let payload = json!({
            "response": {
                "results": [{
                    "webTitle": "Bare record",
                    "webUrl": "https://www.theguardian.com/x"
                }]
            }
        });
        let arts = GuardianNormalizer.normalize(&payload).unwrap();
        assert_eq!(arts[0].author, None);
        assert_eq!(arts[0].category, None);
        assert_eq!(arts[0].summary, "");
        // No native id in the record, falls back to a url hash.
        assert!(arts[0].id.starts_with("guardian:"));
    }

    #[test]
    fn missing_response_envelope_is_malformed() {
        let payload = json!({ "message": "invalid api key" });
        let err = GuardianNormalizer.normalize(&payload).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MalformedPayload { provider: "guardian", .. }
        ));
    }
}
