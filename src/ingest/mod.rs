// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on the host's exporter).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "newsdesk_articles_total",
            "Articles normalized from provider payloads."
        );
        describe_counter!(
            "newsdesk_skipped_records_total",
            "Provider records skipped (missing url or empty title)."
        );
        describe_counter!(
            "newsdesk_malformed_payloads_total",
            "Provider payloads rejected as malformed."
        );
        describe_histogram!("newsdesk_aggregate_ms", "Aggregation time in milliseconds.");
    });
}

/// Clean display text: decode HTML entities, strip tags, collapse whitespace.
pub fn clean_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Like [`clean_text`] but maps an empty result to `None`. Used for the
/// optional author/category/summary fields.
pub fn clean_opt(s: Option<&str>) -> Option<String> {
    let cleaned = clean_text(s?);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Short hex tag for providers whose records carry no native id.
pub(crate) fn short_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
