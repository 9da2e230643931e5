// tests/session_flow.rs
// End-to-end session behavior over the captured provider fixtures.

use newsdesk_aggregator::ingest::providers::default_normalizers;
use newsdesk_aggregator::{Facet, Session, SessionConfig, SortKey};

fn fixture(name: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(format!("tests/fixtures/{name}")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn loaded_session() -> Session {
    let mut s = Session::new(default_normalizers(), &SessionConfig::default());
    let gen = s.begin_fetch();
    assert!(s.set_provider_payload("newsapi", gen, fixture("newsapi.json")));
    assert!(s.set_provider_payload("guardian", gen, fixture("guardian.json")));
    assert!(s.set_provider_payload("nytimes", gen, fixture("nytimes.json")));
    s
}

#[test]
fn aggregates_all_fixtures_with_sorted_facets() {
    let s = loaded_session();
    // 3 newsapi (one skipped) + 3 guardian + 2 nytimes
    assert_eq!(s.articles().len(), 8);

    assert_eq!(
        s.categories(),
        ["Arts", "Environment", "Technology", "U.S.", "World news"]
    );
    assert_eq!(
        s.sources(),
        [
            "Ars Technica",
            "Engadget",
            "The Guardian",
            "The New York Times",
            "Wired"
        ]
    );
    // Authors exclude the unknown ones.
    assert_eq!(
        s.authors(),
        ["Adam Morton", "Alex Hern", "Ana Ley", "Karissa Bell", "Paris Martineau"]
    );
    assert!(s.provider_failures().is_empty());
}

#[test]
fn completion_order_does_not_matter() {
    let mut a = Session::new(default_normalizers(), &SessionConfig::default());
    let gen_a = a.begin_fetch();
    a.set_provider_payload("nytimes", gen_a, fixture("nytimes.json"));
    a.set_provider_payload("guardian", gen_a, fixture("guardian.json"));
    a.set_provider_payload("newsapi", gen_a, fixture("newsapi.json"));

    let b = loaded_session();
    assert_eq!(a.articles(), b.articles());
    assert_eq!(a.visible(), b.visible());
}

#[test]
fn visible_is_a_subset_honoring_every_constraint() {
    let mut s = loaded_session();
    s.toggle_filter(Facet::Source, "The Guardian");
    s.toggle_filter(Facet::Category, "Technology");

    let all: Vec<_> = s.articles().to_vec();
    for a in s.visible() {
        assert!(all.contains(a));
        assert_eq!(a.source, "The Guardian");
        assert_eq!(a.category.as_deref(), Some("Technology"));
    }
    assert_eq!(s.visible().len(), 1);
    assert_eq!(s.visible()[0].title, "Who pays for open source?");
}

#[test]
fn newest_sort_orders_across_providers() {
    let mut s = loaded_session();
    s.set_sort(SortKey::Newest);
    let times: Vec<_> = s.visible().iter().map(|a| a.published_at).collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted);
    assert_eq!(s.visible()[0].title, "The Fare-Free Experiment");

    s.set_sort(SortKey::Oldest);
    assert_eq!(s.visible()[0].title, "Hands-on with the new e-ink tablet");
}

#[test]
fn relevance_preserves_aggregation_order() {
    let mut s = loaded_session();
    s.set_sort(SortKey::Newest);
    s.set_sort(SortKey::Relevance);
    assert_eq!(s.visible(), s.articles());
}

#[test]
fn articles_without_author_still_render_unfiltered() {
    let s = loaded_session();
    let unknown_count = s.visible().iter().filter(|a| a.author.is_none()).count();
    assert_eq!(unknown_count, 3);
    // The facet list carries only the real names, no "unknown" placeholder.
    assert_eq!(s.authors().len(), 5);
}

#[test]
fn refetch_generation_guards_against_resurrected_data() {
    let mut s = loaded_session();
    let stale = s.generation();

    // A newer fetch begins; the provider set also changes meanwhile.
    let fresh = s.begin_fetch();
    s.set_selected_providers(&["guardian".to_string(), "newsapi".to_string()]);

    // Late completion from the superseded fetch is dropped.
    assert!(!s.set_provider_payload("newsapi", stale, serde_json::json!({ "articles": [] })));
    assert_eq!(s.articles().len(), 6);

    // The fresh completion applies.
    assert!(s.set_provider_payload("newsapi", fresh, serde_json::json!({ "articles": [] })));
    assert_eq!(s.articles().len(), 3);
}

#[test]
fn paginates_with_small_page_size() {
    let cfg = SessionConfig {
        page_size: 3,
        ..SessionConfig::default()
    };
    let mut s = Session::new(default_normalizers(), &cfg);
    let gen = s.begin_fetch();
    s.set_provider_payload("newsapi", gen, fixture("newsapi.json"));
    s.set_provider_payload("guardian", gen, fixture("guardian.json"));
    s.set_provider_payload("nytimes", gen, fixture("nytimes.json"));

    assert_eq!(s.total_pages(), 3); // 8 articles / 3 per page
    assert_eq!(s.visible_page().len(), 3);
    s.set_page(3);
    assert_eq!(s.visible_page().len(), 2);

    // Filtering down to one page pulls the cursor back.
    s.toggle_filter(Facet::Source, "Wired");
    assert_eq!(s.current_page(), 1);
    assert_eq!(s.total_pages(), 1);
}
