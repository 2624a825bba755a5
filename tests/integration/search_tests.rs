//! Search over the bundled and file-loaded content indexes.

use docgate::search::{search, search_with, ContentIndex, Marker, SearchOptions, SearchOutcome};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_bim_matches_bundled_pages_in_order() {
    let index = ContentIndex::builtin().unwrap();
    let outcome = search("bim", index.pages());

    let titles: Vec<&str> = outcome
        .hits()
        .iter()
        .map(|h| h.page.title.as_str())
        .collect();
    assert_eq!(titles, vec!["BIM Standards", "BIM Execution Plan"]);

    let expected: Vec<&str> = index
        .pages()
        .iter()
        .filter(|p| p.matches("bim"))
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, expected);
}

#[test]
fn test_query_case_does_not_matter() {
    let index = ContentIndex::builtin().unwrap();
    assert_eq!(search("BIM", index.pages()), search("bim", index.pages()));
    assert_eq!(search("Revit", index.pages()), search("rEVIT", index.pages()));
}

#[test]
fn test_short_queries_inactive_on_any_index() {
    let index = ContentIndex::builtin().unwrap();
    assert_eq!(search("", index.pages()), SearchOutcome::Inactive);
    assert_eq!(search("a", index.pages()), SearchOutcome::Inactive);
    assert_eq!(search("", &[]), SearchOutcome::Inactive);
}

#[test]
fn test_empty_index_reports_no_results() {
    assert_eq!(search("bim", &[]), SearchOutcome::NoResults);
}

#[test]
fn test_ampersand_title_highlight() {
    let index = ContentIndex::builtin().unwrap();
    let outcome = search("& clash", index.pages());
    assert_eq!(outcome.hits().len(), 1);
    assert_eq!(
        outcome.hits()[0].highlighted_title(&Marker::default()),
        "Coordination <mark>& Clash</mark> Detection"
    );
}

#[test]
fn test_index_file_with_custom_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pages.json");
    fs::write(
        &path,
        r#"{"pages": [
            {"title": "a.b notes", "url": "ab.html", "keywords": [], "description": ""},
            {"title": "axb notes", "url": "axb.html", "keywords": [], "description": ""}
        ]}"#,
    )
    .unwrap();

    let index = ContentIndex::load(&path).unwrap();
    let options = SearchOptions {
        marker: Marker::new("**", "**"),
        ..SearchOptions::default()
    };
    let outcome = search_with("A.B", index.pages(), &options);

    assert_eq!(outcome.hits().len(), 1);
    assert_eq!(outcome.hits()[0].page.url, "ab.html");
    assert_eq!(
        outcome.hits()[0].highlighted_title(&options.marker),
        "**a.b** notes"
    );
}
