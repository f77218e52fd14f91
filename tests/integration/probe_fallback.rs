//! Fallback-probing behavior against a scripted fetcher: strict candidate
//! order, short-circuit on first success, and the NotFound/FetchFailed
//! distinction.

use super::test_utils::ScriptedFetcher;
use serde_json::json;
use tunetree::config::DeployContext;
use tunetree::error::ResolveError;
use tunetree::resolver::{
    generate_path, load_tree_data, resolve_existing_path, verify_all_combinations,
};
use tunetree::selection::{Feature, Level, Selection, View};

fn dev() -> DeployContext {
    DeployContext::default()
}

#[tokio::test]
async fn test_candidates_probed_in_order_until_first_success() {
    let selection = Selection::new(View::Combined, Feature::Chromatic, Level::Segment);
    let info = generate_path(&selection, &dev()).unwrap();

    // The third candidate exists; so does the fifth, which must never win.
    let fetcher = ScriptedFetcher::new(vec![
        info.full_paths[2].clone(),
        info.full_paths[4].clone(),
    ]);

    let resolved = resolve_existing_path(&fetcher, &selection, &dev())
        .await
        .unwrap();
    assert_eq!(resolved.working_path, info.full_paths[2]);
    assert_eq!(fetcher.probed_paths(), info.full_paths[..3].to_vec());
}

#[tokio::test]
async fn test_exhausted_candidates_report_not_found_with_view() {
    let selection = Selection::new(View::Tradition, Feature::Rhythmic, Level::Note)
        .with_tradition("galician");
    let fetcher = ScriptedFetcher::new(vec![]);

    let err = resolve_existing_path(&fetcher, &selection, &dev())
        .await
        .unwrap_err();
    match err {
        ResolveError::NotFound { view } => assert_eq!(view, View::Tradition),
        other => panic!("expected NotFound, got {:?}", other),
    }
    // Every candidate was probed exactly once, none retried.
    let probed = fetcher.probed_paths();
    let info = generate_path(&selection, &dev()).unwrap();
    assert_eq!(probed, info.full_paths);
}

#[tokio::test]
async fn test_load_tree_data_returns_path_info_and_document() {
    let selection = Selection::new(View::Traditions, Feature::Chromatic, Level::Combined);
    let info = generate_path(&selection, &dev()).unwrap();
    let document = json!({
        "name": "traditions",
        "children": [
            { "name": "Irish Traditional", "tradition": "irish" },
            { "name": "Galician Traditional", "tradition": "galician" }
        ]
    });
    let fetcher = ScriptedFetcher::new(vec![info.full_paths[1].clone()])
        .with_document(info.full_paths[1].clone(), document.clone());

    let (resolved, data) = load_tree_data(&fetcher, &selection, &dev()).await.unwrap();
    assert_eq!(resolved.working_path, info.full_paths[1]);
    assert_eq!(resolved.path_info.target_file, "traditions_tree.json");
    assert_eq!(data, document);
}

#[tokio::test]
async fn test_stale_resolution_surfaces_as_fetch_failed() {
    let selection = Selection::new(View::Traditions, Feature::Chromatic, Level::Combined);
    let info = generate_path(&selection, &dev()).unwrap();
    // Probe says the file is there, but the follow-up fetch finds nothing.
    let fetcher = ScriptedFetcher::new(vec![info.full_paths[0].clone()]);

    let err = load_tree_data(&fetcher, &selection, &dev()).await.unwrap_err();
    match err {
        ResolveError::FetchFailed { path, .. } => assert_eq!(path, info.full_paths[0]),
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_verify_all_combinations_reports_twelve_flags() {
    let base = Selection::new(View::Tradition, Feature::Chromatic, Level::Note)
        .with_tradition("irish");
    let info = generate_path(&base, &dev()).unwrap();
    // Only the base selection's own first candidate exists.
    let fetcher = ScriptedFetcher::new(vec![info.full_paths[0].clone()]);

    let reports = verify_all_combinations(&fetcher, &base, &dev()).await.unwrap();
    assert_eq!(reports.len(), 12);

    let existing: Vec<_> = reports.iter().filter(|r| r.exists).collect();
    assert_eq!(existing.len(), 1);
    assert_eq!(existing[0].combination.feature, Feature::Chromatic);
    assert_eq!(existing[0].combination.level, Level::Note);

    // Only first candidates are probed, never the fallback lists.
    assert_eq!(fetcher.probed_paths().len(), 12);
}
