//! End-to-end checks of path generation across views and deployment
//! contexts, plus property tests for determinism and totality.

use proptest::prelude::*;
use tunetree::config::DeployContext;
use tunetree::error::ResolveError;
use tunetree::resolver::{enumerate_combinations, generate_path};
use tunetree::selection::{Feature, Level, Selection, View};

fn dev() -> DeployContext {
    DeployContext::default()
}

fn production() -> DeployContext {
    DeployContext::new("trees.example.org", "/viewer/")
}

#[test]
fn test_combined_view_full_matrix_of_level_patterns() {
    let cases = [
        (Level::Note, "genre_tree_note_chromatic.json"),
        (Level::Segment, "genre_tree_shared_segments_chromatic.json"),
        (Level::Structure, "genre_tree_structure_chromatic.json"),
        (Level::Combined, "genre_tree_combined_s75_ss25_chromatic.json"),
    ];

    for (level, expected_file) in cases {
        let selection = Selection::new(View::Combined, Feature::Chromatic, level);
        let info = generate_path(&selection, &dev()).unwrap();
        assert_eq!(info.target_folder, "tradition_segmented/genre/both/");
        assert_eq!(info.target_file, expected_file);
    }
}

#[test]
fn test_tradition_view_matches_documented_example() {
    let selection = Selection::new(View::Tradition, Feature::Rhythmic, Level::Segment)
        .with_tradition("irish");
    let info = generate_path(&selection, &dev()).unwrap();
    assert_eq!(info.target_folder, "tradition_segmented/genre/irish/");
    assert_eq!(info.target_file, "genre_tree_shared_segments_rhythmic.json");
}

#[test]
fn test_genre_view_folder_mapping_differs_from_file_pattern_mapping() {
    let selection = Selection::new(View::Genre, Feature::Chromatic, Level::Note)
        .with_tradition("irish")
        .with_genre("jig");
    let genre_info = generate_path(&selection, &dev()).unwrap();
    assert_eq!(
        genre_info.target_folder,
        "genre_segmented/note_level/irish/jig/"
    );
    assert_eq!(
        genre_info.target_file,
        "note_level_chromatic_phylogenetic_tree.json"
    );

    // Same level in the combined view stays on the file-pattern mapping.
    let combined = Selection::new(View::Combined, Feature::Chromatic, Level::Note);
    let combined_info = generate_path(&combined, &dev()).unwrap();
    assert_eq!(combined_info.target_file, "genre_tree_note_chromatic.json");
}

#[test]
fn test_missing_parameters_fail_immediately() {
    let tradition_view = Selection::new(View::Tradition, Feature::Chromatic, Level::Note);
    assert!(matches!(
        generate_path(&tradition_view, &dev()),
        Err(ResolveError::MissingParameter {
            view: View::Tradition,
            field: "tradition"
        })
    ));

    let genre_view = Selection::new(View::Genre, Feature::Chromatic, Level::Note);
    assert!(matches!(
        generate_path(&genre_view, &dev()),
        Err(ResolveError::MissingParameter { .. })
    ));
}

#[test]
fn test_deployment_context_selects_base_path_set() {
    let selection = Selection::new(View::Traditions, Feature::Chromatic, Level::Combined);

    let dev_info = generate_path(&selection, &dev()).unwrap();
    assert_eq!(dev_info.base_paths.len(), 5);
    assert_eq!(dev_info.full_paths[0], "./preprocessed_data/traditions_tree.json");
    assert_eq!(dev_info.full_paths[4], "../traditions_tree.json");

    let prod_info = generate_path(&selection, &production()).unwrap();
    assert_eq!(prod_info.base_paths.len(), 4);
    assert_eq!(
        prod_info.full_paths[0],
        "/viewer/preprocessed_data/traditions_tree.json"
    );
    assert_eq!(prod_info.full_paths[3], "/viewer/dist/traditions_tree.json");
}

#[test]
fn test_enumerate_combinations_is_deterministic_and_complete() {
    let base = Selection::new(View::Tradition, Feature::Chromatic, Level::Note)
        .with_tradition("galician");

    let first = enumerate_combinations(&base, &dev()).unwrap();
    let second = enumerate_combinations(&base, &dev()).unwrap();
    assert_eq!(first.len(), 12);
    assert_eq!(first, second);

    // Every (feature, level) pair appears exactly once, feature-major.
    let mut expected = Vec::new();
    for feature in Feature::ALL {
        for level in Level::ALL {
            expected.push((feature, level));
        }
    }
    let actual: Vec<_> = first.iter().map(|c| (c.feature, c.level)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_enumerate_combinations_propagates_missing_parameter() {
    let base = Selection::new(View::Genre, Feature::Chromatic, Level::Note);
    assert!(matches!(
        enumerate_combinations(&base, &dev()),
        Err(ResolveError::MissingParameter { .. })
    ));
}

proptest! {
    #[test]
    fn prop_generate_path_is_total_and_deterministic(
        tradition in "[a-z][a-z0-9_-]{0,15}",
        genre in "[a-z][a-z0-9_-]{0,15}",
        feature_idx in 0usize..3,
        level_idx in 0usize..4,
    ) {
        let selection = Selection::new(
            View::Genre,
            Feature::ALL[feature_idx],
            Level::ALL[level_idx],
        )
        .with_tradition(tradition)
        .with_genre(genre);

        let first = generate_path(&selection, &dev()).unwrap();
        let second = generate_path(&selection, &dev()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.full_paths.len(), first.base_paths.len());
        prop_assert!(first.full_paths.iter().all(|p| p.ends_with(&first.target_file)));
    }

    #[test]
    fn prop_combined_view_never_fails(
        feature_idx in 0usize..3,
        level_idx in 0usize..4,
    ) {
        let selection = Selection::new(
            View::Combined,
            Feature::ALL[feature_idx],
            Level::ALL[level_idx],
        );
        prop_assert!(generate_path(&selection, &production()).is_ok());
    }
}
