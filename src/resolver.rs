//! Candidate-path generation and fallback probing for tree data files.
//!
//! [`generate_path`] is pure: it maps a filter selection and deployment
//! context to a prioritized list of candidate locations. The async
//! operations probe those candidates strictly in order over a
//! [`TreeFetcher`], first success wins, no retries and no backoff. The only
//! resilience mechanism is the ordered fallback list itself.

use crate::config::DeployContext;
use crate::error::ResolveError;
use crate::fetch::TreeFetcher;
use crate::selection::{Feature, Level, Selection, View};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Folder holding the all-traditions combined genre trees.
pub const COMBINED_TRADITION_FOLDER: &str = "tradition_segmented/genre/both/";

/// File name of the top-level traditions-overview tree.
pub const TRADITIONS_TREE_FILE: &str = "traditions_tree.json";

/// Derived path information for one selection. Created fresh per call,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    /// The selection this path info was derived from
    pub selection: Selection,
    /// Folder relative to a base path, empty for the traditions view
    pub target_folder: String,
    /// File name within the target folder
    pub target_file: String,
    /// Level token used in the file name pattern
    pub level_pattern: String,
    /// Ordered base-path prefixes for the deployment context
    pub base_paths: Vec<String>,
    /// Cross product of base paths and folder + file, in probe order
    pub full_paths: Vec<String>,
}

/// A successfully probed path together with the path info it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path_info: PathInfo,
    pub working_path: String,
}

/// One feature/level combination paired with its derived path info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub feature: Feature,
    pub level: Level,
    pub path_info: PathInfo,
}

/// A combination plus the advisory existence flag of its first candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationReport {
    pub combination: Combination,
    pub exists: bool,
}

/// Compute the target folder, file, and ordered candidate paths for a
/// selection. Pure function, no I/O.
pub fn generate_path(
    selection: &Selection,
    deploy: &DeployContext,
) -> Result<PathInfo, ResolveError> {
    let level_pattern = selection.level.file_pattern();

    let (target_folder, target_file) = match selection.view {
        View::Combined => (
            COMBINED_TRADITION_FOLDER.to_string(),
            genre_tree_file(level_pattern, selection.feature),
        ),
        View::Tradition => {
            let tradition = require(selection.tradition.as_deref(), View::Tradition, "tradition")?;
            (
                format!("tradition_segmented/genre/{}/", tradition),
                genre_tree_file(level_pattern, selection.feature),
            )
        }
        View::Genre => {
            let genre = require(selection.genre.as_deref(), View::Genre, "genre")?;
            let tradition = require(selection.tradition.as_deref(), View::Genre, "tradition")?;
            // The genre view keeps its own level-to-folder mapping, distinct
            // from the file-pattern mapping used by the other views.
            let level_folder = selection.level.genre_folder();
            (
                format!("genre_segmented/{}/{}/{}/", level_folder, tradition, genre),
                format!(
                    "{}_{}_phylogenetic_tree.json",
                    level_folder,
                    selection.feature.as_str()
                ),
            )
        }
        View::Traditions => (String::new(), TRADITIONS_TREE_FILE.to_string()),
    };

    let base_paths = deploy.base_paths();
    let full_paths = base_paths
        .iter()
        .map(|base| format!("{}{}{}", base, target_folder, target_file))
        .collect();

    Ok(PathInfo {
        selection: selection.clone(),
        target_folder,
        target_file,
        level_pattern: level_pattern.to_string(),
        base_paths,
        full_paths,
    })
}

fn genre_tree_file(level_pattern: &str, feature: Feature) -> String {
    format!("genre_tree_{}_{}.json", level_pattern, feature.as_str())
}

fn require<'a>(
    value: Option<&'a str>,
    view: View,
    field: &'static str,
) -> Result<&'a str, ResolveError> {
    value.ok_or(ResolveError::MissingParameter { view, field })
}

/// Probe candidate paths in order and return the first that exists.
///
/// Candidates are tried strictly sequentially; a later candidate is never
/// probed once an earlier one succeeds. Fails with `NotFound` after
/// exhausting the list.
pub async fn resolve_existing_path(
    fetcher: &dyn TreeFetcher,
    selection: &Selection,
    deploy: &DeployContext,
) -> Result<ResolvedPath, ResolveError> {
    let path_info = generate_path(selection, deploy)?;
    debug!(
        view = %selection.view,
        candidates = path_info.full_paths.len(),
        "probing candidate paths"
    );

    for candidate in &path_info.full_paths {
        debug!(path = candidate.as_str(), "trying candidate path");
        if fetcher.exists(candidate).await {
            info!(path = candidate.as_str(), "resolved tree file path");
            return Ok(ResolvedPath {
                working_path: candidate.clone(),
                path_info,
            });
        }
    }

    Err(ResolveError::NotFound {
        view: selection.view,
    })
}

/// Resolve a path and fetch the tree document behind it.
///
/// A fetch failure after a successful probe is reported as `FetchFailed`,
/// never `NotFound`, so callers can tell "file doesn't exist" apart from
/// "file existed but became unreadable". Probe and fetch are two requests,
/// so a stale resolution in between is a known, accepted race window.
pub async fn load_tree_data(
    fetcher: &dyn TreeFetcher,
    selection: &Selection,
    deploy: &DeployContext,
) -> Result<(ResolvedPath, Value), ResolveError> {
    let resolved = resolve_existing_path(fetcher, selection, deploy).await?;
    let data = fetcher
        .fetch_json(&resolved.working_path)
        .await
        .map_err(|err| match err {
            ResolveError::FetchFailed { .. } => err,
            other => ResolveError::FetchFailed {
                path: resolved.working_path.clone(),
                reason: other.to_string(),
            },
        })?;
    Ok((resolved, data))
}

/// Enumerate path info for every feature/level combination of a base
/// selection. Deterministic feature-major order, 12 entries, no I/O.
pub fn enumerate_combinations(
    base: &Selection,
    deploy: &DeployContext,
) -> Result<Vec<Combination>, ResolveError> {
    let mut combinations = Vec::with_capacity(Feature::ALL.len() * Level::ALL.len());
    for feature in Feature::ALL {
        for level in Level::ALL {
            let mut selection = base.clone();
            selection.feature = feature;
            selection.level = level;
            combinations.push(Combination {
                feature,
                level,
                path_info: generate_path(&selection, deploy)?,
            });
        }
    }
    Ok(combinations)
}

/// Probe the first candidate of every combination and record existence
/// flags. Diagnostic use only; the full fallback list is not consulted.
pub async fn verify_all_combinations(
    fetcher: &dyn TreeFetcher,
    base: &Selection,
    deploy: &DeployContext,
) -> Result<Vec<CombinationReport>, ResolveError> {
    let combinations = enumerate_combinations(base, deploy)?;
    let mut reports = Vec::with_capacity(combinations.len());
    for combination in combinations {
        let exists = match combination.path_info.full_paths.first() {
            Some(path) => fetcher.exists(path).await,
            None => false,
        };
        reports.push(CombinationReport { combination, exists });
    }
    Ok(reports)
}

/// Render a plain-text diagnostic report of the derived path info.
pub fn debug_report(path_info: &PathInfo) -> String {
    let selection = &path_info.selection;
    let mut report = String::new();
    report.push_str("===== TREE PATH REPORT =====\n");
    report.push_str(&format!("View: {}\n", selection.view));
    if let Some(tradition) = &selection.tradition {
        report.push_str(&format!("Tradition: {}\n", tradition));
    }
    if let Some(genre) = &selection.genre {
        report.push_str(&format!("Genre: {}\n", genre));
    }
    report.push_str(&format!(
        "Feature: {} ({})\n",
        selection.feature,
        selection.feature.display_label()
    ));
    report.push_str(&format!(
        "Level: {} ({})\n",
        selection.level,
        selection.level.display_label()
    ));
    report.push('\n');
    report.push_str(&format!("Target folder: {}\n", path_info.target_folder));
    report.push_str(&format!("Target file: {}\n", path_info.target_file));
    report.push('\n');
    report.push_str("Candidate paths, in probe order:\n");
    for path in &path_info.full_paths {
        report.push_str(&format!("- {}\n", path));
    }
    report.push_str("============================");
    report
}
