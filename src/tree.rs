//! Tree normalization: inherited-field propagation and display names.
//!
//! Raw trees come out of the offline pipeline with classification fields
//! (`genre`, `tradition`) set only where they change, and leaf names that
//! are score file names. Normalization fills the gaps so the rendering
//! layer can treat every node uniformly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Marker substring identifying score-file leaf names (Humdrum **kern).
pub const SCORE_FILE_MARKER: &str = ".krn";

/// One node of a (possibly nested) tree document.
///
/// Fields the normalizer does not interpret (branch lengths, support
/// values, layout hints) are kept in `extra` and round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Classification fields resolved so far on the path from the root.
#[derive(Debug, Clone, Default)]
struct Inherited {
    genre: Option<String>,
    tradition: Option<String>,
}

/// Produce a normalized copy of a raw tree.
///
/// Pre-order depth-first walk over a deep copy of the input (the caller's
/// tree is never touched). Each node inherits `genre` and `tradition` from
/// its parent's already-resolved values where it lacks its own, so a
/// grandchild sees its parent's inherited value rather than reaching back
/// to the grandparent. Every node ends up with a `display_name`.
pub fn normalize(raw: &TreeNode) -> TreeNode {
    let mut tree = raw.clone();
    normalize_node(&mut tree, &Inherited::default());
    tree
}

fn normalize_node(node: &mut TreeNode, inherited: &Inherited) {
    if node.genre.is_none() {
        node.genre = inherited.genre.clone();
    }
    if node.tradition.is_none() {
        node.tradition = inherited.tradition.clone();
    }
    if node.display_name.is_none() {
        node.display_name = Some(derive_display_name(&node.name));
    }

    // Children inherit this node's resolved values, not the raw input.
    let next = Inherited {
        genre: node.genre.clone(),
        tradition: node.tradition.clone(),
    };
    if let Some(children) = node.children.as_mut() {
        for child in children {
            normalize_node(child, &next);
        }
    }
}

/// Derive a presentable label from a raw node name.
///
/// Score file names follow `<index>_<genre>_<title words>.krn`; the title
/// starts at the third underscore-delimited segment. Names without the
/// score-file marker are used verbatim.
pub fn derive_display_name(name: &str) -> String {
    if !name.contains(SCORE_FILE_MARKER) {
        return name.to_string();
    }

    let parts: Vec<&str> = name.split('_').collect();
    if parts.len() >= 3 {
        let joined = parts[2..].join(" ");
        let stripped = joined.strip_suffix(SCORE_FILE_MARKER).unwrap_or(&joined);
        capitalize_first(&stripped.replace('_', " "))
    } else {
        name.strip_suffix(SCORE_FILE_MARKER)
            .unwrap_or(name)
            .to_string()
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// One tradition record in the externally supplied registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradition {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Identifying info of the tradition owning a genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraditionRef {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Find the tradition a genre belongs to, matching case-insensitively
/// against the registry's (lowercase) genre lists.
///
/// Genre membership is assumed unique across the registry; this function
/// does not enforce that, so if the invariant is violated the first match
/// in iteration order wins.
pub fn lookup_tradition_for_genre(
    genre: &str,
    traditions: &HashMap<String, Tradition>,
) -> Option<TraditionRef> {
    if genre.is_empty() {
        return None;
    }

    let needle = genre.to_lowercase();
    traditions.iter().find_map(|(id, tradition)| {
        if tradition.genres.iter().any(|g| g == &needle) {
            Some(TraditionRef {
                id: id.clone(),
                name: tradition.name.clone(),
                color: tradition.color.clone(),
            })
        } else {
            None
        }
    })
}
