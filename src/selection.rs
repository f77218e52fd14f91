//! Filter selection model: view, feature, and level enums plus display labels.
//!
//! The wire tokens (`chromatic_rhythmic`, `shared_segments`, ...) match the
//! filenames produced by the offline data-preparation pipeline and must not
//! change independently of it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tree scope to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "snake_case")]
pub enum View {
    /// Top-level overview of all traditions
    Traditions,
    /// All traditions' genres combined into one tree
    Combined,
    /// A single tradition's genres
    Tradition,
    /// A single genre's pieces
    Genre,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Traditions => "traditions",
            View::Combined => "combined",
            View::Tradition => "tradition",
            View::Genre => "genre",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The musical dimension analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Feature {
    Chromatic,
    Rhythmic,
    ChromaticRhythmic,
}

impl Feature {
    /// Enumeration order used by combination reports.
    pub const ALL: [Feature; 3] = [Feature::Chromatic, Feature::Rhythmic, Feature::ChromaticRhythmic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Chromatic => "chromatic",
            Feature::Rhythmic => "rhythmic",
            Feature::ChromaticRhythmic => "chromatic_rhythmic",
        }
    }

    /// Human-readable label for diagnostic output.
    pub fn display_label(&self) -> &'static str {
        match self {
            Feature::Chromatic => "Chromatic",
            Feature::Rhythmic => "Rhythmic",
            Feature::ChromaticRhythmic => "Chromatic & Rhythmic",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granularity of the similarity analysis represented in a tree.
///
/// Unrecognized wire tokens deserialize to `Combined`, which mirrors the
/// default branch of the level-to-pattern mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "snake_case")]
pub enum Level {
    Note,
    Segment,
    Structure,
    Combined,
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(match token.as_str() {
            "note" => Level::Note,
            "segment" => Level::Segment,
            "structure" => Level::Structure,
            // combined and anything unrecognized
            _ => Level::Combined,
        })
    }
}

impl Level {
    /// Enumeration order used by combination reports.
    pub const ALL: [Level; 4] = [Level::Note, Level::Segment, Level::Structure, Level::Combined];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Note => "note",
            Level::Segment => "segment",
            Level::Structure => "structure",
            Level::Combined => "combined",
        }
    }

    /// File-pattern token used by the combined and tradition views.
    pub fn file_pattern(&self) -> &'static str {
        match self {
            Level::Note => "note",
            Level::Segment => "shared_segments",
            Level::Structure => "structure",
            Level::Combined => "combined_s75_ss25",
        }
    }

    /// Folder segment used by the genre view.
    ///
    /// This mapping is intentionally distinct from [`Level::file_pattern`];
    /// the genre-view data layout on disk predates the shared file pattern
    /// and both must keep resolving to the files the pipeline actually
    /// writes.
    pub fn genre_folder(&self) -> &'static str {
        match self {
            Level::Note => "note_level",
            Level::Segment => "shared_segments",
            Level::Structure => "structure_level",
            Level::Combined => "combined",
        }
    }

    /// Human-readable label for diagnostic output.
    pub fn display_label(&self) -> &'static str {
        match self {
            Level::Note => "Note Level",
            Level::Segment => "Shared Phrases (S)",
            Level::Structure => "Form (F)",
            Level::Combined => "Combined",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete filter selection as chosen in the viewer.
///
/// `tradition` is required for the tradition and genre views; `genre` is
/// required for the genre view. The resolver enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub view: View,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub feature: Feature,
    pub level: Level,
}

impl Selection {
    pub fn new(view: View, feature: Feature, level: Level) -> Self {
        Self {
            view,
            tradition: None,
            genre: None,
            feature,
            level,
        }
    }

    pub fn with_tradition(mut self, tradition: impl Into<String>) -> Self {
        self.tradition = Some(tradition.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
