//! Tunetree: path resolution and normalization for music-tradition phylogeny data.
//!
//! Given a filter selection (view, tradition, genre, feature, level), the
//! resolver computes an ordered list of candidate locations for the matching
//! tree JSON file and probes them until one answers. The normalizer takes a
//! fetched raw tree and propagates inherited classification fields down to
//! children while deriving human-readable display names from score filenames.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod resolver;
pub mod selection;
pub mod tree;
