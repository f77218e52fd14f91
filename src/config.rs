//! Deployment context and layered configuration.
//!
//! The original viewer read the hostname and base URL from ambient browser
//! globals; here both are an explicitly injected [`DeployContext`] so the
//! resolver stays pure and testable. A small file/env-layered configuration
//! carries the context and logging settings for the diagnostic CLI.

use crate::error::ResolveError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hosts treated as local development; everything else is production.
const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Default configuration file name, looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "tunetree.toml";

/// Deployment context signal: where the viewer is being served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployContext {
    /// Host name the viewer is served from
    #[serde(default = "default_host")]
    pub host: String,

    /// Base URL prefix for production deployments (usually ends with `/`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_base_url() -> String {
    "/".to_string()
}

impl Default for DeployContext {
    fn default() -> Self {
        Self {
            host: default_host(),
            base_url: default_base_url(),
        }
    }
}

impl DeployContext {
    pub fn new(host: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            base_url: base_url.into(),
        }
    }

    pub fn is_production(&self) -> bool {
        !LOCAL_HOSTS.contains(&self.host.as_str())
    }

    /// Ordered base-path prefixes to probe, most specific first.
    ///
    /// Production builds serve preprocessed data either next to the bundle
    /// or under `dist/`; development runs out of the source tree where the
    /// data may sit beside or above the working directory. The order here
    /// defines probe order and is part of the observable contract.
    pub fn base_paths(&self) -> Vec<String> {
        if self.is_production() {
            vec![
                format!("{}preprocessed_data/", self.base_url),
                format!("{}dist/preprocessed_data/", self.base_url),
                self.base_url.clone(),
                format!("{}dist/", self.base_url),
            ]
        } else {
            vec![
                "./preprocessed_data/".to_string(),
                "../preprocessed_data/".to_string(),
                "preprocessed_data/".to_string(),
                "./".to_string(),
                "../".to_string(),
            ]
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TunetreeConfig {
    /// Deployment context used to pick the candidate base-path set
    #[serde(default)]
    pub deploy: DeployContext,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TunetreeConfig {
    /// Load configuration from an optional TOML file plus `TUNETREE_*`
    /// environment overrides.
    ///
    /// Precedence, lowest to highest: defaults, file, environment. When no
    /// explicit path is given, `tunetree.toml` in the working directory is
    /// used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ResolveError> {
        let mut builder = Config::builder();

        builder = match path {
            Some(path) => builder.add_source(File::with_name(&path.to_string_lossy()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder = builder.add_source(Environment::with_prefix("TUNETREE").separator("__"));

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
