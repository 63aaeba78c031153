//! Configuration for tw.
//!
//! An optional `.twig.yaml` at the repository root overrides the defaults.
//! Every field has a sensible default so the file is never required.

use crate::error::{Result, TwigError};
use serde::Deserialize;
use std::path::Path;

/// Environment variable selecting the external diff-presentation tool.
/// Takes precedence over the config file.
pub const DIFFTOOL_ENV: &str = "TWIG_DIFFTOOL";

/// Name of the optional per-repository config file.
pub const CONFIG_FILE: &str = ".twig.yaml";

/// Per-repository configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the remote all push/fetch/listing operations target.
    pub remote: String,

    /// Username used as the feature-branch namespace (`<username>/...`).
    /// Defaults to the `USER`/`USERNAME` environment variable.
    pub username: Option<String>,

    /// External diff tool passed to `git difftool -t`.
    pub difftool: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            username: None,
            difftool: None,
        }
    }
}

impl Config {
    /// Load the configuration from `<repo_root>/.twig.yaml`.
    ///
    /// A missing file yields the defaults; a malformed file is a user error
    /// rather than being silently ignored.
    pub fn load<P: AsRef<Path>>(repo_root: P) -> Result<Self> {
        let path = repo_root.as_ref().join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            TwigError::User(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            TwigError::User(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// The diff tool to use, if any: the `TWIG_DIFFTOOL` environment variable
    /// wins over the config file.
    pub fn difftool(&self) -> Option<String> {
        match std::env::var(DIFFTOOL_ENV) {
            Ok(tool) if !tool.is_empty() => Some(tool),
            _ => self.difftool.clone(),
        }
    }
}
