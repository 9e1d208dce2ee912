//! Configuration file support.
//!
//! Loads `pyjs.toml` from the path given with `--config`, or from the
//! working directory when present. Example:
//! ```toml
//! [transpile]
//! indent_width = 2
//! adapter_dir = "./lib/not_python"
//! keyword_arguments = "drop"
//! ```

use anyhow::{Context, Result};
use pyjs::TranspileOptions;
use serde::Deserialize;
use std::path::Path;

pub const FILE_NAME: &str = "pyjs.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PyjsConfig {
    pub transpile: TranspileOptions,
}

impl PyjsConfig {
    /// Load `explicit` if given, else `root/pyjs.toml` if it exists, else
    /// defaults. An explicit path that cannot be read is an error.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let implicit = root.join(FILE_NAME);
        if implicit.is_file() {
            Self::load_file(&implicit)
        } else {
            Ok(Self::default())
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }
}
