//! Curriculum source (`[catalogue]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogueConfig {
    /// TOML catalogue replacing the built-in one
    pub path: Option<PathBuf>,
}
