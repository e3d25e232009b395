//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: &[&str] = &["buildpath.toml", ".buildpath.toml"];
const ENV_PREFIX: &str = "BUILDPATH_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `BUILDPATH_*` environment variables (`BUILDPATH_COACHING__ENABLED=false`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./buildpath.toml` or `./.buildpath.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/buildpath/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/buildpath/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("buildpath").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{mark:^7}] Explicit: {}", path.display()));
        }
        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [ FOUND ] Project: {}", path.display())),
            None => lines.push("  [       ] Project: ./buildpath.toml or ./.buildpath.toml".to_string()),
        }
        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { " FOUND " } else { "       " };
            lines.push(format!("  [{mark}] Global:  {}", path.display()));
        }
        lines.push("  [       ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.coaching.enabled);
        assert_eq!(config.project.max_tree_depth, 3);
    }

    #[test]
    fn test_global_config_path_names_buildpath() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("buildpath"));
        }
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[coaching]\nauto_interval = 7\n\n[models]\nstandard = \"fast\"").unwrap();

        let config = ConfigLoader::load(Some(file.path())).unwrap();
        assert_eq!(config.coaching.auto_interval, 7);
        assert_eq!(config.models.standard, "fast");
        assert_eq!(config.coaching.history_capacity, 5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[coaching]\nauto_interval = \"often\"").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }
}
