//! Configuration file loading for buildpath
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BUILDPATH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./buildpath.toml` or `./.buildpath.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/buildpath/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCatalogueConfig, FileCoachingConfig, FileConfig,
    FileLoggingConfig, FileModelsConfig, FileProjectConfig, FileProviderConfig,
    FileStorageConfig, SUPPORTED_PROVIDERS,
};
pub use loader::ConfigLoader;
