//! TOML curriculum catalogue loading

use buildpath_domain::{Catalogue, DomainError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// The built-in build path
const DEFAULT_CATALOGUE: &str = include_str!("../../catalogue/default.toml");

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Could not read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalogue: {0}")]
    Invalid(#[from] DomainError),
}

/// Reads `[[unit]]` tables into a validated [`Catalogue`].
pub struct CatalogueLoader;

impl CatalogueLoader {
    /// Load from `path` when given, otherwise the built-in catalogue
    pub fn load(path: Option<&Path>) -> Result<Catalogue, CatalogueError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Catalogue, CatalogueError> {
        Self::from_toml_str(DEFAULT_CATALOGUE)
    }

    pub fn from_path(path: &Path) -> Result<Catalogue, CatalogueError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalogue = Self::from_toml_str(&content)?;
        info!(
            "Loaded {} unit(s) from {}",
            catalogue.len(),
            path.display()
        );
        Ok(catalogue)
    }

    pub fn from_toml_str(content: &str) -> Result<Catalogue, CatalogueError> {
        let catalogue: Catalogue = toml::from_str(content)?;
        catalogue.validate()?;
        Ok(catalogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let catalogue = CatalogueLoader::builtin().unwrap();
        assert_eq!(catalogue.len(), 14);

        let first = catalogue.first().unwrap();
        assert_eq!(first.id, "01_cli_file_processor");
        assert!(!first.requirements.is_empty());
        assert!(!first.skills.is_empty());
        let capstone = catalogue.resolve("14").unwrap();
        assert_eq!(capstone.id, "14_capstone_adaptive_learning_platform");
        assert!(capstone.goal.contains("\nTHE LOOP:\n"));
        assert!(catalogue.units().iter().all(|u| !u.goal.is_empty()));
    }

    #[test]
    fn test_custom_catalogue_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.toml");
        std::fs::write(
            &path,
            r#"
[[unit]]
id = "a"
name = "First"
goal = "Ship a"

[[unit]]
id = "b"
name = "Second"
goal = "Ship b"
requirements = ["Has tests"]
"#,
        )
        .unwrap();

        let catalogue = CatalogueLoader::load(Some(&path)).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.next_after("a").unwrap().id, "b");
        assert!(catalogue.get("a").unwrap().requirements.is_empty());
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let dup = r#"
[[unit]]
id = "a"
name = "A"
goal = "x"

[[unit]]
id = "a"
name = "A again"
goal = "y"
"#;
        assert!(matches!(
            CatalogueLoader::from_toml_str(dup),
            Err(CatalogueError::Invalid(DomainError::DuplicateUnit(_)))
        ));
        assert!(matches!(
            CatalogueLoader::from_toml_str("unit = []"),
            Err(CatalogueError::Invalid(DomainError::EmptyCatalogue))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogueLoader::from_path(Path::new("/nonexistent/units.toml")).unwrap_err();
        assert!(matches!(err, CatalogueError::Io { .. }));
    }
}
