//! Curriculum catalogue loading, with the default build path embedded.

mod loader;

pub use loader::{CatalogueError, CatalogueLoader};
