//! Project inspection adapter.

mod inspector;

pub use inspector::LocalProjectInspector;
