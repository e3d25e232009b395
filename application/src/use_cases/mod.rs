//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod coaching;
pub mod orchestrator;
pub mod roster;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
