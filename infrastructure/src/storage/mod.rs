//! Durable learner state.

mod json_store;

pub use json_store::JsonLearnerStore;
