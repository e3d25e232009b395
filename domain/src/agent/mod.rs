//! Agents: role identity, the agent entity and the requests it builds.

pub mod entities;
pub mod request;
pub mod role;

pub use entities::Agent;
pub use request::InferenceRequest;
pub use role::{AgentRole, PrimaryRole};
