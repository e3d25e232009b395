//! Anthropic Messages API adapter.
//!
//! [`AnthropicGateway`] implements the
//! [`InferenceGateway`](buildpath_application::InferenceGateway) port,
//! mapping each model tier to the model named in `[models]`.

pub mod gateway;
pub mod protocol;

pub use gateway::AnthropicGateway;
