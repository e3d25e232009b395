//! Inference gateway port
//!
//! Defines the interface for asking a language model for text. The core
//! treats inference as opaque: a request goes in, text comes out.

use async_trait::async_trait;
use buildpath_domain::InferenceRequest;
use thiserror::Error;

/// Errors that can occur while invoking a model
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for model inference
///
/// Implementations (adapters) live in the infrastructure layer and map the
/// request's tier onto a concrete model. Retry policy, if any, belongs to
/// the adapter; the core never retries.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Send one agent turn and return the model's text
    async fn invoke(&self, request: &InferenceRequest) -> Result<String, GatewayError>;
}

/// Gateway used when no provider could be configured; every call fails
/// with the stored reason.
pub struct UnavailableGateway {
    reason: String,
}

impl UnavailableGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl InferenceGateway for UnavailableGateway {
    async fn invoke(&self, _request: &InferenceRequest) -> Result<String, GatewayError> {
        Err(GatewayError::AuthenticationFailed(self.reason.clone()))
    }
}
