//! Inference gateway over the Anthropic Messages API

use super::protocol::{ErrorResponse, Message, MessagesRequest, MessagesResponse};
use crate::config::{FileModelsConfig, FileProviderConfig};
use async_trait::async_trait;
use buildpath_application::ports::inference::{GatewayError, InferenceGateway};
use buildpath_domain::{InferenceRequest, ModelTier};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Sends each agent turn as a single-message conversation whose system
/// prompt is the flattened [`InferenceRequest::system_prompt`].
pub struct AnthropicGateway {
    http: Client,
    api_key: String,
    base_url: String,
    api_version: String,
    max_tokens: u32,
    models: FileModelsConfig,
}

impl AnthropicGateway {
    /// Build from configuration. Fails when no API key can be found.
    pub fn new(provider: &FileProviderConfig, models: FileModelsConfig) -> Result<Self, GatewayError> {
        let api_key = provider.resolve_api_key().ok_or_else(|| {
            GatewayError::AuthenticationFailed(format!(
                "no API key (set {} or provider.api_key)",
                provider.api_key_env
            ))
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;

        info!(
            "AnthropicGateway initialized (premium={}, standard={})",
            models.premium, models.standard
        );

        Ok(Self {
            http,
            api_key,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_version: provider.api_version.clone(),
            max_tokens: provider.max_tokens,
            models,
        })
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        self.models.model_for(tier)
    }

    fn build_request(&self, request: &InferenceRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model_for(request.tier).to_string(),
            max_tokens: self.max_tokens,
            system: Some(request.system_prompt()),
            messages: vec![Message::user(request.user_message.clone())],
        }
    }
}

#[async_trait]
impl InferenceGateway for AnthropicGateway {
    async fn invoke(&self, request: &InferenceRequest) -> Result<String, GatewayError> {
        let body = self.build_request(request);
        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {} model={} agent={}", url, body.model, request.agent);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_status(status, &text, &body.model));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse response: {e}")))?;
        debug!("{} stop_reason={:?}", request.agent, parsed.stop_reason);

        parsed
            .text()
            .ok_or_else(|| GatewayError::InvalidResponse("response had no text content".to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

fn map_status(status: StatusCode, body: &str, model: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| format!("{}: {}", e.error.kind, e.error.message))
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthenticationFailed(message)
        }
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(format!("{model}: {message}")),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("status {}: {}", status.as_u16(), message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> FileProviderConfig {
        FileProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        }
    }

    fn request(tier: ModelTier) -> InferenceRequest {
        InferenceRequest {
            agent: "planner".to_string(),
            tier,
            role_instructions: "Plan.".to_string(),
            steering_directive: None,
            standards_preamble: "Standards.".to_string(),
            learner_context: "BUILDER: Ada".to_string(),
            auxiliary_context: None,
            user_message: "What next?".to_string(),
        }
    }

    #[test]
    fn test_missing_key_fails_construction() {
        let provider = FileProviderConfig {
            api_key: None,
            api_key_env: "BUILDPATH_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        let result = AnthropicGateway::new(&provider, FileModelsConfig::default());
        assert!(matches!(result, Err(GatewayError::AuthenticationFailed(_))));
    }

    #[test]
    fn test_tier_selects_model() {
        let gateway = AnthropicGateway::new(&provider(), FileModelsConfig::default()).unwrap();
        assert_eq!(gateway.base_url, "http://localhost:8080");

        let premium = gateway.build_request(&request(ModelTier::Premium));
        let standard = gateway.build_request(&request(ModelTier::Standard));
        assert_eq!(premium.model, FileModelsConfig::default().premium);
        assert_eq!(standard.model, FileModelsConfig::default().standard);
        assert_eq!(premium.messages[0].content, "What next?");
        assert!(premium.system.unwrap().contains("BUILDER: Ada"));
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"bad key"}}"#;
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, body, "m"),
            GatewayError::AuthenticationFailed(msg) if msg.contains("bad key")
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "nope", "m"),
            GatewayError::ModelNotAvailable(_)
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, "slow down", "m"),
            GatewayError::RequestFailed(msg) if msg.contains("429")
        ));
    }
}
