use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use doclens_core::{AgentRequest, AgentRunner, ExtractError};

/// OpenAI-compatible vision agent runner.
///
/// Sends the instruction brief and the inline image to a chat-completions
/// endpoint and constrains the response with a strict JSON Schema
/// (`response_format: json_schema`), so the returned content is the field
/// object itself.
pub struct OpenAiVisionRunner {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVisionRunner {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl AgentRunner for OpenAiVisionRunner {
    fn name(&self) -> &str {
        "openai"
    }

    async fn extract(&self, request: &AgentRequest) -> Result<Value, ExtractError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system",
                  "content": format!("{}\n\n{}", request.agent_name, request.directive) },
                { "role": "user", "content": [
                    { "type": "text", "text": request.instructions },
                    { "type": "image_url",
                      "image_url": { "url": request.image_data_url } }
                ]}
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.contract_name,
                    "schema": request.output_contract,
                    "strict": true
                }
            },
            "max_tokens": 1024
        });

        debug!(model = %self.model, contract = %request.contract_name, "sending extraction request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::Agent(format!("extraction request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Agent(format!(
                "extraction provider returned {status}: {error_body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Agent(format!("malformed provider response: {e}")))?;

        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| ExtractError::Agent("provider response had no content".to_string()))?;

        serde_json::from_str(content)
            .map_err(|e| ExtractError::Agent(format!("provider content was not valid JSON: {e}")))
    }
}
