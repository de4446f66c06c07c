use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use doclens_core::{AgentRequest, AgentRunner, ExtractError};

/// A mock agent runner that returns canned field objects, keyed by the
/// request's contract name. Used in tests and offline runs.
#[derive(Default)]
pub struct MockAgentRunner {
    responses: HashMap<String, Value>,
    fail_with: Option<String>,
}

impl MockAgentRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned response for the given contract name.
    pub fn with_response(mut self, contract_name: impl Into<String>, value: Value) -> Self {
        self.responses.insert(contract_name.into(), value);
        self
    }

    /// A runner whose every call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: HashMap::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl AgentRunner for MockAgentRunner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, request: &AgentRequest) -> Result<Value, ExtractError> {
        if let Some(message) = &self.fail_with {
            return Err(ExtractError::Agent(message.clone()));
        }
        self.responses
            .get(&request.contract_name)
            .cloned()
            .ok_or_else(|| {
                ExtractError::Agent(format!(
                    "no canned response for contract {:?}",
                    request.contract_name
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(contract: &str) -> AgentRequest {
        AgentRequest {
            agent_name: "Test Extractor".into(),
            contract_name: contract.into(),
            instructions: "extract".into(),
            directive: "structured data only".into(),
            output_contract: json!({ "type": "object" }),
            image_data_url: "data:image/png;base64,AAAA".into(),
        }
    }

    #[tokio::test]
    async fn returns_canned_response_by_contract() {
        let runner = MockAgentRunner::new().with_response("pan_card", json!({ "name": "A" }));
        let value = runner.extract(&request("pan_card")).await.unwrap();
        assert_eq!(value["name"], "A");
    }

    #[tokio::test]
    async fn failing_runner_surfaces_agent_error() {
        let runner = MockAgentRunner::failing("provider down");
        let err = runner.extract(&request("pan_card")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Agent(m) if m == "provider down"));
    }
}
