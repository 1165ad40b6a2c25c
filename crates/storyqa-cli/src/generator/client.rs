//! Client for the external test-generation service

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::time::Duration;
use storyqa_core::models::{GeneratorConfig, TestCase};

pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);
const GENERATE_PATH: &str = "/v1/generate-tests";

/// Why delegated generation produced nothing usable
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed generation response: {0}")]
    Malformed(String),

    #[error("Generation service returned no test cases")]
    Empty,
}

/// Source of test cases other than the local fallback.
#[async_trait]
pub trait TestGenerator: Send + Sync {
    async fn generate(
        &self,
        summary: &str,
        ac_text: &str,
    ) -> Result<Vec<TestCase>, GenerationError>;
}

pub struct GenerationClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GenerationClient {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let http = Client::builder().timeout(GENERATION_TIMEOUT).build()?;
        let base_url = config.base_url.trim_end_matches('/');
        Ok(Self {
            http,
            endpoint: format!("{}{}", base_url, GENERATE_PATH),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TestGenerator for GenerationClient {
    async fn generate(
        &self,
        summary: &str,
        ac_text: &str,
    ) -> Result<Vec<TestCase>, GenerationError> {
        tracing::debug!("POST {}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&json!({
                "prompt": build_prompt(summary, ac_text),
                "format": "json",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?;
        parse_generated(value)
    }
}

pub fn build_prompt(summary: &str, ac_text: &str) -> String {
    format!(
        "You are a QA architect. Generate concise functional test cases from this Jira story.\n\
         \n\
         Summary: {summary}\n\
         \n\
         Acceptance Criteria:\n\
         {ac_text}\n\
         \n\
         If AC is missing, infer a baseline happy path.\n\
         \n\
         Return JSON list where each item = {{\n  \
         \"title\": str,\n  \
         \"preconditions\": str,\n  \
         \"steps\": [str],\n  \
         \"expected\": [str]\n\
         }}."
    )
}

/// Accept either a bare list of test cases or `{"tests": [...]}`.
pub fn parse_generated(value: Value) -> Result<Vec<TestCase>, GenerationError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tests") {
            Some(Value::Array(items)) => items,
            _ => return Err(malformed("object without a 'tests' list")),
        },
        other => {
            let kind = json_kind(&other);
            return Err(malformed(format!("expected a list, got {}", kind)));
        }
    };

    let tests = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_item(i + 1, item))
        .collect::<Result<Vec<_>, _>>()?;

    if tests.is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(tests)
}

fn parse_item(number: usize, item: &Value) -> Result<TestCase, GenerationError> {
    let Some(obj) = item.as_object() else {
        let kind = json_kind(item);
        return Err(malformed(format!("test case {} is {}", number, kind)));
    };

    let Some(title) = obj.get("title").and_then(Value::as_str) else {
        return Err(malformed(format!("test case {} has no title", number)));
    };

    let preconditions = obj.get("preconditions").and_then(scalar_text);

    Ok(TestCase::new(
        title,
        preconditions,
        text_list(obj.get("steps")),
        text_list(obj.get("expected")),
    ))
}

fn malformed(reason: impl Into<String>) -> GenerationError {
    GenerationError::Malformed(reason.into())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
