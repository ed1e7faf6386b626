//! Ollama-style chat endpoint: POST `{base}/api/chat` with
//! `{model, messages, stream: false}`, reply text at `message.content`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::inference::InferenceConfig;
use crate::inference::{InferenceClient, InferenceError};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct OllamaClient {
    http: reqwest::Client,
    config: InferenceConfig,
}

impl OllamaClient {
    pub fn new(http: reqwest::Client, config: InferenceConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait::async_trait]
impl InferenceClient for OllamaClient {
    async fn chat(&self, prompt: &str) -> Result<String, InferenceError> {
        let url = format!("{}/api/chat", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        debug!(model = %self.config.model, "submitting chat request");

        let resp = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(InferenceError::Transport(format!(
                "inference service returned {}",
                resp.status()
            )));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::Malformed(e.to_string()))?;

        Ok(body.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_matches_wire_contract() {
        let request = ChatRequest {
            model: "llama3.2:1b",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3.2:1b",
                "messages": [{"role": "user", "content": "hello"}],
                "stream": false
            })
        );
    }

    #[test]
    fn chat_response_reads_message_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"model":"llama3.2:1b","message":{"role":"assistant","content":"Day 1: arrive."},"done":true}"#,
        )
        .unwrap();
        assert_eq!(body.message.content, "Day 1: arrive.");
    }
}
