//! In-memory `TextGenerator` for tests. Records every prompt it receives.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{LlmError, TextGenerator};

pub enum StubReply {
    Envelope(Value),
    ApiError { status: u16, body: String },
    MissingKey,
}

pub struct StubGenerator {
    reply: StubReply,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replies with a Gemini-shaped envelope whose text part is `text`.
    pub fn with_text(text: &str) -> Self {
        Self::new(StubReply::Envelope(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" }
            }]
        })))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            StubReply::Envelope(v) => Ok(v.clone()),
            StubReply::ApiError { status, body } => Err(LlmError::Api {
                status: *status,
                body: body.clone(),
            }),
            StubReply::MissingKey => Err(LlmError::MissingApiKey),
        }
    }
}
