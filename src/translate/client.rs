use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::retry::{RetryMachine, RetryPolicy, Step};
use crate::config::Config;
use crate::error::{ProcessError, Result};

/// Client for an OpenAI-compatible chat-completion endpoint, used purely for
/// translation. One `reqwest::Client` is shared across calls for connection
/// reuse; the client itself holds no per-call state.
pub struct TranslationClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    policy: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl TranslationClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rules = &config.rules.translation_rules;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(rules.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: rules.model.clone(),
            temperature: rules.temperature,
            policy: RetryPolicy {
                max_attempts: rules.max_attempts,
                ..RetryPolicy::default()
            },
        })
    }

    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        if self.endpoint.trim().is_empty() {
            return Err(ProcessError::Config(
                "TRANSLATION_API_ENDPOINT is not set".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ProcessError::Config("OPENAI_API_KEY is not set".to_string()));
        }

        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: format!(
                        "You are a translator. Translate the following text from {source_lang} to {target_lang}."
                    ),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        let mut machine = RetryMachine::new(self.policy.clone());
        loop {
            let attempt = machine.begin_attempt();
            debug!(endpoint = %self.endpoint, attempt, "sending translation request");

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await;

            match response {
                Ok(response) => {
                    let status = response.status().as_u16();
                    debug!(status, attempt, "translation response received");
                    match machine.on_status(status) {
                        Step::Deliver => return unwrap_translation(response).await,
                        Step::Backoff(delay) => {
                            warn!(status, attempt, ?delay, "transient translation failure, retrying");
                            tokio::time::sleep(delay).await;
                        }
                        Step::GiveUp => {
                            return Err(ProcessError::Upstream(format!(
                                "translation request failed with status {status}"
                            )));
                        }
                    }
                }
                Err(e) => match machine.on_transport_error() {
                    Step::Backoff(delay) => {
                        warn!(error = %e, attempt, ?delay, "translation request failed, retrying");
                        tokio::time::sleep(delay).await;
                    }
                    _ => {
                        return Err(ProcessError::Transport {
                            attempts: machine.attempts_used(),
                            source: e,
                        });
                    }
                },
            }
        }
    }
}

/// Pull `choices[0].message.content` out of a 200 response. The text is
/// returned exactly as the API produced it.
async fn unwrap_translation(response: reqwest::Response) -> Result<String> {
    let body: ChatResponse = response
        .json()
        .await
        .map_err(|e| ProcessError::Upstream(format!("malformed translation response: {e}")))?;

    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            ProcessError::Upstream(
                "translation response missing choices[0].message.content".to_string(),
            )
        })
}
