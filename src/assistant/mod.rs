//! Anthropic Messages API client and the four coaching operations built on it.
//!
//! Every operation degrades to `None` when the model cannot be reached; the
//! caller decides whether that means a fallback or a 503.

pub mod prompts;
pub mod review;

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::AppError;
use crate::metrics::RequestMetrics;
use crate::riot::types::MatchDto;

pub use prompts::Prompt;
pub use review::{
    ChampionPreferences, GameState, MatchReview, PathingReview, Playstyle, TeamState,
};

const API_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unparseable response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response carried no text content")]
    EmptyContent,
}

pub struct AssistantClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    metrics: Arc<RequestMetrics>,
}

impl AssistantClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            metrics: RequestMetrics::new("assistant"),
        })
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round-trip to the messages endpoint, returning the first text block.
    pub async fn try_send(&self, prompt: &Prompt) -> Result<String, AssistantError> {
        self.metrics.inc();

        let body = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &prompt.system,
            messages: [ApiMessage {
                role: "user",
                content: &prompt.user,
            }],
        };

        let response = self
            .http
            .post(format!("{}{}", self.base_url, MESSAGES_PATH))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }

    /// [`AssistantClient::try_send`] with failures logged and collapsed to `None`.
    pub async fn send(&self, prompt: &Prompt) -> Option<String> {
        match self.try_send(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                self.metrics.record_failure();
                warn!("⚠️ [ASSISTANT] no insight generated: {}", e);
                None
            }
        }
    }

    pub async fn review_performance(
        &self,
        match_data: &MatchDto,
        puuid: &str,
    ) -> Result<Option<String>, AppError> {
        let review = MatchReview::from_match(match_data, puuid)?;
        Ok(self.send(&prompts::performance_review(&review)).await)
    }

    pub async fn realtime_suggestions(&self, state: &GameState) -> Option<String> {
        self.send(&prompts::realtime_suggestions(state)).await
    }

    pub async fn recommend_champions(&self, prefs: &ChampionPreferences) -> Option<String> {
        self.send(&prompts::champion_recommendation(prefs)).await
    }

    pub async fn analyze_pathing(
        &self,
        match_data: &MatchDto,
        puuid: &str,
    ) -> Result<Option<String>, AppError> {
        let review = PathingReview::from_match(match_data, puuid)?;
        Ok(self.send(&prompts::pathing_analysis(&review)).await)
    }

    /// Minimal live request used by the health endpoint.
    pub async fn health_check(&self) -> Result<(), AssistantError> {
        let prompt = Prompt {
            system: "Reply with a single word.".to_string(),
            user: "ping".to_string(),
        };
        self.try_send(&prompt).await.map(|_| ())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ApiMessage<'a>; 1],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Unknown,
}

fn parse_response(json: &str) -> Result<String, AssistantError> {
    let api: ApiResponse = serde_json::from_str(json)?;

    api.content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unknown => None,
        })
        .ok_or(AssistantError::EmptyContent)
}
