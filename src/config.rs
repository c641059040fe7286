use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub riot_api_key: String,
    pub riot_timeout: Duration,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub assistant_api_key: String,
    pub assistant_base_url: String,
    pub assistant_model: String,
    pub default_region: String,
    pub default_user_riot_id: String,
    pub default_user_tag_line: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_PORT: u16 = 8000;
        const DEFAULT_RIOT_TIMEOUT_SECS: u64 = 30;
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
        const DEFAULT_ASSISTANT_BASE_URL: &str = "https://api.anthropic.com";
        const DEFAULT_ASSISTANT_MODEL: &str = "claude-3-5-sonnet-20241022";

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let assistant_api_key = env::var("ANTHROPIC_API_KEY")
            .or_else(|_| env::var("CLAUDE_API_KEY"))
            .map_err(|_| AppError::Config("ANTHROPIC_API_KEY must be set".into()))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:jungle_assistant.db?mode=rwc".into());

        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.into()),
        );

        let riot_timeout = Duration::from_secs(
            env::var("RIOT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RIOT_TIMEOUT_SECS),
        );

        let riot_rate_limit_per_second = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let assistant_base_url = env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ASSISTANT_BASE_URL.into());

        let assistant_model =
            env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_ASSISTANT_MODEL.into());

        let default_region = env::var("DEFAULT_REGION").unwrap_or_else(|_| "las".into());

        let default_user_riot_id =
            env::var("DEFAULT_USER_RIOT_ID").unwrap_or_else(|_| "Not Alet".into());
        let default_user_tag_line =
            env::var("DEFAULT_USER_TAG_LINE").unwrap_or_else(|_| "JCP".into());

        Ok(Self {
            host,
            port,
            database_url,
            allowed_origins,
            riot_api_key,
            riot_timeout,
            riot_rate_limit_per_second,
            assistant_api_key,
            assistant_base_url,
            assistant_model,
            default_region,
            default_user_riot_id,
            default_user_tag_line,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
