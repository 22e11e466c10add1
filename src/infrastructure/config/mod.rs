use serde::Deserialize;
use std::env;

use crate::domain::ideas::ResponseFormat;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    /// Unset means the in-memory store is used
    pub database_url: Option<String>,
    // Gemini
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub gemini_max_output_tokens: u32,
    pub gemini_temperature: f32,
    pub gemini_top_p: Option<f32>,
    pub gemini_timeout_secs: u64,
    // Generation
    pub idea_batch_size: usize,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty()),
            gemini_api_key: env::var("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_max_output_tokens: env::var("GEMINI_MAX_OUTPUT_TOKENS")
                .unwrap_or_else(|_| "750".to_string())
                .parse()?,
            gemini_temperature: env::var("GEMINI_TEMPERATURE")
                .unwrap_or_else(|_| "0.8".to_string())
                .parse()?,
            gemini_top_p: match env::var("GEMINI_TOP_P") {
                Ok(value) if value.eq_ignore_ascii_case("none") => None,
                Ok(value) => Some(value.parse()?),
                Err(_) => Some(0.95),
            },
            gemini_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()?
                .max(1),
            idea_batch_size: env::var("IDEA_BATCH_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()?
                .max(1),
            response_format: env::var("RESPONSE_FORMAT")
                .unwrap_or_else(|_| "json".to_string())
                .parse::<String>()
                .map(|s| match s.to_lowercase().as_str() {
                    "lines" => ResponseFormat::Lines,
                    _ => ResponseFormat::Json,
                })?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
