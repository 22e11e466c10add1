use super::idea_oracle_repository::IdeaOracleRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 750,
            temperature: 0.8,
            top_p: Some(0.95),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Gemini `generateContent` implementation of the idea oracle
pub struct GeminiIdeaOracleRepository {
    http_client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    generation_config: GenerationConfig,
}

impl GeminiIdeaOracleRepository {
    /// `timeout` bounds a whole call, so a hung API cannot hold the generation lock forever
    pub fn new(
        api_base: String,
        model: String,
        api_key: String,
        generation_config: GenerationConfig,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_base,
            model,
            api_key,
            generation_config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.generation_config,
        }
    }
}

#[async_trait]
impl IdeaOracleRepository for GeminiIdeaOracleRepository {
    async fn complete(&self, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            max_output_tokens = self.generation_config.max_output_tokens,
            "Calling Gemini API"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    timed_out = e.is_timeout(),
                    model = %self.model,
                    "Gemini request failed"
                );
                format!("Gemini request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                body = %error_text,
                model = %self.model,
                "Gemini API returned an error status"
            );
            return Err(format!("Gemini API error: {}", status.as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse Gemini response: {}", e))?;

        let text = body
            .first_text()
            .ok_or_else(|| "Gemini response contained no candidate text".to_string())?;

        tracing::info!(
            provider = "gemini",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.len(),
            "Gemini completion received"
        );

        Ok(text)
    }
}
