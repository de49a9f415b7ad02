//! Servicio de completado sobre la API REST de Google Gemini
//! (`models/{model}:generateContent`).
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CompletionConfig;
use crate::errors::{CoreError, ProviderError};
use crate::providers::completion::{extract_json_object, CompletionProvider, CompletionRequest};

pub struct GeminiCompletionProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GeminiCompletionProvider {
    /// # Errores
    /// `CoreError::Config` sin API key; `CoreError::Http` si el cliente no se
    /// puede construir.
    pub fn new(config: &CompletionConfig) -> Result<Self, CoreError> {
        let api_key = config.api_key
                            .clone()
                            .filter(|k| !k.is_empty())
                            .ok_or_else(|| CoreError::Config("GEMINI_API_KEY not set".into()))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client,
                  api_key,
                  model: config.model.clone(),
                  base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &CompletionRequest, json_mode: bool) -> GeminiRequest {
        let system_instruction = request.system.as_ref().map(|s| GeminiContent { role: None,
                                                                                parts: vec![GeminiPart { text: s.clone() }] });
        let (response_mime_type, response_schema) = if json_mode {
            (Some("application/json".to_string()), request.response_schema.clone())
        } else {
            (None, None)
        };
        GeminiRequest { contents: vec![GeminiContent { role: Some("user".into()),
                                                       parts: vec![GeminiPart { text: request.prompt.clone() }] }],
                        system_instruction,
                        generation_config: GeminiGenerationConfig { temperature: request.temperature,
                                                                    response_mime_type,
                                                                    response_schema } }
    }

    /// Concatena los textos del primer candidato.
    fn extract_text(response: GeminiResponse) -> Result<String, ProviderError> {
        if let Some(usage) = &response.usage_metadata {
            info!("gemini usage: prompt={:?} response={:?}", usage.prompt_token_count, usage.candidates_token_count);
        }
        let candidate = response.candidates
                                .into_iter()
                                .next()
                                .ok_or_else(|| ProviderError::Decode("no candidates in response".into()))?;
        let text: String = candidate.content
                                    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
                                    .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ProviderError::Decode(format!("empty candidate (finish_reason={:?})", candidate.finish_reason)));
        }
        Ok(text)
    }

    async fn send(&self, body: &GeminiRequest) -> Result<String, ProviderError> {
        debug!("gemini request: {} (key=***)", self.endpoint());
        let response = self.client
                           .post(self.endpoint())
                           .query(&[("key", self.api_key.as_str())])
                           .json(body)
                           .send()
                           .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!("gemini error: {} - {}", status, text);
            return Err(ProviderError::Status { status: status.as_u16(), body: text });
        }
        let parsed: GeminiResponse = serde_json::from_str(&text)?;
        Self::extract_text(parsed)
    }
}

#[async_trait]
impl CompletionProvider for GeminiCompletionProvider {
    fn get_name(&self) -> &str {
        "gemini"
    }

    fn get_version(&self) -> &str {
        &self.model
    }

    async fn complete_json(&self, request: &CompletionRequest) -> Result<Value, ProviderError> {
        let text = self.send(&Self::build_body(request, true)).await?;
        extract_json_object(&text).map_err(ProviderError::Decode)
    }

    async fn complete_text(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.send(&Self::build_body(request, false)).await
    }
}
