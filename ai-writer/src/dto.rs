//! Request and response bodies of the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use writer_adapters::traits::AdapterMetadata;
use writer_config::WriterConfig;
use writer_primitives::{
    ContentType, GenerationRequest, GenerationResult, MAX_LENGTH_RANGE, Result, TEMPERATURE_RANGE,
};
use writer_prompts::CustomTemplate;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBody {
    /// Text to write about.
    pub input: String,
    /// Content type tag; unknown or missing tags mean general content.
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    /// Maximum output length.
    #[serde(default)]
    pub max_length: Option<u32>,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl GenerateBody {
    /// Validates the body, filling omitted fields from `config`.
    ///
    /// Configured defaults are clamped into the accepted ranges so an omitted
    /// field never fails validation.
    ///
    /// # Errors
    ///
    /// Returns [`writer_primitives::Error::InvalidRequest`] for an empty input
    /// or an out-of-range explicit value.
    pub fn into_request(self, config: &WriterConfig) -> Result<GenerationRequest> {
        let content_type = self
            .content_type
            .as_deref()
            .map_or(ContentType::Content, ContentType::resolve);
        let max_length = self.max_length.unwrap_or_else(|| {
            config
                .max_length
                .clamp(*MAX_LENGTH_RANGE.start(), *MAX_LENGTH_RANGE.end())
        });
        let temperature = self.temperature.unwrap_or_else(|| {
            config
                .temperature
                .clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end())
        });

        GenerationRequest::new(self.input, content_type, max_length, temperature)
    }
}

/// Successful reply of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Always `true`.
    pub success: bool,
    /// Cleaned generated text.
    pub content: String,
    /// Canonical content type the request resolved to.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Input length in characters.
    pub input_length: usize,
    /// Output length in characters.
    pub output_length: usize,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            content: result.content,
            content_type: result.content_type,
            input_length: result.input_length,
            output_length: result.output_length,
        }
    }
}

/// One entry of `GET /api/content-types`.
#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeInfo {
    /// Canonical tag.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Short description.
    pub description: &'static str,
}

impl From<ContentType> for ContentTypeInfo {
    fn from(content_type: ContentType) -> Self {
        Self {
            content_type,
            description: content_type.description(),
        }
    }
}

/// Reply of `GET /api/content-types`.
#[derive(Debug, Clone, Serialize)]
pub struct ContentTypesResponse {
    /// Always `true`.
    pub success: bool,
    /// Every supported content type.
    pub content_types: Vec<ContentTypeInfo>,
}

/// Model description returned by `GET /api/model-info`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Backend and model details captured at load time.
    #[serde(flatten)]
    pub metadata: AdapterMetadata,
    /// `GPU` or `CPU`.
    pub device: &'static str,
}

/// Reply of `GET /api/model-info`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoResponse {
    /// Always `true`.
    pub success: bool,
    /// Loaded model description.
    pub model_info: ModelInfo,
}

/// Body of `POST /api/create-template`.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateBody {
    /// Template name.
    #[serde(rename = "templateName")]
    pub template_name: String,
    /// Template text with `{{variable}}` placeholders.
    #[serde(rename = "templateContent")]
    pub template_content: String,
}

/// Template echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateView {
    /// Template name.
    pub name: String,
    /// Template text.
    pub content: String,
    /// Distinct placeholders in order of first use.
    pub variables: Vec<String>,
    /// Acknowledgment time.
    pub created_at: DateTime<Utc>,
}

impl From<CustomTemplate> for TemplateView {
    fn from(template: CustomTemplate) -> Self {
        Self {
            name: template.name().to_owned(),
            content: template.content().to_owned(),
            variables: template.variables().to_vec(),
            created_at: Utc::now(),
        }
    }
}

/// Reply of `POST /api/create-template`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The acknowledged template.
    pub template: TemplateView,
}
