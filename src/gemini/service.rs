use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::common::types::{GroundedReply, Location};

use super::models::{GenerateContentRequest, GenerationResponse};

/// Reply khi request web-grounding thất bại.
pub const WEB_APOLOGY: &str =
    "Sorry, I encountered an error while searching the web. Please try again.";
/// Reply khi request map-grounding thất bại.
pub const MAPS_APOLOGY: &str =
    "Sorry, I encountered an error while searching maps. Please check your location permissions and try again.";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("missing API key; set GEMINI_API_KEY or api_key in the config file")]
    MissingApiKey,
}

/// Client mỏng quanh `generateContent`, mỗi mode một grounding tool.
///
/// Hai thao tác public không bao giờ trả lỗi: mọi thất bại (mạng, auth,
/// response hỏng) được log rồi đổi thành câu xin lỗi của mode đó với danh
/// sách nguồn rỗng, để UI chỉ phải xử lý một kết quả luôn-thành-công.
#[derive(Clone)]
pub struct GroundingService {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GroundingService {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Trả lời prompt với grounding qua Google Search.
    pub async fn search_grounded(&self, prompt: &str) -> GroundedReply {
        match self.generate(GenerateContentRequest::web_grounded(prompt)).await {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Web-grounded request failed: {err}");
                GroundedReply::apology(WEB_APOLOGY)
            }
        }
    }

    /// Trả lời prompt với grounding qua Google Maps tại toạ độ đã cho.
    pub async fn map_grounded(&self, prompt: &str, location: Location) -> GroundedReply {
        match self
            .generate(GenerateContentRequest::map_grounded(prompt, location))
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Map-grounded request failed: {err}");
                GroundedReply::apology(MAPS_APOLOGY)
            }
        }
    }

    async fn generate(&self, request: GenerateContentRequest) -> Result<GroundedReply, GeminiError> {
        let url = self.build_url()?;

        let response = self.http.post(url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let response: GenerationResponse = response.json().await?;
        Ok(GroundedReply {
            text: response.text(),
            sources: response.grounding_chunks(),
        })
    }

    fn build_url(&self) -> Result<Url, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url_str = format!(
            "{}models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        Ok(Url::parse(&url_str)?)
    }
}
