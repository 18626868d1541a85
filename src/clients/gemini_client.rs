/// Gemini API 客户端
///
/// 封装所有与 Gemini `generateContent` 接口相关的 HTTP 调用
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::clients::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use crate::clients::GenerativeModel;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};

/// Gemini 客户端
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base_url: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let endpoint = self.endpoint(model);
        debug!("调用 Gemini API，模型: {}", model);

        let resp = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!("Gemini API 返回错误状态 {} (模型: {})", status, model);
            return Err(ApiError::BadResponse {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(|source| ApiError::RequestFailed {
            endpoint: endpoint.clone(),
            source,
        })?;
        let response: GenerateContentResponse = serde_json::from_str(&body)?;

        if response.candidates.is_empty() {
            return Err(ApiError::EmptyResponse { endpoint });
        }

        debug!("Gemini API 调用成功");

        Ok(response)
    }
}
