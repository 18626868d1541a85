//! 外部服务客户端
//!
//! `GenerativeModel` 是流程与远程模型之间唯一的接缝：
//! 给定模型名和请求，返回响应或错误。测试中用脚本化的实现替换。

pub mod gemini_client;
pub mod gemini_types;

use async_trait::async_trait;

use crate::error::ApiError;

pub use gemini_client::GeminiClient;
pub use gemini_types::{GenerateContentRequest, GenerateContentResponse};

/// 生成式模型调用能力
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// 调用 `generateContent`
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError>;
}
