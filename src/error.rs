use thiserror::Error;

use crate::models::stage::InvalidTransition;

/// 展示给最终用户的统一错误提示
///
/// 底层错误只写入日志，不向用户暴露细节
pub const USER_FACING_ERROR: &str =
    "Ocurrió un error al intentar generar la lección. Por favor, intenta de nuevo o prueba con otro tema.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 模型输出解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 用户输入错误
    #[error("输入错误: {0}")]
    Validation(#[from] ValidationError),
    /// 阶段状态机错误（例如上一轮生成尚未结束）
    #[error("状态错误: {0}")]
    Stage(#[from] InvalidTransition),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// API 返回空结果
    #[error("API返回空结果: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// 模型有响应，但没有正文
    #[error("模型 {model} 没有返回正文 (finishReason: {finish_reason})")]
    EmptyText {
        model: String,
        finish_reason: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 模型输出解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 章节数量与约定不符
    #[error("章节数量不符: 期望 {expected} 节，实际 {found} 节")]
    SectionCount { expected: usize, found: usize },
}

/// 用户输入错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 主题为空或只包含空白字符
    #[error("主题不能为空")]
    EmptyTopic,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 API 密钥
    #[error("缺少 API 密钥，请设置 GEMINI_API_KEY 或 API_KEY 环境变量")]
    MissingApiKey,
    /// 配置值无法解析
    #[error("配置项 {key} 解析失败: 值 '{value}' 无法转换为 {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建正文为空错误
    pub fn empty_text(model: impl Into<String>, finish_reason: Option<&str>) -> Self {
        AppError::Api(ApiError::EmptyText {
            model: model.into(),
            finish_reason: finish_reason.unwrap_or("UNKNOWN").to_string(),
        })
    }

    /// 面向用户的提示文本
    ///
    /// 输入错误单独提示，其余错误一律返回固定文案
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::EmptyTopic) => "Escribe un tema para empezar.",
            _ => USER_FACING_ERROR,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
