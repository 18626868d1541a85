use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "visual_tutor.toml";

/// 程序配置
///
/// 优先级：环境变量 > 配置文件 > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Gemini API 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    /// 文本生成（带搜索增强）使用的模型
    pub text_model: String,
    /// 图片生成使用的模型
    pub image_model: String,
    /// 文本生成温度
    pub temperature: f32,
    /// 图片宽高比
    pub aspect_ratio: String,
    /// 单次 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 流程配置 ---
    /// "撰写"阶段的展示停顿（毫秒），纯界面效果
    pub writing_pause_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 课程 JSON 导出路径
    pub export_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            temperature: 0.7,
            aspect_ratio: "16:9".to_string(),
            request_timeout_secs: 120,
            writing_pause_ms: 0,
            verbose_logging: false,
            export_path: None,
        }
    }
}

impl Config {
    /// 只从环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_from(|key| std::env::var(key).ok())
    }

    /// 从配置文件加载（文件不存在时使用默认值），再用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// 从配置文件加载，再用 `lookup` 覆盖
    ///
    /// # 参数
    /// - `path`: TOML 配置文件路径，不存在时使用默认值
    /// - `lookup`: 覆盖来源，`load` 传入环境变量
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let base = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                    path: path.display().to_string(),
                    source,
                })?;
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Self::default()
        };

        base.merge_from(lookup)
    }

    /// 用外部键值来源覆盖当前配置
    ///
    /// `lookup` 通常是环境变量，测试时可传入内存中的映射
    pub fn merge_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.api_key = key;
        }
        if let Some(v) = lookup("GEMINI_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("TEXT_MODEL") {
            self.text_model = v;
        }
        if let Some(v) = lookup("IMAGE_MODEL") {
            self.image_model = v;
        }
        if let Some(v) = lookup("ASPECT_RATIO") {
            self.aspect_ratio = v;
        }
        if let Some(v) = lookup("EXPORT_PATH") {
            self.export_path = Some(v);
        }
        self.temperature = parse_or(&lookup, "TEMPERATURE", self.temperature, "f32")?;
        self.request_timeout_secs = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            self.request_timeout_secs,
            "u64",
        )?;
        self.writing_pause_ms =
            parse_or(&lookup, "WRITING_PAUSE_MS", self.writing_pause_ms, "u64")?;
        self.verbose_logging =
            parse_or(&lookup, "VERBOSE_LOGGING", self.verbose_logging, "bool")?;

        Ok(self)
    }

    /// 在发起任何远程调用之前检查必填项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, current: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                expected,
            }),
        None => Ok(current),
    }
}
