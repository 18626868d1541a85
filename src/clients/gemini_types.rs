//! Gemini `generateContent` 接口的请求与响应结构
//!
//! 只覆盖本项目用到的字段，未知字段在反序列化时忽略

use serde::{Deserialize, Serialize};

// ========== 请求 ==========

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// 只包含一段用户文本的请求
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            ..Default::default()
        }
    }

    /// 请求中第一段用户文本
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// systemInstruction 不带 role
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    /// 思考过程片段，不计入正文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// 内联在响应中的二进制数据（base64 编码）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// 转换为可直接嵌入页面的 data URL
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime_type.is_empty() {
            "image/png"
        } else {
            self.mime_type.as_str()
        };
        format!("data:{};base64,{}", mime, self.data)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    /// 启用 Google 搜索增强
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

// ========== 响应 ==========

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// 第一个候选的正文（拼接所有非思考文本片段）
    pub fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    /// 第一个候选的结束原因（如 `STOP`、`SAFETY`）
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }

    /// 第一个候选中的第一张内联图片
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    /// 第一个候选的搜索引用
    pub fn grounding_chunks(&self) -> &[GroundingChunk] {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_shape() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::instruction("reglas")),
            tools: vec![Tool::google_search()],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.5),
                image_config: None,
            }),
            ..GenerateContentRequest::from_prompt("hola")
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hola" }] }],
                "systemInstruction": { "parts": [{ "text": "reglas" }] },
                "tools": [{ "googleSearch": {} }],
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn test_response_accessors() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "pensando...", "thought": true },
                    { "text": "[INTRO] " },
                    { "text": "Hola" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } },
                    { "inlineData": { "mimeType": "image/png", "data": "REVG" } }
                ]},
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://a.example", "title": "A" } },
                    { "retrievedContext": {} }
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 10 }
        }))
        .unwrap();

        assert_eq!(response.text(), "[INTRO] Hola");
        assert_eq!(
            response.first_inline_data().map(InlineData::to_data_url),
            Some("data:image/jpeg;base64,QUJD".to_string())
        );
        assert_eq!(response.grounding_chunks().len(), 2);
    }

    #[test]
    fn test_empty_response_accessors() {
        let response = GenerateContentResponse::default();
        assert_eq!(response.text(), "");
        assert!(response.first_inline_data().is_none());
        assert!(response.grounding_chunks().is_empty());
        assert!(response.finish_reason().is_none());
    }

    #[test]
    fn test_finish_reason_from_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [] }, "finishReason": "SAFETY" },
                { "finishReason": "STOP" }
            ]
        }))
        .unwrap();
        assert_eq!(response.finish_reason(), Some("SAFETY"));
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_data_url_defaults_to_png() {
        let data = InlineData {
            mime_type: String::new(),
            data: "QUJD".to_string(),
        };
        assert_eq!(data.to_data_url(), "data:image/png;base64,QUJD");
    }
}
