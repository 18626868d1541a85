//! 课程数据模型
//!
//! 所有实体都只在一次生成周期内存在于内存中，不做持久化

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 每节课固定的章节数
pub const SECTION_COUNT: usize = 3;

/// 用户提交的主题
///
/// 构造时保证去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// 校验并创建主题
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 引用来源，以 `uri` 作为唯一标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// 课程中的一个章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSection {
    pub title: String,
    pub content: String,
    pub visual_prompt: String,
    /// 图片阶段完成前始终为空；生成失败时保持为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LessonSection {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        visual_prompt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            visual_prompt: visual_prompt.into(),
            image_url: None,
        }
    }
}

/// 第一阶段的产物：文字结构已确定，尚未配图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    pub topic: String,
    pub intro: String,
    pub raw_sections: [LessonSection; SECTION_COUNT],
    pub sources: Vec<Source>,
}

impl LessonPlan {
    /// 用配图后的章节生成最终课程
    pub fn into_lesson(self, sections: Vec<LessonSection>) -> LessonData {
        LessonData {
            topic: self.topic,
            intro: self.intro,
            sections,
            sources: self.sources,
        }
    }
}

/// 最终呈现给用户的课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonData {
    pub topic: String,
    pub intro: String,
    pub sections: Vec<LessonSection>,
    pub sources: Vec<Source>,
}
