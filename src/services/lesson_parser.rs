//! 课程文本解析 - 业务能力层
//!
//! 模型按约定输出如下格式的纯文本：
//!
//! ```text
//! [INTRO]
//! 引言
//! [SECCION]
//! TITULO: 标题
//! CONTENIDO: 正文
//! VISUAL: 配图描述
//! ...（共 3 节）
//! ```
//!
//! 解析分两步：先用标记表把文本切成标记流，再由状态机按标记位置截取各字段。
//! 单个字段缺失时使用占位内容；章节数量不是 3 时返回 `ParseError`。

use std::sync::OnceLock;

use phf::phf_map;
use regex::Regex;

use crate::error::ParseError;
use crate::models::{LessonSection, SECTION_COUNT};

/// 缺少 `[INTRO]` 时的引言
pub const INTRO_PLACEHOLDER: &str = "Aquí tienes tu lección.";
/// 缺少 `TITULO:` 时的标题
pub const TITLE_PLACEHOLDER: &str = "Concepto Clave";

/// 缺少 `VISUAL:` 时的配图描述
pub fn default_visual_prompt(topic: &str) -> String {
    format!("Una ilustración educativa sobre {}", topic)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Intro,
    Section,
    Title,
    Content,
    Visual,
}

static MARKERS: phf::Map<&'static str, Marker> = phf_map! {
    "[INTRO]" => Marker::Intro,
    "[SECCION]" => Marker::Section,
    "TITULO:" => Marker::Title,
    "CONTENIDO:" => Marker::Content,
    "VISUAL:" => Marker::Visual,
};

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternatives: Vec<String> = MARKERS.keys().map(|k| regex::escape(k)).collect();
        Regex::new(&alternatives.join("|")).expect("标记正则由转义后的字面量组成")
    })
}

/// 标记在原文中的位置（字节下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    marker: Marker,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<Token> {
    marker_pattern()
        .find_iter(text)
        .filter_map(|m| {
            MARKERS.get(m.as_str()).map(|&marker| Token {
                marker,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLesson {
    pub intro: String,
    pub sections: [LessonSection; SECTION_COUNT],
}

/// 一个 `[SECCION]` 块内记录到的字段标记
#[derive(Debug)]
struct ChunkMarks {
    start: usize,
    title: Option<usize>,
    content: Option<usize>,
    visuals: Vec<Token>,
}

impl ChunkMarks {
    fn new(start: usize) -> Self {
        Self {
            start,
            title: None,
            content: None,
            visuals: Vec::new(),
        }
    }

    fn finish(self, text: &str, end: usize, topic: &str) -> LessonSection {
        let chunk = &text[self.start..end];

        let title = match self.title {
            Some(pos) => {
                let from = skip_whitespace(text, pos, end);
                let to = line_end(text, from, end);
                text[from..to].trim().to_string()
            }
            None => TITLE_PLACEHOLDER.to_string(),
        };

        let content = match self.content {
            Some(pos) => {
                let from = skip_whitespace(text, pos, end);
                let to = self
                    .visuals
                    .iter()
                    .find(|v| v.start >= from)
                    .map_or(end, |v| v.start);
                text[from..to].trim().to_string()
            }
            None => chunk.trim().to_string(),
        };

        let visual_prompt = match self.visuals.first() {
            Some(visual) => text[visual.end..end].trim().to_string(),
            None => default_visual_prompt(topic),
        };

        LessonSection::new(title, content, visual_prompt)
    }
}

enum ParserState {
    /// 第一个 `[SECCION]` 之前的内容，只用于定位引言
    Preamble,
    InSection(ChunkMarks),
}

/// 解析模型输出
///
/// # 参数
/// - `topic`: 课程主题（用于默认配图描述）
/// - `text`: 模型返回的原始文本
///
/// # 返回
/// 返回引言和恰好 3 个章节；章节数量不符时返回错误
pub fn parse_lesson_text(topic: &str, text: &str) -> Result<ParsedLesson, ParseError> {
    let tokens = tokenize(text);

    let mut state = ParserState::Preamble;
    let mut intro_at: Option<usize> = None;
    let mut section_starts: Vec<usize> = Vec::new();
    let mut sections: Vec<LessonSection> = Vec::new();

    for token in &tokens {
        match token.marker {
            Marker::Intro => {
                intro_at.get_or_insert(token.end);
            }
            Marker::Section => {
                section_starts.push(token.start);
                let next = ParserState::InSection(ChunkMarks::new(token.end));
                if let ParserState::InSection(marks) = std::mem::replace(&mut state, next) {
                    sections.push(marks.finish(text, token.start, topic));
                }
            }
            Marker::Title | Marker::Content | Marker::Visual => {
                if let ParserState::InSection(marks) = &mut state {
                    match token.marker {
                        Marker::Title => {
                            marks.title.get_or_insert(token.end);
                        }
                        Marker::Content => {
                            marks.content.get_or_insert(token.end);
                        }
                        _ => marks.visuals.push(*token),
                    }
                }
            }
        }
    }

    if let ParserState::InSection(marks) = state {
        sections.push(marks.finish(text, text.len(), topic));
    }

    let intro = match intro_at {
        Some(pos) => {
            let from = skip_whitespace(text, pos, text.len());
            let to = section_starts
                .iter()
                .copied()
                .find(|&s| s >= from)
                .unwrap_or(text.len());
            text[from..to].trim().to_string()
        }
        None => INTRO_PLACEHOLDER.to_string(),
    };

    let found = sections.len();
    let sections: [LessonSection; SECTION_COUNT] =
        sections.try_into().map_err(|_| ParseError::SectionCount {
            expected: SECTION_COUNT,
            found,
        })?;

    Ok(ParsedLesson { intro, sections })
}

// ========== 辅助函数 ==========

/// 从 `from` 开始跳过空白（包括换行），不超过 `end`
fn skip_whitespace(text: &str, from: usize, end: usize) -> usize {
    text[from..end]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(end, |(i, _)| from + i)
}

/// 从 `from` 开始找到行尾，不超过 `end`
fn line_end(text: &str, from: usize, end: usize) -> usize {
    text[from..end]
        .char_indices()
        .find(|(_, c)| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        .map_or(end, |(i, _)| from + i)
}
