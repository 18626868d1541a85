//! 课程大纲生成 - 业务能力层
//!
//! 一次带 Google 搜索增强的文本调用，产出引言、3 个章节草稿和去重后的引用来源

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::clients::gemini_types::{
    Content, GenerateContentRequest, GenerationConfig, GroundingChunk, Tool,
};
use crate::clients::GenerativeModel;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{LessonPlan, Source, Topic};
use crate::services::lesson_parser;

/// 约定输出格式的系统指令
pub const SYSTEM_INSTRUCTION: &str = r#"
Actúa como un profesor experto y diseñador visual.
Tu objetivo es explicar un tema dividiéndolo en partes claras.

REGLAS ESTRICTAS DE FORMATO:
1. NO uses Markdown con asteriscos (ni **negritas**, ni *cursivas*). Escribe texto plano y limpio.
2. Divide la lección en EXACTAMENTE 3 secciones o conceptos clave distintos.
3. Para cada sección, incluye un título, una explicación clara y una descripción para una imagen (prompt visual).

Usa el siguiente formato EXACTO para que mi software pueda leerlo:

[INTRO]
(Escribe aquí una introducción general breve y motivadora)

[SECCION]
TITULO: (Título corto del concepto 1)
CONTENIDO: (Explicación detallada del concepto 1 sin asteriscos)
VISUAL: (Descripción detallada de cómo debería ser la imagen para explicar este concepto, estilo flat design)

[SECCION]
TITULO: (Título corto del concepto 2)
CONTENIDO: (Explicación detallada del concepto 2 sin asteriscos)
VISUAL: (Descripción detallada para la imagen 2)

[SECCION]
TITULO: (Título corto del concepto 3)
CONTENIDO: (Explicación detallada del concepto 3 sin asteriscos)
VISUAL: (Descripción detallada para la imagen 3)
"#;

/// 课程大纲生成服务
///
/// 职责：
/// - 构造带搜索增强的请求
/// - 解析模型输出
/// - 整理引用来源
pub struct PlanGenerator {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
    temperature: f32,
}

impl PlanGenerator {
    /// 创建新的大纲生成服务
    pub fn new(model: Arc<dyn GenerativeModel>, config: &Config) -> Self {
        Self {
            model,
            model_name: config.text_model.clone(),
            temperature: config.temperature,
        }
    }

    /// 生成课程大纲
    ///
    /// 任何远程错误或解析错误都会中止本阶段，不返回部分结果
    pub async fn generate(&self, topic: &Topic) -> AppResult<LessonPlan> {
        info!("🔍 正在检索资料: {}", topic);

        let request = self.build_request(topic);
        let response = self
            .model
            .generate_content(&self.model_name, &request)
            .await
            .map_err(|e| {
                error!("生成课程大纲失败: {}", e);
                AppError::from(e)
            })?;

        let text = response.text();
        if text.trim().is_empty() {
            let finish_reason = response.finish_reason();
            error!(
                "模型返回的正文为空 (模型: {}, finishReason: {:?})",
                self.model_name, finish_reason
            );
            return Err(AppError::empty_text(&self.model_name, finish_reason));
        }
        debug!("模型正文长度: {} 字符", text.chars().count());

        let parsed = lesson_parser::parse_lesson_text(topic.as_str(), &text).map_err(|e| {
            error!("无法解析模型输出: {}", e);
            AppError::from(e)
        })?;

        let sources = collect_sources(response.grounding_chunks());
        info!("✓ 大纲已生成，引用来源 {} 个", sources.len());

        Ok(LessonPlan {
            topic: topic.as_str().to_string(),
            intro: parsed.intro,
            raw_sections: parsed.sections,
            sources,
        })
    }

    /// 构造文本生成请求
    pub fn build_request(&self, topic: &Topic) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content::instruction(SYSTEM_INSTRUCTION)),
            tools: vec![Tool::google_search()],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                image_config: None,
            }),
            ..GenerateContentRequest::from_prompt(build_user_prompt(topic))
        }
    }
}

/// 用户提示词
pub fn build_user_prompt(topic: &Topic) -> String {
    format!(
        "Investiga y crea una lección visual sobre: \"{}\".\nAsegúrate de que la información sea veraz y actual.",
        topic
    )
}

/// 从搜索引用中整理来源
///
/// 缺少 `uri` 或 `title` 的条目被丢弃，按 `uri` 去重并保留首次出现的顺序
pub fn collect_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    let mut seen = HashSet::new();

    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| match (web.uri.as_deref(), web.title.as_deref()) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => Some(Source {
                title: title.to_string(),
                uri: uri.to_string(),
            }),
            _ => None,
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}
