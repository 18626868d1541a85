//! 章节配图生成 - 业务能力层
//!
//! 所有章节的配图请求同时发出，全部结束后再返回。
//! 单个章节失败只会让该章节没有配图，不影响其他章节，也不会让整批失败。

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::clients::gemini_types::{GenerateContentRequest, GenerationConfig, ImageConfig};
use crate::clients::GenerativeModel;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::LessonSection;
use crate::utils::truncate_text;

/// 配图生成服务
pub struct ImageGenerator {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
    aspect_ratio: String,
}

impl ImageGenerator {
    /// 创建新的配图生成服务
    pub fn new(model: Arc<dyn GenerativeModel>, config: &Config) -> Self {
        Self {
            model,
            model_name: config.image_model.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        }
    }

    /// 为所有章节并行生成配图
    ///
    /// 返回的章节顺序与输入一致；永远不会返回错误
    pub async fn generate_all(&self, sections: Vec<LessonSection>) -> Vec<LessonSection> {
        info!("🎨 正在为 {} 个章节生成配图...", sections.len());

        let tasks = sections
            .into_iter()
            .enumerate()
            .map(|(index, section)| self.illustrate(index + 1, section));
        let sections = join_all(tasks).await;

        let done = sections.iter().filter(|s| s.image_url.is_some()).count();
        info!("✓ 配图完成: {}/{}", done, sections.len());

        sections
    }

    /// 为单个章节配图，失败时原样返回章节
    async fn illustrate(&self, index: usize, mut section: LessonSection) -> LessonSection {
        match self.generate_image(&section).await {
            Ok(Some(url)) => {
                debug!("[章节 {}] 配图成功", index);
                section.image_url = Some(url);
            }
            Ok(None) => {
                warn!(
                    "[章节 {}] ⚠️ 响应中没有图片数据: {}",
                    index,
                    truncate_text(&section.title, 40)
                );
            }
            Err(e) => {
                warn!(
                    "[章节 {}] ⚠️ 配图生成失败 ({}): {}",
                    index,
                    truncate_text(&section.title, 40),
                    e
                );
            }
        }
        section
    }

    /// 请求一张配图
    ///
    /// # 返回
    /// 响应中第一张内联图片的 data URL；响应中没有图片时返回 `None`
    pub async fn generate_image(&self, section: &LessonSection) -> Result<Option<String>, ApiError> {
        let request = self.build_request(section);
        let response = self.model.generate_content(&self.model_name, &request).await?;

        Ok(response.first_inline_data().map(|data| data.to_data_url()))
    }

    /// 构造图片生成请求
    pub fn build_request(&self, section: &LessonSection) -> GenerateContentRequest {
        GenerateContentRequest {
            generation_config: Some(GenerationConfig {
                temperature: None,
                image_config: Some(ImageConfig {
                    aspect_ratio: self.aspect_ratio.clone(),
                }),
            }),
            ..GenerateContentRequest::from_prompt(build_image_prompt(section))
        }
    }
}

/// 图片提示词：固定的画风说明 + 章节标题 + 场景描述
pub fn build_image_prompt(section: &LessonSection) -> String {
    format!(
        "Ilustración educativa estilo diseño plano (flat vector art), fondo blanco o muy suave.\n\
         Alta calidad, minimalista, colores armoniosos.\n\
         Tema: {}\n\
         Descripción de la escena: {}",
        section.title, section.visual_prompt
    )
}
