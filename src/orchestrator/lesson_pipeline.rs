//! 课程生成流水线 - 编排层
//!
//! ## 职责
//!
//! 串联两个阶段，并在每个阶段结束时通知调用方：
//!
//! 1. **大纲**：`PlanGenerator`，一次远程调用，失败即整体失败
//! 2. **撰写**：没有远程调用，只是可配置的停顿
//! 3. **配图**：`ImageGenerator`，并行请求，单个失败不影响整体
//!
//! 流水线本身不持有阶段状态，阶段由 `workflow::TutorSession` 维护。

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::clients::GenerativeModel;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{LessonData, StageEvent, Topic};
use crate::services::{ImageGenerator, PlanGenerator};

/// 课程生成流水线
pub struct LessonPipeline {
    plan_generator: PlanGenerator,
    image_generator: ImageGenerator,
    writing_pause: Duration,
}

impl LessonPipeline {
    /// 两个服务共用同一个模型客户端
    pub fn new(model: Arc<dyn GenerativeModel>, config: &Config) -> Self {
        Self {
            plan_generator: PlanGenerator::new(Arc::clone(&model), config),
            image_generator: ImageGenerator::new(model, config),
            writing_pause: Duration::from_millis(config.writing_pause_ms),
        }
    }

    /// 运行一次完整的生成
    ///
    /// # 参数
    /// - `topic`: 已校验的主题
    /// - `on_event`: 每个阶段完成时回调（`PlanReady` / `WritingDone` / `ImagesReady`）
    ///
    /// # 返回
    /// 返回最终课程；只有大纲阶段会失败
    pub async fn run<F>(&self, topic: &Topic, mut on_event: F) -> AppResult<LessonData>
    where
        F: FnMut(StageEvent),
    {
        let plan = self.plan_generator.generate(topic).await?;
        on_event(StageEvent::PlanReady);

        if !self.writing_pause.is_zero() {
            tokio::time::sleep(self.writing_pause).await;
        }
        on_event(StageEvent::WritingDone);

        let sections = self
            .image_generator
            .generate_all(plan.raw_sections.to_vec())
            .await;
        on_event(StageEvent::ImagesReady);

        info!("✓ 课程生成完成: {}", topic);
        Ok(plan.into_lesson(sections))
    }
}
