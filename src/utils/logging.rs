/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;
use crate::models::{LessonData, LoadingStage};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 视觉导师课程生成");
    info!(
        "🧠 文本模型: {} | 🎨 图片模型: {}",
        config.text_model, config.image_model
    );
    info!("{}", "=".repeat(60));
}

/// 记录阶段切换
///
/// # 参数
/// - `stage`: 新的阶段
pub fn log_stage(stage: LoadingStage) {
    info!("📍 阶段切换: {:?}", stage);
}

/// 打印课程生成摘要
///
/// # 参数
/// - `lesson`: 生成完成的课程
pub fn log_lesson_summary(lesson: &LessonData) {
    let with_images = lesson
        .sections
        .iter()
        .filter(|s| s.image_url.is_some())
        .count();

    info!("\n{}", "=".repeat(60));
    info!("📊 课程生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📚 主题: {}", truncate_text(&lesson.topic, 60));
    info!("🖼️ 配图: {}/{}", with_images, lesson.sections.len());
    info!("🔗 来源: {}", lesson.sources.len());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
