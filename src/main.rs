use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use visual_tutor::config::DEFAULT_CONFIG_FILE;
use visual_tutor::error::AppError;
use visual_tutor::utils::logging::log_startup;
use visual_tutor::{
    logger, render_lesson, render_progress, Config, GeminiClient, LessonPipeline, TutorSession,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load(DEFAULT_CONFIG_FILE)?;

    // 初始化日志
    logger::init(config.verbose_logging);

    let topic = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if topic.trim().is_empty() {
        eprintln!("用法: visual_tutor <主题>");
        eprintln!("例如: visual_tutor Fotosíntesis");
        return Ok(());
    }

    config.validate()?;
    log_startup(&config);

    // 初始化客户端与会话
    let client = GeminiClient::new(&config)?;
    let pipeline = LessonPipeline::new(Arc::new(client), &config);
    let session = TutorSession::new(pipeline);

    // 进度输出
    let mut stages = session.subscribe();
    let progress = tokio::spawn(async move {
        while stages.changed().await.is_ok() {
            let stage = *stages.borrow_and_update();
            if stage.is_in_flight() {
                println!("{}", render_progress(stage));
            }
        }
    });

    let outcome = session.start_search(&topic).await;
    drop(session);
    let _ = progress.await;

    match outcome {
        Ok(Some(lesson)) => {
            println!("{}", render_lesson(&lesson));

            if let Some(path) = &config.export_path {
                let json = serde_json::to_string_pretty(&lesson)?;
                tokio::fs::write(path, json)
                    .await
                    .with_context(|| format!("无法写入导出文件: {}", path))?;
                info!("💾 课程已导出至: {}", path);
            }
        }
        Ok(None) => warn!("生成结果已被丢弃"),
        Err(AppError::Validation(e)) => eprintln!("{}", e),
        Err(e) => {
            eprintln!("Algo salió mal: {}", e.user_message());
            return Err(e.into());
        }
    }

    Ok(())
}
