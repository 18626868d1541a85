//! 展示层辅助
//!
//! 只负责把模型数据变成终端可读的文本，不包含任何流程逻辑

pub mod progress;
pub mod render;
pub mod text_cleaner;

pub use progress::{progress_steps, render_progress, ProgressStep, StepStatus};
pub use render::render_lesson;
pub use text_cleaner::clean_text;
