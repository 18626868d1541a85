//! # Visual Tutor
//!
//! 输入一个主题，联网检索资料，生成一节包含 3 个章节、每节配图的短课程
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 远程模型调用
//! - `GenerativeModel` - 流程与远程模型之间的唯一接缝
//! - `GeminiClient` - 基于 reqwest 的 Gemini 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `PlanGenerator` - 带搜索增强的大纲生成
//! - `lesson_parser` - 标记协议解析
//! - `ImageGenerator` - 并行配图，单个失败不影响整体
//!
//! ### ③ 编排层（Orchestrator）
//! - `LessonPipeline` - 大纲 → 撰写 → 配图
//!
//! ### ④ 流程层（Workflow）
//! - `TutorSession` - 阶段状态机、重置、结果归属
//!
//! ### ⑤ 展示层（Presentation）
//! - 进度、课程渲染、Markdown 清理
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod presentation;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GeminiClient, GenerativeModel};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{LessonData, LessonPlan, LessonSection, LoadingStage, Source, Topic};
pub use orchestrator::LessonPipeline;
pub use presentation::{clean_text, render_lesson, render_progress};
pub use workflow::{SessionSnapshot, TutorSession};
