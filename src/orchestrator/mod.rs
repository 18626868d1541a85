//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! workflow::TutorSession (阶段状态、重置、结果归属)
//!     ↓
//! orchestrator::LessonPipeline (大纲 → 撰写 → 配图)
//!     ↓
//! services (能力层：plan / image / parser)
//!     ↓
//! clients (基础设施：GenerativeModel)
//! ```

pub mod lesson_pipeline;

pub use lesson_pipeline::LessonPipeline;
