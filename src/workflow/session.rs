//! 用户会话 - 流程层
//!
//! 维护一次交互的全部状态：当前阶段、已完成的课程、错误提示。
//!
//! - 新的搜索会清空上一轮的结果
//! - `reset` 回到空闲状态并丢弃结果，但不会中断正在进行的远程调用；
//!   被重置的那一轮完成后，结果直接丢弃
//! - 当前阶段通过 `watch` 通道广播给展示层

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{error, info};

use crate::error::AppResult;
use crate::models::{transition, LessonData, LoadingStage, StageEvent, Topic};
use crate::orchestrator::LessonPipeline;
use crate::utils::logging::{log_lesson_summary, log_stage};

/// 会话状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub stage: LoadingStage,
    pub lesson: Option<LessonData>,
    pub error_message: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    snapshot: SessionSnapshot,
    /// 每次开始或重置都会递增，用来识别过期的生成结果
    generation: u64,
}

struct SessionInner {
    pipeline: LessonPipeline,
    state: Mutex<SessionState>,
    stage_tx: watch::Sender<LoadingStage>,
}

/// 用户会话
///
/// 克隆得到的句柄共享同一份状态
#[derive(Clone)]
pub struct TutorSession {
    inner: Arc<SessionInner>,
}

impl TutorSession {
    pub fn new(pipeline: LessonPipeline) -> Self {
        let (stage_tx, _) = watch::channel(LoadingStage::Idle);
        Self {
            inner: Arc::new(SessionInner {
                pipeline,
                state: Mutex::new(SessionState::default()),
                stage_tx,
            }),
        }
    }

    /// 订阅阶段变化
    pub fn subscribe(&self) -> watch::Receiver<LoadingStage> {
        self.inner.stage_tx.subscribe()
    }

    pub fn stage(&self) -> LoadingStage {
        self.lock().snapshot.stage
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot.clone()
    }

    /// 提交一个主题并运行完整的生成流程
    ///
    /// # 返回
    /// - `Ok(Some(lesson))`：生成完成
    /// - `Ok(None)`：生成期间会话被重置，结果已丢弃
    /// - `Err(AppError::Validation)`：主题为空，未发起任何远程调用
    /// - `Err(AppError::Stage)`：上一轮生成尚未结束
    /// - 其他错误：大纲阶段失败，会话进入 `Error` 阶段
    pub async fn start_search(&self, raw_topic: &str) -> AppResult<Option<LessonData>> {
        let topic = Topic::parse(raw_topic)?;

        let generation = {
            let mut state = self.lock();
            let next = transition(state.snapshot.stage, StageEvent::Start)?;
            state.generation += 1;
            state.snapshot = SessionSnapshot {
                stage: next,
                lesson: None,
                error_message: None,
            };
            self.publish(next);
            state.generation
        };

        info!("📚 开始生成课程: {}", topic);

        let result = self
            .inner
            .pipeline
            .run(&topic, |event| {
                self.apply(generation, event);
            })
            .await;

        let mut state = self.lock();
        if state.generation != generation {
            info!("会话已重置，丢弃主题 \"{}\" 的生成结果", topic);
            return Ok(None);
        }

        match result {
            Ok(lesson) => {
                log_lesson_summary(&lesson);
                state.snapshot.lesson = Some(lesson.clone());
                Ok(Some(lesson))
            }
            Err(e) => {
                error!("❌ 课程生成失败: {}", e);
                if let Ok(next) = transition(state.snapshot.stage, StageEvent::Fail) {
                    state.snapshot.stage = next;
                    self.publish(next);
                }
                state.snapshot.error_message = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// 回到空闲状态，丢弃课程和错误提示
    pub fn reset(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.snapshot = SessionSnapshot::default();
        self.publish(LoadingStage::Idle);
    }

    // ========== 辅助方法 ==========

    /// 应用流水线上报的事件；过期的事件直接忽略
    fn apply(&self, generation: u64, event: StageEvent) {
        let mut state = self.lock();
        if state.generation != generation {
            return;
        }
        match transition(state.snapshot.stage, event) {
            Ok(next) => {
                state.snapshot.stage = next;
                self.publish(next);
            }
            Err(e) => error!("{}", e),
        }
    }

    fn publish(&self, stage: LoadingStage) {
        log_stage(stage);
        self.inner.stage_tx.send_replace(stage);
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
