//! 生成流程的阶段状态机
//!
//! ```text
//! Idle → Researching → Writing → Designing → Completed
//!            └───────────┴──────────┴──→ Error
//! ```
//!
//! 任何阶段都可以 `Reset` 回到 `Idle`。转换逻辑是纯函数，与渲染无关。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 当前处于哪个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingStage {
    #[default]
    Idle,
    /// 联网检索并生成文字结构
    Researching,
    /// 撰写阶段，没有对应的远程调用，只是界面上的过渡
    Writing,
    /// 并行生成配图
    Designing,
    Completed,
    Error,
}

impl LoadingStage {
    /// 是否有一轮生成正在进行
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            LoadingStage::Researching | LoadingStage::Writing | LoadingStage::Designing
        )
    }
}

/// 驱动阶段变化的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// 用户提交新主题
    Start,
    /// 第一阶段完成
    PlanReady,
    /// 撰写过渡结束
    WritingDone,
    /// 所有配图请求都已结束
    ImagesReady,
    /// 生成失败
    Fail,
    /// 用户重置
    Reset,
}

/// 非法的阶段转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("非法的阶段转换: {from:?} 不接受事件 {event:?}")]
pub struct InvalidTransition {
    pub from: LoadingStage,
    pub event: StageEvent,
}

/// 计算下一个阶段
pub fn transition(from: LoadingStage, event: StageEvent) -> Result<LoadingStage, InvalidTransition> {
    let next = match (from, event) {
        (_, StageEvent::Reset) => LoadingStage::Idle,
        (LoadingStage::Idle | LoadingStage::Completed | LoadingStage::Error, StageEvent::Start) => {
            LoadingStage::Researching
        }
        (LoadingStage::Researching, StageEvent::PlanReady) => LoadingStage::Writing,
        (LoadingStage::Writing, StageEvent::WritingDone) => LoadingStage::Designing,
        (LoadingStage::Designing, StageEvent::ImagesReady) => LoadingStage::Completed,
        (stage, StageEvent::Fail) if stage.is_in_flight() => LoadingStage::Error,
        _ => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut stage = LoadingStage::default();
        for event in [
            StageEvent::Start,
            StageEvent::PlanReady,
            StageEvent::WritingDone,
            StageEvent::ImagesReady,
        ] {
            stage = transition(stage, event).unwrap();
        }
        assert_eq!(stage, LoadingStage::Completed);
    }

    #[test]
    fn test_fail_from_every_in_flight_stage() {
        for stage in [
            LoadingStage::Researching,
            LoadingStage::Writing,
            LoadingStage::Designing,
        ] {
            assert_eq!(transition(stage, StageEvent::Fail), Ok(LoadingStage::Error));
        }
    }

    #[test]
    fn test_fail_outside_flight_is_rejected() {
        for stage in [LoadingStage::Idle, LoadingStage::Completed, LoadingStage::Error] {
            assert!(transition(stage, StageEvent::Fail).is_err());
        }
    }

    #[test]
    fn test_cannot_start_while_in_flight() {
        let err = transition(LoadingStage::Designing, StageEvent::Start).unwrap_err();
        assert_eq!(err.from, LoadingStage::Designing);
        assert_eq!(err.event, StageEvent::Start);
    }

    #[test]
    fn test_reset_always_returns_to_idle() {
        for stage in [
            LoadingStage::Idle,
            LoadingStage::Researching,
            LoadingStage::Writing,
            LoadingStage::Designing,
            LoadingStage::Completed,
            LoadingStage::Error,
        ] {
            assert_eq!(transition(stage, StageEvent::Reset), Ok(LoadingStage::Idle));
        }
    }

    #[test]
    fn test_new_search_after_completion_or_error() {
        assert_eq!(
            transition(LoadingStage::Completed, StageEvent::Start),
            Ok(LoadingStage::Researching)
        );
        assert_eq!(
            transition(LoadingStage::Error, StageEvent::Start),
            Ok(LoadingStage::Researching)
        );
    }

    #[test]
    fn test_stage_serializes_upper_case() {
        let json = serde_json::to_string(&LoadingStage::Researching).unwrap();
        assert_eq!(json, "\"RESEARCHING\"");
    }
}
