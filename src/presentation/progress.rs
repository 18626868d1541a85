//! 生成进度展示

use crate::models::LoadingStage;

/// 进度条中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub stage: LoadingStage,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

const STEPS: [ProgressStep; 3] = [
    ProgressStep {
        stage: LoadingStage::Researching,
        label: "Investigando fuentes fiables...",
        icon: "🔍",
    },
    ProgressStep {
        stage: LoadingStage::Writing,
        label: "Redactando explicación pedagógica...",
        icon: "✍️",
    },
    ProgressStep {
        stage: LoadingStage::Designing,
        label: "Diseñando material visual...",
        icon: "🎨",
    },
];

/// 当前阶段在进度顺序中的位置；`Idle` 和 `Error` 不在其中
fn stage_position(stage: LoadingStage) -> Option<usize> {
    match stage {
        LoadingStage::Researching => Some(0),
        LoadingStage::Writing => Some(1),
        LoadingStage::Designing => Some(2),
        LoadingStage::Completed => Some(3),
        LoadingStage::Idle | LoadingStage::Error => None,
    }
}

/// 每一步在当前阶段下的状态
pub fn progress_steps(stage: LoadingStage) -> [(ProgressStep, StepStatus); 3] {
    let position = stage_position(stage);
    STEPS.map(|step| {
        let index = stage_position(step.stage);
        let status = match (index, position) {
            (Some(i), Some(p)) if i < p => StepStatus::Done,
            (Some(i), Some(p)) if i == p => StepStatus::Active,
            _ => StepStatus::Pending,
        };
        (step, status)
    })
}

/// 渲染进度文本
pub fn render_progress(stage: LoadingStage) -> String {
    let mut out = String::from("Creando tu lección...\n");
    for (step, status) in progress_steps(stage) {
        let line = match status {
            StepStatus::Done => format!("  ✅ {}", step.label),
            StepStatus::Active => format!("  {} {}  ←", step.icon, step.label),
            StepStatus::Pending => format!("  ·  {}", step.label),
        };
        out.push_str(&line);
        out.push('\n');
    }
    if stage == LoadingStage::Designing {
        out.push_str("  Generando múltiples ilustraciones...\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(stage: LoadingStage) -> Vec<StepStatus> {
        progress_steps(stage).iter().map(|(_, s)| *s).collect()
    }

    #[test]
    fn test_step_statuses_follow_stage() {
        use StepStatus::*;

        assert_eq!(statuses(LoadingStage::Researching), vec![Active, Pending, Pending]);
        assert_eq!(statuses(LoadingStage::Writing), vec![Done, Active, Pending]);
        assert_eq!(statuses(LoadingStage::Designing), vec![Done, Done, Active]);
        assert_eq!(statuses(LoadingStage::Completed), vec![Done, Done, Done]);
        assert_eq!(statuses(LoadingStage::Idle), vec![Pending, Pending, Pending]);
        assert_eq!(statuses(LoadingStage::Error), vec![Pending, Pending, Pending]);
    }

    #[test]
    fn test_render_progress_mentions_images_while_designing() {
        let text = render_progress(LoadingStage::Designing);
        assert!(text.contains("✅ Investigando fuentes fiables..."));
        assert!(text.contains("Generando múltiples ilustraciones..."));
        assert!(!render_progress(LoadingStage::Writing).contains("ilustraciones"));
    }
}
