pub mod lesson;
pub mod stage;

pub use lesson::{LessonData, LessonPlan, LessonSection, Source, Topic, SECTION_COUNT};
pub use stage::{transition, InvalidTransition, LoadingStage, StageEvent};
