pub mod image_generator;
pub mod lesson_parser;
pub mod plan_generator;

pub use image_generator::ImageGenerator;
pub use lesson_parser::{parse_lesson_text, ParsedLesson};
pub use plan_generator::PlanGenerator;
