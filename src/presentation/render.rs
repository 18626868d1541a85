//! 课程的纯文本渲染

use std::fmt::Write;

use crate::models::LessonData;
use crate::presentation::text_cleaner::clean_text;

/// 没有配图时显示的占位文字
const IMAGE_PLACEHOLDER: &str = "🖼️ Generando visualización...";

/// 把课程渲染为终端文本
///
/// 所有展示给用户的字符串都会先经过 `clean_text`
pub fn render_lesson(lesson: &LessonData) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", clean_text(&lesson.topic));
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}\n", clean_text(&lesson.intro));

    for (index, section) in lesson.sections.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, clean_text(&section.title));
        let _ = writeln!(out, "{}", "─".repeat(60));
        match &section.image_url {
            Some(url) => {
                let _ = writeln!(out, "[imagen: {}]", image_summary(url));
            }
            None => {
                let _ = writeln!(out, "{}", IMAGE_PLACEHOLDER);
            }
        }
        let _ = writeln!(out, "{}\n", clean_text(&section.content));
    }

    if !lesson.sources.is_empty() {
        let _ = writeln!(out, "Fuentes Verificadas");
        for source in &lesson.sources {
            let _ = writeln!(out, "  - {} <{}>", clean_text(&source.title), source.uri);
        }
    }

    out
}

/// data URL 很长，只显示类型和大小
fn image_summary(url: &str) -> String {
    match url.strip_prefix("data:").and_then(|rest| rest.split_once(";base64,")) {
        Some((mime, data)) => format!("{}, {} bytes", mime, data.len() / 4 * 3),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LessonSection, Source};

    fn sample_lesson() -> LessonData {
        let mut with_image = LessonSection::new("**La luz**", "La ## luz", "v");
        with_image.image_url = Some("data:image/png;base64,QUJDREVG".to_string());

        LessonData {
            topic: "Fotosíntesis".to_string(),
            intro: "Una *introducción*".to_string(),
            sections: vec![
                with_image,
                LessonSection::new("El agua", "Raíces", "v"),
                LessonSection::new("__Oxígeno__", "Burbujas", "v"),
            ],
            sources: vec![Source {
                title: "Wikipedia".to_string(),
                uri: "https://es.wikipedia.org/wiki/Fotos%C3%ADntesis".to_string(),
            }],
        }
    }

    #[test]
    fn test_render_cleans_markdown() {
        let text = render_lesson(&sample_lesson());
        assert!(text.contains("Una introducción"));
        assert!(text.contains("1. La luz"));
        assert!(text.contains("3. Oxígeno"));
        assert!(!text.contains("**"));
        assert!(!text.contains("__"));
    }

    #[test]
    fn test_render_images_and_sources() {
        let text = render_lesson(&sample_lesson());
        assert!(text.contains("[imagen: image/png, 6 bytes]"));
        assert_eq!(text.matches(IMAGE_PLACEHOLDER).count(), 2);
        assert!(text.contains("Fuentes Verificadas"));
        assert!(text.contains("<https://es.wikipedia.org/wiki/Fotos%C3%ADntesis>"));
    }

    #[test]
    fn test_render_without_sources_omits_footer() {
        let mut lesson = sample_lesson();
        lesson.sources.clear();
        assert!(!render_lesson(&lesson).contains("Fuentes Verificadas"));
    }
}
