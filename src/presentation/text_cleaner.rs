//! 去除 Markdown 强调标记
//!
//! 模型偶尔不遵守"不要使用 Markdown"的要求，展示前统一清理

/// 按顺序删除的标记
const MARKDOWN_MARKERS: [&str; 4] = ["**", "*", "##", "__"];

/// 删除文本中所有的 `**`、`*`、`##`、`__`
///
/// 删除一种标记可能拼出另一种（如 `#__#` 变成 `##`），所以重复执行直到不再变化
pub fn clean_text(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    MARKDOWN_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
}
