//! Header label normalization.

use std::sync::LazyLock;

use regex::Regex;

/// `<br>`, `<br/>`, `<br />` in any case, plus literal line breaks, together
/// with the whitespace around them.
static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:<br\s*/?>|\r?\n)\s*").unwrap());

/// Normalizes a rendered header label for comparison.
///
/// Line-break markup becomes a single space and the result is trimmed, so
/// `" 残業<br />時間 "` compares as `"残業 時間"`.
pub fn normalize_header_label(label: &str) -> String {
    LINE_BREAK_RE.replace_all(label, " ").trim().to_string()
}

/// Removes line-break markup entirely, so `"労働<br>合計"` compares as
/// `"労働合計"`.
pub fn collapse_header_label(label: &str) -> String {
    LINE_BREAK_RE.replace_all(label, "").trim().to_string()
}
