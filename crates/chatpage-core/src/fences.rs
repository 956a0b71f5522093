//! Removal of Markdown code fences the model sometimes wraps HTML in,
//! despite being told not to.

use std::sync::LazyLock;

use regex::Regex;

static HTML_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```html\s*([\s\S]*?)\s*```").unwrap_or_else(|e| panic!("invalid fence regex: {e}"))
});

static PLAIN_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```\s*([\s\S]*?)\s*```").unwrap_or_else(|e| panic!("invalid fence regex: {e}"))
});

/// Unwrap every ```` ```html ```` fenced block, then every untagged fenced
/// block, and trim the result.
///
/// Text without fences only gets trimmed, so applying this twice is the
/// same as applying it once.
pub fn strip_code_fences(text: &str) -> String {
    let unwrapped = HTML_FENCE.replace_all(text, "$1");
    let unwrapped = PLAIN_FENCE.replace_all(&unwrapped, "$1");
    unwrapped.trim().to_string()
}
