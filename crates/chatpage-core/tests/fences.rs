use chatpage_core::fences::strip_code_fences;

#[test]
fn html_fence_is_unwrapped() {
    let raw = "```html\n<p>Hi there!</p>\n```";
    assert_eq!(strip_code_fences(raw), "<p>Hi there!</p>");
}

#[test]
fn untagged_fence_is_unwrapped() {
    let raw = "  ```\n<ul><li>one</li></ul>\n```  \n";
    assert_eq!(strip_code_fences(raw), "<ul><li>one</li></ul>");
}

#[test]
fn multiple_fenced_blocks_are_all_unwrapped() {
    let raw = "```html\n<p>a</p>\n```\n```\n<p>b</p>\n```";
    let cleaned = strip_code_fences(raw);
    assert!(!cleaned.contains("```"));
    assert!(cleaned.contains("<p>a</p>"));
    assert!(cleaned.contains("<p>b</p>"));
}

#[test]
fn clean_text_is_only_trimmed() {
    assert_eq!(strip_code_fences("\n  <p>plain</p>\t"), "<p>plain</p>");
}

#[test]
fn cleaning_is_idempotent() {
    let inputs = [
        "```html\n<h1>Title</h1>\n```",
        "```<em>x</em>```",
        "<p>already clean</p>",
        "",
    ];
    for input in inputs {
        let once = strip_code_fences(input);
        assert_eq!(strip_code_fences(&once), once, "input: {input:?}");
    }
}

#[test]
fn unpaired_fence_is_left_alone() {
    assert_eq!(strip_code_fences("```html <p>x</p>"), "```html <p>x</p>");
}
