//! Turning reply markup into display text.
//!
//! Replies are HTML produced by a model, so they are untrusted. [`sanitize`]
//! rebuilds the fragment keeping only structural and text tags and a few
//! link attributes. [`plain_text`] then drops the remaining tags, because the
//! typewriter reveals characters, not markup. Entities stay escaped, so text
//! that only looked like markup never turns back into markup.

use std::fmt::Write;

use scraper::node::Node;
use scraper::{ElementRef, Html};

const ALLOWED_TAGS: &[&str] = &[
    "p", "strong", "em", "ul", "li", "br", "a", "span", "div", "h1", "h2", "h3", "h4", "h5", "h6",
];

const ALLOWED_ATTRS: &[&str] = &["href", "target", "rel", "style"];

/// Elements removed together with everything inside them. Matches the
/// DOMPurify default; other disallowed elements keep their text.
const DROPPED_WITH_CONTENT: &[&str] = &[
    "annotation-xml", "audio", "colgroup", "desc", "foreignobject", "head", "iframe", "math", "mi",
    "mn", "mo", "ms", "mtext", "noembed", "noframes", "noscript", "plaintext", "script", "style",
    "svg", "template", "thead", "title", "video", "xmp",
];

const UNSAFE_URL_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Reduce `html` to the allow-listed tag and attribute subset.
///
/// Tags outside the allow-list are unwrapped (their text is kept), except
/// the ones in `DROPPED_WITH_CONTENT`, which vanish entirely. Event handler
/// attributes and script URLs never survive.
pub fn sanitize(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

/// `html` with every tag removed. Text is re-escaped the way [`sanitize`]
/// writes it, so `&lt;script&gt;` stays four entities and a tag, not a tag.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for text in Html::parse_fragment(html).root_element().text() {
        escape_into(text, false, &mut out);
    }
    out
}

/// Sanitize reply markup and reduce it to the text shown to the user.
pub fn to_display_text(html: &str) -> String {
    plain_text(&sanitize(html))
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => escape_into(text, false, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROPPED_WITH_CONTENT
        .iter()
        .any(|dropped| dropped.eq_ignore_ascii_case(name))
    {
        return;
    }
    if !ALLOWED_TAGS.contains(&name) {
        write_children(element, out);
        return;
    }

    let mut attrs: Vec<(usize, &str, &str)> = element
        .value()
        .attrs()
        .filter(|(attr, value)| attribute_allowed(attr, value))
        .filter_map(|(attr, value)| {
            let rank = ALLOWED_ATTRS.iter().position(|a| *a == attr)?;
            Some((rank, attr, value))
        })
        .collect();
    attrs.sort_by_key(|(rank, _, _)| *rank);

    out.push('<');
    out.push_str(name);
    for (_, attr, value) in attrs {
        let _ = write!(out, " {attr}=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');

    if name == "br" {
        return;
    }

    write_children(element, out);
    let _ = write!(out, "</{name}>");
}

fn attribute_allowed(attr: &str, value: &str) -> bool {
    if !ALLOWED_ATTRS.contains(&attr) {
        return false;
    }
    if attr == "href" {
        let url: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect::<String>()
            .to_ascii_lowercase();
        return !UNSAFE_URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme));
    }
    true
}

fn escape_into(raw: &str, in_attribute: bool, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}
