use super::super::ConversionResult;
use super::super::dom_walker::WalkContext;
use super::super::node_util::{
    get_attr, get_node_tag_name, next_sibling_starts_with_word, prev_sibling_ends_with_word,
    text_content,
};
use super::super::text_util::{block_delimiter, compress_whitespace};
use super::Element;

/// Characters that would be read as markup inside a monospace span
const INLINE_MARKUP_CHARS: [char; 9] = ['`', '*', '_', '#', '^', '~', '+', '{', '['];

pub(super) fn code_handler(element: &Element<'_>, _ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let raw = text_content(element.node);
    let text = compress_whitespace(&raw);
    let text = text.trim();
    if text.is_empty() {
        return Ok(String::new());
    }

    let glued =
        prev_sibling_ends_with_word(element.node) || next_sibling_starts_with_word(element.node);
    let mark = if glued { "``" } else { "`" };
    if text.contains(INLINE_MARKUP_CHARS) {
        Ok(format!("{mark}+{text}+{mark}"))
    } else {
        Ok(format!("{mark}{text}{mark}"))
    }
}

pub(super) fn pre_handler(element: &Element<'_>, _ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let raw = text_content(element.node);
    let code = raw.trim_matches('\n').trim_end();
    if code.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(listing_block(code, language_of(element).as_deref(), None))
}

/// Render a `----` listing block, with a `[source,lang]` line when the language is known
pub(super) fn listing_block(code: &str, language: Option<&str>, title: Option<&str>) -> String {
    let delimiter = block_delimiter(code, '-');
    let mut out = String::from("\n\n");
    if let Some(title) = title {
        out.push('.');
        out.push_str(title);
        out.push('\n');
    }
    if let Some(language) = language {
        out.push_str("[source,");
        out.push_str(language);
        out.push_str("]\n");
    }
    out.push_str(&delimiter);
    out.push('\n');
    out.push_str(code);
    out.push('\n');
    out.push_str(&delimiter);
    out.push_str("\n\n");
    out
}

/// Language hint from `data-language`, or a `language-*`/`lang-*` class on the
/// element or its `<code>` child
fn language_of(element: &Element<'_>) -> Option<String> {
    if let Some(language) = element.attr("data-language").and_then(language_token) {
        return Some(language);
    }
    if let Some(language) = element.attr("class").and_then(language_from_class) {
        return Some(language);
    }
    element
        .node
        .children
        .borrow()
        .iter()
        .filter(|child| get_node_tag_name(child) == Some("code"))
        .find_map(|code| get_attr(code, "class").as_deref().and_then(language_from_class))
}

fn language_from_class(class: &str) -> Option<String> {
    class.split_whitespace().find_map(|token| {
        token
            .strip_prefix("language-")
            .or_else(|| token.strip_prefix("lang-"))
            .and_then(language_token)
    })
}

fn language_token(value: &str) -> Option<String> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.'));
    valid.then(|| value.to_ascii_lowercase())
}
