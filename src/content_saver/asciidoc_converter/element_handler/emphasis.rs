use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::node_util::{next_sibling_starts_with_word, prev_sibling_ends_with_word};
use super::Element;

pub(super) fn bold_handler(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    wrap_inline(element, ctx, "", "*")
}

pub(super) fn italic_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_inline(element, ctx, "", "_")
}

pub(super) fn underline_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_inline(element, ctx, "[.underline]", "#")
}

pub(super) fn line_through_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_inline(element, ctx, "[.line-through]", "#")
}

pub(super) fn highlight_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_inline(element, ctx, "", "#")
}

pub(super) fn superscript_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_unconstrained(element, ctx, "^")
}

pub(super) fn subscript_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    wrap_unconstrained(element, ctx, "~")
}

/// Wrap inline content in formatting marks.
///
/// Constrained marks (`*bold*`) only apply at word boundaries; when the element
/// is glued to a neighbouring word the doubled, unconstrained form is used.
fn wrap_inline(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
    role: &str,
    mark: &str,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    let inner = content.trim();
    if inner.is_empty() {
        return Ok(content);
    }

    let (leading, trailing) = outer_spaces(&content);
    let glued = (leading.is_empty() && prev_sibling_ends_with_word(element.node))
        || (trailing.is_empty() && next_sibling_starts_with_word(element.node));
    let mark = if glued { mark.repeat(2) } else { mark.to_string() };

    Ok(format!("{leading}{role}{mark}{inner}{mark}{trailing}"))
}

fn wrap_unconstrained(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
    mark: &str,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    let inner = content.trim();
    if inner.is_empty() {
        return Ok(content);
    }
    let (leading, trailing) = outer_spaces(&content);
    Ok(format!("{leading}{mark}{inner}{mark}{trailing}"))
}

/// Whitespace around inline content moves outside the formatting marks
fn outer_spaces(content: &str) -> (&'static str, &'static str) {
    let leading = if content.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if content.ends_with(char::is_whitespace) { " " } else { "" };
    (leading, trailing)
}
