use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::text_util::single_line;
use super::Element;

/// Deepest section level AsciiDoc renders as a title
const MAX_SECTION_MARKERS: usize = 6;

pub(super) fn headings_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let level = element.tag[1..].parse::<usize>().unwrap_or(1);
    let content = walk_children(element.node, ctx)?;
    let text = single_line(&content);
    if text.is_empty() {
        return Ok(String::new());
    }

    // section titles are not allowed inside table cells or list items
    if ctx.cell_separator.is_some() || !ctx.list_stack.is_empty() {
        return Ok(format!("\n\n*{text}*\n\n"));
    }

    let markers = "=".repeat((level + 1).min(MAX_SECTION_MARKERS));
    Ok(format!("\n\n{markers} {text}\n\n"))
}
