use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::text_util::{block_delimiter, trim_block};
use super::Element;

pub(super) fn paragraph_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    let content = trim_block(&content);
    if content.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{content}\n\n"))
}

/// Layout wrappers only group blocks; their children render in place
pub(super) fn container_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    Ok(format!("\n\n{}\n\n", content.trim()))
}

pub(super) fn blockquote_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    let content = trim_block(&content);
    if content.is_empty() {
        return Ok(String::new());
    }
    let delimiter = block_delimiter(content, '_');
    Ok(format!("\n\n{delimiter}\n{content}\n{delimiter}\n\n"))
}

pub(super) fn br_handler(_element: &Element<'_>, _ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    Ok(" +\n".to_string())
}

pub(super) fn hr_handler(_element: &Element<'_>, _ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    Ok("\n\n'''\n\n".to_string())
}

pub(super) fn skip_handler(
    _element: &Element<'_>,
    _ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    Ok(String::new())
}
