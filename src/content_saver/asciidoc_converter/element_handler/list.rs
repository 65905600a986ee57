use markup5ever_rcdom::{Handle, NodeData};

use super::super::ConversionResult;
use super::super::dom_walker::{ListKind, WalkContext, walk_children, walk_node};
use super::super::node_util::get_node_tag_name;
use super::super::text_util::{is_list_block, is_paragraph_block, single_line, split_blocks, trim_block};
use super::Element;

pub(super) fn list_handler(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let kind = if element.tag == "ol" {
        ListKind::Ordered
    } else {
        ListKind::Unordered
    };

    ctx.list_stack.push(kind);
    let items = render_items(element.node, ctx);
    ctx.list_stack.pop();

    let items = items?;
    if items.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{}\n\n", items.join("\n")))
}

fn render_items(list: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<Vec<String>> {
    let mut items = Vec::new();
    for child in list.children.borrow().iter() {
        match get_node_tag_name(child) {
            Some("li") => items.push(render_list_item(child, ctx, None)?),
            // a list placed directly inside a list nests under the previous item
            Some("ul" | "ol") => {
                let nested = walk_node(child, ctx)?;
                let nested = nested.trim();
                if !nested.is_empty() {
                    items.push(nested.to_string());
                }
            }
            Some(_) => {
                let content = walk_node(child, ctx)?;
                let text = trim_block(&content);
                if !text.is_empty() {
                    items.push(format!("{} {text}", ctx.list_marker()));
                }
            }
            None => {
                if let NodeData::Text { contents } = &child.data
                    && !contents.borrow().trim().is_empty()
                {
                    let text = single_line(&contents.borrow());
                    items.push(format!("{} {text}", ctx.list_marker()));
                }
            }
        }
    }
    Ok(items)
}

/// Render one item of the innermost list.
///
/// The first paragraph follows the marker. Later blocks are attached with a
/// `+` list continuation; nested lists follow on the next line.
pub(crate) fn render_list_item(
    item: &Handle,
    ctx: &mut WalkContext<'_>,
    checkbox: Option<bool>,
) -> ConversionResult<String> {
    let marker = ctx.list_marker();
    let content = walk_children(item, ctx)?;
    let blocks = split_blocks(trim_block(&content));

    let mut out = marker;
    out.push(' ');
    match checkbox {
        Some(true) => out.push_str("[x] "),
        Some(false) => out.push_str("[ ] "),
        None => {}
    }

    let mut blocks = blocks.into_iter().peekable();
    match blocks.peek() {
        Some(first) if is_paragraph_block(first) => {
            out.push_str(first);
            blocks.next();
        }
        _ => out.push_str("{empty}"),
    }

    for block in blocks {
        if is_list_block(&block) {
            out.push('\n');
        } else {
            out.push_str("\n+\n");
        }
        out.push_str(&block);
    }
    Ok(out)
}

/// `<li>` outside of any list renders as a single bullet
pub(super) fn orphan_list_item_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    if !ctx.list_stack.is_empty() {
        return render_list_item(element.node, ctx, None);
    }
    ctx.list_stack.push(ListKind::Unordered);
    let item = render_list_item(element.node, ctx, None);
    ctx.list_stack.pop();
    Ok(format!("\n\n{}\n\n", item?))
}

pub(super) fn definition_list_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let mut lines: Vec<String> = Vec::new();
    for child in element.node.children.borrow().iter() {
        match get_node_tag_name(child) {
            Some("dt") => {
                let term = single_line(&walk_children(child, ctx)?);
                if !term.is_empty() {
                    lines.push(format!("{term}::"));
                }
            }
            Some("dd") => {
                let content = walk_children(child, ctx)?;
                let blocks = split_blocks(trim_block(&content));
                if blocks.is_empty() {
                    continue;
                }
                if lines.is_empty() {
                    lines.push(blocks.join("\n\n"));
                    continue;
                }
                let last = lines.len() - 1;
                let term_line = &mut lines[last];
                if blocks.len() == 1 && is_paragraph_block(&blocks[0]) && !blocks[0].contains('\n') {
                    term_line.push(' ');
                    term_line.push_str(&blocks[0]);
                } else {
                    term_line.push('\n');
                    term_line.push_str(&blocks.join("\n+\n"));
                }
            }
            _ => {}
        }
    }

    if lines.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{}\n\n", lines.join("\n")))
}
