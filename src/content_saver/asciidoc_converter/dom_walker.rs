use markup5ever_rcdom::{Handle, NodeData};

use super::element_handler::{Element, ElementHandlers};
use super::text_util::{compress_whitespace, escape_line_start};
use super::{ConversionError, ConversionOptions, ConversionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Unordered,
    Ordered,
}

/// State threaded through the walk
pub(crate) struct WalkContext<'a> {
    pub(crate) options: &'a ConversionOptions,
    pub(crate) handlers: &'a ElementHandlers,
    pub(crate) depth: usize,
    pub(crate) list_stack: Vec<ListKind>,
    /// Separator of the table cell being rendered, `|` or `!` for nested tables
    pub(crate) cell_separator: Option<char>,
}

impl<'a> WalkContext<'a> {
    pub(crate) fn new(options: &'a ConversionOptions, handlers: &'a ElementHandlers) -> Self {
        Self {
            options,
            handlers,
            depth: 0,
            list_stack: Vec::new(),
            cell_separator: None,
        }
    }

    /// List marker for an item of the innermost list, e.g. `**` or `...`
    pub(crate) fn list_marker(&self) -> String {
        let kind = self.list_stack.last().copied().unwrap_or(ListKind::Unordered);
        let level = self.list_stack.iter().filter(|k| **k == kind).count().max(1);
        let symbol = match kind {
            ListKind::Unordered => "*",
            ListKind::Ordered => ".",
        };
        symbol.repeat(level)
    }
}

pub(crate) fn walk_node(node: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    if ctx.depth >= ctx.options.max_depth {
        return Err(ConversionError::NestingTooDeep(ctx.options.max_depth));
    }
    ctx.depth += 1;
    let result = visit(node, ctx);
    ctx.depth -= 1;
    result
}

fn visit(node: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    match &node.data {
        NodeData::Document => walk_children(node, ctx),
        NodeData::Text { contents } => {
            let text = contents.borrow();
            let text = compress_whitespace(&text);
            Ok(escape_line_start(&text).into_owned())
        }
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs.borrow();
            let element = Element {
                node,
                tag: &name.local,
                attrs: &attrs,
            };
            let handlers = ctx.handlers;
            handlers.handle(&element, ctx)
        }
        NodeData::Comment { .. }
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. } => Ok(String::new()),
    }
}

pub(crate) fn walk_children(node: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let mut buffer = String::new();
    for child in node.children.borrow().iter() {
        let content = walk_node(child, ctx)?;
        push_content(&mut buffer, &content);
    }
    Ok(buffer)
}

/// Append rendered content, dropping spaces that would start a line or double up
fn push_content(buffer: &mut String, content: &str) {
    if buffer.is_empty() || buffer.ends_with(' ') || buffer.ends_with('\n') {
        buffer.push_str(content.trim_start_matches(' '));
    } else {
        buffer.push_str(content);
    }
}
