//! Confluence structured macros (`<ac:structured-macro ac:name="...">`).
//!
//! A macro carries named `<ac:parameter>` children and at most one body:
//! `<ac:plain-text-body>` for verbatim text (code, noformat) or
//! `<ac:rich-text-body>` for nested storage markup (info, panel, expand).

use markup5ever_rcdom::Handle;

use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::node_util::{element_children, get_attr, get_node_tag_name, find_macro_part, text_content};
use super::super::text_util::{block_delimiter, single_line, trim_block};
use super::Element;
use super::code::listing_block;

const DEFAULT_EXPAND_TITLE: &str = "Click here to expand...";

pub(super) fn structured_macro_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let name = element
        .attr("ac:name")
        .map(|name| name.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match name.as_str() {
        "code" => Ok(code_macro(element.node)),
        "noformat" => Ok(noformat_macro(element.node)),
        "info" => admonition_macro(element.node, ctx, "NOTE"),
        "note" => admonition_macro(element.node, ctx, "WARNING"),
        "tip" => admonition_macro(element.node, ctx, "TIP"),
        "warning" => admonition_macro(element.node, ctx, "CAUTION"),
        "panel" => example_macro(element.node, ctx, None, false),
        "expand" => example_macro(element.node, ctx, Some(DEFAULT_EXPAND_TITLE), true),
        "toc" => Ok("\n\ntoc::[]\n\n".to_string()),
        "status" => Ok(status_macro(element.node)),
        "anchor" => Ok(anchor_macro(element.node)),
        "jira" => Ok(parameter(element.node, "key").unwrap_or_default()),
        _ => body_macro(element.node, ctx),
    }
}

/// Text of the `<ac:parameter ac:name="{name}">` child, if present and non-blank
fn parameter(node: &Handle, name: &str) -> Option<String> {
    element_children(node)
        .into_iter()
        .filter(|child| get_node_tag_name(child) == Some("ac:parameter"))
        .find(|child| get_attr(child, "ac:name").as_deref().unwrap_or_default() == name)
        .map(|child| single_line(&text_content(&child)))
        .filter(|value| !value.is_empty())
}

fn plain_text_body(node: &Handle) -> Option<String> {
    find_macro_part(node, "ac:plain-text-body").map(|body| text_content(&body))
}

fn rich_text_body(node: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<Option<String>> {
    match find_macro_part(node, "ac:rich-text-body") {
        Some(body) => {
            let content = walk_children(&body, ctx)?;
            Ok(Some(trim_block(&content).to_string()))
        }
        None => Ok(None),
    }
}

fn code_macro(node: &Handle) -> String {
    let body = plain_text_body(node).unwrap_or_default();
    let code = body.trim_matches('\n').trim_end();
    if code.trim().is_empty() {
        return String::new();
    }
    let language = parameter(node, "language").map(|lang| lang.to_ascii_lowercase());
    let title = parameter(node, "title");
    listing_block(code, language.as_deref(), title.as_deref())
}

fn noformat_macro(node: &Handle) -> String {
    let body = plain_text_body(node).unwrap_or_default();
    let text = body.trim_matches('\n').trim_end();
    if text.trim().is_empty() {
        return String::new();
    }
    let delimiter = block_delimiter(text, '.');
    let title = parameter(node, "title")
        .map(|title| format!(".{title}\n"))
        .unwrap_or_default();
    format!("\n\n{title}{delimiter}\n{text}\n{delimiter}\n\n")
}

fn admonition_macro(node: &Handle, ctx: &mut WalkContext<'_>, kind: &str) -> ConversionResult<String> {
    let body = rich_text_body(node, ctx)?.unwrap_or_default();
    let title = parameter(node, "title");
    if body.is_empty() && title.is_none() {
        return Ok(String::new());
    }

    let delimiter = block_delimiter(&body, '=');
    let mut out = format!("\n\n[{kind}]\n");
    if let Some(title) = title {
        out.push('.');
        out.push_str(&title);
        out.push('\n');
    }
    out.push_str(&format!("{delimiter}\n{body}\n{delimiter}\n\n"));
    Ok(out)
}

fn example_macro(
    node: &Handle,
    ctx: &mut WalkContext<'_>,
    default_title: Option<&str>,
    collapsible: bool,
) -> ConversionResult<String> {
    let body = rich_text_body(node, ctx)?.unwrap_or_default();
    if body.is_empty() {
        return Ok(String::new());
    }
    let title = parameter(node, "title").or_else(|| default_title.map(str::to_string));

    let delimiter = block_delimiter(&body, '=');
    let mut out = String::from("\n\n");
    if let Some(title) = title {
        out.push('.');
        out.push_str(&title);
        out.push('\n');
    }
    if collapsible {
        out.push_str("[%collapsible]\n");
    }
    out.push_str(&format!("{delimiter}\n{body}\n{delimiter}\n\n"));
    Ok(out)
}

fn status_macro(node: &Handle) -> String {
    match parameter(node, "title") {
        Some(title) => format!("[.status]#{}#", title.to_uppercase()),
        None => String::new(),
    }
}

/// The anchor name is the unnamed (`ac:name=""`) parameter
fn anchor_macro(node: &Handle) -> String {
    match parameter(node, "").or_else(|| parameter(node, "anchor")) {
        Some(id) => format!("[[{}]]", id.replace(' ', "-")),
        None => String::new(),
    }
}

/// Macros without a dedicated rendering keep their body content
fn body_macro(node: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    if let Some(body) = rich_text_body(node, ctx)? {
        if body.is_empty() {
            return Ok(String::new());
        }
        return Ok(format!("\n\n{body}\n\n"));
    }
    match plain_text_body(node) {
        Some(text) if !text.trim().is_empty() => {
            let text = text.trim_matches('\n').trim_end();
            let delimiter = block_delimiter(text, '.');
            Ok(format!("\n\n{delimiter}\n{text}\n{delimiter}\n\n"))
        }
        _ => Ok(String::new()),
    }
}
