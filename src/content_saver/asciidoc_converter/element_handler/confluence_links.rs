use markup5ever_rcdom::Handle;

use super::super::ConversionResult;
use super::super::dom_walker::{ListKind, WalkContext, walk_children};
use super::super::node_util::{element_children, get_attr, get_node_tag_name, find_macro_part, text_content};
use super::super::text_util::{escape_macro_text, single_line};
use super::Element;
use super::anchor::format_link;
use super::img::image_macro;
use super::list::render_list_item;

/// `<ac:link>` to a page, attachment, user, URL or anchor.
///
/// Links to other pages render as their link text: the exported file name of
/// the target depends on the naming mode and on whether it was exported at all.
pub(super) fn confluence_link_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let text = match find_macro_part(element.node, "ac:link-body") {
        Some(body) => single_line(&walk_children(&body, ctx)?),
        None => find_macro_part(element.node, "ac:plain-text-link-body")
            .map(|body| single_line(&text_content(&body)))
            .unwrap_or_default(),
    };
    let anchor = element.attr("ac:anchor").map(str::trim).filter(|a| !a.is_empty());

    if let Some(page) = find_macro_part(element.node, "ri:page") {
        return Ok(non_empty(text)
            .or_else(|| get_attr(&page, "ri:content-title"))
            .unwrap_or_default());
    }

    if let Some(attachment) = find_macro_part(element.node, "ri:attachment") {
        let filename = get_attr(&attachment, "ri:filename").unwrap_or_default();
        if !ctx.options.preserve_links || filename.is_empty() {
            return Ok(non_empty(text).unwrap_or(filename));
        }
        return Ok(format_link(&filename, &text));
    }

    if let Some(url) = find_macro_part(element.node, "ri:url") {
        let href = get_attr(&url, "ri:value").unwrap_or_default();
        if !ctx.options.preserve_links || href.is_empty() {
            return Ok(non_empty(text).unwrap_or(href));
        }
        return Ok(format_link(&href, &text));
    }

    if let Some(user) = find_macro_part(element.node, "ri:user") {
        let handle = ["ri:username", "ri:userkey", "ri:account-id"]
            .iter()
            .find_map(|attr| get_attr(&user, attr))
            .map(|id| format!("@{id}"));
        return Ok(non_empty(text).or(handle).unwrap_or_default());
    }

    if let Some(space) = find_macro_part(element.node, "ri:space") {
        return Ok(non_empty(text)
            .or_else(|| get_attr(&space, "ri:space-key"))
            .unwrap_or_default());
    }

    match anchor {
        Some(anchor) if ctx.options.preserve_links => Ok(format_link(&format!("#{anchor}"), &text)),
        _ => Ok(text),
    }
}

/// `<ac:image>` with an attachment or external URL source
pub(super) fn confluence_image_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let alt = element
        .attr("ac:alt")
        .or_else(|| element.attr("ac:title"))
        .map(single_line)
        .unwrap_or_default();

    let target = find_macro_part(element.node, "ri:attachment")
        .and_then(|attachment| get_attr(&attachment, "ri:filename"))
        .or_else(|| {
            find_macro_part(element.node, "ri:url").and_then(|url| get_attr(&url, "ri:value"))
        })
        .filter(|target| !target.trim().is_empty());

    match target {
        Some(target) if ctx.options.preserve_images => {
            Ok(image_macro(target.trim(), &alt, element.attr("ac:width")))
        }
        _ => Ok(escape_macro_text(&alt).into_owned()),
    }
}

/// `<ac:task-list>` renders as a checklist
pub(super) fn task_list_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    ctx.list_stack.push(ListKind::Unordered);
    let items = render_tasks(element.node, ctx);
    ctx.list_stack.pop();

    let items = items?;
    if items.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{}\n\n", items.join("\n")))
}

fn render_tasks(list: &Handle, ctx: &mut WalkContext<'_>) -> ConversionResult<Vec<String>> {
    let mut items = Vec::new();
    for task in element_children(list) {
        if get_node_tag_name(&task) != Some("ac:task") {
            continue;
        }
        let done = find_macro_part(&task, "ac:task-status")
            .is_some_and(|status| text_content(&status).trim() == "complete");
        if let Some(body) = find_macro_part(&task, "ac:task-body") {
            items.push(render_list_item(&body, ctx, Some(done))?);
        }
    }
    Ok(items)
}

/// `<time datetime="...">` dates
pub(super) fn time_handler(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    match element.attr("datetime").map(str::trim).filter(|d| !d.is_empty()) {
        Some(datetime) => Ok(datetime.to_string()),
        None => walk_children(element.node, ctx),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
