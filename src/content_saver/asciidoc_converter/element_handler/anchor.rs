use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::text_util::{encode_target, escape_macro_text, single_line};
use super::Element;

/// URL schemes AsciiDoc autolinks without the `link:` macro
const AUTOLINK_SCHEMES: [&str; 5] = ["http://", "https://", "ftp://", "irc://", "mailto:"];

pub(super) fn anchor_handler(
    element: &Element<'_>,
    ctx: &mut WalkContext<'_>,
) -> ConversionResult<String> {
    let content = walk_children(element.node, ctx)?;
    let text = single_line(&content);
    let href = element.attr("href").map(str::trim).unwrap_or_default();

    if href.is_empty() {
        // named anchor without a target
        let id = element.attr("id").or_else(|| element.attr("name"));
        return Ok(match id {
            Some(id) if !id.trim().is_empty() => format!("[[{}]]{text}", id.trim()),
            _ => text,
        });
    }

    if !ctx.options.preserve_links {
        return Ok(text);
    }

    Ok(format_link(href, &text))
}

/// Render `href` with link text in the form AsciiDoc expects for its scheme
pub(crate) fn format_link(href: &str, text: &str) -> String {
    if let Some(fragment) = href.strip_prefix('#') {
        return if text.is_empty() || text == fragment {
            format!("<<{fragment}>>")
        } else {
            format!("<<{fragment},{text}>>")
        };
    }

    let target = encode_target(href);
    let text = escape_macro_text(text);
    let autolink = AUTOLINK_SCHEMES
        .iter()
        .any(|scheme| href.to_ascii_lowercase().starts_with(scheme));

    match (autolink, text.is_empty() || text == href) {
        (true, true) if href.starts_with("mailto:") => format!("{target}[]"),
        (true, true) => target.into_owned(),
        (true, false) => format!("{target}[{text}]"),
        (false, true) => format!("link:{target}[]"),
        (false, false) => format!("link:{target}[{text}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_link() {
        assert_eq!(
            format_link("https://example.com/docs", "the docs"),
            "https://example.com/docs[the docs]"
        );
        assert_eq!(format_link("https://example.com", "https://example.com"), "https://example.com");
    }

    #[test]
    fn test_internal_and_relative_links() {
        assert_eq!(format_link("#setup", "Setup"), "<<setup,Setup>>");
        assert_eq!(format_link("#setup", ""), "<<setup>>");
        assert_eq!(format_link("/wiki/a b", "page"), "link:/wiki/a%20b[page]");
    }

    #[test]
    fn test_mail_link_and_escaping() {
        assert_eq!(format_link("mailto:ops@example.com", ""), "mailto:ops@example.com[]");
        assert_eq!(format_link("https://x.io", "a [b]"), "https://x.io[a [b\\]]");
    }
}
