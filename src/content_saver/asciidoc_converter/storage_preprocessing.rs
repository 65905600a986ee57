//! Rewrites of Confluence storage markup that the HTML parser would otherwise misread.
//!
//! Storage format is XHTML with `ac:` and `ri:` namespaced elements. An HTML
//! parser treats `<![CDATA[...]]>` as a bogus comment ending at the first `>`
//! and ignores the self-closing slash on non-void elements, so both are
//! rewritten into plain HTML before parsing.
//!
//! The HTML tree builder also closes an open `<p>` whenever a block element
//! or another `<p>` starts, which tears apart macros placed inside a
//! paragraph. Paragraphs are renamed to [`PARAGRAPH_ELEMENT`], which the
//! parser nests exactly as written.

use html_escape::encode_text;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static CDATA_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("CDATA_SECTION: hardcoded regex is valid")
});

/// `<ac:image ... />`, `<ri:page ... />`, `<time ... />` with quoted attribute values
static SELF_CLOSING_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<((?:ac|ri):[A-Za-z0-9_-]+|time)((?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'))?)*)\s*/>"#,
    )
    .expect("SELF_CLOSING_ELEMENT: hardcoded regex is valid")
});

static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p(?:\s[^>]*)?/>").expect("EMPTY_PARAGRAPH: hardcoded regex is valid")
});

static PARAGRAPH_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)p(\s[^>]*)?>").expect("PARAGRAPH_TAG: hardcoded regex is valid")
});

/// Name paragraphs carry through parsing; converted like `p`
pub const PARAGRAPH_ELEMENT: &str = "storage-p";

/// Prepare storage markup for the HTML parser
#[must_use]
pub fn prepare_storage(storage: &str) -> String {
    let text = expand_cdata(storage);
    let text = expand_self_closing(&text);
    rename_paragraphs(&text)
}

/// Replace CDATA sections with their entity-encoded text
fn expand_cdata(storage: &str) -> Cow<'_, str> {
    CDATA_SECTION.replace_all(storage, |caps: &Captures| encode_text(&caps[1]).into_owned())
}

/// Turn self-closing namespaced elements into explicit open/close pairs
fn expand_self_closing(storage: &str) -> Cow<'_, str> {
    SELF_CLOSING_ELEMENT.replace_all(storage, "<$1$2></$1>")
}

/// Drop empty `<p/>` and rename the remaining paragraph tags
fn rename_paragraphs(storage: &str) -> String {
    let without_empty = EMPTY_PARAGRAPH.replace_all(storage, "");
    let replacement = format!("<${{1}}{PARAGRAPH_ELEMENT}${{2}}>");
    PARAGRAPH_TAG
        .replace_all(&without_empty, replacement.as_str())
        .into_owned()
}
