//! Confluence storage format to AsciiDoc conversion pipeline
//!
//! 1. Rewrite storage-only constructs (CDATA, self-closing `ac:`/`ri:` elements)
//! 2. Parse the markup into a DOM with html5ever
//! 3. Walk the DOM, rendering each element through its handler
//! 4. Normalize blank lines and whitespace
//!
//! # Usage
//!
//! ```rust
//! # use confluence_adoc::content_saver::asciidoc_converter::{convert_storage_to_asciidoc, ConversionOptions};
//! let storage = "<h2>Install</h2><p>Run <code>make</code> as <strong>root</strong>.</p>";
//! let adoc = convert_storage_to_asciidoc(storage, &ConversionOptions::default())?;
//! assert_eq!(adoc, "=== Install\n\nRun `make` as *root*.\n");
//! # Ok::<(), confluence_adoc::content_saver::asciidoc_converter::ConversionError>(())
//! ```

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;
use thiserror::Error;

pub mod asciidoc_postprocessing;
mod dom_walker;
mod element_handler;
mod node_util;
pub mod storage_preprocessing;
mod text_util;

pub use asciidoc_postprocessing::normalize_asciidoc;
pub use storage_preprocessing::prepare_storage;

use crate::utils::DEFAULT_MAX_NESTING_DEPTH;
use dom_walker::{WalkContext, walk_node};
use element_handler::ElementHandlers;

/// Result type alias for conversions
pub type ConversionResult<T> = Result<T, ConversionError>;

/// A page body that cannot be converted. Scoped to that page.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Failed to parse storage markup: {0}")]
    Parse(#[from] std::io::Error),

    #[error("Element nesting exceeds the limit of {0} levels")]
    NestingTooDeep(usize),
}

/// Options for storage to AsciiDoc conversion
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Render links as AsciiDoc link macros; otherwise keep only their text (default: true)
    pub preserve_links: bool,

    /// Render images as `image:` macros; otherwise keep only their alt text (default: true)
    pub preserve_images: bool,

    /// Deepest element nesting the walker accepts before giving up on a page
    pub max_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            preserve_links: true,
            preserve_images: true,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ConversionOptions {
    /// Text-only mode: strips images and links
    #[must_use]
    pub fn text_only() -> Self {
        Self {
            preserve_links: false,
            preserve_images: false,
            ..Self::default()
        }
    }
}

/// Convert a page body in Confluence storage format to AsciiDoc.
///
/// Returns an empty string for an empty body. A non-empty result ends with a
/// single newline.
///
/// # Errors
///
/// Returns `ConversionError::NestingTooDeep` when the markup nests deeper than
/// `options.max_depth`, and `ConversionError::Parse` if the parser cannot read
/// the input.
pub fn convert_storage_to_asciidoc(
    storage: &str,
    options: &ConversionOptions,
) -> ConversionResult<String> {
    // Stage 1: storage-specific rewrites
    let prepared = prepare_storage(storage);

    // Stage 2: parse
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut prepared.as_bytes())?;

    // Stage 3: walk
    let handlers = ElementHandlers::new();
    let mut ctx = WalkContext::new(options, &handlers);
    let raw = walk_node(&dom.document, &mut ctx)?;

    // Stage 4: normalize
    Ok(normalize_asciidoc(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(storage: &str) -> String {
        convert_storage_to_asciidoc(storage, &ConversionOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("   \n  "), "");
    }

    #[test]
    fn test_headings_and_paragraphs() {
        assert_eq!(
            convert("<h1>Top</h1><p>First</p><h3>Deep</h3><p>Second\n  line</p>"),
            "== Top\n\nFirst\n\n==== Deep\n\nSecond line\n"
        );
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            convert("<p><strong>bold</strong> <em>it</em> <u>under</u> <s>gone</s> x<sup>2</sup></p>"),
            "*bold* _it_ [.underline]#under# [.line-through]#gone# x^2^\n"
        );
    }

    #[test]
    fn test_marks_double_inside_words() {
        assert_eq!(convert("<p>un<strong>believ</strong>able</p>"), "un**believ**able\n");
    }

    #[test]
    fn test_line_break_and_rule() {
        assert_eq!(convert("<p>one<br/>two</p><hr/><p>three</p>"), "one +\ntwo\n\n'''\n\nthree\n");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            convert(r#"<p>See <a href="https://example.com">the site</a> and <img src="https://example.com/a.png" alt="A"/></p>"#),
            "See https://example.com[the site] and image:https://example.com/a.png[A]\n"
        );
    }

    #[test]
    fn test_text_only_drops_links_and_images() {
        let adoc = convert_storage_to_asciidoc(
            r#"<p><a href="https://example.com">site</a> <img src="x.png" alt="pic"/></p>"#,
            &ConversionOptions::text_only(),
        )
        .unwrap();
        assert_eq!(adoc, "site pic\n");
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            convert("<ul><li>one<ul><li>inner</li></ul></li><li>two</li></ul><ol><li>first</li></ol>"),
            "* one\n** inner\n* two\n\n//-\n\n. first\n"
        );
    }

    #[test]
    fn test_list_item_with_paragraphs() {
        assert_eq!(
            convert("<ul><li><p>intro</p><p>detail</p></li></ul>"),
            "* intro\n+\ndetail\n"
        );
    }

    #[test]
    fn test_table_with_header_row() {
        assert_eq!(
            convert("<table><tbody><tr><th>Name</th><th>Value</th></tr><tr><td>a|b</td><td>1</td></tr></tbody></table>"),
            "[cols=\"2*\",options=\"header\"]\n|===\n| Name\n| Value\n\n| a\\|b\n| 1\n|===\n"
        );
    }

    #[test]
    fn test_third_level_table_is_flattened() {
        let storage = "<table><tr><td>outer<table><tr><td>mid<table><tr><td>deep</td><td>x</td></tr><tr><td>y</td></tr></table></td></tr></table></td></tr></table>";
        let adoc = convert(storage);
        assert_eq!(adoc.matches("|===").count(), 2, "{adoc}");
        assert_eq!(adoc.matches("!===").count(), 2, "{adoc}");
        assert!(adoc.contains("! mid\n\ndeep; x +\ny\n"), "{adoc}");
    }

    #[test]
    fn test_code_macro_with_cdata() {
        let storage = r#"<ac:structured-macro ac:name="code"><ac:parameter ac:name="language">Java</ac:parameter><ac:plain-text-body><![CDATA[if (a < b) {
    run();
}]]></ac:plain-text-body></ac:structured-macro>"#;
        assert_eq!(
            convert(storage),
            "[source,java]\n----\nif (a < b) {\n    run();\n}\n----\n"
        );
    }

    #[test]
    fn test_admonition_macro() {
        let storage = r#"<ac:structured-macro ac:name="warning"><ac:parameter ac:name="title">Careful</ac:parameter><ac:rich-text-body><p>Back up first.</p></ac:rich-text-body></ac:structured-macro>"#;
        assert_eq!(convert(storage), "[CAUTION]\n.Careful\n====\nBack up first.\n====\n");
    }

    #[test]
    fn test_expand_macro_is_collapsible() {
        let storage = r#"<ac:structured-macro ac:name="expand"><ac:rich-text-body><p>Hidden</p></ac:rich-text-body></ac:structured-macro>"#;
        assert_eq!(
            convert(storage),
            ".Click here to expand...\n[%collapsible]\n====\nHidden\n====\n"
        );
    }

    #[test]
    fn test_toc_and_status_macros() {
        let storage = r#"<ac:structured-macro ac:name="toc"/><p>State: <ac:structured-macro ac:name="status"><ac:parameter ac:name="title">Done</ac:parameter></ac:structured-macro></p>"#;
        assert_eq!(convert(storage), "toc::[]\n\nState: [.status]#DONE#\n");
    }

    #[test]
    fn test_macro_inside_paragraph_survives_parsing() {
        let storage = r#"<p>Intro <ac:structured-macro ac:name="warning"><ac:rich-text-body><p>careful</p></ac:rich-text-body></ac:structured-macro></p><p>after</p>"#;
        let adoc = convert(storage);
        assert!(adoc.starts_with("Intro\n\n"), "{adoc}");
        assert!(adoc.contains("[CAUTION]\n====\ncareful\n====\n"), "{adoc}");
        assert!(adoc.ends_with("\n\nafter\n"), "{adoc}");
    }

    #[test]
    fn test_delimiter_text_stays_a_paragraph() {
        assert_eq!(
            convert("<p>----</p><p>after</p><p>end</p>"),
            "{empty}----\n\nafter\n\nend\n"
        );
        assert_eq!(convert("<p>== Not a title</p>"), "{empty}== Not a title\n");
    }

    #[test]
    fn test_unknown_macro_keeps_body() {
        let storage = r#"<ac:structured-macro ac:name="excerpt"><ac:rich-text-body><p>Summary</p></ac:rich-text-body></ac:structured-macro>"#;
        assert_eq!(convert(storage), "Summary\n");
    }

    #[test]
    fn test_page_link_and_attachment_image() {
        let storage = r#"<p><ac:link><ri:page ri:content-title="Other Page"/></ac:link> <ac:image ac:alt="chart"><ri:attachment ri:filename="chart.png"/></ac:image></p>"#;
        assert_eq!(convert(storage), "Other Page image:chart.png[chart]\n");
    }

    #[test]
    fn test_task_list() {
        let storage = "<ac:task-list><ac:task><ac:task-id>1</ac:task-id><ac:task-status>complete</ac:task-status><ac:task-body>Write docs</ac:task-body></ac:task><ac:task><ac:task-id>2</ac:task-id><ac:task-status>incomplete</ac:task-status><ac:task-body>Ship</ac:task-body></ac:task></ac:task-list>";
        assert_eq!(convert(storage), "* [x] Write docs\n* [ ] Ship\n");
    }

    #[test]
    fn test_emoticon_dropped() {
        assert_eq!(convert(r#"<p>Nice <ac:emoticon ac:name="smile"/> work</p>"#), "Nice work\n");
    }

    #[test]
    fn test_nesting_limit() {
        let options = ConversionOptions {
            max_depth: 8,
            ..ConversionOptions::default()
        };
        let storage = format!("{}x{}", "<div>".repeat(20), "</div>".repeat(20));
        let err = convert_storage_to_asciidoc(&storage, &options).unwrap_err();
        assert!(matches!(err, ConversionError::NestingTooDeep(8)));
    }
}
