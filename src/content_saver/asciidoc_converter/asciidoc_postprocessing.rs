//! Line-based cleanup of the walker output.
//!
//! Handlers emit blocks padded with blank lines and leave whitespace where
//! inline content met block content. The normalizer removes that noise while
//! passing the contents of listing (`----`) and literal (`....`) blocks
//! through untouched.

use super::text_util::{is_delimiter_line, is_list_block};

/// Line comment that keeps two adjacent lists from merging into one
const LIST_SEPARATOR: &str = "//-";

struct AsciidocNormalizer {
    output: String,
    pending_blank: bool,
    verbatim_delimiter: Option<String>,
    previous_block_is_list: bool,
}

impl AsciidocNormalizer {
    fn emit(&mut self, line: &str) {
        if let Some(delimiter) = &self.verbatim_delimiter {
            if line.trim_end() == delimiter {
                self.verbatim_delimiter = None;
            }
            self.write_line(line);
            return;
        }

        let line = line.trim();
        if line.is_empty() {
            self.pending_blank = !self.output.is_empty();
            return;
        }

        if is_delimiter_line(line) && (line.starts_with('-') || line.starts_with('.')) {
            self.verbatim_delimiter = Some(line.to_string());
        }

        if self.pending_blank || self.output.is_empty() {
            let is_list = is_list_block(line);
            if is_list && self.previous_block_is_list {
                self.output.push('\n');
                self.write_line(LIST_SEPARATOR);
            }
            self.previous_block_is_list = is_list;
        }

        if self.pending_blank {
            self.output.push('\n');
            self.pending_blank = false;
        }
        self.write_line(line);
    }

    fn write_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Normalize converted AsciiDoc.
///
/// Runs of blank lines collapse to one and outer blank lines are dropped.
/// A non-empty result ends with exactly one newline.
///
/// ```rust
/// # use confluence_adoc::content_saver::asciidoc_converter::normalize_asciidoc;
/// let raw = "\n\n== Intro   \n\n\n\nHello\n\n";
/// assert_eq!(normalize_asciidoc(raw), "== Intro\n\nHello\n");
/// ```
#[must_use]
pub fn normalize_asciidoc(input: &str) -> String {
    let mut normalizer = AsciidocNormalizer {
        output: String::with_capacity(input.len()),
        pending_blank: false,
        verbatim_delimiter: None,
        previous_block_is_list: false,
    };
    for line in input.lines() {
        normalizer.emit(line);
    }
    let mut output = normalizer.output;
    // an unclosed verbatim block passes trailing blank lines through
    while output.ends_with("\n\n") {
        output.pop();
    }
    output
}
