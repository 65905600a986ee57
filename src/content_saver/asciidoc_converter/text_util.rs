use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Lines that open and close delimited blocks
const BLOCK_DELIMITERS: [char; 5] = ['-', '.', '_', '=', '*'];

/// Text that starts a line as a section title (`== Title`)
static SECTION_TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^=+\s").expect("SECTION_TITLE_LINE: hardcoded regex is valid")
});

static LIST_ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*+|\.+) \S|^[^\s].*?::(?: |$)")
        .expect("LIST_ITEM_LINE: hardcoded regex is valid")
});

/// Collapse every run of whitespace into a single space
pub(crate) fn compress_whitespace(text: &str) -> Cow<'_, str> {
    let needs_work = text
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0].is_ascii_whitespace() && pair[1].is_ascii_whitespace())
        || text.contains(['\n', '\t', '\r']);
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_whitespace {
                result.push(' ');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }
    Cow::Owned(result)
}

/// Flatten content onto one line, dropping hard line breaks
pub(crate) fn single_line(content: &str) -> String {
    content
        .replace(" +\n", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim surrounding whitespace and dangling hard line break markers
pub(crate) fn trim_block(content: &str) -> &str {
    let mut s = content.trim();
    loop {
        if let Some(rest) = s.strip_suffix('+')
            && (rest.is_empty() || rest.ends_with(char::is_whitespace))
        {
            s = rest.trim_end();
            continue;
        }
        if let Some(rest) = s.strip_prefix('+')
            && (rest.is_empty() || rest.starts_with('\n'))
        {
            s = rest.trim_start();
            continue;
        }
        return s;
    }
}

/// A delimiter line is four or more of the same block character, or a table fence
pub(crate) fn is_delimiter_line(line: &str) -> bool {
    let line = line.trim_end();
    if line == "|===" || line == "!===" {
        return true;
    }
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if BLOCK_DELIMITERS.contains(&first) => {
            line.len() >= 4 && line.chars().all(|c| c == first)
        }
        _ => false,
    }
}

/// Prefix `{empty}` to page text that AsciiDoc would read as structure at the
/// start of a line: block delimiters, breaks, `//` comments and `=` titles
///
/// Text nodes hold no newlines after whitespace compression, so one prefix
/// covers the only line start the text can occupy.
pub(crate) fn escape_line_start(text: &str) -> Cow<'_, str> {
    let body = text.trim_start();
    let line = body.trim_end();
    let structural = is_delimiter_line(line)
        || (line.len() >= 4 && line.chars().all(|c| c == '+'))
        || line == "'''"
        || body.starts_with("//")
        || SECTION_TITLE_LINE.is_match(body);
    if !structural {
        return Cow::Borrowed(text);
    }
    let indent = &text[..text.len() - body.len()];
    Cow::Owned(format!("{indent}{{empty}}{body}"))
}

/// Shortest run of `ch` (at least four) that does not appear as a line of `content`
pub(crate) fn block_delimiter(content: &str, ch: char) -> String {
    let mut delimiter = ch.to_string().repeat(4);
    while content.lines().any(|line| line.trim_end() == delimiter) {
        delimiter.push(ch);
    }
    delimiter
}

/// Split rendered content into blocks at blank lines outside delimited blocks
pub(crate) fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut open_delimiter: Option<&str> = None;

    for line in content.lines() {
        if let Some(open) = open_delimiter {
            current.push(line);
            if line.trim_end() == open {
                open_delimiter = None;
            }
            continue;
        }
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        if is_delimiter_line(line) {
            open_delimiter = Some(line.trim_end());
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Whether a rendered block starts with a list item
pub(crate) fn is_list_block(block: &str) -> bool {
    block.lines().next().is_some_and(|line| LIST_ITEM_LINE.is_match(line))
}

/// Whether a rendered block is plain paragraph text that can follow a list marker
pub(crate) fn is_paragraph_block(block: &str) -> bool {
    let Some(first) = block.lines().next() else {
        return false;
    };
    let first = first.trim_end();
    let attribute_line = first.starts_with('[') && first.ends_with(']');
    let title_line = first.starts_with('.') && !first.starts_with(". ") && !first.starts_with("..");
    !(is_delimiter_line(first)
        || attribute_line
        || title_line
        || first.starts_with('=')
        || first.starts_with("image::")
        || first.starts_with("toc::")
        || is_list_block(block))
}

/// Escape `]` so text can sit inside a macro's attribute list
pub(crate) fn escape_macro_text(text: &str) -> Cow<'_, str> {
    if text.contains(']') {
        Cow::Owned(text.replace(']', "\\]"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Macro targets end at the first space; encode spaces so the target stays whole
pub(crate) fn encode_target(target: &str) -> Cow<'_, str> {
    if target.contains(' ') {
        Cow::Owned(target.replace(' ', "%20"))
    } else {
        Cow::Borrowed(target)
    }
}
