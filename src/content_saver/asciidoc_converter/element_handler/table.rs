use markup5ever_rcdom::Handle;

use super::super::ConversionResult;
use super::super::dom_walker::{WalkContext, walk_children};
use super::super::node_util::{element_children, get_attr, get_node_tag_name};
use super::super::text_util::{is_delimiter_line, is_list_block, single_line, split_blocks, trim_block};
use super::Element;

struct Cell {
    content: String,
    is_header: bool,
    colspan: usize,
    rowspan: usize,
}

impl Cell {
    /// AsciiDoc only renders lists and delimited blocks inside `a` (AsciiDoc) cells
    fn needs_asciidoc_style(&self) -> bool {
        self.content.lines().any(is_delimiter_line)
            || split_blocks(&self.content).iter().any(|block| is_list_block(block))
    }

    fn render(&self, separator: char) -> String {
        let mut spec = String::new();
        if self.colspan > 1 {
            spec.push_str(&self.colspan.to_string());
        }
        if self.rowspan > 1 {
            spec.push('.');
            spec.push_str(&self.rowspan.to_string());
        }
        if !spec.is_empty() {
            spec.push('+');
        }
        if self.needs_asciidoc_style() {
            spec.push('a');
        }

        let escaped = self
            .content
            .replace(separator, &format!("\\{separator}"));
        if escaped.is_empty() {
            format!("{spec}{separator}")
        } else {
            format!("{spec}{separator} {escaped}")
        }
    }
}

struct TableRows {
    caption: Option<String>,
    rows: Vec<Vec<Cell>>,
    header_from_thead: bool,
}

pub(super) fn table_handler(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    // AsciiDoc has no separator below `!`, so tables inside a nested table become text
    if ctx.cell_separator == Some('!') {
        return flattened_table(element, ctx);
    }
    // nested tables use the `!` separator inside an outer cell
    let separator = if ctx.cell_separator.is_some() { '!' } else { '|' };

    let TableRows {
        caption,
        rows,
        header_from_thead,
    } = collect_rows(element.node, ctx, separator)?;
    let Some(first_row) = rows.first() else {
        return Ok(String::new());
    };

    let columns: usize = first_row.iter().map(|cell| cell.colspan).sum();
    let has_header = header_from_thead || first_row.iter().all(|cell| cell.is_header);

    let mut out = String::from("\n\n");
    if let Some(caption) = caption {
        out.push('.');
        out.push_str(&caption);
        out.push('\n');
    }
    if has_header {
        out.push_str(&format!("[cols=\"{columns}*\",options=\"header\"]\n"));
    } else {
        out.push_str(&format!("[cols=\"{columns}*\"]\n"));
    }
    out.push(separator);
    out.push_str("===\n");

    let rendered: Vec<String> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.render(separator))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();
    out.push_str(&rendered.join("\n\n"));

    out.push('\n');
    out.push(separator);
    out.push_str("===\n\n");
    Ok(out)
}

fn collect_rows(table: &Handle, ctx: &mut WalkContext<'_>, separator: char) -> ConversionResult<TableRows> {
    let mut caption = None;
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut header_from_thead = false;

    for child in element_children(table) {
        match get_node_tag_name(&child) {
            Some("caption") => {
                let text = single_line(&walk_children(&child, ctx)?);
                if !text.is_empty() {
                    caption = Some(text);
                }
            }
            Some("tr") => rows.push(render_row(&child, ctx, separator)?),
            Some(section @ ("thead" | "tbody" | "tfoot")) => {
                let in_thead = section == "thead";
                for row in element_children(&child) {
                    if get_node_tag_name(&row) == Some("tr") {
                        header_from_thead |= in_thead && rows.is_empty();
                        rows.push(render_row(&row, ctx, separator)?);
                    }
                }
            }
            _ => {}
        }
    }

    rows.retain(|row| !row.is_empty());
    Ok(TableRows {
        caption,
        rows,
        header_from_thead,
    })
}

/// One line per row, cells joined with `; `
fn flattened_table(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let TableRows { caption, rows, .. } = collect_rows(element.node, ctx, '!')?;
    let mut lines: Vec<String> = caption.into_iter().collect();
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| single_line(&cell.content))
            .filter(|text| !text.is_empty())
            .collect();
        if !cells.is_empty() {
            lines.push(cells.join("; "));
        }
    }
    if lines.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("\n\n{}\n\n", lines.join(" +\n")))
}

fn render_row(row: &Handle, ctx: &mut WalkContext<'_>, separator: char) -> ConversionResult<Vec<Cell>> {
    let mut cells = Vec::new();
    for cell in element_children(row) {
        let is_header = match get_node_tag_name(&cell) {
            Some("th") => true,
            Some("td") => false,
            _ => continue,
        };

        let saved_separator = ctx.cell_separator.replace(separator);
        let saved_lists = std::mem::take(&mut ctx.list_stack);
        let content = walk_children(&cell, ctx);
        ctx.cell_separator = saved_separator;
        ctx.list_stack = saved_lists;

        cells.push(Cell {
            content: trim_block(&content?).to_string(),
            is_header,
            colspan: span_attr(&cell, "colspan"),
            rowspan: span_attr(&cell, "rowspan"),
        });
    }
    Ok(cells)
}

fn span_attr(cell: &Handle, name: &str) -> usize {
    get_attr(cell, name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(content: &str, colspan: usize, rowspan: usize) -> Cell {
        Cell {
            content: content.to_string(),
            is_header: false,
            colspan,
            rowspan,
        }
    }

    #[test]
    fn test_cell_spans_and_escaping() {
        assert_eq!(cell("a|b", 1, 1).render('|'), "| a\\|b");
        assert_eq!(cell("x", 2, 1).render('|'), "2+| x");
        assert_eq!(cell("x", 2, 3).render('|'), "2.3+| x");
        assert_eq!(cell("", 1, 2).render('!'), ".2+!");
    }

    #[test]
    fn test_cell_with_list_uses_asciidoc_style() {
        assert_eq!(cell("* one\n* two", 1, 1).render('|'), "a| * one\n* two");
    }
}
