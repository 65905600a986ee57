use std::rc::{Rc, Weak};

use markup5ever_rcdom::{Handle, Node, NodeData};

/// Restores a node's parent link when dropped.
///
/// `Node::parent` is a `Cell`, so reading it means taking the value out and
/// putting it back afterwards.
struct ParentGuard<'a> {
    node: &'a Rc<Node>,
    value: Option<Weak<Node>>,
}

impl<'a> ParentGuard<'a> {
    fn new(node: &'a Rc<Node>) -> Self {
        let value = node.parent.take();
        Self { node, value }
    }
}

impl Drop for ParentGuard<'_> {
    fn drop(&mut self) {
        self.node.parent.set(self.value.take());
    }
}

pub(crate) fn get_node_tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

pub(crate) fn get_parent_node(node: &Handle) -> Option<Handle> {
    let guard = ParentGuard::new(node);
    guard.value.as_ref()?.upgrade()
}

pub(crate) fn get_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Element children of `node`, skipping text and comments
pub(crate) fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// First descendant named `tag`, searched depth first.
///
/// Does not descend into nested `ac:structured-macro` elements, so a macro's
/// parameters and bodies are never confused with those of a macro inside it.
pub(crate) fn find_macro_part(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        match get_node_tag_name(child) {
            Some(name) if name == tag => return Some(child.clone()),
            Some("ac:structured-macro") => {}
            Some(_) => {
                if let Some(found) = find_macro_part(child, tag) {
                    return Some(found);
                }
            }
            None => {}
        }
    }
    None
}

/// Concatenated text of `node` and its descendants, with `<br>` as a newline
pub(crate) fn text_content(node: &Handle) -> String {
    let mut buffer = String::new();
    collect_text(node, &mut buffer);
    buffer
}

fn collect_text(node: &Handle, buffer: &mut String) {
    match &node.data {
        NodeData::Text { contents } => buffer.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if &*name.local == "br" => buffer.push('\n'),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, buffer);
            }
        }
        _ => {}
    }
}

/// Whether the sibling right before `node` ends with a word character
pub(crate) fn prev_sibling_ends_with_word(node: &Handle) -> bool {
    adjacent_sibling(node, -1)
        .and_then(|sibling| text_content(&sibling).chars().next_back())
        .is_some_and(is_word_char)
}

/// Whether the sibling right after `node` starts with a word character
pub(crate) fn next_sibling_starts_with_word(node: &Handle) -> bool {
    adjacent_sibling(node, 1)
        .and_then(|sibling| text_content(&sibling).chars().next())
        .is_some_and(is_word_char)
}

fn adjacent_sibling(node: &Handle, offset: isize) -> Option<Handle> {
    let parent = get_parent_node(node)?;
    let siblings = parent.children.borrow();
    let index = siblings.iter().position(|sibling| Rc::ptr_eq(sibling, node))?;
    let target = index.checked_add_signed(offset)?;
    siblings.get(target).cloned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::RcDom;

    fn parse(html: &str) -> RcDom {
        parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap()
    }

    fn find_first(node: &Handle, tag: &str) -> Option<Handle> {
        if get_node_tag_name(node) == Some(tag) {
            return Some(node.clone());
        }
        node.children
            .borrow()
            .iter()
            .find_map(|child| find_first(child, tag))
    }

    #[test]
    fn test_parent_link_survives_lookup() {
        let dom = parse("<p><strong>x</strong></p>");
        let strong = find_first(&dom.document, "strong").unwrap();
        let parent = get_parent_node(&strong).unwrap();
        assert_eq!(get_node_tag_name(&parent), Some("p"));
        // second lookup still works because the guard restored the link
        assert!(get_parent_node(&strong).is_some());
    }

    #[test]
    fn test_word_neighbours() {
        let dom = parse("<p>foo<strong>bar</strong> baz</p>");
        let strong = find_first(&dom.document, "strong").unwrap();
        assert!(prev_sibling_ends_with_word(&strong));
        assert!(!next_sibling_starts_with_word(&strong));
    }

    #[test]
    fn test_find_macro_part_skips_nested_macros() {
        let dom = parse(
            "<ac:structured-macro ac:name=\"info\">\
             <ac:rich-text-body><ac:structured-macro ac:name=\"code\">\
             <ac:parameter ac:name=\"title\">inner</ac:parameter>\
             </ac:structured-macro></ac:rich-text-body></ac:structured-macro>",
        );
        let outer = find_first(&dom.document, "ac:structured-macro").unwrap();
        assert!(find_macro_part(&outer, "ac:parameter").is_none());
        assert!(find_macro_part(&outer, "ac:rich-text-body").is_some());
        assert_eq!(get_attr(&outer, "ac:name").as_deref(), Some("info"));
    }

    #[test]
    fn test_text_content_maps_br_to_newline() {
        let dom = parse("<pre>a<br>b</pre>");
        let pre = find_first(&dom.document, "pre").unwrap();
        assert_eq!(text_content(&pre), "a\nb");
    }
}
