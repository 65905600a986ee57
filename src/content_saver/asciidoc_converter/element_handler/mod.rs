mod anchor;
mod block;
mod code;
mod confluence_links;
mod emphasis;
mod headings;
mod img;
mod list;
mod macros;
mod table;

use html5ever::Attribute;
use markup5ever_rcdom::Handle;
use std::collections::HashMap;

use super::ConversionResult;
use super::dom_walker::{WalkContext, walk_children};
use super::storage_preprocessing::PARAGRAPH_ELEMENT;

use anchor::anchor_handler;
use block::{
    blockquote_handler, br_handler, container_handler, hr_handler, paragraph_handler, skip_handler,
};
use code::{code_handler, pre_handler};
use confluence_links::{
    confluence_image_handler, confluence_link_handler, task_list_handler, time_handler,
};
use emphasis::{
    bold_handler, highlight_handler, italic_handler, line_through_handler, subscript_handler,
    superscript_handler, underline_handler,
};
use headings::headings_handler;
use img::img_handler;
use list::{definition_list_handler, list_handler, orphan_list_item_handler};
use macros::structured_macro_handler;
use table::table_handler;

/// An element being converted
pub(crate) struct Element<'a> {
    pub(crate) node: &'a Handle,
    pub(crate) tag: &'a str,
    pub(crate) attrs: &'a [Attribute],
}

impl Element<'_> {
    /// Value of the attribute named `name`, e.g. `href` or `ac:name`
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| &*attr.value)
    }
}

/// Converts one kind of element to AsciiDoc
pub(crate) trait ElementHandler {
    fn handle(&self, element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String>;
}

impl<F> ElementHandler for F
where
    F: Fn(&Element<'_>, &mut WalkContext<'_>) -> ConversionResult<String>,
{
    fn handle(&self, element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
        self(element, ctx)
    }
}

/// Builtin element handlers
pub(crate) struct ElementHandlers {
    tag_to_handler: HashMap<&'static str, Box<dyn ElementHandler>>,
}

impl ElementHandlers {
    pub(crate) fn new() -> Self {
        let mut handlers = Self {
            tag_to_handler: HashMap::new(),
        };

        handlers.add_handler(&["h1", "h2", "h3", "h4", "h5", "h6"], headings_handler);
        handlers.add_handler(
            &[
                "p", PARAGRAPH_ELEMENT, "div", "section", "article", "main", "header", "footer", "aside", "nav",
                "figure", "center", "address",
            ],
            paragraph_handler,
        );
        handlers.add_handler(
            &["ac:layout", "ac:layout-section", "ac:layout-cell"],
            container_handler,
        );
        handlers.add_handler(&["blockquote"], blockquote_handler);
        handlers.add_handler(&["br"], br_handler);
        handlers.add_handler(&["hr"], hr_handler);

        handlers.add_handler(&["strong", "b"], bold_handler);
        handlers.add_handler(&["em", "i", "cite", "dfn"], italic_handler);
        handlers.add_handler(&["u", "ins"], underline_handler);
        handlers.add_handler(&["s", "del", "strike"], line_through_handler);
        handlers.add_handler(&["sup"], superscript_handler);
        handlers.add_handler(&["sub"], subscript_handler);
        handlers.add_handler(&["mark"], highlight_handler);

        handlers.add_handler(&["code", "tt", "kbd", "samp"], code_handler);
        handlers.add_handler(&["pre"], pre_handler);
        handlers.add_handler(&["a"], anchor_handler);
        handlers.add_handler(&["img"], img_handler);

        handlers.add_handler(&["ul", "ol"], list_handler);
        handlers.add_handler(&["li"], orphan_list_item_handler);
        handlers.add_handler(&["dl"], definition_list_handler);
        handlers.add_handler(&["table"], table_handler);

        handlers.add_handler(&["ac:structured-macro", "ac:macro"], structured_macro_handler);
        handlers.add_handler(&["ac:link"], confluence_link_handler);
        handlers.add_handler(&["ac:image"], confluence_image_handler);
        handlers.add_handler(&["ac:task-list"], task_list_handler);
        handlers.add_handler(&["time"], time_handler);

        handlers.add_handler(
            &[
                "head", "title", "script", "style", "meta", "link", "noscript", "template",
                "ac:parameter", "ac:placeholder", "ac:emoticon",
            ],
            skip_handler,
        );

        handlers
    }

    pub(crate) fn add_handler<Handler>(&mut self, tags: &[&'static str], handler: Handler)
    where
        Handler: ElementHandler + Clone + 'static,
    {
        for tag in tags {
            self.tag_to_handler.insert(*tag, Box::new(handler.clone()));
        }
    }

    pub(crate) fn handle(
        &self,
        element: &Element<'_>,
        ctx: &mut WalkContext<'_>,
    ) -> ConversionResult<String> {
        match self.tag_to_handler.get(element.tag) {
            Some(handler) => handler.handle(element, ctx),
            // resource identifiers carry data for their enclosing ac: element
            None if element.tag.starts_with("ri:") => Ok(String::new()),
            None => walk_children(element.node, ctx),
        }
    }
}
