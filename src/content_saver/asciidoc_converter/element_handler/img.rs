use super::super::ConversionResult;
use super::super::dom_walker::WalkContext;
use super::super::text_util::{encode_target, escape_macro_text};
use super::Element;

pub(super) fn img_handler(element: &Element<'_>, ctx: &mut WalkContext<'_>) -> ConversionResult<String> {
    let Some(src) = element.attr("src").map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(String::new());
    };
    let alt = element
        .attr("alt")
        .or_else(|| element.attr("title"))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    if !ctx.options.preserve_images {
        return Ok(alt);
    }
    Ok(image_macro(src, &alt, element.attr("width")))
}

/// Inline `image:` macro with optional alt text and width
pub(crate) fn image_macro(target: &str, alt: &str, width: Option<&str>) -> String {
    let target = encode_target(target);
    let alt = escape_macro_text(alt);
    // a comma would start the next positional attribute
    let alt = if alt.contains(',') {
        format!("\"{}\"", alt.replace('"', "\\\""))
    } else {
        alt.into_owned()
    };
    match width.map(str::trim).filter(|w| !w.is_empty()) {
        Some(width) => format!("image:{target}[{alt},{width}]"),
        None => format!("image:{target}[{alt}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_macro() {
        assert_eq!(image_macro("diagram.png", "Flow", None), "image:diagram.png[Flow]");
        assert_eq!(image_macro("my pic.png", "", Some("300")), "image:my%20pic.png[,300]");
        assert_eq!(image_macro("a.png", "Step 1, 2", None), "image:a.png[\"Step 1, 2\"]");
    }
}
