//! small helpers for re-emitting XML elements read through roxmltree.
//! roxmltree is read-only, so documents that are filtered or merged are
//! written back out through these routines with tab indentation matching
//! the rest of the generated artifacts.

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// escapes a string for use as an XML attribute value (double-quoted).
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// re-serializes an element subtree at the given indentation depth,
/// appending to `out`. attribute order follows document order. elements
/// with no element children and no non-whitespace text are self-closed.
pub fn serialize_element(node: roxmltree::Node, out: &mut String, depth: usize) {
    let indent = "\t".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(node.tag_name().name());
    for attribute in node.attributes() {
        out.push(' ');
        out.push_str(attribute.name());
        out.push_str("=\"");
        out.push_str(&escape_attr(attribute.value()));
        out.push('"');
    }

    let element_children: Vec<roxmltree::Node> =
        node.children().filter(|c| c.is_element()).collect();
    let inline_text = node
        .children()
        .filter_map(|c| if c.is_text() { c.text() } else { None })
        .map(|t| t.trim())
        .find(|t| !t.is_empty());

    match (element_children.is_empty(), inline_text) {
        (true, None) => {
            out.push_str("/>\n");
        }
        (true, Some(text)) => {
            out.push('>');
            out.push_str(&escape_attr(text));
            out.push_str("</");
            out.push_str(node.tag_name().name());
            out.push_str(">\n");
        }
        (false, _) => {
            out.push_str(">\n");
            for child in element_children {
                serialize_element(child, out, depth + 1);
            }
            out.push_str(&indent);
            out.push_str("</");
            out.push_str(node.tag_name().name());
            out.push_str(">\n");
        }
    }
}
