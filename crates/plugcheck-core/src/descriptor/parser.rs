use roxmltree::ParsingOptions;

use crate::descriptor::element::{append_text, Element, IncludeDirective, Node};
use crate::kernel::constants::{FALLBACK_TAG, INCLUDE_TAG, XINCLUDE_NAMESPACE, XML_PARSE_MODE};
use crate::kernel::error::{Error, Result};

/// Parse raw descriptor bytes into an element tree.
///
/// `document` names the source in error messages. Comments and processing
/// instructions are dropped, text around them is joined.
pub fn parse_document(bytes: &[u8], document: &str) -> Result<Element> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::parse(document, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| Error::parse(document, e))?;
    Ok(convert_element(xml.root_element()))
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag_name = node.tag_name();
    let attributes = node
        .attributes()
        .map(|a| {
            let key = match a.namespace() {
                Some(ns) => format!("{{{}}}{}", ns, a.name()),
                None => a.name().to_string(),
            };
            (key, a.value().to_string())
        })
        .collect();

    let mut text = None;
    let mut children: Vec<Node> = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert_node(child));
        } else if child.is_text() {
            let chunk = child.text().unwrap_or_default();
            match children.last_mut() {
                Some(previous) => previous.append_tail(chunk),
                None => append_text(&mut text, chunk),
            }
        }
    }

    Element {
        tag: tag_name.name().to_string(),
        namespace: tag_name.namespace().map(str::to_string),
        attributes,
        children,
        text,
        tail: None,
    }
}

fn convert_node(node: roxmltree::Node<'_, '_>) -> Node {
    if is_xinclude(node, INCLUDE_TAG) {
        Node::Include(IncludeDirective {
            href: node.attribute("href").map(str::to_string),
            parse: node.attribute("parse").unwrap_or(XML_PARSE_MODE).to_string(),
            xpointer: node.attribute("xpointer").map(str::to_string),
            fallback: node.children().any(|c| is_xinclude(c, FALLBACK_TAG)),
            tail: None,
        })
    } else {
        Node::Element(convert_element(node))
    }
}

fn is_xinclude(node: roxmltree::Node<'_, '_>, tag: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XINCLUDE_NAMESPACE)
        && node.tag_name().name() == tag
}
