//! Conversion of a parsed document into a mutable tree and back to text

use roxmltree::Node;
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::element_builder::Builder;
use crate::error::NormalizeError;

const XML_PREFIX: &str = "xml";

/// Copies an element subtree. Whitespace-only text, comments and processing
/// instructions are dropped; namespace declarations are kept where they
/// first come into scope.
pub fn from_node(node: Node<'_, '_>) -> Element {
  let name = node.tag_name();
  let mut builder = Element::builder(name.name())
    .namespace(name.namespace())
    .prefix(name.namespace().and_then(|uri| node.lookup_prefix(uri)));

  let parent = node.parent_element();
  for ns in node.namespaces() {
    let prefix = ns.name().unwrap_or("");
    if prefix == XML_PREFIX {
      continue;
    }
    let inherited = parent.map_or(false, |p| p.lookup_namespace_uri(ns.name()) == Some(ns.uri()));
    if !inherited {
      builder = builder.declare(prefix, ns.uri());
    }
  }

  for attribute in node.attributes() {
    let key = match attribute.namespace().and_then(|uri| node.lookup_prefix(uri)) {
      Some(prefix) => format!("{prefix}:{}", attribute.name()),
      None => attribute.name().to_owned(),
    };
    builder = builder.attr(key, attribute.value());
  }

  for child in node.children() {
    if child.is_element() {
      builder = builder.append(XMLNode::Element(from_node(child)));
    } else if child.is_text() {
      if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
        builder = builder.text(text);
      }
    }
  }
  builder.build()
}

/// Serializes with indentation so that equal trees print identically.
pub fn write(root: &Element) -> Result<String, NormalizeError> {
  let mut out = Vec::new();
  root.write_with_config(&mut out, EmitterConfig::new().perform_indent(true))?;
  Ok(String::from_utf8(out)?)
}
