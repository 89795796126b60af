//! Namespace bindings and read-only queries over a parsed MODS tree

use roxmltree::Node;

use crate::constants::{DC_NS, GML_NS, MODS_NS, RDF_NS, XLINK_NS, XSI_NS};

/// Namespace URIs used to resolve element and attribute names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespaces {
  pub mods: String,
  pub xlink: String,
  pub xsi: String,
  pub rdf: String,
  pub dc: String,
  pub gml: String,
}

impl Default for Namespaces {
  fn default() -> Self {
    Self {
      mods: MODS_NS.to_owned(),
      xlink: XLINK_NS.to_owned(),
      xsi: XSI_NS.to_owned(),
      rdf: RDF_NS.to_owned(),
      dc: DC_NS.to_owned(),
      gml: GML_NS.to_owned(),
    }
  }
}

impl Namespaces {
  /// True if `node` is the MODS element `name`.
  pub fn is(&self, node: Node<'_, '_>, name: &str) -> bool {
    is_element_in(node, &self.mods, name)
  }

  /// Direct MODS children named `name`, in document order.
  pub fn children<'s, 'a: 's, 'input: 'a>(
    &'s self,
    node: Node<'a, 'input>,
    name: &'s str,
  ) -> impl Iterator<Item = Node<'a, 'input>> + 's {
    node.children().filter(move |c| self.is(*c, name))
  }

  pub fn child<'a, 'input>(&self, node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| self.is(*c, name))
  }

  /// Text of the first MODS child named `name`.
  pub fn child_text(&self, node: Node<'_, '_>, name: &str) -> Option<String> {
    self.child(node, name).and_then(text)
  }

  pub fn xlink_href<'a>(&self, node: Node<'a, '_>) -> Option<&'a str> {
    non_blank(node.attribute((self.xlink.as_str(), "href")))
  }
}

/// Element test that treats an empty namespace as "no namespace".
pub fn is_element_in(node: Node<'_, '_>, ns: &str, name: &str) -> bool {
  node.is_element()
    && node.tag_name().name() == name
    && node.tag_name().namespace().unwrap_or("") == ns
}

/// Element children, skipping text and comments.
pub fn elements<'a, 'input: 'a>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
  node.children().filter(Node::is_element)
}

/// Trimmed text content of a node and its descendants; blank is `None`.
pub fn text(node: Node<'_, '_>) -> Option<String> {
  let raw: String = node
    .descendants()
    .filter(Node::is_text)
    .filter_map(|n| n.text())
    .collect();
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_owned())
  }
}

/// Trimmed, non-blank unqualified attribute.
pub fn attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
  non_blank(node.attribute(name))
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

/// True if the element carries neither text nor element children.
pub fn is_blank(node: Node<'_, '_>) -> bool {
  text(node).is_none()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_and_attr_are_trimmed() {
    let doc = roxmltree::Document::parse(
      r#"<mods xmlns="http://www.loc.gov/mods/v3"><title lang=" eng "> Two
 Cities </title><note>  </note></mods>"#,
    )
    .unwrap();
    let ns = Namespaces::default();
    let root = doc.root_element();
    let title = ns.child(root, "title").unwrap();
    assert_eq!(text(title).as_deref(), Some("Two\n Cities"));
    assert_eq!(attr(title, "lang"), Some("eng"));
    assert!(is_blank(ns.child(root, "note").unwrap()));
  }

  #[test]
  fn no_namespace_configuration() {
    let doc = roxmltree::Document::parse("<mods><title>x</title></mods>").unwrap();
    let ns = Namespaces { mods: String::new(), ..Namespaces::default() };
    assert_eq!(ns.children(doc.root_element(), "title").count(), 1);
  }
}
