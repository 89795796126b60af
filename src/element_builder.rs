use xmltree::{Element, Namespace, XMLNode};

pub trait Builder {
  fn builder(name: &str) -> ElementBuilder;
}

impl Builder for Element {
  fn builder(name: &str) -> ElementBuilder {
    ElementBuilder(Element::new(name))
  }
}

pub struct ElementBuilder(Element);

impl ElementBuilder {
  pub fn text(mut self, text: impl Into<String>) -> Self {
    self.0.children.push(XMLNode::Text(text.into()));
    self
  }

  pub fn prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
    self.0.prefix = prefix.map(Into::into);
    self
  }

  /// Sets the namespace URI the element name resolves to.
  pub fn namespace(mut self, namespace: Option<impl Into<String>>) -> Self {
    self.0.namespace = namespace.map(Into::into);
    self
  }

  /// Declares `prefix` as `uri` on this element. The empty prefix is the default namespace.
  pub fn declare(mut self, prefix: &str, uri: &str) -> Self {
    self
      .0
      .namespaces
      .get_or_insert_with(Namespace::empty)
      .put(prefix, uri);
    self
  }

  /// Sets an attribute.
  pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> ElementBuilder {
    self.0.attributes.insert(name.into(), value.into());
    self
  }

  /// Appends anything implementing `Into<XMLNode>` into the tree.
  pub fn append(mut self, node: impl Into<XMLNode>) -> ElementBuilder {
    self.0.children.push(node.into());
    self
  }

  /// Builds the `Element`.
  pub fn build(self) -> Element {
    self.0
  }
}

impl From<ElementBuilder> for XMLNode {
  fn from(b: ElementBuilder) -> Self {
    XMLNode::Element(b.0)
  }
}
