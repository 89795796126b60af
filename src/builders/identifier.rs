//! `identifier` to identifiers

use roxmltree::Node;

use super::{non_empty, BuildContext, FieldBuilder, Fragment};
use crate::constants::IDENTIFIER_TYPES;
use crate::error::MappingError;
use crate::model::DescriptiveValue;
use crate::xml::{attr, text};

pub struct IdentifierBuilder;

impl FieldBuilder for IdentifierBuilder {
  fn facet(&self) -> &'static str {
    "identifier"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let identifiers = context
      .namespaces
      .children(resource, "identifier")
      .filter_map(|node| identifier(node, context))
      .collect();
    Ok(non_empty(identifiers, Fragment::Identifier))
  }
}

/// Canonical identifier type, or the original spelling with a warning.
pub fn identifier_type(raw: &str, context: &BuildContext<'_>) -> String {
  match IDENTIFIER_TYPES.get(raw.to_lowercase().as_str()) {
    Some(kind) => (*kind).to_owned(),
    None => {
      context.warn("Identifier has unrecognized type", &[("type", raw)]);
      raw.to_owned()
    }
  }
}

fn identifier(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let value = text(node)?;
  let raw_type = attr(node, "type");
  let mut identifier = if raw_type.map_or(false, |t| t.eq_ignore_ascii_case("uri")) {
    DescriptiveValue { uri: Some(value), ..DescriptiveValue::default() }
  } else {
    let mut identifier = DescriptiveValue::value(value);
    identifier.kind = raw_type.map(|t| identifier_type(t, context));
    identifier
  };
  if attr(node, "invalid") == Some("yes") {
    identifier.status = Some("invalid".to_owned());
  }
  identifier.display_label = attr(node, "displayLabel").map(str::to_owned);
  Some(identifier)
}
