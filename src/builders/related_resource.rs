//! `relatedItem` to related resources, each mapped as a description of its own

use roxmltree::Node;

use super::{non_empty, BuildContext, FieldBuilder, Fragment};
use crate::constants::RELATED_TYPES;
use crate::error::MappingError;
use crate::model::{DescriptiveValue, RelatedResource, Source};
use crate::xml::attr;

pub const OTHER_RELATION_TYPE: &str = "other relation type";

pub struct RelatedResourceBuilder;

impl FieldBuilder for RelatedResourceBuilder {
  fn facet(&self) -> &'static str {
    "relatedResource"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let mut related = Vec::new();
    for node in context.namespaces.children(resource, "relatedItem") {
      related.extend(related_resource(node, context)?);
    }
    Ok(non_empty(related, Fragment::RelatedResource))
  }
}

fn related_resource(
  node: Node<'_, '_>,
  context: &BuildContext<'_>,
) -> Result<Option<RelatedResource>, MappingError> {
  log::debug!("mapping relatedItem at depth {}", node.ancestors().count());
  let mut description = context.describe(node)?;
  let uri = context.namespaces.xlink_href(node).map(str::to_owned);
  let display_label = attr(node, "displayLabel").map(str::to_owned);

  let mut kind = None;
  if let Some(related_type) = attr(node, "type") {
    match RELATED_TYPES.get(related_type) {
      Some(mapped) => kind = Some((*mapped).to_owned()),
      None => context.warn("Invalid related resource type", &[("type", related_type)]),
    }
  }
  if let Some(other_type) = attr(node, "otherType") {
    kind = kind.or_else(|| Some("related to".to_owned()));
    description.note.push(DescriptiveValue {
      uri: attr(node, "otherTypeURI").map(str::to_owned),
      source: attr(node, "otherTypeAuth").map(Source::value),
      ..DescriptiveValue::typed(other_type, OTHER_RELATION_TYPE)
    });
  }

  if description.is_empty() && uri.is_none() && display_label.is_none() {
    return Ok(None);
  }
  Ok(Some(RelatedResource { kind, display_label, uri, description }))
}
