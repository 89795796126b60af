//! `location` and `accessCondition` to access

use roxmltree::Node;

use super::{BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::constants::{ACCESS_CONDITION_TYPES, PRIMARY_DISPLAY};
use crate::error::MappingError;
use crate::model::{DescriptiveAccess, DescriptiveValue};
use crate::primary::{self, PRIMARY};
use crate::purl;
use crate::xml::{attr, text};

pub struct AccessBuilder;

impl FieldBuilder for AccessBuilder {
  fn facet(&self) -> &'static str {
    "access"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let ns = context.namespaces;
    let purl_node = purl::primary_purl_node(resource, ns, context.druid);
    let mut access = DescriptiveAccess::default();

    for location in ns.children(resource, "location") {
      for node in ns.children(location, "physicalLocation") {
        let Some(mut value) = located_value(node, context) else {
          continue;
        };
        match attr(node, "type") {
          Some("repository") => {
            value.kind = Some("repository".to_owned());
            access.access_contact.push(value);
          }
          Some("discovery") => {
            value.kind = Some("discovery".to_owned());
            access.digital_location.push(value);
          }
          other => {
            value.kind = other.map(str::to_owned);
            access.physical_location.push(value);
          }
        }
      }
      for node in ns.children(location, "shelfLocator") {
        if let Some(shelf) = text(node) {
          access.physical_location.push(DescriptiveValue::typed(shelf, "shelf locator"));
        }
      }
      for node in ns.children(location, "url") {
        if Some(node) == purl_node {
          access.note.extend(purl_notes(node));
        } else if let Some(url) = url(node) {
          access.url.push(url);
        }
      }
    }

    for node in ns.children(resource, "accessCondition") {
      access.note.extend(access_condition(node, context));
    }

    primary::resolve(&mut access.url, "url", context.notifier);
    Ok((!access.is_empty()).then(|| Fragment::Access(access)))
  }
}

fn located_value(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let uri = value_uri(node.attribute("valueURI"), context.notifier)
    .or_else(|| context.namespaces.xlink_href(node).map(str::to_owned));
  let content = text(node);
  if content.is_none() && uri.is_none() {
    return None;
  }
  let mut value = content.map(DescriptiveValue::value).unwrap_or_default();
  value.uri = uri;
  value.source = node_source(node, context.notifier);
  value.display_label = attr(node, "displayLabel").map(str::to_owned);
  Some(value)
}

fn url(node: Node<'_, '_>) -> Option<DescriptiveValue> {
  let mut url = DescriptiveValue::value(text(node)?);
  url.display_label = attr(node, "displayLabel").map(str::to_owned);
  if attr(node, "usage") == Some(PRIMARY_DISPLAY) {
    url.status = Some(PRIMARY.to_owned());
  }
  if let Some(note) = attr(node, "note") {
    url.note.push(DescriptiveValue::value(note));
  }
  Some(url)
}

/// The canonical PURL itself lives on the description; only its notes stay here.
fn purl_notes(node: Node<'_, '_>) -> Vec<DescriptiveValue> {
  let mut notes = Vec::new();
  if let Some(note) = attr(node, "note") {
    notes.push(DescriptiveValue::typed(note, "purl note"));
  }
  if let Some(label) = attr(node, "displayLabel") {
    notes.push(DescriptiveValue::typed(label, "display label"));
  }
  notes
}

fn access_condition(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let uri = context.namespaces.xlink_href(node).map(str::to_owned);
  let content = text(node);
  if content.is_none() && uri.is_none() {
    return None;
  }
  let mut note = content.map(DescriptiveValue::value).unwrap_or_default();
  note.uri = uri;
  note.kind = attr(node, "type").map(|t| ACCESS_CONDITION_TYPES.get(t).copied().unwrap_or(t).to_owned());
  note.display_label = attr(node, "displayLabel").map(str::to_owned);
  Some(note)
}
