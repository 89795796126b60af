//! `genre`, `typeOfResource`, `physicalDescription` and map cartographics to form

use roxmltree::Node;

use super::{alt_rep_groups, non_empty, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::constants::{PHYSICAL_DESCRIPTION_TYPES, RESOURCE_TYPES_SOURCE};
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{DescriptiveValue, Source};
use crate::primary::{self, PRIMARY};
use crate::xml::{attr, elements, text};

pub struct FormBuilder;

impl FieldBuilder for FormBuilder {
  fn facet(&self) -> &'static str {
    "form"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let ns = context.namespaces;
    let mut forms = Vec::new();

    let genres = ns.children(resource, "genre").collect();
    for entry in alt_rep_groups(genres, context) {
      match entry {
        AltRep::Single(node) => forms.extend(genre(node, context)),
        AltRep::Group(nodes) => {
          let mut members: Vec<_> = nodes.into_iter().filter_map(|n| genre(n, context)).collect();
          if members.len() < 2 {
            forms.append(&mut members);
          } else {
            forms.push(DescriptiveValue::parallel(members));
          }
        }
      }
    }
    for node in ns.children(resource, "typeOfResource") {
      forms.extend(resource_types(node));
    }
    for node in ns.children(resource, "physicalDescription") {
      forms.extend(physical_description(node, context));
    }
    for cartographics in ns
      .children(resource, "subject")
      .flat_map(|subject| ns.children(subject, "cartographics").collect::<Vec<_>>())
    {
      for (element, kind) in [("scale", "map scale"), ("projection", "map projection")] {
        forms.extend(
          ns.children(cartographics, element)
            .filter_map(text)
            .map(|t| DescriptiveValue::typed(t, kind)),
        );
      }
    }

    primary::resolve_nested(&mut forms, self.facet(), context.notifier);
    Ok(non_empty(forms, Fragment::Form))
  }
}

fn genre(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let mut value = DescriptiveValue::typed(text(node)?, attr(node, "type").unwrap_or("genre"));
  value.source = node_source(node, context.notifier);
  value.uri = value_uri(node.attribute("valueURI"), context.notifier);
  value.value_language = value_language(node);
  value.display_label = attr(node, "displayLabel").map(str::to_owned);
  if attr(node, "usage") == Some(PRIMARY) {
    value.status = Some(PRIMARY.to_owned());
  }
  Some(value)
}

/// A `typeOfResource` and its manuscript and collection flags.
fn resource_types(node: Node<'_, '_>) -> Vec<DescriptiveValue> {
  let resource_type = |value: String| DescriptiveValue {
    source: Some(Source::value(RESOURCE_TYPES_SOURCE)),
    ..DescriptiveValue::typed(value, "resource type")
  };
  let mut values = Vec::new();
  if let Some(value) = text(node) {
    let mut value = resource_type(value);
    value.display_label = attr(node, "displayLabel").map(str::to_owned);
    if attr(node, "usage") == Some(PRIMARY) {
      value.status = Some(PRIMARY.to_owned());
    }
    values.push(value);
  }
  for flag in ["manuscript", "collection"] {
    if attr(node, flag) == Some("yes") {
      values.push(resource_type(flag.to_owned()));
    }
  }
  values
}

/// Values of one `physicalDescription`; grouped when notes qualify them.
fn physical_description(node: Node<'_, '_>, context: &BuildContext<'_>) -> Vec<DescriptiveValue> {
  let ns = context.namespaces;
  let mut values = Vec::new();
  for child in elements(node).filter(|c| c.tag_name().namespace().unwrap_or("") == ns.mods) {
    let Some((kind, source)) = PHYSICAL_DESCRIPTION_TYPES.get(child.tag_name().name()) else {
      continue;
    };
    let Some(child_text) = text(child) else {
      continue;
    };
    let mut value = DescriptiveValue::typed(child_text, *kind);
    value.source = node_source(child, context.notifier).or_else(|| source.map(Source::value));
    value.uri = value_uri(child.attribute("valueURI"), context.notifier);
    value.display_label = attr(child, "displayLabel").map(str::to_owned);
    values.push(value);
  }

  let notes: Vec<_> = ns
    .children(node, "note")
    .filter_map(|n| {
      let mut note = DescriptiveValue::value(text(n)?);
      note.kind = attr(n, "type").map(str::to_owned);
      note.display_label = attr(n, "displayLabel").map(str::to_owned);
      Some(note)
    })
    .collect();
  if notes.is_empty() || values.is_empty() {
    return values;
  }
  let mut grouped = DescriptiveValue::grouped(values);
  grouped.note = notes;
  grouped.display_label = attr(node, "displayLabel").map(str::to_owned);
  vec![grouped]
}
