//! `note`, `abstract`, `tableOfContents` and `targetAudience` to notes

use roxmltree::Node;

use super::{alt_rep_groups, non_empty, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::node_source;
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{DescriptiveValue, Shape};
use crate::xml::{attr, text};

const NOTE_ELEMENTS: [&str; 4] = ["note", "abstract", "tableOfContents", "targetAudience"];

pub struct NoteBuilder;

impl FieldBuilder for NoteBuilder {
  fn facet(&self) -> &'static str {
    "note"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let ns = context.namespaces;
    let nodes = resource
      .children()
      .filter(|c| NOTE_ELEMENTS.iter().any(|name| ns.is(*c, name)))
      .collect();
    let mut notes = Vec::new();
    for entry in alt_rep_groups(nodes, context) {
      match entry {
        AltRep::Single(node) => notes.extend(note_value(node, context)),
        AltRep::Group(nodes) => {
          let mut members: Vec<_> = nodes.into_iter().filter_map(|n| note_value(n, context)).collect();
          if members.len() < 2 {
            notes.append(&mut members);
          } else {
            notes.push(DescriptiveValue::parallel(members));
          }
        }
      }
    }
    Ok(non_empty(notes, Fragment::Note))
  }
}

fn note_value(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let uri = context.namespaces.xlink_href(node).map(str::to_owned);
  let content = text(node);
  if content.is_none() && uri.is_none() {
    return None;
  }

  let element = node.tag_name().name();
  let kind = match element {
    "abstract" => Some(attr(node, "type").unwrap_or("abstract")),
    "tableOfContents" => Some("table of contents"),
    "targetAudience" => Some("target audience"),
    _ => attr(node, "type"),
  };
  let shape = content.map(|content| match element {
    "tableOfContents" if content.contains(" -- ") => Shape::StructuredValue(
      content
        .split(" -- ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(DescriptiveValue::value)
        .collect(),
    ),
    _ => Shape::Value(content),
  });

  Some(DescriptiveValue {
    shape,
    kind: kind.map(str::to_owned),
    uri,
    source: node_source(node, context.notifier),
    display_label: attr(node, "displayLabel").map(str::to_owned),
    value_language: value_language(node),
    ..DescriptiveValue::default()
  })
}
