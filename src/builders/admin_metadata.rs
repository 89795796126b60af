//! `recordInfo` to admin metadata

use roxmltree::Node;

use super::{language, BuildContext, FieldBuilder, Fragment};
use crate::authority::node_source;
use crate::error::MappingError;
use crate::model::{AdminMetadata, Contributor, DescriptiveValue, Event, Source};
use crate::xml::{attr, text};

pub struct AdminMetadataBuilder;

impl FieldBuilder for AdminMetadataBuilder {
  fn facet(&self) -> &'static str {
    "adminMetadata"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let mut record_infos = context.namespaces.children(resource, "recordInfo");
    let Some(record_info) = record_infos.next() else {
      return Ok(None);
    };
    if record_infos.next().is_some() {
      context.warn("Multiple recordInfo elements, mapping only the first", &[]);
    }
    let admin = admin_metadata(record_info, context);
    Ok((!admin.is_empty()).then(|| Fragment::AdminMetadata(admin)))
  }
}

fn admin_metadata(node: Node<'_, '_>, context: &BuildContext<'_>) -> AdminMetadata {
  let ns = context.namespaces;
  let mut admin = AdminMetadata::default();

  // a value carrying an authority is a code within it
  let coded = |n| -> Option<DescriptiveValue> {
    let content = text(n)?;
    let source = node_source(n, context.notifier);
    Some(match source {
      Some(source) => DescriptiveValue {
        code: Some(content),
        source: Some(source),
        ..DescriptiveValue::default()
      },
      None => DescriptiveValue::value(content),
    })
  };

  admin.contributor = ns
    .children(node, "recordContentSource")
    .filter_map(|n| {
      Some(Contributor {
        name: vec![coded(n)?],
        kind: Some("organization".to_owned()),
        role: vec![DescriptiveValue::value("original cataloging agency")],
        ..Contributor::default()
      })
    })
    .collect();

  for (element, kind) in [("recordCreationDate", "creation"), ("recordChangeDate", "modification")] {
    for date_node in ns.children(node, element) {
      let Some(date) = text(date_node) else {
        continue;
      };
      let mut date = DescriptiveValue::value(date);
      date.encoding = attr(date_node, "encoding").map(Source::code);
      admin.event.push(Event { date: vec![date], ..Event::of_type(Some(kind)) });
    }
  }

  admin.language = ns
    .children(node, "languageOfCataloging")
    .filter_map(|n| language::build_language(n, context))
    .collect();

  admin.note = ns
    .children(node, "recordOrigin")
    .filter_map(|n| Some(DescriptiveValue::typed(text(n)?, "record origin")))
    .chain(ns.children(node, "recordInfoNote").filter_map(|n| {
      let mut note = DescriptiveValue::value(text(n)?);
      note.kind = attr(n, "type").map(str::to_owned);
      Some(note)
    }))
    .collect();

  admin.metadata_standard = ns.children(node, "descriptionStandard").filter_map(coded).collect();

  admin.identifier = ns
    .children(node, "recordIdentifier")
    .filter_map(|n| {
      let mut identifier = DescriptiveValue::value(text(n)?);
      identifier.source = attr(n, "source").map(Source::value);
      Some(identifier)
    })
    .collect();

  admin
}
