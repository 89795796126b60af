//! `subject` to subject values

use roxmltree::Node;

use super::{alt_rep_groups, name, non_empty, title, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::constants::{HIERARCHICAL_GEOGRAPHIC_TYPES, SUBJECT_TYPES};
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{DescriptiveValue, Shape, Source};
use crate::primary;
use crate::xml::{attr, elements, text};

pub struct SubjectBuilder;

impl FieldBuilder for SubjectBuilder {
  fn facet(&self) -> &'static str {
    "subject"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let nodes = context.namespaces.children(resource, "subject").collect();
    let mut subjects = Vec::new();
    for entry in alt_rep_groups(nodes, context) {
      match entry {
        AltRep::Single(node) => subjects.extend(subject_value(node, context)),
        AltRep::Group(nodes) => {
          let mut members: Vec<_> =
            nodes.into_iter().filter_map(|node| subject_value(node, context)).collect();
          if members.len() < 2 {
            subjects.append(&mut members);
          } else {
            subjects.push(DescriptiveValue::parallel(members));
          }
        }
      }
    }
    primary::resolve_nested(&mut subjects, self.facet(), context.notifier);
    Ok(non_empty(subjects, Fragment::Subject))
  }
}

/// One `subject`: a typed value for a single child, a structured value otherwise.
pub fn subject_value(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let ns = context.namespaces;
  let children: Vec<_> = elements(node)
    .filter(|c| c.tag_name().namespace().unwrap_or("") == ns.mods)
    .collect();

  let temporal_points = children
    .iter()
    .filter(|c| c.tag_name().name() == "temporal" && attr(**c, "point").is_some())
    .count();
  let mut parts = Vec::new();
  let mut range_done = false;
  for child in &children {
    if temporal_points > 1 && child.tag_name().name() == "temporal" && attr(*child, "point").is_some() {
      if !range_done {
        range_done = true;
        parts.extend(temporal_range(&children));
      }
      continue;
    }
    parts.extend(child_value(*child, context));
  }

  let source = node_source(node, context.notifier);
  let uri = value_uri(node.attribute("valueURI"), context.notifier);
  let mut value = match parts.len() {
    0 => return None,
    1 => {
      let mut part = parts.remove(0);
      part.source = part.source.or(source);
      part.uri = part.uri.or(uri);
      part
    }
    _ => DescriptiveValue { source, uri, ..DescriptiveValue::structured(parts) },
  };
  value.display_label = attr(node, "displayLabel").map(str::to_owned);
  if value.value_language.is_none() {
    value.value_language = value_language(node);
  }
  Some(value)
}

/// A subject child, dispatched on its element name.
fn child_value(child: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let element = child.tag_name().name();
  let mut value = match element {
    "name" => {
      let mut value = name::name_value(child, context)?;
      value.kind = Some(name::name_type(child, context).unwrap_or_else(|| "person".to_owned()));
      return Some(value);
    }
    "titleInfo" => {
      let value = title::title_value(child, context)?;
      return Some(value.with_type("title"));
    }
    "geographicCode" => DescriptiveValue {
      code: Some(text(child)?),
      kind: Some("place".to_owned()),
      ..DescriptiveValue::default()
    },
    "cartographics" => {
      let coordinates = context.namespaces.child_text(child, "coordinates")?;
      return Some(DescriptiveValue::typed(coordinates, "map coordinates"));
    }
    "hierarchicalGeographic" => hierarchical_geographic(child, context)?,
    _ => match SUBJECT_TYPES.get(element) {
      Some(kind) => DescriptiveValue::typed(text(child)?, *kind),
      None => {
        context.warn("Unexpected subject element", &[("element", element)]);
        return None;
      }
    },
  };
  if element == "temporal" {
    value.encoding = attr(child, "encoding").map(Source::code);
  }
  value.source = node_source(child, context.notifier);
  value.uri = value_uri(child.attribute("valueURI"), context.notifier);
  value.value_language = value_language(child);
  Some(value)
}

fn hierarchical_geographic(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let parts: Vec<_> = elements(node)
    .filter(|c| c.tag_name().namespace().unwrap_or("") == context.namespaces.mods)
    .filter_map(|c| {
      let kind = HIERARCHICAL_GEOGRAPHIC_TYPES.get(c.tag_name().name())?;
      Some(DescriptiveValue::typed(text(c)?, *kind))
    })
    .collect();
  if parts.is_empty() {
    return None;
  }
  Some(DescriptiveValue::structured(parts).with_type("place"))
}

/// Pointed `temporal` siblings as one start/end range.
fn temporal_range(children: &[Node<'_, '_>]) -> Option<DescriptiveValue> {
  let mut range = DescriptiveValue::structured(Vec::new()).with_type("time");
  let mut parts = Vec::new();
  for child in children.iter().filter(|c| c.tag_name().name() == "temporal") {
    let (Some(point), Some(date)) = (attr(*child, "point"), text(*child)) else {
      continue;
    };
    range.encoding = range.encoding.or_else(|| attr(*child, "encoding").map(Source::code));
    parts.push(DescriptiveValue::typed(date, point));
  }
  if parts.is_empty() {
    return None;
  }
  range.shape = Some(Shape::StructuredValue(parts));
  Some(range)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builders::test_support::run_json;
  use serde_json::json;

  #[test]
  fn single_geographic_lifts_authority() {
    let (subjects, _) =
      run_json(&SubjectBuilder, r#"<subject authority="naf"><geographic>Paris (France)</geographic></subject>"#);
    assert_eq!(subjects, json!([{"value": "Paris (France)", "type": "place", "source": {"code": "naf"}}]));
  }

  #[test]
  fn child_authority_stays_on_child() {
    let (subjects, _) = run_json(
      &SubjectBuilder,
      r#"<subject authority="lcsh" valueURI="http://id.loc.gov/authorities/subjects/sh85046193">
        <topic>Fishing</topic>
        <geographic authority="naf" valueURI="http://id.loc.gov/authorities/names/n79041870">Maine</geographic>
        <temporal>20th century</temporal>
      </subject>"#,
    );
    assert_eq!(
      subjects,
      json!([{
        "structuredValue": [
          {"value": "Fishing", "type": "topic"},
          {
            "value": "Maine",
            "type": "place",
            "uri": "http://id.loc.gov/authorities/names/n79041870",
            "source": {"code": "naf"}
          },
          {"value": "20th century", "type": "time"}
        ],
        "uri": "http://id.loc.gov/authorities/subjects/sh85046193",
        "source": {"code": "lcsh"}
      }])
    );
  }

  #[test]
  fn name_subject_defaults_to_person() {
    let (subjects, _) = run_json(
      &SubjectBuilder,
      r#"<subject><name><namePart>Lincoln, Abraham</namePart><namePart type="date">1809-1865</namePart></name></subject>
         <subject><name type="corporate"><namePart>United Nations</namePart></name></subject>"#,
    );
    assert_eq!(
      subjects,
      json!([
        {
          "structuredValue": [
            {"value": "Lincoln, Abraham"},
            {"value": "1809-1865", "type": "life dates"}
          ],
          "type": "person"
        },
        {"value": "United Nations", "type": "organization"}
      ])
    );
  }

  #[test]
  fn hierarchical_geographic() {
    let (subjects, _) = run_json(
      &SubjectBuilder,
      r#"<subject><hierarchicalGeographic>
        <country>Canada</country><province>Ontario</province><citySection>Kensington Market</citySection>
      </hierarchicalGeographic></subject>"#,
    );
    assert_eq!(
      subjects,
      json!([{
        "structuredValue": [
          {"value": "Canada", "type": "country"},
          {"value": "Ontario", "type": "province"},
          {"value": "Kensington Market", "type": "city section"}
        ],
        "type": "place"
      }])
    );
  }

  #[test]
  fn temporal_range_and_codes() {
    let (subjects, _) = run_json(
      &SubjectBuilder,
      r#"<subject><temporal encoding="w3cdtf" point="start">1890</temporal><temporal encoding="w3cdtf" point="end">1899</temporal></subject>
         <subject authority="marcgac"><geographicCode>n-us-ca</geographicCode></subject>
         <subject><cartographics><coordinates>W 123°--W 122°/N 38°--N 37°</coordinates></cartographics></subject>"#,
    );
    assert_eq!(
      subjects,
      json!([
        {
          "structuredValue": [{"value": "1890", "type": "start"}, {"value": "1899", "type": "end"}],
          "type": "time",
          "encoding": {"code": "w3cdtf"}
        },
        {"code": "n-us-ca", "type": "place", "source": {"code": "marcgac"}},
        {"value": "W 123°--W 122°/N 38°--N 37°", "type": "map coordinates"}
      ])
    );
  }

  #[test]
  fn title_subject() {
    let (subjects, _) =
      run_json(&SubjectBuilder, r#"<subject><titleInfo><title>Beowulf</title></titleInfo></subject>"#);
    assert_eq!(subjects, json!([{"value": "Beowulf", "type": "title"}]));
  }

  #[test]
  fn parallel_and_empty_subjects() {
    let (subjects, _) = run_json(
      &SubjectBuilder,
      r#"<subject altRepGroup="1" lang="jpn"><topic>武士</topic></subject>
         <subject altRepGroup="1" displayLabel="Romanized"><topic>Bushi</topic></subject>
         <subject><topic/></subject>
         <subject><cartographics><scale>1:24,000</scale></cartographics></subject>"#,
    );
    assert_eq!(
      subjects,
      json!([{"parallelValue": [
        {"value": "武士", "type": "topic", "valueLanguage": {"code": "jpn", "source": {"code": "iso639-2b"}}},
        {"value": "Bushi", "type": "topic", "displayLabel": "Romanized"}
      ]}])
    );
  }

  #[test]
  fn one_primary_title_subject() {
    let (subjects, log) = run_json(
      &SubjectBuilder,
      r#"<subject><titleInfo usage="primary"><title>Beowulf</title></titleInfo></subject>
         <subject><titleInfo usage="primary"><title>Grendel</title></titleInfo></subject>"#,
    );
    assert_eq!(
      subjects,
      json!([
        {"value": "Beowulf", "type": "title", "status": "primary"},
        {"value": "Grendel", "type": "title"}
      ])
    );
    assert!(log.contains("Multiple marked as primary"));
  }
}
