//! `originInfo` to events

use roxmltree::Node;

use super::{alt_rep_groups, non_empty, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::constants::{EVENT_DATE_KINDS, ISSUANCE_SOURCE, MARC_RELATOR_CODE, MARC_RELATOR_URI};
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{Contributor, DescriptiveValue, Event, Source};
use crate::primary::{self, PRIMARY};
use crate::xml::{attr, text};

pub struct EventBuilder;

impl FieldBuilder for EventBuilder {
  fn facet(&self) -> &'static str {
    "event"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let nodes = context.namespaces.children(resource, "originInfo").collect();
    let mut events = Vec::new();
    for entry in alt_rep_groups(nodes, context) {
      match entry {
        AltRep::Single(node) => events.extend(build_events(node, context)),
        AltRep::Group(nodes) => {
          let mut members: Vec<Event> =
            nodes.into_iter().flat_map(|node| build_events(node, context)).collect();
          if members.len() < 2 {
            events.append(&mut members);
          } else {
            events.push(Event { parallel_event: members, ..Event::default() });
          }
        }
      }
    }
    Ok(non_empty(events, Fragment::Event))
  }
}

/// Events of one `originInfo`: one per date kind present, or a single
/// undated event when it only has places, publishers or notes.
pub fn build_events(node: Node<'_, '_>, context: &BuildContext<'_>) -> Vec<Event> {
  let ns = context.namespaces;
  let event_type = attr(node, "eventType");
  let mut events = Vec::new();

  for (element, kind) in EVENT_DATE_KINDS {
    let dated: Vec<_> = ns.children(node, element).filter(|d| text(*d).is_some()).collect();
    if dated.is_empty() {
      continue;
    }
    if element == "dateOther" {
      // one event per distinct dateOther type, in order of first appearance
      let mut kinds: Vec<Option<&str>> = Vec::new();
      let date_kind = |date| attr(date, "type").or(event_type).or(Some(kind));
      for date in &dated {
        let kind = date_kind(*date);
        if !kinds.contains(&kind) {
          kinds.push(kind);
        }
      }
      for date_type in kinds {
        let same: Vec<_> = dated.iter().copied().filter(|d| date_kind(*d) == date_type).collect();
        events.push(dated_event(date_type, &same));
      }
    } else {
      events.push(dated_event(Some(kind), &dated));
    }
  }

  let places: Vec<_> = ns.children(node, "place").filter_map(|p| place(p, context)).collect();
  let publishers: Vec<_> = ns.children(node, "publisher").filter_map(|p| publisher(p, context)).collect();
  let notes: Vec<_> = [("edition", "edition"), ("issuance", "issuance"), ("frequency", "frequency")]
    .into_iter()
    .flat_map(move |(element, kind)| {
      ns.children(node, element).filter_map(move |n| {
        let mut note = DescriptiveValue::typed(text(n)?, kind);
        note.source = match element {
          "issuance" => Some(Source::value(ISSUANCE_SOURCE)),
          _ => node_source(n, context.notifier),
        };
        Some(note)
      })
    })
    .collect();

  if events.is_empty() {
    if places.is_empty() && publishers.is_empty() && notes.is_empty() {
      return events;
    }
    let kind = event_type.or_else(|| (!publishers.is_empty()).then(|| "publication"));
    events.push(Event::of_type(kind));
  }

  if let Some(last) = events.last_mut() {
    last.location.extend(places);
    last.contributor.extend(publishers);
    last.note.extend(notes);
  }
  let display_label = attr(node, "displayLabel");
  let language = value_language(node);
  for event in &mut events {
    event.display_label = display_label.map(str::to_owned);
    event.value_language = language.clone();
    primary::resolve(&mut event.date, "date", context.notifier);
  }
  events
}

fn dated_event(kind: Option<&str>, nodes: &[Node<'_, '_>]) -> Event {
  Event { date: dates(nodes), ..Event::of_type(kind) }
}

/// Dates of one kind. Two or more `point`ed dates form a start/end range.
fn dates(nodes: &[Node<'_, '_>]) -> Vec<DescriptiveValue> {
  let pointed: Vec<_> = nodes.iter().copied().filter(|n| point(*n).is_some()).collect();
  let mut out = Vec::new();
  let mut range_done = false;
  for node in nodes {
    match point(*node) {
      None => out.extend(date_value(*node)),
      Some(point) if pointed.len() == 1 => {
        out.extend(date_value(*node).map(|d| d.with_type(point)));
      }
      Some(_) if range_done => {}
      Some(_) => {
        range_done = true;
        out.push(date_range(&pointed));
      }
    }
  }
  out
}

fn point<'a>(node: Node<'a, '_>) -> Option<&'a str> {
  attr(node, "point").filter(|p| matches!(*p, "start" | "end"))
}

/// A start/end range; shared qualifiers move to the outer value.
fn date_range(nodes: &[Node<'_, '_>]) -> DescriptiveValue {
  let mut range = DescriptiveValue::structured(Vec::new());
  let mut parts = Vec::new();
  for node in nodes {
    let Some(mut date) = date_value(*node) else {
      continue;
    };
    range.encoding = range.encoding.or(date.encoding.take());
    range.status = range.status.or(date.status.take());
    range.qualifier = range.qualifier.or(date.qualifier.take());
    parts.push(date.with_type(point(*node).unwrap_or("start")));
  }
  range.shape = Some(crate::model::Shape::StructuredValue(parts));
  range
}

fn date_value(node: Node<'_, '_>) -> Option<DescriptiveValue> {
  let mut date = DescriptiveValue::value(text(node)?);
  date.encoding = attr(node, "encoding").map(Source::code);
  if attr(node, "keyDate") == Some("yes") {
    date.status = Some(PRIMARY.to_owned());
  }
  date.qualifier = attr(node, "qualifier").map(str::to_owned);
  Some(date)
}

/// A `place` from its text and code terms.
fn place(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let mut location = DescriptiveValue::default();
  for term in context.namespaces.children(node, "placeTerm") {
    let Some(term_text) = text(term) else {
      continue;
    };
    match attr(term, "type") {
      Some("code") => location.code = location.code.or(Some(term_text)),
      _ if location.shape.is_none() => {
        location.shape = Some(crate::model::Shape::Value(term_text));
      }
      _ => {}
    }
    if location.source.is_none() {
      location.source = node_source(term, context.notifier);
    }
    if location.uri.is_none() {
      location.uri = value_uri(term.attribute("valueURI"), context.notifier);
    }
  }
  if location.shape.is_none() && location.code.is_none() && location.uri.is_none() {
    return None;
  }
  Some(location)
}

fn publisher(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<Contributor> {
  let mut name = DescriptiveValue::value(text(node)?);
  name.source = node_source(node, context.notifier);
  name.uri = value_uri(node.attribute("valueURI"), context.notifier);
  name.value_language = value_language(node);
  Some(Contributor {
    name: vec![name],
    kind: Some("organization".to_owned()),
    role: vec![DescriptiveValue {
      code: Some("pbl".to_owned()),
      uri: Some(format!("{MARC_RELATOR_URI}pbl")),
      source: Some(Source {
        code: Some(MARC_RELATOR_CODE.to_owned()),
        uri: Some(MARC_RELATOR_URI.to_owned()),
        value: None,
      }),
      ..DescriptiveValue::value("publisher")
    }],
    ..Contributor::default()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builders::test_support::run_json;
  use serde_json::json;

  #[test]
  fn publication_with_place_and_publisher() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo>
        <place><placeTerm type="text">London</placeTerm></place>
        <place><placeTerm type="code" authority="marccountry">enk</placeTerm></place>
        <publisher>Smith, Elder</publisher>
        <dateIssued encoding="w3cdtf" keyDate="yes">1859</dateIssued>
        <edition>1st ed.</edition>
        <issuance>monographic</issuance>
      </originInfo>"#,
    );
    assert_eq!(
      events,
      json!([{
        "type": "publication",
        "date": [{"value": "1859", "status": "primary", "encoding": {"code": "w3cdtf"}}],
        "contributor": [{
          "name": [{"value": "Smith, Elder"}],
          "type": "organization",
          "role": [{
            "value": "publisher",
            "code": "pbl",
            "uri": "http://id.loc.gov/vocabulary/relators/pbl",
            "source": {"code": "marcrelator", "uri": "http://id.loc.gov/vocabulary/relators/"}
          }]
        }],
        "location": [{"value": "London"}, {"code": "enk", "source": {"code": "marccountry"}}],
        "note": [
          {"value": "1st ed.", "type": "edition"},
          {"value": "monographic", "type": "issuance", "source": {"value": "MODS issuance terms"}}
        ]
      }])
    );
  }

  #[test]
  fn date_kinds_in_precedence_with_place_on_last() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo>
        <dateIssued>1900</dateIssued>
        <place><placeTerm>Paris</placeTerm></place>
        <dateCreated>1899</dateCreated>
      </originInfo>"#,
    );
    assert_eq!(events[0]["type"], json!("creation"));
    assert_eq!(events[1]["type"], json!("publication"));
    assert_eq!(events[0].get("location"), None);
    assert_eq!(events[1]["location"], json!([{"value": "Paris"}]));
  }

  #[test]
  fn pointed_dates_make_a_range() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo>
        <dateCreated encoding="w3cdtf" keyDate="yes" point="start" qualifier="approximate">1920</dateCreated>
        <dateCreated encoding="w3cdtf" point="end">1925</dateCreated>
        <dateCreated>ca. 1920s</dateCreated>
      </originInfo>"#,
    );
    assert_eq!(
      events[0]["date"],
      json!([
        {
          "structuredValue": [
            {"value": "1920", "type": "start"},
            {"value": "1925", "type": "end"}
          ],
          "status": "primary",
          "encoding": {"code": "w3cdtf"},
          "qualifier": "approximate"
        },
        {"value": "ca. 1920s"}
      ])
    );
  }

  #[test]
  fn single_pointed_date_is_typed() {
    let (events, _) =
      run_json(&EventBuilder, r#"<originInfo><dateIssued point="start">1950</dateIssued></originInfo>"#);
    assert_eq!(events[0]["date"], json!([{"value": "1950", "type": "start"}]));
  }

  #[test]
  fn undated_events() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo><publisher>Penguin</publisher></originInfo>
         <originInfo eventType="manufacture"><place><placeTerm>Leeds</placeTerm></place></originInfo>
         <originInfo/>"#,
    );
    assert_eq!(events.as_array().map(Vec::len), Some(2));
    assert_eq!(events[0]["type"], json!("publication"));
    assert_eq!(events[1]["type"], json!("manufacture"));
  }

  #[test]
  fn date_other_takes_its_type() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo eventType="distribution"><dateOther>1970</dateOther></originInfo>
         <originInfo><dateOther type="broadcast">1971</dateOther></originInfo>
         <originInfo><dateOther>1972</dateOther></originInfo>"#,
    );
    assert_eq!(events[0]["type"], json!("distribution"));
    assert_eq!(events[1]["type"], json!("broadcast"));
    assert_eq!(events[2], json!({"type": "other", "date": [{"value": "1972"}]}));
  }

  #[test]
  fn alt_rep_origin_info_is_parallel() {
    let (events, _) = run_json(
      &EventBuilder,
      r#"<originInfo altRepGroup="1" displayLabel="Imprint"><publisher>Наука</publisher><dateIssued>1975</dateIssued></originInfo>
         <originInfo altRepGroup="1" script="Latn"><publisher>Nauka</publisher><dateIssued>1975</dateIssued></originInfo>"#,
    );
    let parallel = &events[0]["parallelEvent"];
    assert_eq!(parallel.as_array().map(Vec::len), Some(2));
    assert_eq!(parallel[0]["displayLabel"], json!("Imprint"));
    assert_eq!(parallel[1]["valueLanguage"]["valueScript"]["code"], json!("Latn"));
  }

  #[test]
  fn one_key_date_per_event() {
    let (events, log) = run_json(
      &EventBuilder,
      r#"<originInfo><dateIssued keyDate="yes">1900</dateIssued><dateIssued keyDate="yes">1901</dateIssued></originInfo>"#,
    );
    assert_eq!(events[0]["date"][1].get("status"), None);
    assert!(log.contains("Multiple marked as primary"));
  }
}
