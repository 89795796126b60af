//! `titleInfo` to title

use roxmltree::Node;

use super::{alt_rep_groups, name, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::constants::{TITLE_PART_TYPES, TITLE_TYPES};
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{DescriptiveValue, Shape, Source};
use crate::primary::{self, PRIMARY};
use crate::xml::{attr, elements, is_blank, text};

pub const NONSORTING_COUNT: &str = "nonsorting character count";

pub struct TitleBuilder;

impl TitleBuilder {
  /// Titles of a resource. Fails only when a title is required and none is found.
  pub fn build_titles(
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
    require_title: bool,
  ) -> Result<Option<Vec<DescriptiveValue>>, MappingError> {
    let ns = context.namespaces;
    let nodes: Vec<_> = ns
      .children(resource, "titleInfo")
      .filter(|node| {
        let empty = is_blank(*node);
        if empty {
          context.warn("Empty title node", &[]);
        }
        !empty
      })
      .collect();

    let mut titles = Vec::new();
    for entry in alt_rep_groups(nodes, context) {
      let title = match entry {
        AltRep::Single(node) => build_title(resource, node, context),
        AltRep::Group(nodes) => build_parallel(resource, &nodes, context),
      };
      titles.extend(title);
    }

    if titles.is_empty() {
      if require_title {
        return Err(MappingError::MissingTitle);
      }
      return Ok(None);
    }
    primary::resolve_nested(&mut titles, "title", context.notifier);
    Ok(Some(titles))
  }
}

impl FieldBuilder for TitleBuilder {
  fn facet(&self) -> &'static str {
    "title"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    Ok(Self::build_titles(resource, context, false)?.map(Fragment::Title))
  }
}

fn build_parallel(
  resource: Node<'_, '_>,
  nodes: &[Node<'_, '_>],
  context: &BuildContext<'_>,
) -> Option<DescriptiveValue> {
  let mut members: Vec<_> = nodes
    .iter()
    .filter_map(|node| build_title(resource, *node, context))
    .collect();
  if members.len() < 2 {
    return members.pop();
  }

  let all_uniform = members.iter().all(|m| m.kind.as_deref() == Some("uniform"));
  let kind = if all_uniform {
    for member in &mut members {
      member.kind = None;
    }
    Some("uniform")
  } else if members.iter().all(|m| !m.is_primary()) {
    Some("parallel")
  } else {
    None
  };
  let mut value = DescriptiveValue::parallel(members);
  value.kind = kind.map(str::to_owned);
  Some(value)
}

/// One titleInfo, honoring a companion name linked by `nameTitleGroup`.
fn build_title(
  resource: Node<'_, '_>,
  node: Node<'_, '_>,
  context: &BuildContext<'_>,
) -> Option<DescriptiveValue> {
  let mut value = title_value(node, context)?;
  let Some(group) = attr(node, "nameTitleGroup") else {
    return Some(value);
  };
  let ns = context.namespaces;
  let Some(name_node) = ns
    .children(resource, "name")
    .find(|n| attr(*n, "nameTitleGroup") == Some(group))
  else {
    context.warn("Name not found for title group", &[("nameTitleGroup", group)]);
    return Some(value);
  };

  // the title and its qualifiers stay on the outer value
  let mut members = vec![DescriptiveValue {
    shape: value.shape.take(),
    note: std::mem::take(&mut value.note),
    kind: Some("title".to_owned()),
    ..DescriptiveValue::default()
  }];
  let mut name_parts: Vec<_> = name::part_texts(name_node, context)
    .into_iter()
    .map(|part| DescriptiveValue::typed(part, "name"))
    .collect();
  if let Some(first) = name_parts.first_mut() {
    first.uri = value_uri(name_node.attribute("valueURI"), context.notifier);
    first.source = node_source(name_node, context.notifier);
  }
  members.extend(name_parts);
  value.shape = Some(Shape::StructuredValue(members));
  Some(value)
}

/// A titleInfo as a simple or structured value, without name grouping.
pub fn title_value(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let ns = context.namespaces;
  let parts: Vec<(&'static str, &str, String)> = elements(node)
    .filter(|c| c.tag_name().namespace().unwrap_or("") == ns.mods)
    .filter_map(|c| {
      let element = c.tag_name().name();
      let part_type = TITLE_PART_TYPES.get(element)?;
      Some((*part_type, element, text(c)?))
    })
    .collect();
  if parts.is_empty() {
    return None;
  }

  let mut value = match parts.as_slice() {
    [(_, "title", title)] => DescriptiveValue::value(title.clone()),
    _ => {
      let nonsort = parts.iter().find(|(_, element, _)| *element == "nonSort");
      let mut value = DescriptiveValue::structured(
        parts
          .iter()
          .map(|(part_type, _, text)| DescriptiveValue::typed(text.clone(), *part_type))
          .collect(),
      );
      if let Some((_, _, nonsort)) = nonsort {
        value
          .note
          .push(DescriptiveValue::typed(nonsorting_count(nonsort).to_string(), NONSORTING_COUNT));
      }
      value
    }
  };

  if let Some(title_type) = attr(node, "type") {
    match TITLE_TYPES.get(title_type) {
      Some(kind) => value.kind = Some((*kind).to_owned()),
      None => context.warn("Invalid title type", &[("type", title_type)]),
    }
  }
  if let Some(transliteration) = attr(node, "transliteration") {
    value.standard = Some(Source::value(transliteration));
    if value.kind.is_none() || value.kind.as_deref() == Some("translated") {
      value.kind = Some("transliterated".to_owned());
    }
  }
  if attr(node, "usage") == Some(PRIMARY) {
    value.status = Some(PRIMARY.to_owned());
  }
  value.display_label = attr(node, "displayLabel").map(str::to_owned);
  value.source = node_source(node, context.notifier);
  value.uri = value_uri(node.attribute("valueURI"), context.notifier);
  value.value_language = value_language(node);
  Some(value)
}

/// Characters a sort should skip: the prefix plus the space after it, unless
/// the prefix elides into the title with a hyphen or apostrophe.
pub fn nonsorting_count(nonsort: &str) -> usize {
  let nonsort = nonsort.trim_end();
  let padding = if nonsort.ends_with('-') || nonsort.ends_with('\'') { 0 } else { 1 };
  nonsort.chars().count() + padding
}
