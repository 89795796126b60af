//! `name` to contributor, plus the name-part logic shared with subjects and titles

use lazy_regex::regex_is_match;
use roxmltree::Node;
use unicase::UniCase;

use super::{alt_rep_groups, non_empty, AltRep, BuildContext, FieldBuilder, Fragment};
use crate::authority::{build_source, node_source, value_uri};
use crate::constants::{IDENTIFIER_TYPES, MARC_RELATOR_CODE, MARC_RELATOR_URI, NAME_PART_TYPES, NAME_TYPES};
use crate::error::MappingError;
use crate::lang_script::value_language;
use crate::model::{Contributor, DescriptiveValue, Source};
use crate::primary::{self, PRIMARY};
use crate::xml::{attr, text};

pub const ET_AL: &str = "et al.";

pub struct ContributorBuilder;

impl FieldBuilder for ContributorBuilder {
  fn facet(&self) -> &'static str {
    "contributor"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let nodes = context.namespaces.children(resource, "name").collect();
    let mut contributors = Vec::new();
    for entry in alt_rep_groups(nodes, context) {
      match entry {
        AltRep::Single(node) => contributors.extend(build_contributor(node, context)?),
        AltRep::Group(nodes) => {
          let mut members = Vec::new();
          for node in nodes {
            members.extend(build_contributor(node, context)?);
          }
          contributors.extend(parallel_contributor(members));
        }
      }
    }
    primary::resolve_nested(&mut contributors, self.facet(), context.notifier);
    Ok(non_empty(contributors, Fragment::Contributor))
  }
}

fn parallel_contributor(mut members: Vec<Contributor>) -> Option<Contributor> {
  if members.len() < 2 {
    return members.pop();
  }
  Some(Contributor { parallel_contributor: members, ..Contributor::default() })
}

/// One `name` element. Only a role code lacking its authority is fatal.
pub fn build_contributor(
  node: Node<'_, '_>,
  context: &BuildContext<'_>,
) -> Result<Option<Contributor>, MappingError> {
  let ns = context.namespaces;
  let mut names: Vec<_> = name_value(node, context).into_iter().collect();
  if names.is_empty() && ns.child(node, "etal").is_some() {
    names.push(DescriptiveValue::value(ET_AL));
  }

  let mut role = Vec::new();
  for role_node in ns.children(node, "role") {
    role.extend(build_role(role_node, context)?);
  }

  if names.is_empty() && role.is_empty() {
    context.warn("Missing name/namePart element", &[]);
    return Ok(None);
  }

  let identifier = ns
    .children(node, "nameIdentifier")
    .filter_map(|id| {
      let text = text(id)?;
      let kind = attr(id, "type");
      let mut value = if kind == Some("uri") || regex_is_match!(r"^https?://", &text) {
        DescriptiveValue { uri: Some(text), ..DescriptiveValue::default() }
      } else {
        DescriptiveValue::value(text)
      };
      value.kind = kind
        .filter(|k| *k != "uri")
        .map(|k| IDENTIFIER_TYPES.get(k.to_lowercase().as_str()).copied().unwrap_or(k).to_owned());
      value.source = node_source(id, context.notifier);
      Some(value)
    })
    .collect();

  let note = ns
    .children(node, "affiliation")
    .filter_map(|n| Some(DescriptiveValue::typed(text(n)?, "affiliation")))
    .chain(
      ns.children(node, "description")
        .filter_map(|n| Some(DescriptiveValue::typed(text(n)?, "description"))),
    )
    .collect();

  Ok(Some(Contributor {
    name: names,
    kind: name_type(node, context),
    status: (attr(node, "usage") == Some(PRIMARY)).then(|| PRIMARY.to_owned()),
    role,
    identifier,
    note,
    display_label: attr(node, "displayLabel").map(str::to_owned),
    parallel_contributor: Vec::new(),
  }))
}

/// Contributor type of a name, dropping and reporting unknown values.
pub fn name_type(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<String> {
  let name_type = attr(node, "type")?;
  match NAME_TYPES.get(name_type) {
    Some(kind) => Some((*kind).to_owned()),
    None => {
      context.warn("Name type unrecognized", &[("type", name_type)]);
      None
    }
  }
}

/// Texts of a name's parts, in document order.
pub fn part_texts(node: Node<'_, '_>, context: &BuildContext<'_>) -> Vec<String> {
  context
    .namespaces
    .children(node, "namePart")
    .filter_map(text)
    .collect()
}

/// The name value of a `name` element: simple for one untyped part,
/// structured otherwise, made parallel with its display form if it has one.
pub fn name_value(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let ns = context.namespaces;
  let mut parts: Vec<_> = ns
    .children(node, "namePart")
    .filter_map(|part| {
      let mut value = DescriptiveValue::value(text(part)?);
      if let Some(part_type) = attr(part, "type") {
        match NAME_PART_TYPES.get(part_type) {
          Some(kind) => value.kind = Some((*kind).to_owned()),
          None => context.warn("Name part type unrecognized", &[("type", part_type)]),
        }
      }
      Some(value)
    })
    .collect();
  let display = ns
    .child_text(node, "displayForm")
    .map(|display| DescriptiveValue::typed(display, "display"));

  let mut value = match parts.len() {
    0 => return display,
    1 if parts[0].kind.is_none() => parts.remove(0),
    _ => DescriptiveValue::structured(parts),
  };
  value.uri = value_uri(node.attribute("valueURI"), context.notifier);
  value.source = node_source(node, context.notifier);
  value.value_language = value_language(node);

  Some(match display {
    Some(display) => DescriptiveValue::parallel(vec![value, display]),
    None => value,
  })
}

/// One `role`, from its code and text terms.
fn build_role(
  node: Node<'_, '_>,
  context: &BuildContext<'_>,
) -> Result<Option<DescriptiveValue>, MappingError> {
  let mut code = None;
  let mut value = None;
  let mut authority = None;
  let mut authority_uri = None;
  let mut uri = None;
  for term in context.namespaces.children(node, "roleTerm") {
    let Some(term_text) = text(term) else {
      continue;
    };
    match attr(term, "type") {
      Some("code") => code = code.or(Some(term_text)),
      _ => value = value.or(Some(term_text)),
    }
    authority = authority.or_else(|| attr(term, "authority"));
    authority_uri = authority_uri.or_else(|| attr(term, "authorityURI"));
    uri = uri.or_else(|| term.attribute("valueURI"));
  }

  if code.is_none() && value.is_none() {
    context.warn("Contributor role code is missing", &[]);
    return Ok(None);
  }
  if let (Some(code), None) = (&code, authority) {
    if !regex_is_match!("^[a-z]{3}$", code) {
      return Err(MappingError::RoleMissingAuthority { code: code.clone() });
    }
    context.warn("Contributor role code is missing authority", &[("code", code.as_str())]);
  }

  let is_marc_relator =
    authority.map_or(false, |a| UniCase::new(a) == UniCase::new(MARC_RELATOR_CODE));
  let source = if is_marc_relator {
    value = value.map(|v| v.to_lowercase());
    Some(Source {
      code: Some(MARC_RELATOR_CODE.to_owned()),
      uri: Some(MARC_RELATOR_URI.to_owned()),
      value: None,
    })
  } else {
    build_source(authority, authority_uri, context.notifier)
  };

  Ok(Some(DescriptiveValue {
    shape: value.map(crate::model::Shape::Value),
    code,
    uri: value_uri(uri, context.notifier),
    source,
    ..DescriptiveValue::default()
  }))
}
