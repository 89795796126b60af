//! Normalization rules, each a rewrite of the whole tree

use itertools::Itertools;
use unicase::UniCase;
use xmltree::{Element, Namespace, XMLNode};

use super::NormalizerConfig;
use crate::constants::{EVENT_TYPE_INFERENCE, MARC_RELATOR_CODE, MARC_RELATOR_URI, PRIMARY_DISPLAY};
use crate::purl::{is_purl, matches_druid};

pub type Rule = fn(&mut Element, &NormalizerConfig);

/// Every rule, in the order applied.
pub const RULES: [(&str, Rule); 8] = [
  ("inject namespaces", inject_namespaces),
  ("infer event types", infer_event_types),
  ("strip echoed date types", strip_echoed_date_types),
  ("default place term type", default_place_term_type),
  ("normalize role terms", normalize_role_terms),
  ("drop singleton alternate representation groups", drop_singleton_alt_rep_groups),
  ("remove empty elements", remove_empty_elements),
  ("mark primary purl", mark_primary_purl),
];

fn is_mods(element: &Element, config: &NormalizerConfig, name: &str) -> bool {
  element.name == name && element.namespace.as_deref().unwrap_or("") == config.namespaces.mods
}

fn elements(element: &Element) -> impl Iterator<Item = &Element> {
  element.children.iter().filter_map(|c| match c {
    XMLNode::Element(e) => Some(e),
    _ => None,
  })
}

fn elements_mut(element: &mut Element) -> impl Iterator<Item = &mut Element> {
  element.children.iter_mut().filter_map(|c| match c {
    XMLNode::Element(e) => Some(e),
    _ => None,
  })
}

/// Visits every element, parents before children.
fn walk_mut(element: &mut Element, visit: &mut dyn FnMut(&mut Element)) {
  visit(element);
  for child in elements_mut(element) {
    walk_mut(child, visit);
  }
}

/// True if any text at or below the element is non-blank.
fn has_text(element: &Element) -> bool {
  element.children.iter().any(|c| match c {
    XMLNode::Text(t) | XMLNode::CData(t) => !t.trim().is_empty(),
    XMLNode::Element(e) => has_text(e),
    _ => false,
  })
}

fn text(element: &Element) -> String {
  let mut out = String::new();
  for child in &element.children {
    match child {
      XMLNode::Text(t) | XMLNode::CData(t) => out.push_str(t),
      XMLNode::Element(e) => out.push_str(&text(e)),
      _ => {}
    }
  }
  out.trim().to_owned()
}

fn attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
  element
    .attributes
    .get(name)
    .map(|v| v.trim())
    .filter(|v| !v.is_empty())
}

/// The prefix bound to `uri`, binding `preferred` if there is none.
fn bind(namespaces: &mut Namespace, preferred: &str, uri: &str) -> String {
  if let Some((prefix, _)) = namespaces.0.iter().find(|(p, u)| !p.is_empty() && *u == uri) {
    return prefix.clone();
  }
  let mut prefix = preferred.to_owned();
  while namespaces.0.contains_key(&prefix) {
    prefix.push('1');
  }
  namespaces.put(prefix.as_str(), uri);
  prefix
}

/// Declares the MODS, xlink and xsi namespaces on the root and stamps the
/// MODS version and schema location.
pub fn inject_namespaces(root: &mut Element, config: &NormalizerConfig) {
  let mods = config.namespaces.mods.as_str();
  let namespaces = root.namespaces.get_or_insert_with(Namespace::empty);
  let mut adopt_unqualified = false;
  if !mods.is_empty() && !namespaces.0.values().any(|u| u == mods) && !namespaces.0.contains_key("") {
    namespaces.put("", mods);
    adopt_unqualified = true;
  }
  bind(namespaces, "xlink", &config.namespaces.xlink);
  let xsi = bind(namespaces, "xsi", &config.namespaces.xsi);

  if adopt_unqualified {
    // unqualified names now resolve to the declared default namespace
    walk_mut(root, &mut |element| {
      if element.namespace.is_none() && element.prefix.is_none() {
        element.namespace = Some(mods.to_owned());
      }
    });
  }
  if !root.attributes.contains_key("version") {
    root.attributes.insert("version".to_owned(), config.version.clone());
  }
  let schema_location = format!("{xsi}:schemaLocation");
  if !root.attributes.contains_key(&schema_location) {
    root.attributes.insert(schema_location, config.schema_location.clone());
  }
}

/// Sets a missing `originInfo/@eventType` from its first telling child.
pub fn infer_event_types(root: &mut Element, config: &NormalizerConfig) {
  walk_mut(root, &mut |element| {
    if !is_mods(element, config, "originInfo") || attr(element, "eventType").is_some() {
      return;
    }
    let inferred = EVENT_TYPE_INFERENCE.iter().find(|(child, _)| {
      elements(element).any(|c| is_mods(c, config, child) && has_text(c))
    });
    if let Some((_, event_type)) = inferred {
      element.attributes.insert("eventType".to_owned(), (*event_type).to_owned());
    }
  });
}

/// Drops a `dateOther/@type` repeating its event type on an empty date.
pub fn strip_echoed_date_types(root: &mut Element, config: &NormalizerConfig) {
  walk_mut(root, &mut |element| {
    if !is_mods(element, config, "originInfo") {
      return;
    }
    let Some(event_type) = attr(element, "eventType").map(str::to_owned) else {
      return;
    };
    for date in elements_mut(element) {
      if is_mods(date, config, "dateOther")
        && attr(date, "type") == Some(event_type.as_str())
        && !has_text(date)
      {
        date.attributes.shift_remove("type");
      }
    }
  });
}

pub fn default_place_term_type(root: &mut Element, config: &NormalizerConfig) {
  walk_mut(root, &mut |element| {
    if is_mods(element, config, "placeTerm") && attr(element, "type").is_none() && has_text(element) {
      element.attributes.insert("type".to_owned(), "text".to_owned());
    }
  });
}

/// Lower-cases role text and gives MARC relator terms their authority URI.
pub fn normalize_role_terms(root: &mut Element, config: &NormalizerConfig) {
  walk_mut(root, &mut |element| {
    if !is_mods(element, config, "roleTerm") {
      return;
    }
    if attr(element, "type") != Some("code") {
      for child in &mut element.children {
        if let XMLNode::Text(t) = child {
          *t = t.to_lowercase();
        }
      }
    }
    let is_marc_relator = attr(element, "authority")
      .map_or(false, |a| UniCase::new(a) == UniCase::new(MARC_RELATOR_CODE));
    if is_marc_relator && attr(element, "authorityURI").is_none() {
      element
        .attributes
        .insert("authorityURI".to_owned(), MARC_RELATOR_URI.to_owned());
    }
  });
}

/// Removes `altRepGroup` keys that no sibling shares.
pub fn drop_singleton_alt_rep_groups(root: &mut Element, config: &NormalizerConfig) {
  let counts = elements(root)
    .filter_map(|c| attr(c, "altRepGroup").map(str::to_owned))
    .counts();
  for child in elements_mut(root) {
    let single = attr(child, "altRepGroup").map_or(false, |key| counts.get(key) == Some(&1));
    if single {
      child.attributes.shift_remove("altRepGroup");
    }
    drop_singleton_alt_rep_groups(child, config);
  }
}

/// Removes elements left with no text, attributes or children, deepest first.
pub fn remove_empty_elements(root: &mut Element, config: &NormalizerConfig) {
  for child in elements_mut(root) {
    remove_empty_elements(child, config);
  }
  root.children.retain(|c| match c {
    XMLNode::Element(e) => e.name == "etal" || !e.attributes.is_empty() || !e.children.is_empty(),
    XMLNode::Text(t) | XMLNode::CData(t) => !t.trim().is_empty(),
    _ => true,
  });
}

/// Marks one PURL as the primary display URL when no URL is marked yet.
pub fn mark_primary_purl(root: &mut Element, config: &NormalizerConfig) {
  let mut purls = Vec::new();
  for (l, location) in root.children.iter().enumerate() {
    let XMLNode::Element(location) = location else {
      continue;
    };
    if !is_mods(location, config, "location") {
      continue;
    }
    for (u, url) in location.children.iter().enumerate() {
      let XMLNode::Element(url) = url else {
        continue;
      };
      if !is_mods(url, config, "url") {
        continue;
      }
      if attr(url, "usage") == Some(PRIMARY_DISPLAY) {
        return;
      }
      let href = text(url);
      if is_purl(&href) {
        purls.push((l, u, href));
      }
    }
  }

  let chosen = config
    .druid
    .as_deref()
    .and_then(|druid| purls.iter().find(|(_, _, href)| matches_druid(href, druid)))
    .or_else(|| purls.first())
    .map(|(l, u, _)| (*l, *u));
  let Some((l, u)) = chosen else {
    return;
  };
  if let Some(XMLNode::Element(location)) = root.children.get_mut(l) {
    if let Some(XMLNode::Element(url)) = location.children.get_mut(u) {
      url.attributes.insert("usage".to_owned(), PRIMARY_DISPLAY.to_owned());
    }
  }
}
