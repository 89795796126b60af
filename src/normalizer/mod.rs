//! Round-trip normalizer.
//!
//! Rewrites raw MODS into the canonical shape the reverse mapping is expected
//! to produce, so that round-trip tests can compare documents as text. The
//! rules run in a fixed order and their output is a fixed point: normalizing
//! normalized output changes nothing.

mod rules;
mod tree;

use roxmltree::Document;
use xmltree::Element;

use crate::constants::{MODS_SCHEMA_LOCATION, MODS_VERSION};
use crate::error::NormalizeError;
use crate::xml::Namespaces;

pub use rules::RULES;

/// Options for normalizing a whole document.
#[derive(Clone, Debug)]
pub struct NormalizerConfig {
  pub namespaces: Namespaces,
  /// Object identifier preferred when choosing the primary PURL.
  pub druid: Option<String>,
  /// MODS version stamped on a root without one.
  pub version: String,
  pub schema_location: String,
}

impl Default for NormalizerConfig {
  fn default() -> Self {
    Self {
      namespaces: Namespaces::default(),
      druid: None,
      version: MODS_VERSION.to_owned(),
      schema_location: MODS_SCHEMA_LOCATION.to_owned(),
    }
  }
}

/// Applies every rule to a tree in place.
pub fn normalize_element(root: &mut Element, config: &NormalizerConfig) {
  for (name, rule) in RULES.iter() {
    log::debug!("normalizing: {name}");
    rule(root, config);
  }
}

/// Normalizes the root element of a parsed document and writes it out.
pub fn normalize_document(document: &Document<'_>, config: &NormalizerConfig) -> Result<String, NormalizeError> {
  let mut root = tree::from_node(document.root_element());
  normalize_element(&mut root, config);
  tree::write(&root)
}

pub fn normalize_str(xml: &str, config: &NormalizerConfig) -> Result<String, NormalizeError> {
  let document = Document::parse(xml)?;
  normalize_document(&document, config)
}

#[cfg(test)]
mod tests {
  use super::*;
  use xmltree::XMLNode;

  const XLINK: &str = "http://www.w3.org/1999/xlink";

  fn normalized(body: &str) -> Element {
    normalized_with(body, &NormalizerConfig::default())
  }

  fn normalized_with(body: &str, config: &NormalizerConfig) -> Element {
    let xml = format!(r#"<mods xmlns="http://www.loc.gov/mods/v3" version="3.6">{body}</mods>"#);
    let document = Document::parse(&xml).unwrap();
    let mut root = tree::from_node(document.root_element());
    normalize_element(&mut root, config);
    root
  }

  fn child_element(node: &XMLNode) -> Option<&Element> {
    match node {
      XMLNode::Element(e) => Some(e),
      _ => None,
    }
  }

  fn attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
  }

  #[test]
  fn injects_namespaces_and_schema() {
    let root = normalized("<note>x</note>");
    let ns = root.namespaces.as_ref().unwrap();
    assert_eq!(ns.get("xlink"), Some(XLINK));
    assert_eq!(ns.get("xsi"), Some("http://www.w3.org/2001/XMLSchema-instance"));
    assert_eq!(attr(&root, "version"), Some("3.6"));
    assert_eq!(attr(&root, "xsi:schemaLocation"), Some(MODS_SCHEMA_LOCATION));
  }

  #[test]
  fn unqualified_document_gains_default_namespace() {
    let out = normalize_str("<mods><note>x</note></mods>", &NormalizerConfig::default()).unwrap();
    assert!(out.contains(r#"xmlns="http://www.loc.gov/mods/v3""#));
    assert!(out.contains(r#"version="3.7""#));
    assert!(out.contains("<note>x</note>"));
  }

  #[test]
  fn infers_event_type() {
    let root = normalized(
      "<originInfo><publisher>Knopf</publisher><dateCreated>1900</dateCreated></originInfo>
       <originInfo><dateCreated>1900</dateCreated></originInfo>
       <originInfo eventType=\"distribution\"><dateIssued>1900</dateIssued></originInfo>
       <originInfo><place><placeTerm>Paris</placeTerm></place></originInfo>",
    );
    let types: Vec<_> = root
      .children
      .iter()
      .filter_map(child_element)
      .map(|e| attr(e, "eventType"))
      .collect();
    assert_eq!(types, vec![Some("publication"), Some("production"), Some("distribution"), None]);
  }

  #[test]
  fn strips_echoed_date_type_on_empty_date() {
    let root = normalized(
      r#"<originInfo eventType="manufacture"><dateOther type="manufacture"/><dateOther type="manufacture">1900</dateOther></originInfo>"#,
    );
    let origin = root.get_child("originInfo").unwrap();
    let dates: Vec<_> = origin.children.iter().filter_map(child_element).collect();
    assert_eq!(dates.len(), 1);
    assert_eq!(attr(dates[0], "type"), Some("manufacture"));
  }

  #[test]
  fn defaults_place_term_type() {
    let root = normalized(r#"<originInfo eventType="publication"><place><placeTerm>Paris</placeTerm><placeTerm type="code">fr</placeTerm></place></originInfo>"#);
    let place = root.get_child("originInfo").unwrap().get_child("place").unwrap();
    let types: Vec<_> = place
      .children
      .iter()
      .filter_map(child_element)
      .map(|e| attr(e, "type"))
      .collect();
    assert_eq!(types, vec![Some("text"), Some("code")]);
  }

  #[test]
  fn normalizes_role_terms() {
    let root = normalized(
      r#"<name><namePart>Smith</namePart><role>
           <roleTerm type="text" authority="marcrelator">Author</roleTerm>
           <roleTerm type="code" authority="MARCRELATOR">AUT</roleTerm>
         </role></name>"#,
    );
    let role = root.get_child("name").unwrap().get_child("role").unwrap();
    let terms: Vec<_> = role.children.iter().filter_map(child_element).collect();
    assert_eq!(terms[0].get_text().as_deref(), Some("author"));
    assert_eq!(terms[1].get_text().as_deref(), Some("AUT"));
    for term in terms {
      assert_eq!(attr(term, "authorityURI"), Some("http://id.loc.gov/vocabulary/relators/"));
    }
  }

  #[test]
  fn drops_singleton_alt_rep_groups() {
    let root = normalized(
      r#"<titleInfo altRepGroup="1"><title>a</title></titleInfo>
         <titleInfo altRepGroup="1"><title>b</title></titleInfo>
         <note altRepGroup="2">c</note>"#,
    );
    let groups: Vec<_> = root
      .children
      .iter()
      .filter_map(child_element)
      .map(|e| attr(e, "altRepGroup"))
      .collect();
    assert_eq!(groups, vec![Some("1"), Some("1"), None]);
  }

  #[test]
  fn removes_empty_elements_bottom_up() {
    let root = normalized(
      "<titleInfo><title>x</title><subTitle/></titleInfo>
       <physicalDescription><extent> </extent></physicalDescription>
       <name><namePart>Smith</namePart><etal/></name>",
    );
    assert!(root.get_child("physicalDescription").is_none());
    assert_eq!(root.get_child("titleInfo").unwrap().children.len(), 1);
    assert!(root.get_child("name").unwrap().get_child("etal").is_some());
  }

  #[test]
  fn marks_primary_purl() {
    let body = "<location><url>https://purl.stanford.edu/aa111bb2222</url></location>
                <location><url>https://purl.stanford.edu/cc333dd4444</url></location>";
    let urls = |root: &Element| -> Vec<Option<String>> {
      root
        .children
        .iter()
        .filter_map(child_element)
        .filter_map(|l| l.get_child("url"))
        .map(|u| attr(u, "usage").map(str::to_owned))
        .collect()
    };
    assert_eq!(urls(&normalized(body)), vec![Some("primary display".to_owned()), None]);

    let config = NormalizerConfig { druid: Some("druid:cc333dd4444".into()), ..NormalizerConfig::default() };
    assert_eq!(urls(&normalized_with(body, &config)), vec![None, Some("primary display".to_owned())]);
  }

  #[test]
  fn existing_primary_display_is_kept() {
    let root = normalized(
      r#"<location><url>https://purl.stanford.edu/aa111bb2222</url></location>
         <location><url usage="primary display">https://example.com/x</url></location>"#,
    );
    let first = root.get_child("location").unwrap().get_child("url").unwrap();
    assert_eq!(attr(first, "usage"), None);
  }

  #[test]
  fn is_idempotent() {
    let xml = r#"<mods:mods xmlns:mods="http://www.loc.gov/mods/v3">
      <mods:titleInfo altRepGroup="0"><mods:title>Paris</mods:title><mods:subTitle/></mods:titleInfo>
      <mods:originInfo><mods:dateIssued>1900</mods:dateIssued><mods:place><mods:placeTerm>Paris</mods:placeTerm></mods:place></mods:originInfo>
      <mods:location><mods:url>https://purl.stanford.edu/aa111bb2222</mods:url></mods:location>
    </mods:mods>"#;
    let config = NormalizerConfig::default();
    let once = normalize_str(xml, &config).unwrap();
    assert_eq!(normalize_str(&once, &config).unwrap(), once);
  }

  #[test]
  fn malformed_input() {
    assert!(matches!(
      normalize_str("<mods>", &NormalizerConfig::default()),
      Err(NormalizeError::Xml(_))
    ));
  }
}
