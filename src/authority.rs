//! Canonicalization of controlled vocabulary codes and URIs

use lazy_regex::regex_is_match;

use crate::constants::{AUTHORITY_URIS, CODE_CORRECTIONS};
use crate::model::Source;
use crate::notifier::Notifier;

/// Canonical authority code. Blank input is absent.
pub fn normalize_code(code: Option<&str>, notifier: &dyn Notifier) -> Option<String> {
  let code = code.map(str::trim).filter(|c| !c.is_empty())?;
  match CODE_CORRECTIONS.get(code) {
    Some(corrected) => {
      notifier.warn("Authority code corrected", &[("from", code), ("to", corrected)]);
      Some((*corrected).to_owned())
    }
    None => Some(code.to_owned()),
  }
}

/// Canonical authority URI. Blank input is absent.
pub fn normalize_uri(uri: Option<&str>) -> Option<String> {
  let uri = uri.map(str::trim).filter(|u| !u.is_empty())?;
  if AUTHORITY_URIS.contains(uri) {
    Some(format!("{uri}/"))
  } else {
    Some(uri.to_owned())
  }
}

/// A value URI is kept whatever its scheme, but a non-http one is reported.
pub fn value_uri(uri: Option<&str>, notifier: &dyn Notifier) -> Option<String> {
  let uri = uri.map(str::trim).filter(|u| !u.is_empty())?;
  if !regex_is_match!(r"^https?://", uri) {
    notifier.warn("Value URI has unexpected value", &[("uri", uri)]);
  }
  Some(uri.to_owned())
}

/// Source from `authority` and `authorityURI` attributes.
pub fn build_source(
  authority: Option<&str>,
  authority_uri: Option<&str>,
  notifier: &dyn Notifier,
) -> Option<Source> {
  let source = Source {
    code: normalize_code(authority, notifier),
    uri: normalize_uri(authority_uri),
    value: None,
  };
  if source.is_empty() {
    None
  } else {
    Some(source)
  }
}

/// Source from a node's `authority` and `authorityURI` attributes.
pub fn node_source(node: roxmltree::Node<'_, '_>, notifier: &dyn Notifier) -> Option<Source> {
  build_source(node.attribute("authority"), node.attribute("authorityURI"), notifier)
}
