//! Persistent URL detection among `location/url` nodes

use lazy_regex::regex_is_match;
use roxmltree::Node;

use crate::constants::PRIMARY_DISPLAY;
use crate::xml::{attr, text, Namespaces};

pub fn is_purl(url: &str) -> bool {
  regex_is_match!(r"^https?://(?:sul-)?purl(?:-[a-z]+)?\.stanford\.edu/"i, url.trim())
}

/// Bare object identifier, without a `druid:` prefix.
pub fn bare_druid(druid: &str) -> &str {
  druid.trim().trim_start_matches("druid:")
}

/// True if the URL's last path segment is the object identifier.
pub fn matches_druid(url: &str, druid: &str) -> bool {
  let druid = bare_druid(druid);
  !druid.is_empty() && url.trim().trim_end_matches('/').rsplit('/').next() == Some(druid)
}

/// All `location/url` nodes of a resource which hold a PURL.
pub fn purl_nodes<'a, 'input>(
  resource: Node<'a, 'input>,
  ns: &Namespaces,
) -> Vec<Node<'a, 'input>> {
  ns.children(resource, "location")
    .flat_map(|location| ns.children(location, "url").collect::<Vec<_>>())
    .filter(|url| text(*url).map_or(false, |t| is_purl(&t)))
    .collect()
}

/// The canonical PURL node: the one matching the identifier if given, else
/// the one marked primary display, else the only one.
pub fn primary_purl_node<'a, 'input>(
  resource: Node<'a, 'input>,
  ns: &Namespaces,
  druid: Option<&str>,
) -> Option<Node<'a, 'input>> {
  let nodes = purl_nodes(resource, ns);
  if let Some(druid) = druid {
    if let Some(node) = nodes
      .iter()
      .find(|n| text(**n).map_or(false, |t| matches_druid(&t, druid)))
    {
      return Some(*node);
    }
  }
  if let Some(node) = nodes.iter().find(|n| attr(**n, "usage") == Some(PRIMARY_DISPLAY)) {
    return Some(*node);
  }
  if nodes.len() == 1 {
    return Some(nodes[0]);
  }
  None
}

/// The canonical PURL value of a resource.
pub fn primary_purl(resource: Node<'_, '_>, ns: &Namespaces, druid: Option<&str>) -> Option<String> {
  primary_purl_node(resource, ns, druid).and_then(text)
}
