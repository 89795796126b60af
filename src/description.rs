//! The descriptive orchestrator: every field builder over one resource element

use itertools::Itertools;
use roxmltree::{Document, Node};

use crate::builders::title::TitleBuilder;
use crate::builders::{BuildContext, REGISTRY};
use crate::error::MappingError;
use crate::model::Description;
use crate::notifier::Notifier;
use crate::purl;
use crate::xml::{attr, elements, Namespaces};

const KNOWN_MODS_VERSIONS: [&str; 9] = ["3.0", "3.1", "3.2", "3.3", "3.4", "3.5", "3.6", "3.7", "3.8"];

/// Options for mapping a whole document.
#[derive(Clone, Debug)]
pub struct MapperConfig {
  pub namespaces: Namespaces,
  /// Fail with [`MappingError::MissingTitle`] when the record has no title.
  pub require_title: bool,
  /// Object identifier, with or without the `druid:` prefix.
  pub druid: Option<String>,
}

impl Default for MapperConfig {
  fn default() -> Self {
    Self {
      namespaces: Namespaces::default(),
      require_title: true,
      druid: None,
    }
  }
}

pub struct DescriptionBuilder<'c> {
  namespaces: &'c Namespaces,
  notifier: &'c dyn Notifier,
}

impl<'c> DescriptionBuilder<'c> {
  pub fn new(namespaces: &'c Namespaces, notifier: &'c dyn Notifier) -> Self {
    Self { namespaces, notifier }
  }

  /// Maps one resource element. The title runs first so a required but
  /// missing title fails before any other facet is built.
  pub fn build(
    &self,
    resource: Node<'_, '_>,
    require_title: bool,
    druid: Option<&str>,
  ) -> Result<Description, MappingError> {
    let context = BuildContext::new(self.namespaces, self.notifier, druid);
    if resource.parent_element().is_none() {
      self.check_root(resource);
    }
    self.check_alt_rep_groups(resource);

    let mut description = Description::default();
    if let Some(titles) = TitleBuilder::build_titles(resource, &context, require_title)? {
      description.title = titles;
    }
    description.purl = purl::primary_purl(resource, self.namespaces, druid);

    for builder in REGISTRY.iter() {
      log::debug!("building {}", builder.facet());
      if let Some(fragment) = builder.build(resource, &context)? {
        fragment.merge_into(&mut description);
      }
    }
    Ok(description)
  }

  fn check_root(&self, root: Node<'_, '_>) {
    if !self.namespaces.is(root, "mods") {
      self
        .notifier
        .warn("Unexpected root element", &[("element", root.tag_name().name())]);
    }
    if let Some(version) = attr(root, "version") {
      if !KNOWN_MODS_VERSIONS.contains(&version) {
        self.notifier.warn("MODS version unrecognized", &[("version", version)]);
      }
    }
  }

  /// Reports alternate representation groups whose members differ in element name.
  fn check_alt_rep_groups(&self, resource: Node<'_, '_>) {
    let groups = elements(resource)
      .filter_map(|node| Some((attr(node, "altRepGroup")?, node.tag_name().name())))
      .into_group_map();
    for (key, names) in groups.into_iter().sorted_by_key(|(key, _)| *key) {
      if names.iter().unique().count() > 1 {
        self.notifier.warn("Bad altRepGroup", &[("altRepGroup", key)]);
      }
    }
  }
}

/// Maps the root element of a parsed document.
pub fn map_document(
  document: &Document<'_>,
  config: &MapperConfig,
  notifier: &dyn Notifier,
) -> Result<Description, MappingError> {
  DescriptionBuilder::new(&config.namespaces, notifier).build(
    document.root_element(),
    config.require_title,
    config.druid.as_deref(),
  )
}

/// Parses and maps a MODS document.
pub fn map_str(
  xml: &str,
  config: &MapperConfig,
  notifier: &dyn Notifier,
) -> Result<Description, MappingError> {
  let document = Document::parse(xml)?;
  map_document(&document, config, notifier)
}
