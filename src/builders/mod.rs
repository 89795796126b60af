//! Field builders: one per Description facet.
//!
//! Each builder reads the direct children of a resource element (the `mods`
//! root or a `relatedItem`) and returns a [`Fragment`] for its facet, or
//! nothing when the facet is absent. Builders report data quality problems
//! through the context's notifier and only fail for the fatal cases of
//! [`MappingError`].

use itertools::Itertools;
use roxmltree::Node;

use crate::description::DescriptionBuilder;
use crate::error::MappingError;
use crate::model::{
  AdminMetadata, Contributor, Description, DescriptiveAccess, DescriptiveValue, Event, Geographic,
  Language, RelatedResource,
};
use crate::notifier::Notifier;
use crate::xml::{attr, Namespaces};

pub mod access;
pub mod admin_metadata;
pub mod event;
pub mod form;
pub mod geographic;
pub mod identifier;
pub mod language;
pub mod name;
pub mod note;
pub mod related_resource;
pub mod subject;
pub mod title;

/// Everything a builder may consult besides its resource element.
pub struct BuildContext<'c> {
  pub namespaces: &'c Namespaces,
  pub notifier: &'c dyn Notifier,
  /// Object identifier, used only to pick the canonical PURL.
  pub druid: Option<&'c str>,
}

impl<'c> BuildContext<'c> {
  pub fn new(namespaces: &'c Namespaces, notifier: &'c dyn Notifier, druid: Option<&'c str>) -> Self {
    Self { namespaces, notifier, druid }
  }

  pub fn warn(&self, message: &str, context: &[(&str, &str)]) {
    self.notifier.warn(message, context);
  }

  /// Maps a nested resource element with the whole orchestrator.
  pub fn describe(&self, resource: Node<'_, '_>) -> Result<Description, MappingError> {
    DescriptionBuilder::new(self.namespaces, self.notifier).build(resource, false, None)
  }
}

/// One facet's contribution to a Description.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
  Title(Vec<DescriptiveValue>),
  Contributor(Vec<Contributor>),
  Event(Vec<Event>),
  Subject(Vec<DescriptiveValue>),
  Form(Vec<DescriptiveValue>),
  Language(Vec<Language>),
  Note(Vec<DescriptiveValue>),
  Identifier(Vec<DescriptiveValue>),
  AdminMetadata(AdminMetadata),
  RelatedResource(Vec<RelatedResource>),
  Geographic(Vec<Geographic>),
  Access(DescriptiveAccess),
}

impl Fragment {
  pub fn merge_into(self, description: &mut Description) {
    match self {
      Self::Title(v) => description.title.extend(v),
      Self::Contributor(v) => description.contributor.extend(v),
      Self::Event(v) => description.event.extend(v),
      Self::Subject(v) => description.subject.extend(v),
      Self::Form(v) => description.form.extend(v),
      Self::Language(v) => description.language.extend(v),
      Self::Note(v) => description.note.extend(v),
      Self::Identifier(v) => description.identifier.extend(v),
      Self::AdminMetadata(v) => description.admin_metadata = Some(v),
      Self::RelatedResource(v) => description.related_resource.extend(v),
      Self::Geographic(v) => description.geographic.extend(v),
      Self::Access(v) => description.access = Some(v),
    }
  }
}

/// Wraps a list as a fragment, or nothing when it is empty.
pub(crate) fn non_empty<T>(items: Vec<T>, wrap: fn(Vec<T>) -> Fragment) -> Option<Fragment> {
  if items.is_empty() {
    None
  } else {
    Some(wrap(items))
  }
}

pub trait FieldBuilder: Sync {
  /// Facet name, as used in warnings.
  fn facet(&self) -> &'static str;

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError>;
}

/// Every builder except title, in the order the orchestrator runs them.
pub static REGISTRY: [&dyn FieldBuilder; 11] = [
  &note::NoteBuilder,
  &language::LanguageBuilder,
  &name::ContributorBuilder,
  &event::EventBuilder,
  &subject::SubjectBuilder,
  &form::FormBuilder,
  &identifier::IdentifierBuilder,
  &admin_metadata::AdminMetadataBuilder,
  &related_resource::RelatedResourceBuilder,
  &geographic::GeographicBuilder,
  &access::AccessBuilder,
];

/// Sibling nodes either standing alone or linked by `altRepGroup`.
#[derive(Debug)]
pub enum AltRep<'a, 'input> {
  Single(Node<'a, 'input>),
  Group(Vec<Node<'a, 'input>>),
}

/// Splits nodes into alternate representation groups, keeping document order
/// (a group sits where its first member sits). A key held by a single node
/// does not make a group.
pub fn alt_rep_groups<'a, 'input>(
  nodes: Vec<Node<'a, 'input>>,
  context: &BuildContext<'_>,
) -> Vec<AltRep<'a, 'input>> {
  let counts = nodes.iter().filter_map(|n| attr(*n, "altRepGroup")).counts();
  let mut emitted: Vec<&str> = Vec::new();
  let mut out = Vec::new();
  for node in &nodes {
    match attr(*node, "altRepGroup") {
      Some(key) if counts[key] > 1 => {
        if emitted.contains(&key) {
          continue;
        }
        emitted.push(key);
        let members = nodes
          .iter()
          .filter(|n| attr(**n, "altRepGroup") == Some(key))
          .copied()
          .collect();
        out.push(AltRep::Group(members));
      }
      Some(key) => {
        context.warn("Unpaired altRepGroup", &[("altRepGroup", key), ("element", node.tag_name().name())]);
        out.push(AltRep::Single(*node));
      }
      None => out.push(AltRep::Single(*node)),
    }
  }
  out
}
