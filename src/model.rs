//! The normalized Description model.
//!
//! Every leaf is a [`DescriptiveValue`]: a tagged record carrying at most one
//! of `value`, `structuredValue`, `parallelValue` or `groupedValue` plus
//! optional qualifiers. Facets with richer structure (contributors, events,
//! access) are typed records whose fields are descriptive values.
//! Empty fields are never serialized.

use serde::Serialize;

/// The four mutually exclusive shapes of a descriptive value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
  Value(String),
  StructuredValue(Vec<DescriptiveValue>),
  ParallelValue(Vec<DescriptiveValue>),
  GroupedValue(Vec<DescriptiveValue>),
}

/// A controlled vocabulary reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Source {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uri: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

impl Source {
  pub fn code(code: impl Into<String>) -> Self {
    Self { code: Some(code.into()), ..Self::default() }
  }

  pub fn value(value: impl Into<String>) -> Self {
    Self { value: Some(value.into()), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_none() && self.uri.is_none() && self.value.is_none()
  }
}

/// Language and script of a value's text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueLanguage {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<Source>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value_script: Option<Box<DescriptiveValue>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveValue {
  #[serde(flatten)]
  pub shape: Option<Shape>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uri: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub standard: Option<Source>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub encoding: Option<Source>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<Source>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub qualifier: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value_language: Option<ValueLanguage>,
}

impl DescriptiveValue {
  pub fn value(value: impl Into<String>) -> Self {
    Self { shape: Some(Shape::Value(value.into())), ..Self::default() }
  }

  pub fn typed(value: impl Into<String>, kind: impl Into<String>) -> Self {
    Self::value(value).with_type(kind)
  }

  pub fn structured(parts: Vec<DescriptiveValue>) -> Self {
    Self { shape: Some(Shape::StructuredValue(parts)), ..Self::default() }
  }

  pub fn parallel(members: Vec<DescriptiveValue>) -> Self {
    Self { shape: Some(Shape::ParallelValue(members)), ..Self::default() }
  }

  pub fn grouped(members: Vec<DescriptiveValue>) -> Self {
    Self { shape: Some(Shape::GroupedValue(members)), ..Self::default() }
  }

  pub fn with_type(mut self, kind: impl Into<String>) -> Self {
    self.kind = Some(kind.into());
    self
  }

  pub fn text(&self) -> Option<&str> {
    match &self.shape {
      Some(Shape::Value(v)) => Some(v),
      _ => None,
    }
  }

  /// Members of a structured, parallel or grouped value.
  pub fn members(&self) -> &[DescriptiveValue] {
    match &self.shape {
      Some(Shape::StructuredValue(m) | Shape::ParallelValue(m) | Shape::GroupedValue(m)) => m,
      _ => &[],
    }
  }

  pub fn is_primary(&self) -> bool {
    self.status.as_deref() == Some("primary")
  }

  /// A value with no shape may still identify something by code or uri.
  pub fn is_well_formed(&self) -> bool {
    let own = self.shape.is_some() || self.code.is_some() || self.uri.is_some();
    own && self.members().iter().all(Self::is_well_formed)
      && self.note.iter().all(|n| n.is_well_formed() || n.kind.is_some())
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub name: Vec<DescriptiveValue>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub role: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub identifier: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_label: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub parallel_contributor: Vec<Contributor>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_label: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub date: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub contributor: Vec<Contributor>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub location: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value_language: Option<ValueLanguage>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub parallel_event: Vec<Event>,
}

impl Event {
  pub fn of_type(kind: Option<&str>) -> Self {
    Self { kind: kind.map(str::to_owned), ..Self::default() }
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uri: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<Source>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub script: Option<DescriptiveValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetadata {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub contributor: Vec<Contributor>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub event: Vec<Event>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub language: Vec<Language>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub metadata_standard: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub identifier: Vec<DescriptiveValue>,
}

impl AdminMetadata {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveAccess {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub url: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub physical_location: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub digital_location: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub access_contact: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
}

impl DescriptiveAccess {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Geographic {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub form: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub subject: Vec<DescriptiveValue>,
}

/// A related item: a nested description plus its relationship.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uri: Option<String>,
  #[serde(flatten)]
  pub description: Description,
}

/// The root record produced for one resource element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub title: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub contributor: Vec<Contributor>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub event: Vec<Event>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub subject: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub form: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub language: Vec<Language>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub note: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub identifier: Vec<DescriptiveValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub admin_metadata: Option<AdminMetadata>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub related_resource: Vec<RelatedResource>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub geographic: Vec<Geographic>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access: Option<DescriptiveAccess>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub purl: Option<String>,
}

impl Description {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  /// Every descriptive value in the description, recursively.
  pub fn values(&self) -> Vec<&DescriptiveValue> {
    let mut out = Vec::new();
    fn push<'a>(out: &mut Vec<&'a DescriptiveValue>, values: &'a [DescriptiveValue]) {
      for v in values {
        out.push(v);
        push(out, v.members());
      }
    }
    fn contributors<'a>(out: &mut Vec<&'a DescriptiveValue>, cs: &'a [Contributor]) {
      for c in cs {
        push(out, &c.name);
        push(out, &c.role);
        push(out, &c.identifier);
        push(out, &c.note);
        contributors(out, &c.parallel_contributor);
      }
    }
    fn events<'a>(out: &mut Vec<&'a DescriptiveValue>, es: &'a [Event]) {
      for e in es {
        push(out, &e.date);
        push(out, &e.location);
        push(out, &e.note);
        contributors(out, &e.contributor);
        events(out, &e.parallel_event);
      }
    }
    fn scripts<'a>(out: &mut Vec<&'a DescriptiveValue>, languages: &'a [Language]) {
      for script in languages.iter().filter_map(|l| l.script.as_ref()) {
        push(out, std::slice::from_ref(script));
      }
    }
    push(&mut out, &self.title);
    contributors(&mut out, &self.contributor);
    events(&mut out, &self.event);
    push(&mut out, &self.subject);
    push(&mut out, &self.form);
    scripts(&mut out, &self.language);
    push(&mut out, &self.note);
    push(&mut out, &self.identifier);
    if let Some(admin) = &self.admin_metadata {
      contributors(&mut out, &admin.contributor);
      events(&mut out, &admin.event);
      scripts(&mut out, &admin.language);
      push(&mut out, &admin.note);
      push(&mut out, &admin.metadata_standard);
      push(&mut out, &admin.identifier);
    }
    for geo in &self.geographic {
      push(&mut out, &geo.form);
      push(&mut out, &geo.subject);
    }
    if let Some(access) = &self.access {
      push(&mut out, &access.url);
      push(&mut out, &access.physical_location);
      push(&mut out, &access.digital_location);
      push(&mut out, &access.access_contact);
      push(&mut out, &access.note);
    }
    for related in &self.related_resource {
      out.extend(related.description.values());
    }
    out
  }
}
