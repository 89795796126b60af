//! `language` to language

use roxmltree::Node;

use super::{non_empty, BuildContext, FieldBuilder, Fragment};
use crate::authority::{node_source, value_uri};
use crate::error::MappingError;
use crate::model::{DescriptiveValue, Language, Shape};
use crate::primary::{self, PRIMARY};
use crate::xml::{attr, text};

pub struct LanguageBuilder;

impl FieldBuilder for LanguageBuilder {
  fn facet(&self) -> &'static str {
    "language"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let mut languages: Vec<_> = context
      .namespaces
      .children(resource, "language")
      .filter_map(|node| build_language(node, context))
      .collect();
    primary::resolve(&mut languages, self.facet(), context.notifier);
    Ok(non_empty(languages, Fragment::Language))
  }
}

pub fn build_language(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<Language> {
  let ns = context.namespaces;
  let mut language = Language::default();
  for term in ns.children(node, "languageTerm") {
    let Some(term_text) = text(term) else {
      continue;
    };
    match attr(term, "type") {
      Some("code") => language.code = language.code.or(Some(term_text)),
      _ => language.value = language.value.or(Some(term_text)),
    }
    if language.source.is_none() {
      language.source = node_source(term, context.notifier);
    }
    if language.uri.is_none() {
      language.uri = value_uri(term.attribute("valueURI"), context.notifier);
    }
  }
  language.script = script(node, context);

  if language.code.is_none()
    && language.value.is_none()
    && language.uri.is_none()
    && language.script.is_none()
  {
    return None;
  }
  if attr(node, "usage") == Some(PRIMARY) {
    language.status = Some(PRIMARY.to_owned());
  }
  language.display_label = attr(node, "displayLabel").map(str::to_owned);
  Some(language)
}

/// The `scriptTerm`s of a language as one value with code and text.
fn script(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let mut script = DescriptiveValue::default();
  for term in context.namespaces.children(node, "scriptTerm") {
    let Some(term_text) = text(term) else {
      continue;
    };
    match attr(term, "type") {
      Some("code") => script.code = script.code.or(Some(term_text)),
      _ if script.shape.is_none() => script.shape = Some(Shape::Value(term_text)),
      _ => {}
    }
    if script.source.is_none() {
      script.source = node_source(term, context.notifier);
    }
    if script.uri.is_none() {
      script.uri = value_uri(term.attribute("valueURI"), context.notifier);
    }
  }
  (!script.is_empty()).then(|| script)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builders::test_support::run_json;
  use serde_json::json;

  #[test]
  fn code_text_and_script() {
    let (languages, _) = run_json(
      &LanguageBuilder,
      r#"<language usage="primary">
        <languageTerm type="code" authority="iso639-2b" authorityURI="http://id.loc.gov/vocabulary/iso639-2" valueURI="http://id.loc.gov/vocabulary/iso639-2/rus">rus</languageTerm>
        <languageTerm type="text">Russian</languageTerm>
        <scriptTerm type="code" authority="iso15924">Cyrl</scriptTerm>
        <scriptTerm type="text">Cyrillic</scriptTerm>
      </language>"#,
    );
    assert_eq!(
      languages,
      json!([{
        "code": "rus",
        "value": "Russian",
        "uri": "http://id.loc.gov/vocabulary/iso639-2/rus",
        "source": {"code": "iso639-2b", "uri": "http://id.loc.gov/vocabulary/iso639-2/"},
        "status": "primary",
        "script": {"value": "Cyrillic", "code": "Cyrl", "source": {"code": "iso15924"}}
      }])
    );
  }

  #[test]
  fn empty_language_is_skipped_and_primary_resolved() {
    let (languages, log) = run_json(
      &LanguageBuilder,
      r#"<language><languageTerm type="code"/></language>
         <language usage="primary"><languageTerm type="code">eng</languageTerm></language>
         <language usage="primary"><languageTerm type="code">fre</languageTerm></language>"#,
    );
    assert_eq!(languages, json!([{"code": "eng", "status": "primary"}, {"code": "fre"}]));
    assert!(log.contains("Multiple marked as primary"));
  }
}
