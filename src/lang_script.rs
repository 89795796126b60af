//! `lang` and `script` attributes to a value language

use roxmltree::Node;

use crate::constants::{ISO_15924, ISO_639_2B};
use crate::model::{DescriptiveValue, Source, ValueLanguage};
use crate::xml::attr;

/// Value language of a node, absent when it has neither `lang` nor `script`.
pub fn value_language(node: Node<'_, '_>) -> Option<ValueLanguage> {
  build(attr(node, "lang"), attr(node, "script"))
}

pub fn build(lang: Option<&str>, script: Option<&str>) -> Option<ValueLanguage> {
  if lang.is_none() && script.is_none() {
    return None;
  }
  Some(ValueLanguage {
    code: lang.map(str::to_owned),
    source: lang.map(|_| Source::code(ISO_639_2B)),
    value_script: script.map(|code| {
      Box::new(DescriptiveValue {
        code: Some(code.to_owned()),
        source: Some(Source::code(ISO_15924)),
        ..DescriptiveValue::default()
      })
    }),
  })
}
