//! Geospatial RDF carried in `extension[displayLabel=geo]` to geographic

use roxmltree::Node;

use super::{non_empty, BuildContext, FieldBuilder, Fragment};
use crate::constants::MEDIA_TYPES_SOURCE;
use crate::error::MappingError;
use crate::model::{DescriptiveValue, Geographic, Source};
use crate::xml::{attr, elements, is_element_in, non_blank, text};

pub struct GeographicBuilder;

impl FieldBuilder for GeographicBuilder {
  fn facet(&self) -> &'static str {
    "geographic"
  }

  fn build(
    &self,
    resource: Node<'_, '_>,
    context: &BuildContext<'_>,
  ) -> Result<Option<Fragment>, MappingError> {
    let ns = context.namespaces;
    let places = ns
      .children(resource, "extension")
      .filter(|ext| attr(*ext, "displayLabel") == Some("geo"))
      .flat_map(move |ext| ext.descendants().filter(move |d| is_element_in(*d, &ns.rdf, "Description")))
      .map(|description| geographic(description, context))
      .filter(|g| !g.form.is_empty() || !g.subject.is_empty())
      .collect();
    Ok(non_empty(places, Fragment::Geographic))
  }
}

fn geographic(description: Node<'_, '_>, context: &BuildContext<'_>) -> Geographic {
  let ns = context.namespaces;
  let mut geo = Geographic::default();
  for child in elements(description) {
    if is_element_in(child, &ns.dc, "format") {
      geo.form.extend(text(child).map(|format| DescriptiveValue {
        source: Some(Source::value(MEDIA_TYPES_SOURCE)),
        ..DescriptiveValue::typed(format, "media type")
      }));
    } else if is_element_in(child, &ns.dc, "type") {
      geo.form.extend(text(child).map(|t| DescriptiveValue::typed(t, "type")));
    } else if is_element_in(child, &ns.gml, "boundedBy") {
      geo.subject.extend(
        elements(child)
          .filter(|e| is_element_in(*e, &ns.gml, "Envelope"))
          .filter_map(|envelope| bounding_box(envelope, context)),
      );
    } else if is_element_in(child, &ns.dc, "coverage") {
      geo.subject.extend(coverage(child, context));
    }
  }
  geo
}

/// Envelope corners as west, south, east, north.
fn bounding_box(envelope: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let ns = context.namespaces;
  let corner = |name: &str| -> Option<Vec<String>> {
    let corner = elements(envelope).find(|e| is_element_in(*e, &ns.gml, name))?;
    let coordinates: Vec<String> = text(corner)?.split_whitespace().map(str::to_owned).collect();
    (coordinates.len() == 2).then(|| coordinates)
  };
  let (Some(lower), Some(upper)) = (corner("lowerCorner"), corner("upperCorner")) else {
    context.warn("Incomplete bounding box", &[]);
    return None;
  };

  let parts = [("west", &lower[0]), ("south", &lower[1]), ("east", &upper[0]), ("north", &upper[1])]
    .into_iter()
    .map(|(kind, value)| DescriptiveValue::typed(value.as_str(), kind))
    .collect();
  Some(DescriptiveValue {
    encoding: Some(Source::value("decimal")),
    standard: attr(envelope, "srsName").map(Source::code),
    ..DescriptiveValue::structured(parts).with_type("bounding box coordinates")
  })
}

fn coverage(node: Node<'_, '_>, context: &BuildContext<'_>) -> Option<DescriptiveValue> {
  let ns = context.namespaces;
  let value = non_blank(node.attribute((ns.dc.as_str(), "title")))
    .map(str::to_owned)
    .or_else(|| text(node));
  let uri = non_blank(node.attribute((ns.rdf.as_str(), "resource"))).map(str::to_owned);
  if value.is_none() && uri.is_none() {
    return None;
  }
  let mut coverage = value.map(DescriptiveValue::value).unwrap_or_default();
  coverage.kind = Some("coverage".to_owned());
  coverage.uri = uri;
  Some(coverage)
}
