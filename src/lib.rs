use core::fmt;

pub mod authority;
pub mod builders;
pub mod constants;
pub mod description;
pub mod element_builder;
pub mod error;
pub mod lang_script;
pub mod model;
pub mod normalizer;
pub mod notifier;
pub mod primary;
pub mod purl;
pub mod xml;

pub use description::{map_document, map_str, DescriptionBuilder, MapperConfig};
pub use error::{MappingError, NormalizeError};
pub use model::{Description, DescriptiveValue, Source};
pub use normalizer::{normalize_document, normalize_str, NormalizerConfig};
pub use notifier::{LogNotifier, Notifier, Warning, WarningLog};
pub use xml::Namespaces;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    JsonPretty,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::JsonPretty
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::JsonPretty => f.write_str("json-pretty"),
        }
    }
}

impl core::str::FromStr for OutputFormat {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "json-pretty" => Ok(Self::JsonPretty),
            _ => Err(anyhow::anyhow!("Incorrect output format type")),
        }
    }
}

impl OutputFormat {
    pub fn render<T: serde::Serialize>(self, value: &T) -> serde_json::Result<String> {
        match self {
            Self::Json => serde_json::to_string(value),
            Self::JsonPretty => serde_json::to_string_pretty(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_round_trips_through_display() {
        for format in [OutputFormat::Json, OutputFormat::JsonPretty] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn renders_compact_and_pretty() {
        let value = serde_json::json!({"title": [{"value": "x"}]});
        assert_eq!(OutputFormat::Json.render(&value).unwrap(), r#"{"title":[{"value":"x"}]}"#);
        assert!(OutputFormat::JsonPretty.render(&value).unwrap().contains('\n'));
    }
}
