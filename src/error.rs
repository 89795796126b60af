//! Error types for mapping and normalization.

use thiserror::Error;

/// Errors which abort mapping of a whole document.
#[derive(Debug, Error)]
pub enum MappingError {
  /// A title is required but the resource has none.
  #[error("missing title")]
  MissingTitle,

  /// A role code without an authority which is not a bare MARC relator code.
  #[error("contributor role code '{code}' is missing authority")]
  RoleMissingAuthority { code: String },

  /// The source could not be parsed.
  #[error("malformed XML: {0}")]
  Xml(#[from] roxmltree::Error),
}

/// Errors from the round-trip normalizer.
#[derive(Debug, Error)]
pub enum NormalizeError {
  #[error("malformed XML: {0}")]
  Xml(#[from] roxmltree::Error),

  #[error("failed to write normalized XML: {0}")]
  Write(#[from] xmltree::Error),

  #[error("normalized XML is not UTF-8: {0}")]
  Utf8(#[from] std::string::FromUtf8Error),
}
