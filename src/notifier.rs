//! Side channel for data quality warnings raised while mapping

use std::cell::RefCell;

use serde::Serialize;

/// Receives non-fatal warnings. Mapping never reads back what it reported.
pub trait Notifier {
  fn warn(&self, message: &str, context: &[(&str, &str)]);
}

/// One reported warning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Warning {
  pub message: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub context: Vec<(String, String)>,
}

impl Warning {
  /// Value of a context entry, if reported.
  pub fn context_value(&self, key: &str) -> Option<&str> {
    self
      .context
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }
}

/// Collects every warning and logs it as it arrives.
#[derive(Debug, Default)]
pub struct WarningLog {
  warnings: RefCell<Vec<Warning>>,
}

impl WarningLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn into_warnings(self) -> Vec<Warning> {
    self.warnings.into_inner()
  }

  pub fn len(&self) -> usize {
    self.warnings.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.warnings.borrow().is_empty()
  }

  /// True if a warning with this message has been reported.
  pub fn contains(&self, message: &str) -> bool {
    self.warnings.borrow().iter().any(|w| w.message == message)
  }
}

fn log_warning(message: &str, context: &[(&str, &str)]) {
  if context.is_empty() {
    log::warn!("{message}");
  } else {
    let ctx = context
      .iter()
      .map(|(k, v)| format!("{k}={v}"))
      .collect::<Vec<_>>()
      .join(", ");
    log::warn!("{message} ({ctx})");
  }
}

impl Notifier for WarningLog {
  fn warn(&self, message: &str, context: &[(&str, &str)]) {
    log_warning(message, context);
    self.warnings.borrow_mut().push(Warning {
      message: message.to_owned(),
      context: context
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect(),
    });
  }
}

/// Logs warnings without keeping them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn warn(&self, message: &str, context: &[(&str, &str)]) {
    log_warning(message, context);
  }
}
