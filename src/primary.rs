//! At most one value per facet may be marked primary

use crate::model::{Contributor, DescriptiveValue, Language, Shape};
use crate::notifier::Notifier;

pub const PRIMARY: &str = "primary";

/// Anything carrying a `status`.
pub trait HasStatus: Sized {
  fn status(&self) -> Option<&str>;
  fn clear_status(&mut self);

  /// Alternate representations grouped under this item.
  fn alternates(&self) -> &[Self] {
    &[]
  }

  fn alternates_mut(&mut self) -> &mut [Self] {
    &mut []
  }
}

macro_rules! impl_has_status {
  ($t:ty $({ $($alternates:tt)* })?) => {
    impl HasStatus for $t {
      fn status(&self) -> Option<&str> {
        self.status.as_deref()
      }
      fn clear_status(&mut self) {
        self.status = None;
      }
      $($($alternates)*)?
    }
  };
}

impl_has_status!(Language);

impl_has_status!(Contributor {
  fn alternates(&self) -> &[Self] {
    &self.parallel_contributor
  }
  fn alternates_mut(&mut self) -> &mut [Self] {
    &mut self.parallel_contributor
  }
});

impl_has_status!(DescriptiveValue {
  fn alternates(&self) -> &[Self] {
    match &self.shape {
      Some(Shape::ParallelValue(members)) => members,
      _ => &[],
    }
  }
  fn alternates_mut(&mut self) -> &mut [Self] {
    match &mut self.shape {
      Some(Shape::ParallelValue(members)) => members,
      _ => &mut [],
    }
  }
});

/// Demotes every primary after the first and reports the repair.
/// Returns true if anything was demoted.
pub fn resolve<T: HasStatus>(items: &mut [T], facet: &str, notifier: &dyn Notifier) -> bool {
  let mut seen = false;
  let mut demoted = false;
  for item in items.iter_mut().filter(|i| i.status() == Some(PRIMARY)) {
    if seen {
      item.clear_status();
      demoted = true;
    }
    seen = true;
  }
  if demoted {
    notifier.warn("Multiple marked as primary", &[("type", facet)]);
  }
  demoted
}

/// Like [`resolve`], but members of parallel groups count as facet members:
/// a primary inside one group demotes primaries everywhere after it.
pub fn resolve_nested<T: HasStatus>(items: &mut [T], facet: &str, notifier: &dyn Notifier) -> bool {
  fn walk<T: HasStatus>(item: &mut T, seen: &mut bool, demoted: &mut bool) {
    if item.status() == Some(PRIMARY) {
      if *seen {
        item.clear_status();
        *demoted = true;
      }
      *seen = true;
    }
    for member in item.alternates_mut() {
      walk(member, seen, demoted);
    }
  }

  let mut seen = false;
  let mut demoted = false;
  for item in items.iter_mut() {
    walk(item, &mut seen, &mut demoted);
  }
  if demoted {
    notifier.warn("Multiple marked as primary", &[("type", facet)]);
  }
  demoted
}

/// Primaries at the top level and inside parallel groups.
pub fn count_nested_primary<T: HasStatus>(items: &[T]) -> usize {
  items
    .iter()
    .map(|item| usize::from(item.status() == Some(PRIMARY)) + count_nested_primary(item.alternates()))
    .sum()
}

pub fn count_primary<T: HasStatus>(items: &[T]) -> usize {
  items.iter().filter(|i| i.status() == Some(PRIMARY)).count()
}
