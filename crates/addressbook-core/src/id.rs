//! Identifier generation strategies.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::contact::ContactId;

/// Produces fresh, unique contact identifiers.
pub trait IdGenerator: Send + Sync {
  fn new_id(&self) -> ContactId;
}

impl<F> IdGenerator for F
where
  F: Fn() -> ContactId + Send + Sync,
{
  fn new_id(&self) -> ContactId { self() }
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
  fn new_id(&self) -> ContactId {
    ContactId::new(Uuid::new_v4().hyphenated().to_string())
  }
}

/// Monotonic counter, optionally prefixed (`"c-1"`, `"c-2"`, ...).
#[derive(Debug)]
pub struct SequentialGenerator {
  prefix: String,
  next:   AtomicU64,
}

impl SequentialGenerator {
  pub fn new() -> Self { Self::starting_at(1) }

  pub fn starting_at(first: u64) -> Self {
    Self { prefix: String::new(), next: AtomicU64::new(first) }
  }

  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = prefix.into();
    self
  }
}

impl Default for SequentialGenerator {
  fn default() -> Self { Self::new() }
}

impl IdGenerator for SequentialGenerator {
  fn new_id(&self) -> ContactId {
    let n = self.next.fetch_add(1, Ordering::Relaxed);
    ContactId::new(format!("{}{n}", self.prefix))
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn sequential_counts_up() {
    let g = SequentialGenerator::new();
    assert_eq!(g.new_id().as_str(), "1");
    assert_eq!(g.new_id().as_str(), "2");
  }

  #[test]
  fn sequential_with_prefix_and_start() {
    let g = SequentialGenerator::starting_at(10).with_prefix("c-");
    assert_eq!(g.new_id().as_str(), "c-10");
    assert_eq!(g.new_id().as_str(), "c-11");
  }

  #[test]
  fn uuid_ids_are_distinct() {
    let ids: HashSet<_> = (0..32).map(|_| UuidGenerator.new_id()).collect();
    assert_eq!(ids.len(), 32);
  }

  #[test]
  fn closures_are_generators() {
    let g = || ContactId::new("fixed");
    assert_eq!(g.new_id().as_str(), "fixed");
  }
}
