//! The persistence adapter contract, [`ContactDao`].
//!
//! The trait is implemented by storage backends ([`MemoryDao`] here,
//! `addressbook-store-sqlite` for a relational table). It knows nothing about
//! validation or duplicate rules; those live in
//! [`ContactStore`](crate::store::ContactStore).
//!
//! [`MemoryDao`]: crate::memory::MemoryDao

use std::future::Future;

use crate::contact::{Contact, ContactDraft, ContactId};

/// Abstraction over a contact storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactDao: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a contact and return its identifier.
  ///
  /// If `draft.id` is set the backend must store the contact under that id;
  /// otherwise it generates one.
  fn create(
    &self,
    draft: ContactDraft,
  ) -> impl Future<Output = Result<ContactId, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn read<'a>(
    &'a self,
    id: &'a ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Every stored contact, in the backend's natural order.
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact. Returns `false` (and does nothing) if it did not exist.
  fn delete<'a>(
    &'a self,
    id: &'a ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
