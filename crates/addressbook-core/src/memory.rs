//! [`MemoryDao`] — an in-memory [`ContactDao`].
//!
//! Contacts are kept in insertion order. Nothing survives a restart.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
  contact::{Contact, ContactDraft, ContactId},
  dao::ContactDao,
  error::MemoryError,
  id::{IdGenerator, SequentialGenerator},
};

/// A contact table held in process memory.
///
/// Cloning is cheap; clones share the same contacts.
#[derive(Clone)]
pub struct MemoryDao {
  contacts:  Arc<RwLock<Vec<Contact>>>,
  generator: Arc<dyn IdGenerator>,
}

impl MemoryDao {
  /// An empty table that numbers contacts `1, 2, 3, ...`.
  pub fn new() -> Self { Self::with_generator(SequentialGenerator::new()) }

  /// An empty table that draws ids for id-less drafts from `generator`.
  pub fn with_generator(generator: impl IdGenerator + 'static) -> Self {
    Self {
      contacts:  Arc::new(RwLock::new(Vec::new())),
      generator: Arc::new(generator),
    }
  }

  pub async fn len(&self) -> usize { self.contacts.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.contacts.read().await.is_empty() }
}

impl Default for MemoryDao {
  fn default() -> Self { Self::new() }
}

impl ContactDao for MemoryDao {
  type Error = MemoryError;

  async fn create(&self, mut draft: ContactDraft) -> Result<ContactId, MemoryError> {
    let mut contacts = self.contacts.write().await;

    let id = match draft.id.take() {
      Some(id) => {
        if contacts.iter().any(|c| c.id == id) {
          return Err(MemoryError::IdTaken(id));
        }
        id
      }
      None => self.generator.new_id(),
    };

    contacts.push(draft.into_contact(id.clone()));
    Ok(id)
  }

  async fn read(&self, id: &ContactId) -> Result<Option<Contact>, MemoryError> {
    let contacts = self.contacts.read().await;
    Ok(contacts.iter().find(|c| &c.id == id).cloned())
  }

  async fn list(&self) -> Result<Vec<Contact>, MemoryError> {
    Ok(self.contacts.read().await.clone())
  }

  async fn delete(&self, id: &ContactId) -> Result<bool, MemoryError> {
    let mut contacts = self.contacts.write().await;
    let before = contacts.len();
    contacts.retain(|c| &c.id != id);
    Ok(contacts.len() != before)
  }
}
