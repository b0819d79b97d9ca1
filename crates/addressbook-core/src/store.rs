//! [`ContactStore`] — the business layer over a [`ContactDao`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
  Error, Result,
  contact::{Contact, ContactId, NewContact},
  dao::ContactDao,
  error::InvalidContact,
  id::IdGenerator,
};

/// The address book: enforces the contact rules and delegates storage.
///
/// Every contact that reaches the adapter has a trimmed, non-empty first
/// name, and no two stored contacts share a first name and surname
/// (case-insensitively).
pub struct ContactStore<D> {
  dao:        D,
  generator:  Option<Arc<dyn IdGenerator>>,
  /// Serialises the duplicate check with the insert that follows it.
  write_lock: Mutex<()>,
}

impl<D: ContactDao> ContactStore<D> {
  /// A store that lets `dao` assign identifiers.
  pub fn new(dao: D) -> Self {
    Self { dao, generator: None, write_lock: Mutex::new(()) }
  }

  /// A store that assigns identifiers itself before handing contacts to `dao`.
  pub fn with_generator(dao: D, generator: impl IdGenerator + 'static) -> Self {
    Self {
      dao,
      generator: Some(Arc::new(generator)),
      write_lock: Mutex::new(()),
    }
  }

  /// The underlying persistence adapter.
  pub fn dao(&self) -> &D { &self.dao }

  /// Validate, normalise and persist a new contact, returning its id.
  ///
  /// Fails with [`Error::InvalidContact`] if the first name is missing or
  /// blank, or if a contact with the same name already exists. Nothing is
  /// written in either case.
  pub async fn add_contact(&self, contact: NewContact) -> Result<ContactId> {
    Ok(self.create_contact(contact).await?.id)
  }

  /// Like [`add_contact`](Self::add_contact), but returns the record as it
  /// was handed to the adapter, without reading it back.
  pub async fn create_contact(&self, contact: NewContact) -> Result<Contact> {
    let mut draft = contact.normalize().inspect_err(|e| {
      info!(reason = %e, "rejected contact");
    })?;

    let _guard = self.write_lock.lock().await;

    let key = draft.name_key();
    let existing = self.dao.list().await.map_err(Error::persistence)?;
    if existing.iter().any(|c| c.name_key() == key) {
      info!(first_name = %draft.first_name, "rejected duplicate contact");
      return Err(
        InvalidContact::Duplicate {
          first_name: draft.first_name,
          surname:    draft.surname,
        }
        .into(),
      );
    }

    if let Some(generator) = &self.generator {
      draft.id = Some(generator.new_id());
    }

    let stored = draft.clone();
    let id = self.dao.create(draft).await.map_err(Error::persistence)?;
    debug!(%id, "contact added");
    Ok(stored.into_contact(id))
  }

  /// Fetch one contact. Fails with [`Error::InvalidId`] if there is none.
  pub async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
    self
      .dao
      .read(id)
      .await
      .map_err(Error::persistence)?
      .ok_or_else(|| Error::InvalidId(id.clone()))
  }

  /// Every stored contact, in the adapter's order.
  pub async fn get_all(&self) -> Result<Vec<Contact>> {
    self.dao.list().await.map_err(Error::persistence)
  }

  /// Remove a contact. Deleting an unknown id succeeds without effect.
  pub async fn delete_contact(&self, id: &ContactId) -> Result<()> {
    let removed = self.dao.delete(id).await.map_err(Error::persistence)?;
    debug!(%id, removed, "contact deleted");
    Ok(())
  }
}
