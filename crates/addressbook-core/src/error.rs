//! Error types for `addressbook-core`.

use thiserror::Error;

use crate::contact::ContactId;

/// Why a contact was refused by [`ContactStore::add_contact`](crate::store::ContactStore::add_contact).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidContact {
  #[error("first name is required")]
  MissingFirstName,

  #[error("a contact named {} already exists", display_name(.first_name, .surname))]
  Duplicate {
    first_name: String,
    surname:    Option<String>,
  },
}

fn display_name(first_name: &str, surname: &Option<String>) -> String {
  match surname {
    Some(s) => format!("{first_name:?} {s:?}"),
    None => format!("{first_name:?}"),
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid contact: {0}")]
  InvalidContact(#[from] InvalidContact),

  #[error("no contact with id {0}")]
  InvalidId(ContactId),

  /// A failure raised by the persistence adapter, carried through untouched.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(err))
  }
}

/// Errors raised by the in-memory adapter, [`MemoryDao`](crate::memory::MemoryDao).
#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("contact id {0} is already taken")]
  IdTaken(ContactId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
