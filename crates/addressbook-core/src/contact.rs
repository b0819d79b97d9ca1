//! Contact types held by the address book.
//!
//! A contact moves through three shapes: [`NewContact`] as supplied by a
//! caller, [`ContactDraft`] once validated and normalised by the store, and
//! [`Contact`] once a persistence adapter has stored it under an id.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidContact;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque contact identifier.
///
/// Produced by an [`IdGenerator`](crate::id::IdGenerator) or by the
/// persistence adapter. Callers may compare and display it but must not rely
/// on its textual structure, which differs between backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
  pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// A contact as supplied by a caller, before any validation.
///
/// `first_name` is optional here only so that a missing value can be
/// represented and rejected; it is required by
/// [`ContactStore::add_contact`](crate::store::ContactStore::add_contact).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
  pub first_name: Option<String>,
  pub surname:    Option<String>,
  pub birthday:   Option<NaiveDate>,
  pub phone:      Option<String>,
}

impl NewContact {
  /// Convenience constructor with all optional fields left empty.
  pub fn named(first_name: impl Into<String>) -> Self {
    Self { first_name: Some(first_name.into()), ..Self::default() }
  }

  pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
    self.surname = Some(surname.into());
    self
  }

  pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
    self.birthday = Some(birthday);
    self
  }

  pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
    self.phone = Some(phone.into());
    self
  }

  /// Validate and trim the name fields.
  ///
  /// Fails when `first_name` is absent or blank. The surname is trimmed but
  /// kept even if it trims to an empty string.
  pub fn normalize(self) -> Result<ContactDraft, InvalidContact> {
    let first_name = self
      .first_name
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .ok_or(InvalidContact::MissingFirstName)?
      .to_owned();

    Ok(ContactDraft {
      id: None,
      first_name,
      surname: self.surname.map(|s| s.trim().to_owned()),
      birthday: self.birthday,
      phone: self.phone,
    })
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// A validated contact on its way to the persistence adapter.
///
/// `id` is filled in by the store when it owns an identifier generator;
/// otherwise the adapter assigns one in
/// [`ContactDao::create`](crate::dao::ContactDao::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
  pub id:         Option<ContactId>,
  pub first_name: String,
  pub surname:    Option<String>,
  pub birthday:   Option<NaiveDate>,
  pub phone:      Option<String>,
}

impl ContactDraft {
  /// Attach the final identifier, producing the stored form.
  pub fn into_contact(self, id: ContactId) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      surname: self.surname,
      birthday: self.birthday,
      phone: self.phone,
    }
  }

  pub(crate) fn name_key(&self) -> NameKey {
    NameKey::new(&self.first_name, self.surname.as_deref())
  }
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted contact. Reads always return reconstructed copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         ContactId,
  pub first_name: String,
  pub surname:    Option<String>,
  pub birthday:   Option<NaiveDate>,
  pub phone:      Option<String>,
}

impl Contact {
  pub(crate) fn name_key(&self) -> NameKey {
    NameKey::new(&self.first_name, self.surname.as_deref())
  }
}

// ─── Duplicate detection ─────────────────────────────────────────────────────

/// Trimmed, lower-cased `(first_name, surname)` pair.
///
/// Two contacts are duplicates when their keys are equal; a missing surname
/// only equals another missing surname.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct NameKey {
  first_name: String,
  surname:    Option<String>,
}

impl NameKey {
  fn new(first_name: &str, surname: Option<&str>) -> Self {
    Self {
      first_name: first_name.trim().to_lowercase(),
      surname:    surname.map(|s| s.trim().to_lowercase()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_trims_names() {
    let draft = NewContact::named("  Pedro  ")
      .with_surname(" Ballesteros\t")
      .normalize()
      .unwrap();
    assert_eq!(draft.first_name, "Pedro");
    assert_eq!(draft.surname.as_deref(), Some("Ballesteros"));
    assert!(draft.id.is_none());
  }

  #[test]
  fn normalize_rejects_missing_and_blank_first_name() {
    assert_eq!(
      NewContact::default().normalize(),
      Err(InvalidContact::MissingFirstName)
    );
    assert_eq!(
      NewContact::named("").normalize(),
      Err(InvalidContact::MissingFirstName)
    );
    assert_eq!(
      NewContact::named(" \t\n ").normalize(),
      Err(InvalidContact::MissingFirstName)
    );
  }

  #[test]
  fn name_key_ignores_case_and_padding() {
    assert_eq!(NameKey::new("Pedro", None), NameKey::new(" pEDRO ", None));
    assert_eq!(
      NameKey::new("Pedro", Some("Ballesteros")),
      NameKey::new("pedro", Some("  BALLESTEROS"))
    );
  }

  #[test]
  fn missing_surname_only_matches_missing_surname() {
    assert_ne!(NameKey::new("Pedro", None), NameKey::new("Pedro", Some("")));
    assert_ne!(NameKey::new("Pedro", None), NameKey::new("Pedro", Some("Ruiz")));
  }

  #[test]
  fn contact_id_serializes_as_plain_string() {
    let id = ContactId::new("42");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    assert_eq!(id.to_string(), "42");
  }
}
