//! Encoding and decoding helpers between contact types and the plain-text
//! representations stored in SQLite columns.
//!
//! Birthdays are stored as ISO 8601 calendar dates (`YYYY-MM-DD`).

use addressbook_core::{Contact, ContactId};
use chrono::NaiveDate;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column values read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
  pub first_name: String,
  pub surname:    Option<String>,
  pub birthday:   Option<String>,
  pub phone:      Option<String>,
}

impl RawContact {
  /// Columns selected, in order, by every query that feeds [`RawContact::from_row`].
  pub const COLUMNS: &'static str = "contact_id, first_name, surname, birthday, phone";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id: row.get(0)?,
      first_name: row.get(1)?,
      surname:    row.get(2)?,
      birthday:   row.get(3)?,
      phone:      row.get(4)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         ContactId::new(self.contact_id),
      first_name: self.first_name,
      surname:    self.surname,
      birthday:   self.birthday.as_deref().map(decode_date).transpose()?,
      phone:      self.phone,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_use_iso_format() {
    let d = NaiveDate::from_ymd_opt(1974, 1, 8).unwrap();
    assert_eq!(encode_date(d), "1974-01-08");
    assert_eq!(decode_date("1974-01-08").unwrap(), d);
  }

  #[test]
  fn malformed_date_is_reported() {
    assert!(matches!(decode_date("08/01/1974"), Err(Error::DateParse(_))));
  }
}
