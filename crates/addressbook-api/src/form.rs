//! Conversion of submitted contact forms into [`NewContact`] values.
//!
//! Every field arrives as text. Blank fields are treated as absent, and all
//! problems are collected so the client can correct them in one pass.

use std::collections::BTreeMap;

use addressbook_core::NewContact;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted birthday layouts: `dd/mm/yyyy` first, then ISO 8601.
const BIRTHDAY_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Raw contact form, as posted to `POST /contacts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
  pub first_name: Option<String>,
  pub surname:    Option<String>,
  /// `dd/mm/yyyy` or `yyyy-mm-dd`.
  pub birthday:   Option<String>,
  pub phone:      Option<String>,
}

/// Field name → human-readable problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
  pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
    let mut errors = Self::default();
    errors.add(field, message);
    errors
  }

  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.insert(field.into(), message.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }
}

impl ContactForm {
  /// Check every field and build the contact, or report all field errors.
  pub fn verify_and_convert(self) -> Result<NewContact, FieldErrors> {
    let mut errors = FieldErrors::default();

    let first_name = non_blank(self.first_name);
    if first_name.is_none() {
      errors.add("first_name", "first name is required");
    }

    let birthday = match non_blank(self.birthday) {
      None => None,
      Some(raw) => match parse_birthday(&raw) {
        Some(date) => Some(date),
        None => {
          errors.add("birthday", format!("{raw:?} is not a date (expected dd/mm/yyyy)"));
          None
        }
      },
    };

    let phone = non_blank(self.phone);
    if let Some(p) = &phone
      && !is_phone_number(p)
    {
      errors.add("phone", format!("{p:?} is not a phone number"));
    }

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(NewContact {
      first_name,
      surname: non_blank(self.surname),
      birthday,
      phone,
    })
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn parse_birthday(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  BIRTHDAY_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn is_phone_number(raw: &str) -> bool {
  raw.chars().any(|c| c.is_ascii_digit())
    && raw
      .chars()
      .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(first_name: &str) -> ContactForm {
    ContactForm { first_name: Some(first_name.into()), ..ContactForm::default() }
  }

  #[test]
  fn minimal_form_converts() {
    let contact = form("Pedro").verify_and_convert().unwrap();
    assert_eq!(contact, NewContact::named("Pedro"));
  }

  #[test]
  fn blank_fields_become_absent() {
    let contact = ContactForm {
      surname: Some("  ".into()),
      birthday: Some("".into()),
      phone: Some(" ".into()),
      ..form("Pedro")
    }
    .verify_and_convert()
    .unwrap();
    assert_eq!(contact.surname, None);
    assert_eq!(contact.birthday, None);
    assert_eq!(contact.phone, None);
  }

  #[test]
  fn birthday_accepts_both_layouts() {
    let expected = NaiveDate::from_ymd_opt(1974, 1, 8);
    for raw in ["8/1/1974", "08/01/1974", "1974-01-08"] {
      let contact = ContactForm { birthday: Some(raw.into()), ..form("Pedro") }
        .verify_and_convert()
        .unwrap();
      assert_eq!(contact.birthday, expected, "{raw}");
    }
  }

  #[test]
  fn all_errors_are_reported_together() {
    let errors = ContactForm {
      first_name: Some("   ".into()),
      surname:    None,
      birthday:   Some("31/02/1974".into()),
      phone:      Some("call me".into()),
    }
    .verify_and_convert()
    .unwrap_err();

    assert_eq!(errors.len(), 3);
    assert!(errors.get("first_name").is_some());
    assert!(errors.get("birthday").is_some());
    assert!(errors.get("phone").is_some());
  }

  #[test]
  fn phone_allows_common_punctuation() {
    assert!(is_phone_number("+34 (610) 10-10-10"));
    assert!(!is_phone_number("+-()"));
    assert!(!is_phone_number("610a"));
  }
}
