//! [`SqliteDao`] — the SQLite implementation of [`ContactDao`].

use std::path::Path;

use addressbook_core::{Contact, ContactDraft, ContactId, dao::ContactDao};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  Result,
  encode::{RawContact, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact table in a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteDao {
  conn: tokio_rusqlite::Connection,
}

impl SqliteDao {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(?path, "opening sqlite contact store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let dao = Self { conn };
    dao.init_schema().await?;
    Ok(dao)
  }

  /// Open an in-memory database — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let dao = Self { conn };
    dao.init_schema().await?;
    Ok(dao)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactDao impl ─────────────────────────────────────────────────────────

impl ContactDao for SqliteDao {
  type Error = crate::Error;

  async fn create(&self, draft: ContactDraft) -> Result<ContactId> {
    let id_str       = draft.id.map(|id| id.as_str().to_owned());
    let first_name   = draft.first_name;
    let surname      = draft.surname;
    let birthday_str = draft.birthday.map(encode_date);
    let phone        = draft.phone;

    let id: String = self
      .conn
      .call(move |conn| {
        // Dropping `tx` on an early return rolls the insert back.
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO contacts (contact_id, first_name, surname, birthday, phone)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, first_name, surname, birthday_str, phone],
        )?;

        let id = match id_str {
          Some(id) => id,
          None => {
            let seq = tx.last_insert_rowid();
            let generated = seq.to_string();
            tx.execute(
              "UPDATE contacts SET contact_id = ?1 WHERE seq = ?2",
              rusqlite::params![generated, seq],
            )?;
            generated
          }
        };

        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(ContactId::new(id))
  }

  async fn read(&self, id: &ContactId) -> Result<Option<Contact>> {
    let id_str = id.as_str().to_owned();

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM contacts WHERE contact_id = ?1",
                RawContact::COLUMNS
              ),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM contacts ORDER BY seq",
          RawContact::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn delete(&self, id: &ContactId) -> Result<bool> {
    let id_str = id.as_str().to_owned();

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}
