//! Wiring for the address book HTTP server.
//!
//! Everything is constructed explicitly at startup: a persistence adapter,
//! an optional identifier generator, the [`ContactStore`] over them, and the
//! router that receives the store.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use addressbook_core::{
  ContactStore,
  dao::ContactDao,
  id::{SequentialGenerator, UuidGenerator},
};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Who assigns contact identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
  /// The persistence adapter (row key for SQLite, counter for memory).
  #[default]
  Backend,
  /// The store, with random v4 UUIDs.
  Uuid,
  /// The store, with a counter that resumes after the highest numeric id
  /// already stored.
  Sequential,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `ADDRESSBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  /// SQLite database file. Contacts are kept in memory when unset.
  #[serde(default)]
  pub store_path:  Option<PathBuf>,
  #[serde(default)]
  pub id_strategy: IdStrategy,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

impl ServerConfig {
  /// Load from an optional TOML file overlaid with the environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("ADDRESSBOOK"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Assembly ─────────────────────────────────────────────────────────────────

/// Build the store over `dao` according to `strategy`.
///
/// For [`IdStrategy::Sequential`] the stored contacts are listed once so the
/// counter starts past every numeric id already present; ids that are not
/// plain numbers cannot collide with it and are skipped.
pub async fn build_store<D: ContactDao>(
  dao: D,
  strategy: IdStrategy,
) -> Result<ContactStore<D>, D::Error> {
  let store = match strategy {
    IdStrategy::Backend => ContactStore::new(dao),
    IdStrategy::Uuid => ContactStore::with_generator(dao, UuidGenerator),
    IdStrategy::Sequential => {
      let highest = dao
        .list()
        .await?
        .iter()
        .filter_map(|c| c.id.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
      debug!(highest, "seeding sequential ids");
      let generator = SequentialGenerator::starting_at(highest.saturating_add(1));
      ContactStore::with_generator(dao, generator)
    }
  };
  Ok(store)
}

/// The API router with request tracing.
pub fn app<D>(store: Arc<ContactStore<D>>) -> Router
where
  D: ContactDao + 'static,
{
  addressbook_api::api_router(store).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` (alone or followed by `/`) to the user's home
/// directory. Paths are returned unchanged when `HOME` is unset.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if s == "~"
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home);
  }
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use addressbook_core::{ContactId, NewContact, memory::MemoryDao};
  use addressbook_store_sqlite::SqliteDao;
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert!(cfg.store_path.is_none());
    assert_eq!(cfg.id_strategy, IdStrategy::Backend);
  }

  #[test]
  fn config_values_override_defaults() {
    let cfg = parse(
      r#"
        host = "0.0.0.0"
        port = 9000
        store_path = "/tmp/contacts.db"
        id_strategy = "uuid"
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:9000");
    assert_eq!(cfg.store_path.as_deref(), Some(Path::new("/tmp/contacts.db")));
    assert_eq!(cfg.id_strategy, IdStrategy::Uuid);
  }

  #[test]
  fn tilde_is_expanded_only_when_leading() {
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
    assert_eq!(expand_tilde(Path::new("rel/~/x.db")), PathBuf::from("rel/~/x.db"));
    assert_eq!(expand_tilde(Path::new("~user/x.db")), PathBuf::from("~user/x.db"));
  }

  #[test]
  fn bare_tilde_is_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~")), PathBuf::from(&home));
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
  }

  #[tokio::test]
  async fn sequential_strategy_assigns_store_ids() {
    let store = build_store(MemoryDao::new(), IdStrategy::Sequential).await.unwrap();
    let a = store.add_contact(NewContact::named("Ana")).await.unwrap();
    let b = store.add_contact(NewContact::named("Luis")).await.unwrap();
    assert_eq!((a.as_str(), b.as_str()), ("1", "2"));
  }

  fn temp_db() -> PathBuf {
    std::env::temp_dir().join(format!("addressbook-server-{}.db", uuid::Uuid::new_v4()))
  }

  #[tokio::test]
  async fn sequential_ids_resume_after_reopen() {
    let path = temp_db();

    let store = build_store(SqliteDao::open(&path).await.unwrap(), IdStrategy::Sequential)
      .await
      .unwrap();
    let first = store.add_contact(NewContact::named("Ana")).await.unwrap();
    drop(store);

    let store = build_store(SqliteDao::open(&path).await.unwrap(), IdStrategy::Sequential)
      .await
      .unwrap();
    let second = store.add_contact(NewContact::named("Luis")).await.unwrap();

    assert_eq!(first, ContactId::new("1"));
    assert_eq!(second, ContactId::new("2"));
    assert_eq!(store.get_all().await.unwrap().len(), 2);

    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn sequential_ids_skip_backend_assigned_rows() {
    let path = temp_db();

    let store = build_store(SqliteDao::open(&path).await.unwrap(), IdStrategy::Backend)
      .await
      .unwrap();
    store.add_contact(NewContact::named("Ana")).await.unwrap();
    store.add_contact(NewContact::named("Eva")).await.unwrap();
    drop(store);

    let store = build_store(SqliteDao::open(&path).await.unwrap(), IdStrategy::Sequential)
      .await
      .unwrap();
    let id = store.add_contact(NewContact::named("Luis")).await.unwrap();

    assert_eq!(id, ContactId::new("3"));
    assert_eq!(store.get_contact(&id).await.unwrap().first_name, "Luis");

    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn sequential_seed_ignores_non_numeric_ids() {
    let dao = MemoryDao::new();
    ContactStore::with_generator(dao.clone(), || ContactId::new("abc"))
      .add_contact(NewContact::named("Ana"))
      .await
      .unwrap();

    let store = build_store(dao, IdStrategy::Sequential).await.unwrap();
    let id = store.add_contact(NewContact::named("Luis")).await.unwrap();
    assert_eq!(id, ContactId::new("1"));
  }

  #[tokio::test]
  async fn uuid_strategy_assigns_uuids() {
    let store = build_store(MemoryDao::new(), IdStrategy::Uuid).await.unwrap();
    let id = store.add_contact(NewContact::named("Ana")).await.unwrap();
    assert_eq!(id.as_str().len(), 36);
  }

  #[tokio::test]
  async fn app_serves_contacts() {
    let store = build_store(MemoryDao::new(), IdStrategy::Backend).await.unwrap();
    let router = app(Arc::new(store));
    let response = router
      .oneshot(Request::get("/contacts").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
  }
}
