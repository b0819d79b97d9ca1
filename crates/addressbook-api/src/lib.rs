//! JSON REST API for the address book.
//!
//! Exposes an axum [`Router`] backed by a [`ContactStore`] over any
//! [`ContactDao`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(addressbook_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod form;

use std::sync::Arc;

use addressbook_core::{ContactStore, dao::ContactDao};
use axum::{Router, routing::get};

pub use error::ApiError;
pub use form::{ContactForm, FieldErrors};

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<D>(store: Arc<ContactStore<D>>) -> Router<()>
where
  D: ContactDao + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<D>).post(contacts::create::<D>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<D>).delete(contacts::delete_one::<D>),
    )
    .with_state(store)
}
