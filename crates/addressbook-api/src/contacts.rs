//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts |
//! | `POST`   | `/contacts` | Body: [`ContactForm`]; 201 + `Location`, or 422 with field errors |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `DELETE` | `/contacts/:id` | Always 204 |

use std::sync::Arc;

use addressbook_core::{Contact, ContactId, ContactStore, dao::ContactDao};
use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};

use crate::{error::ApiError, form::ContactForm};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<D>(
  State(store): State<Arc<ContactStore<D>>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  D: ContactDao,
{
  Ok(Json(store.get_all().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201, a `Location` header and the stored contact.
pub async fn create<D>(
  State(store): State<Arc<ContactStore<D>>>,
  Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, ApiError>
where
  D: ContactDao,
{
  let contact = form.verify_and_convert().map_err(ApiError::Validation)?;
  let stored = store.create_contact(contact).await?;

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, format!("/contacts/{}", stored.id))],
    Json(stored),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<D>(
  State(store): State<Arc<ContactStore<D>>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  D: ContactDao,
{
  Ok(Json(store.get_contact(&ContactId::new(id)).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`; deleting an unknown id still answers 204.
pub async fn delete_one<D>(
  State(store): State<Arc<ContactStore<D>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  D: ContactDao,
{
  store.delete_contact(&ContactId::new(id)).await?;
  Ok(StatusCode::NO_CONTENT)
}
