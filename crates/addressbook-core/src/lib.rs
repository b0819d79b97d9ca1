//! Core types and the business layer of the address book.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`dao::ContactDao`]; callers go through
//! [`store::ContactStore`], which owns validation and duplicate detection.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod dao;
pub mod error;
pub mod id;
pub mod memory;
pub mod store;

pub use contact::{Contact, ContactDraft, ContactId, NewContact};
pub use error::{Error, InvalidContact, MemoryError, Result};
pub use store::ContactStore;
