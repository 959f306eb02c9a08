//! Core types and trait definitions for the Huddle social store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The API layer and storage backends both depend on it.

pub mod chat;
pub mod error;
pub mod friend;
pub mod status;
pub mod store;
pub mod user;

pub use error::{AsCoreError, Error, Result};
