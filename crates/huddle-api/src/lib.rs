//! JSON REST API for Huddle.
//!
//! Exposes an axum [`Router`] backed by any [`huddle_core::store::SocialStore`].
//! TLS, tracing layers, and the version prefix are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", huddle_api::api_router(store.clone()))
//! ```

pub mod chats;
pub mod error;
pub mod friends;
pub mod statuses;
pub mod users;

use std::sync::Arc;

use axum::{
  Json,
  Router,
  routing::{get, put},
};
use huddle_core::store::SocialStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type. Every user-scoped route names its first segment
/// `{user_id}`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SocialStore + Send + Sync + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route(
      "/users/{user_id}",
      get(users::get_one::<S>)
        .put(users::update::<S>)
        .delete(users::delete::<S>),
    )
    .route("/users/{user_id}/profile", get(users::profile::<S>))
    // Friends
    .route(
      "/users/{user_id}/friends",
      get(friends::list::<S>).post(friends::create::<S>),
    )
    .route(
      "/users/{user_id}/friends/{friend_id}",
      put(friends::update::<S>).delete(friends::delete::<S>),
    )
    // Chats
    .route(
      "/users/{user_id}/chats",
      get(chats::list::<S>).post(chats::create::<S>),
    )
    .route(
      "/users/{user_id}/chats/{chat_id}",
      put(chats::update::<S>).delete(chats::delete::<S>),
    )
    // Statuses
    .route(
      "/users/{user_id}/status",
      get(statuses::list::<S>).post(statuses::create::<S>),
    )
    .route(
      "/users/{user_id}/status/{status_id}",
      put(statuses::update::<S>).delete(statuses::delete::<S>),
    )
    .route("/friends/{friend_id}/status", get(statuses::by_friend::<S>))
    .with_state(store)
}

/// Confirmation body returned by successful deletes.
pub(crate) fn detail(message: &str) -> Json<Value> {
  Json(json!({ "detail": message }))
}
