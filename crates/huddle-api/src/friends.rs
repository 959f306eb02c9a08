//! Handlers for `/users/:user_id/friends` endpoints.
//!
//! Mutations are scoped by the `(user_id, friend_id)` pair: a friend that
//! belongs to another user is reported as not found.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use huddle_core::{
  friend::{Friend, NewFriend},
  store::SocialStore,
};
use serde_json::Value;

use crate::{detail, error::ApiError};

/// `GET /users/:user_id/friends`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<Vec<Friend>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, "fetching friends");
  let friends = store.list_friends(user_id).await.map_err(ApiError::from_store)?;
  Ok(Json(friends))
}

/// `POST /users/:user_id/friends`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
  Json(body): Json<NewFriend>,
) -> Result<Json<Friend>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, "creating friend");
  let friend = store
    .add_friend(user_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(friend))
}

/// `PUT /users/:user_id/friends/:friend_id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path((user_id, friend_id)): Path<(i64, i64)>,
  Json(body): Json<NewFriend>,
) -> Result<Json<Friend>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, friend_id, "updating friend");
  let friend = store
    .update_friend(user_id, friend_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(friend))
}

/// `DELETE /users/:user_id/friends/:friend_id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path((user_id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, friend_id, "deleting friend");
  store
    .delete_friend(user_id, friend_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(detail("Friend deleted"))
}
