//! Handlers for status endpoints.
//!
//! Listing never returns an empty array: a user without statuses is a 404,
//! both under `/users/:user_id/status` and `/friends/:friend_id/status`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use huddle_core::{
  status::{NewStatus, Status},
  store::SocialStore,
};
use serde_json::Value;

use crate::{detail, error::ApiError};

/// `GET /users/:user_id/status`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<Vec<Status>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, "fetching statuses");
  let statuses = store.list_statuses(user_id).await.map_err(ApiError::from_store)?;
  Ok(Json(statuses))
}

/// `POST /users/:user_id/status`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
  Json(body): Json<NewStatus>,
) -> Result<Json<Status>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, "creating status");
  let status = store
    .add_status(user_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(status))
}

/// `PUT /users/:user_id/status/:status_id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path((user_id, status_id)): Path<(i64, i64)>,
  Json(body): Json<NewStatus>,
) -> Result<Json<Status>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, status_id, "updating status");
  let status = store
    .update_status(user_id, status_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(status))
}

/// `DELETE /users/:user_id/status/:status_id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path((user_id, status_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, status_id, "deleting status");
  store
    .delete_status(user_id, status_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(detail("Status deleted"))
}

/// `GET /friends/:friend_id/status` — statuses of the user who owns the
/// friend.
pub async fn by_friend<S>(
  State(store): State<Arc<S>>,
  Path(friend_id): Path<i64>,
) -> Result<Json<Vec<Status>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(friend_id, "fetching statuses via friend");
  let statuses = store
    .statuses_for_friend(friend_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(statuses))
}
