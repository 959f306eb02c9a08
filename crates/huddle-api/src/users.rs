//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Every user, id order |
//! | `POST`   | `/users` | Body: `{"name":"..","friend_number":".."}`; 409 on duplicates |
//! | `GET`    | `/users/:id` | 404 if not found |
//! | `PUT`    | `/users/:id` | Same body as `POST` |
//! | `DELETE` | `/users/:id` | Removes the user and everything it owns |
//! | `GET`    | `/users/:id/profile` | User with friends, chats, and statuses |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use huddle_core::{
  Error as CoreError,
  store::SocialStore,
  user::{NewUser, User, UserProfile},
};
use serde_json::Value;

use crate::{detail, error::ApiError};

/// `GET /users`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<User>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!("fetching all users");
  let users = store.list_users().await.map_err(ApiError::from_store)?;
  Ok(Json(users))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<User>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id = id, "fetching user");
  let user = store
    .get_user(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(user))
}

/// `POST /users`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewUser>,
) -> Result<Json<User>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(name = %body.name, "creating user");
  let user = store.create_user(body).await.map_err(ApiError::from_store)?;
  Ok(Json(user))
}

/// `PUT /users/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewUser>,
) -> Result<Json<User>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id = id, "updating user");
  let user = store.update_user(id, body).await.map_err(ApiError::from_store)?;
  Ok(Json(user))
}

/// `DELETE /users/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id = id, "deleting user");
  store.delete_user(id).await.map_err(ApiError::from_store)?;
  Ok(detail("User and associated records deleted"))
}

/// `GET /users/:id/profile`
pub async fn profile<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id = id, "fetching user profile");
  let profile = store
    .get_profile(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(profile))
}

fn not_found(id: i64) -> ApiError {
  tracing::warn!(user_id = id, "user not found");
  CoreError::UserNotFound(id).into()
}
