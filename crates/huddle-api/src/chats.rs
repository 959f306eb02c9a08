//! Handlers for `/users/:user_id/chats` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/:user_id/chats` | Chats with their images |
//! | `POST`   | `/users/:user_id/chats` | Body: `{"message":"..","images":[{"url":"..","name":".."}]}` |
//! | `PUT`    | `/users/:user_id/chats/:chat_id` | A non-empty `images` list replaces all images |
//! | `DELETE` | `/users/:user_id/chats/:chat_id` | Deletes the chat's images too |
//!
//! `POST` and `PUT` respond with the last image written by the request, or
//! `null` when the request wrote none. Clients that need the chat itself
//! read it back through `GET`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use huddle_core::{
  chat::{ChatWithImages, Image, NewChat},
  store::SocialStore,
};
use serde_json::Value;

use crate::{detail, error::ApiError};

/// `GET /users/:user_id/chats`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
) -> Result<Json<Vec<ChatWithImages>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, "fetching chats");
  let chats = store.list_chats(user_id).await.map_err(ApiError::from_store)?;
  Ok(Json(chats))
}

/// `POST /users/:user_id/chats`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<i64>,
  Json(body): Json<NewChat>,
) -> Result<Json<Option<Image>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, images = body.images.len(), "creating chat");
  let wrote_images = body.replaces_images();
  let chat = store
    .create_chat(user_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(last_written(chat, wrote_images)))
}

/// `PUT /users/:user_id/chats/:chat_id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path((user_id, chat_id)): Path<(i64, i64)>,
  Json(body): Json<NewChat>,
) -> Result<Json<Option<Image>>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, chat_id, images = body.images.len(), "updating chat");
  let wrote_images = body.replaces_images();
  let chat = store
    .update_chat(user_id, chat_id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(last_written(chat, wrote_images)))
}

/// `DELETE /users/:user_id/chats/:chat_id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path((user_id, chat_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError>
where
  S: SocialStore,
{
  tracing::info!(user_id, chat_id, "deleting chat");
  store
    .delete_chat(user_id, chat_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(detail("Chat deleted"))
}

/// After a write that touched images, the chat's collection is exactly the
/// written set in insertion order.
fn last_written(chat: ChatWithImages, wrote_images: bool) -> Option<Image> {
  if wrote_images { chat.images.into_iter().last() } else { None }
}
