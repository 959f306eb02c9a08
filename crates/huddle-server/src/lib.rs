//! HTTP server wiring for Huddle.
//!
//! Mounts the JSON API under `/api/v1`, adds the unversioned welcome route,
//! and wraps everything in a request tracing layer.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Json, Router, routing::get};
use huddle_core::store::SocialStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Prefix under which the versioned API is mounted.
pub const API_PREFIX: &str = "/api/v1";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, read from a TOML file layered under
/// `HUDDLE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Also write logs to this file when set.
  pub log_file:   Option<PathBuf>,
}

impl ServerConfig {
  /// Load configuration from `path` (optional) and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8001)?
      .set_default("store_path", "huddle.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("HUDDLE"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: SocialStore + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(root))
    .nest(API_PREFIX, huddle_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

/// `GET /`
async fn root() -> Json<Value> {
  tracing::info!("root endpoint called");
  Json(json!({ "message": "Hello World" }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use huddle_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  async fn create_user(app: &Router, name: &str, number: &str) -> i64 {
    let (status, body) = send(
      app,
      "POST",
      "/api/v1/users",
      Some(json!({ "name": name, "friend_number": number })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
  }

  // ── Root ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_says_hello() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World" }));
  }

  // ── Users ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_user_returns_404_with_detail() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/users/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "User not found" }));

    let (status, _) = send(&app, "DELETE", "/api/v1/users/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn duplicate_user_returns_409() {
    let app = app().await;
    create_user(&app, "alice", "111").await;

    let (status, body) = send(
      &app,
      "POST",
      "/api/v1/users",
      Some(json!({ "name": "alice", "friend_number": "222" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].as_str().unwrap().contains("duplicate key"));

    let (_, all) = send(&app, "GET", "/api/v1/users", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn user_body_accepts_friend_name() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/v1/users",
      Some(json!({ "name": "alice", "friend_name": "111" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["friend_number"], "111");
  }

  #[tokio::test]
  async fn update_user_round_trip() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/api/v1/users/{id}"),
      Some(json!({ "name": "alicia", "friend_number": "112" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "name": "alicia", "friend_number": "112" }));

    let (status, _) = send(
      &app,
      "PUT",
      "/api/v1/users/77",
      Some(json!({ "name": "x", "friend_number": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn profile_nests_children() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;
    send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/friends"),
      Some(json!({ "name": "bob", "friend_name": "bobby" })),
    )
    .await;
    send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/chats"),
      Some(json!({ "message": "hi", "images": [{ "url": "a", "name": "a.png" }] })),
    )
    .await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{id}/profile"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice");
    assert_eq!(body["friends"][0]["friend_name"], "bobby");
    assert_eq!(body["chats"][0]["images"][0]["name"], "a.png");
    assert_eq!(body["statuses"], json!([]));
  }

  // ── Friends ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn friend_under_missing_user_is_404() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/v1/users/5/friends",
      Some(json!({ "name": "bob", "friend_name": "bobby", "user_id": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
  }

  #[tokio::test]
  async fn friend_of_another_user_cannot_be_touched() {
    let app = app().await;
    let alice = create_user(&app, "alice", "111").await;
    let bob = create_user(&app, "bob", "222").await;
    let (_, friend) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{alice}/friends"),
      Some(json!({ "name": "carol", "friend_name": "c" })),
    )
    .await;
    let friend_id = friend["id"].as_i64().unwrap();

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/api/v1/users/{bob}/friends/{friend_id}"),
      Some(json!({ "name": "mallory", "friend_name": "m" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Friend not found");

    let (status, _) = send(
      &app,
      "DELETE",
      &format!("/api/v1/users/{bob}/friends/{friend_id}"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
      &app,
      "DELETE",
      &format!("/api/v1/users/{alice}/friends/{friend_id}"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "Friend deleted" }));
  }

  // ── Chats ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn chat_writes_return_last_image() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;

    let (status, image) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/chats"),
      Some(json!({
        "message": "hi",
        "images": [{ "url": "a", "name": "a.png" }, { "url": "b", "name": "b.png" }]
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["name"], "b.png");
    let chat_id = image["chat_id"].as_i64().unwrap();

    let (status, image) = send(
      &app,
      "PUT",
      &format!("/api/v1/users/{id}/chats/{chat_id}"),
      Some(json!({ "message": "edited", "images": [{ "url": "c", "name": "c.png" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["name"], "c.png");

    let (_, chats) = send(&app, "GET", &format!("/api/v1/users/{id}/chats"), None).await;
    assert_eq!(chats[0]["message"], "edited");
    assert_eq!(chats[0]["images"].as_array().unwrap().len(), 1);
    assert_eq!(chats[0]["images"][0]["name"], "c.png");
  }

  #[tokio::test]
  async fn chat_update_without_images_returns_null_and_keeps_images() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;
    let (_, image) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/chats"),
      Some(json!({ "message": "hi", "images": [{ "url": "a", "name": "a.png" }] })),
    )
    .await;
    let chat_id = image["chat_id"].as_i64().unwrap();

    let (status, body) = send(
      &app,
      "PUT",
      &format!("/api/v1/users/{id}/chats/{chat_id}"),
      Some(json!({ "message": "edited", "images": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, chats) = send(&app, "GET", &format!("/api/v1/users/{id}/chats"), None).await;
    assert_eq!(chats[0]["images"][0]["name"], "a.png");
  }

  #[tokio::test]
  async fn chat_created_without_images_returns_null() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;
    let uri = format!("/api/v1/users/{id}/chats");

    for payload in [json!({ "message": "m" }), json!({ "message": "n", "images": [] })] {
      let (status, body) = send(&app, "POST", &uri, Some(payload)).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, Value::Null);
    }

    let (_, chats) = send(&app, "GET", &uri, None).await;
    let chats = chats.as_array().unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0]["message"], "m");
    assert_eq!(chats[1]["message"], "n");
    for chat in chats {
      assert_eq!(chat["images"], json!([]));
    }
  }

  #[tokio::test]
  async fn chat_of_another_user_is_404() {
    let app = app().await;
    let alice = create_user(&app, "alice", "111").await;
    let bob = create_user(&app, "bob", "222").await;
    let (_, image) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{alice}/chats"),
      Some(json!({ "message": "hi", "images": [{ "url": "a", "name": "a.png" }] })),
    )
    .await;
    let chat_id = image["chat_id"].as_i64().unwrap();

    let (status, body) = send(
      &app,
      "DELETE",
      &format!("/api/v1/users/{bob}/chats/{chat_id}"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Chat not found");
  }

  // ── Statuses ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_status_lists_are_404() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;
    let (_, friend) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/friends"),
      Some(json!({ "name": "bob", "friend_name": "b" })),
    )
    .await;
    let friend_id = friend["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/v1/users/{id}/status"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Status not found");

    let (status, body) =
      send(&app, "GET", &format!("/api/v1/friends/{friend_id}/status"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Status not found for the user");

    let (status, body) = send(&app, "GET", "/api/v1/friends/999/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Friend not found");
  }

  #[tokio::test]
  async fn status_lifecycle_and_friend_lookup() {
    let app = app().await;
    let id = create_user(&app, "alice", "111").await;
    let (_, friend) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/friends"),
      Some(json!({ "name": "bob", "friend_name": "b" })),
    )
    .await;
    let friend_id = friend["id"].as_i64().unwrap();

    let (status, created) = send(
      &app,
      "POST",
      &format!("/api/v1/users/{id}/status"),
      Some(json!({ "content": "here" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let status_id = created["id"].as_i64().unwrap();

    let (_, updated) = send(
      &app,
      "PUT",
      &format!("/api/v1/users/{id}/status/{status_id}"),
      Some(json!({ "content": "away" })),
    )
    .await;
    assert_eq!(updated["content"], "away");

    let (status, via_friend) =
      send(&app, "GET", &format!("/api/v1/friends/{friend_id}/status"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(via_friend, json!([updated]));

    let (status, body) = send(
      &app,
      "DELETE",
      &format!("/api/v1/users/{id}/status/{status_id}"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "Status deleted" }));
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_chat_then_delete_user_scenario() {
    let app = app().await;

    let (status, user) = send(
      &app,
      "POST",
      "/api/v1/users",
      Some(json!({ "name": "alice", "friend_number": "111" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], 1);

    let (status, image) = send(
      &app,
      "POST",
      "/api/v1/users/1/chats",
      Some(json!({ "message": "hi", "images": [{ "url": "a", "name": "a.png" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["url"], "a");
    assert_eq!(image["chat_id"], 1);

    let (_, chats) = send(&app, "GET", "/api/v1/users/1/chats", None).await;
    let chats = chats.as_array().unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0]["images"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", "/api/v1/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "detail": "User and associated records deleted" }));

    let (status, _) = send(&app, "GET", "/api/v1/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, chats) = send(&app, "GET", "/api/v1/users/1/chats", None).await;
    assert_eq!(chats, json!([]));
  }

  // ── Config ──────────────────────────────────────────────────────────────────

  #[test]
  fn config_defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.port, 8001);
    assert_eq!(cfg.store_path, PathBuf::from("huddle.db"));
    assert!(cfg.log_file.is_none());
  }
}
