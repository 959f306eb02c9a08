//! Chats and the images attached to them.
//!
//! A chat owns its images: they are written together with the chat and
//! removed with it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
  pub id:      i64,
  pub message: String,
  pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
  pub id:      i64,
  pub url:     String,
  pub name:    String,
  pub chat_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
  pub url:  String,
  pub name: String,
}

/// Body accepted when creating or updating a chat.
///
/// An empty `images` list leaves the chat's images untouched on update.
/// A non-empty list replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChat {
  pub message: String,
  #[serde(default)]
  pub images:  Vec<NewImage>,
}

impl NewChat {
  /// Whether this write touches the image collection at all.
  pub fn replaces_images(&self) -> bool { !self.images.is_empty() }
}

/// A chat with its images populated, ordered by image id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatWithImages {
  #[serde(flatten)]
  pub chat:   Chat,
  pub images: Vec<Image>,
}
