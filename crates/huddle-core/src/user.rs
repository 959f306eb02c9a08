//! Users and the nested profile view assembled from their child rows.

use serde::{Deserialize, Serialize};

use crate::{chat::ChatWithImages, friend::Friend, status::Status};

/// A row of the `users` table.
///
/// `name` and `friend_number` are each unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:            i64,
  pub name:          String,
  pub friend_number: String,
}

/// Body accepted when creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
  pub name:          String,
  #[serde(alias = "friend_name")]
  pub friend_number: String,
}

/// A user together with everything the user owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  #[serde(flatten)]
  pub user:     User,
  pub friends:  Vec<Friend>,
  pub chats:    Vec<ChatWithImages>,
  pub statuses: Vec<Status>,
}
