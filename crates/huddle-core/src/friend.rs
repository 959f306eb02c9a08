//! Friends — contacts recorded under a single owning user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
  pub id:          i64,
  pub name:        String,
  pub friend_name: String,
  pub user_id:     i64,
}

/// Body accepted when creating or updating a friend. The owning user always
/// comes from the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFriend {
  pub name:        String,
  pub friend_name: String,
}
