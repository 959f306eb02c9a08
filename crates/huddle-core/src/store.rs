//! The `SocialStore` trait.
//!
//! Implemented by storage backends (e.g. `huddle-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  chat::{ChatWithImages, NewChat},
  error::AsCoreError,
  friend::{Friend, NewFriend},
  status::{NewStatus, Status},
  user::{NewUser, User, UserProfile},
};

/// Abstraction over a Huddle store backend.
///
/// Every method runs as a single transaction: either all of its writes are
/// committed or none are. Child rows are only written after the parent has
/// been found inside that same transaction.
///
/// Lists are ordered by id, ascending. There is no pagination.
pub trait SocialStore: Send + Sync {
  type Error: std::error::Error + AsCoreError + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Fails with `DuplicateKey` if `name` or `friend_number` is taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Fails with `UserNotFound`, or `DuplicateKey` if the new values collide
  /// with another user.
  fn update_user(
    &self,
    id: i64,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Delete a user together with its friends, chats, chat images, and
  /// statuses. Fails with `UserNotFound`.
  fn delete_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Assemble a [`UserProfile`]. Returns `None` if the user does not exist.
  fn get_profile(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<UserProfile>, Self::Error>> + Send + '_;

  // ── Friends ───────────────────────────────────────────────────────────

  fn list_friends(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Friend>, Self::Error>> + Send + '_;

  /// Fails with `UserNotFound` if the owning user does not exist.
  fn add_friend(
    &self,
    user_id: i64,
    input: NewFriend,
  ) -> impl Future<Output = Result<Friend, Self::Error>> + Send + '_;

  /// Fails with `UserNotFound`, then with `FriendNotFound` if the friend
  /// does not belong to `user_id`.
  fn update_friend(
    &self,
    user_id: i64,
    friend_id: i64,
    input: NewFriend,
  ) -> impl Future<Output = Result<Friend, Self::Error>> + Send + '_;

  /// Fails with `FriendNotFound` unless the friend belongs to `user_id`.
  fn delete_friend(
    &self,
    user_id: i64,
    friend_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Chats ─────────────────────────────────────────────────────────────

  /// All chats of a user, each with its images populated.
  fn list_chats(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<ChatWithImages>, Self::Error>> + Send + '_;

  /// Create a chat and all of its images. Fails with `UserNotFound`.
  fn create_chat(
    &self,
    user_id: i64,
    input: NewChat,
  ) -> impl Future<Output = Result<ChatWithImages, Self::Error>> + Send + '_;

  /// Replace the chat message. A non-empty image list replaces every
  /// existing image; an empty one leaves them alone.
  ///
  /// Fails with `UserNotFound`, then with `ChatNotFound` if the chat does not
  /// belong to `user_id`.
  fn update_chat(
    &self,
    user_id: i64,
    chat_id: i64,
    input: NewChat,
  ) -> impl Future<Output = Result<ChatWithImages, Self::Error>> + Send + '_;

  /// Delete a chat and its images. Fails with `ChatNotFound` unless the chat
  /// belongs to `user_id`.
  fn delete_chat(
    &self,
    user_id: i64,
    chat_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Statuses ──────────────────────────────────────────────────────────

  /// Fails with `NoStatuses` when the user has none.
  fn list_statuses(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Status>, Self::Error>> + Send + '_;

  /// Fails with `UserNotFound` if the owning user does not exist.
  fn add_status(
    &self,
    user_id: i64,
    input: NewStatus,
  ) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Fails with `UserNotFound`, then with `StatusNotFound` if the status
  /// does not belong to `user_id`.
  fn update_status(
    &self,
    user_id: i64,
    status_id: i64,
    input: NewStatus,
  ) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Fails with `StatusNotFound` unless the status belongs to `user_id`.
  fn delete_status(
    &self,
    user_id: i64,
    status_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Statuses of the user that owns `friend_id`.
  ///
  /// Fails with `FriendNotFound` if the friend does not exist and with
  /// `NoStatusesForFriend` if its user has no statuses.
  fn statuses_for_friend(
    &self,
    friend_id: i64,
  ) -> impl Future<Output = Result<Vec<Status>, Self::Error>> + Send + '_;
}
