//! Error taxonomy shared by every Huddle crate.
//!
//! The `Display` text of the not-found variants is the user-facing `detail`
//! message returned by the HTTP layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("User not found")]
  UserNotFound(i64),

  #[error("Friend not found")]
  FriendNotFound(i64),

  #[error("Chat not found")]
  ChatNotFound(i64),

  #[error("Status not found")]
  StatusNotFound(i64),

  /// A user has no statuses at all. Listing statuses treats this as an error
  /// rather than an empty result.
  #[error("Status not found")]
  NoStatuses(i64),

  /// The friend resolved to a user that has no statuses.
  #[error("Status not found for the user")]
  NoStatusesForFriend { friend_id: i64, user_id: i64 },

  /// A unique column (`users.name`, `users.friend_number`) already holds the
  /// value being written.
  #[error("duplicate key: {0}")]
  DuplicateKey(String),

  /// A foreign key points at a row that does not exist.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),
}

impl Error {
  /// True for every variant that means "a parent or target row is missing".
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Error::UserNotFound(_)
        | Error::FriendNotFound(_)
        | Error::ChatNotFound(_)
        | Error::StatusNotFound(_)
        | Error::NoStatuses(_)
        | Error::NoStatusesForFriend { .. }
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so that callers can recover the
/// domain classification without depending on the backend crate.
///
/// Returns `None` for failures that have no domain meaning (I/O, a closed
/// connection, and so on).
pub trait AsCoreError {
  fn as_core(&self) -> Option<&Error>;
}

impl AsCoreError for Error {
  fn as_core(&self) -> Option<&Error> { Some(self) }
}
