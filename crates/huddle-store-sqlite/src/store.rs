//! [`SqliteStore`] — the SQLite implementation of [`SocialStore`].

use std::path::Path;

use huddle_core::{
  Error as CoreError,
  chat::{ChatWithImages, NewChat},
  friend::{Friend, NewFriend},
  status::{NewStatus, Status},
  store::SocialStore,
  user::{NewUser, User, UserProfile},
};
use rusqlite::Transaction;

use crate::{Result, rows, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Huddle store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// share one connection thread, so writes are serialized.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "sqlite store opened");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` inside one transaction on the connection thread.
  ///
  /// The transaction commits only if `f` returns `Ok`; any error, including
  /// a domain error raised by `f`, drops it and rolls back.
  async fn transact<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| Ok(in_transaction(conn, f)))
      .await?
  }
}

fn in_transaction<T>(
  conn: &mut rusqlite::Connection,
  f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
  let tx = conn.transaction()?;
  let value = f(&tx)?;
  tx.commit()?;
  Ok(value)
}

/// Fail with `UserNotFound` unless the user row exists.
fn require_user(tx: &Transaction<'_>, user_id: i64) -> Result<()> {
  if rows::user_exists(tx, user_id)? {
    Ok(())
  } else {
    Err(CoreError::UserNotFound(user_id).into())
  }
}

// ─── SocialStore impl ────────────────────────────────────────────────────────

impl SocialStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    self
      .transact(move |tx| Ok(rows::insert_user(tx, &input)?))
      .await
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    self.transact(move |tx| Ok(rows::get_user(tx, id)?)).await
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    self.transact(|tx| Ok(rows::list_users(tx)?)).await
  }

  async fn update_user(&self, id: i64, input: NewUser) -> Result<User> {
    self
      .transact(move |tx| {
        if rows::update_user(tx, id, &input)? == 0 {
          return Err(CoreError::UserNotFound(id).into());
        }
        Ok(User { id, name: input.name, friend_number: input.friend_number })
      })
      .await
  }

  async fn delete_user(&self, id: i64) -> Result<()> {
    self
      .transact(move |tx| {
        if rows::delete_user_cascade(tx, id)? == 0 {
          return Err(CoreError::UserNotFound(id).into());
        }
        Ok(())
      })
      .await
  }

  async fn get_profile(&self, id: i64) -> Result<Option<UserProfile>> {
    self
      .transact(move |tx| {
        let Some(user) = rows::get_user(tx, id)? else {
          return Ok(None);
        };
        let friends = rows::list_friends(tx, id)?;
        let chats = rows::list_chats(tx, id)?
          .into_iter()
          .map(|chat| rows::with_images(tx, chat))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let statuses = rows::list_statuses(tx, id)?;
        Ok(Some(UserProfile { user, friends, chats, statuses }))
      })
      .await
  }

  // ── Friends ───────────────────────────────────────────────────────────────

  async fn list_friends(&self, user_id: i64) -> Result<Vec<Friend>> {
    self
      .transact(move |tx| Ok(rows::list_friends(tx, user_id)?))
      .await
  }

  async fn add_friend(&self, user_id: i64, input: NewFriend) -> Result<Friend> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        Ok(rows::insert_friend(tx, user_id, &input)?)
      })
      .await
  }

  async fn update_friend(
    &self,
    user_id:   i64,
    friend_id: i64,
    input:     NewFriend,
  ) -> Result<Friend> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        if rows::get_friend_scoped(tx, user_id, friend_id)?.is_none() {
          return Err(CoreError::FriendNotFound(friend_id).into());
        }
        rows::update_friend(tx, friend_id, &input)?;
        Ok(Friend {
          id: friend_id,
          name: input.name,
          friend_name: input.friend_name,
          user_id,
        })
      })
      .await
  }

  async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
    self
      .transact(move |tx| {
        if rows::delete_friend(tx, user_id, friend_id)? == 0 {
          return Err(CoreError::FriendNotFound(friend_id).into());
        }
        Ok(())
      })
      .await
  }

  // ── Chats ─────────────────────────────────────────────────────────────────

  async fn list_chats(&self, user_id: i64) -> Result<Vec<ChatWithImages>> {
    self
      .transact(move |tx| {
        let chats = rows::list_chats(tx, user_id)?
          .into_iter()
          .map(|chat| rows::with_images(tx, chat))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(chats)
      })
      .await
  }

  async fn create_chat(&self, user_id: i64, input: NewChat) -> Result<ChatWithImages> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        let chat = rows::insert_chat(tx, user_id, &input.message)?;
        let images = input
          .images
          .iter()
          .map(|image| rows::insert_image(tx, chat.id, image))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ChatWithImages { chat, images })
      })
      .await
  }

  async fn update_chat(
    &self,
    user_id: i64,
    chat_id: i64,
    input:   NewChat,
  ) -> Result<ChatWithImages> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        let Some(mut chat) = rows::get_chat_scoped(tx, user_id, chat_id)? else {
          return Err(CoreError::ChatNotFound(chat_id).into());
        };
        rows::update_chat_message(tx, chat_id, &input.message)?;
        chat.message = input.message.clone();

        if input.replaces_images() {
          rows::delete_images(tx, chat_id)?;
          for image in &input.images {
            rows::insert_image(tx, chat_id, image)?;
          }
        }

        Ok(rows::with_images(tx, chat)?)
      })
      .await
  }

  async fn delete_chat(&self, user_id: i64, chat_id: i64) -> Result<()> {
    self
      .transact(move |tx| {
        if rows::delete_chat(tx, user_id, chat_id)? == 0 {
          return Err(CoreError::ChatNotFound(chat_id).into());
        }
        Ok(())
      })
      .await
  }

  // ── Statuses ──────────────────────────────────────────────────────────────

  async fn list_statuses(&self, user_id: i64) -> Result<Vec<Status>> {
    self
      .transact(move |tx| {
        let statuses = rows::list_statuses(tx, user_id)?;
        if statuses.is_empty() {
          return Err(CoreError::NoStatuses(user_id).into());
        }
        Ok(statuses)
      })
      .await
  }

  async fn add_status(&self, user_id: i64, input: NewStatus) -> Result<Status> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        Ok(rows::insert_status(tx, user_id, &input)?)
      })
      .await
  }

  async fn update_status(
    &self,
    user_id:   i64,
    status_id: i64,
    input:     NewStatus,
  ) -> Result<Status> {
    self
      .transact(move |tx| {
        require_user(tx, user_id)?;
        if rows::get_status_scoped(tx, user_id, status_id)?.is_none() {
          return Err(CoreError::StatusNotFound(status_id).into());
        }
        rows::update_status(tx, status_id, &input)?;
        Ok(Status { id: status_id, content: input.content, user_id })
      })
      .await
  }

  async fn delete_status(&self, user_id: i64, status_id: i64) -> Result<()> {
    self
      .transact(move |tx| {
        if rows::delete_status(tx, user_id, status_id)? == 0 {
          return Err(CoreError::StatusNotFound(status_id).into());
        }
        Ok(())
      })
      .await
  }

  async fn statuses_for_friend(&self, friend_id: i64) -> Result<Vec<Status>> {
    self
      .transact(move |tx| {
        let Some(friend) = rows::get_friend(tx, friend_id)? else {
          return Err(CoreError::FriendNotFound(friend_id).into());
        };
        let statuses = rows::list_statuses(tx, friend.user_id)?;
        if statuses.is_empty() {
          return Err(
            CoreError::NoStatusesForFriend { friend_id, user_id: friend.user_id }
              .into(),
          );
        }
        Ok(statuses)
      })
      .await
  }
}
