//! Row-level SQL helpers.
//!
//! Plain synchronous functions over a borrowed [`Connection`]. They perform
//! no parent checks of their own; [`SqliteStore`](crate::SqliteStore) calls
//! them inside a transaction after it has validated the parent row. Writes
//! that bypass those checks are still caught by the schema's foreign keys.

use huddle_core::{
  chat::{Chat, ChatWithImages, Image, NewImage},
  friend::{Friend, NewFriend},
  status::{NewStatus, Status},
  user::{NewUser, User},
};
use rusqlite::{Connection, OptionalExtension as _, Row, params};

// ─── Row mapping ──────────────────────────────────────────────────────────────

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    name:          row.get(1)?,
    friend_number: row.get(2)?,
  })
}

fn friend_from_row(row: &Row<'_>) -> rusqlite::Result<Friend> {
  Ok(Friend {
    id:          row.get(0)?,
    name:        row.get(1)?,
    friend_name: row.get(2)?,
    user_id:     row.get(3)?,
  })
}

fn chat_from_row(row: &Row<'_>) -> rusqlite::Result<Chat> {
  Ok(Chat {
    id:      row.get(0)?,
    message: row.get(1)?,
    user_id: row.get(2)?,
  })
}

fn image_from_row(row: &Row<'_>) -> rusqlite::Result<Image> {
  Ok(Image {
    id:      row.get(0)?,
    url:     row.get(1)?,
    name:    row.get(2)?,
    chat_id: row.get(3)?,
  })
}

fn status_from_row(row: &Row<'_>) -> rusqlite::Result<Status> {
  Ok(Status {
    id:      row.get(0)?,
    content: row.get(1)?,
    user_id: row.get(2)?,
  })
}

// ─── Users ────────────────────────────────────────────────────────────────────

pub fn user_exists(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row("SELECT 1 FROM users WHERE id = ?1", params![id], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

pub fn get_user(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
  conn
    .query_row(
      "SELECT id, name, friend_number FROM users WHERE id = ?1",
      params![id],
      user_from_row,
    )
    .optional()
}

pub fn list_users(conn: &Connection) -> rusqlite::Result<Vec<User>> {
  let mut stmt =
    conn.prepare("SELECT id, name, friend_number FROM users ORDER BY id")?;
  let rows = stmt
    .query_map([], user_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn insert_user(conn: &Connection, input: &NewUser) -> rusqlite::Result<User> {
  conn.execute(
    "INSERT INTO users (name, friend_number) VALUES (?1, ?2)",
    params![input.name, input.friend_number],
  )?;
  Ok(User {
    id:            conn.last_insert_rowid(),
    name:          input.name.clone(),
    friend_number: input.friend_number.clone(),
  })
}

/// Returns the number of rows changed (0 or 1).
pub fn update_user(
  conn: &Connection,
  id: i64,
  input: &NewUser,
) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE users SET name = ?1, friend_number = ?2 WHERE id = ?3",
    params![input.name, input.friend_number, id],
  )
}

/// Delete a user and every row that depends on it, children first.
///
/// Mirrors the `ON DELETE CASCADE` chain of the schema statement for
/// statement, so the outcome is the same whether or not foreign keys are
/// enforced on the connection. Returns the number of user rows removed.
pub fn delete_user_cascade(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
  conn.execute(
    "DELETE FROM images WHERE chat_id IN (SELECT id FROM chats WHERE user_id = ?1)",
    params![id],
  )?;
  conn.execute("DELETE FROM friends WHERE user_id = ?1", params![id])?;
  conn.execute("DELETE FROM chats WHERE user_id = ?1", params![id])?;
  conn.execute("DELETE FROM statuses WHERE user_id = ?1", params![id])?;
  conn.execute("DELETE FROM users WHERE id = ?1", params![id])
}

// ─── Friends ──────────────────────────────────────────────────────────────────

pub fn get_friend(conn: &Connection, id: i64) -> rusqlite::Result<Option<Friend>> {
  conn
    .query_row(
      "SELECT id, name, friend_name, user_id FROM friends WHERE id = ?1",
      params![id],
      friend_from_row,
    )
    .optional()
}

/// Look a friend up by id, but only under `user_id`.
pub fn get_friend_scoped(
  conn: &Connection,
  user_id: i64,
  friend_id: i64,
) -> rusqlite::Result<Option<Friend>> {
  conn
    .query_row(
      "SELECT id, name, friend_name, user_id FROM friends
       WHERE id = ?1 AND user_id = ?2",
      params![friend_id, user_id],
      friend_from_row,
    )
    .optional()
}

pub fn list_friends(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Friend>> {
  let mut stmt = conn.prepare(
    "SELECT id, name, friend_name, user_id FROM friends
     WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], friend_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn insert_friend(
  conn: &Connection,
  user_id: i64,
  input: &NewFriend,
) -> rusqlite::Result<Friend> {
  conn.execute(
    "INSERT INTO friends (name, friend_name, user_id) VALUES (?1, ?2, ?3)",
    params![input.name, input.friend_name, user_id],
  )?;
  Ok(Friend {
    id: conn.last_insert_rowid(),
    name: input.name.clone(),
    friend_name: input.friend_name.clone(),
    user_id,
  })
}

pub fn update_friend(
  conn: &Connection,
  friend_id: i64,
  input: &NewFriend,
) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE friends SET name = ?1, friend_name = ?2 WHERE id = ?3",
    params![input.name, input.friend_name, friend_id],
  )
}

/// Scoped delete; returns 0 when the friend is missing or owned by another
/// user.
pub fn delete_friend(
  conn: &Connection,
  user_id: i64,
  friend_id: i64,
) -> rusqlite::Result<usize> {
  conn.execute(
    "DELETE FROM friends WHERE id = ?1 AND user_id = ?2",
    params![friend_id, user_id],
  )
}

// ─── Chats & images ───────────────────────────────────────────────────────────

pub fn get_chat_scoped(
  conn: &Connection,
  user_id: i64,
  chat_id: i64,
) -> rusqlite::Result<Option<Chat>> {
  conn
    .query_row(
      "SELECT id, message, user_id FROM chats WHERE id = ?1 AND user_id = ?2",
      params![chat_id, user_id],
      chat_from_row,
    )
    .optional()
}

pub fn list_chats(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Chat>> {
  let mut stmt = conn
    .prepare("SELECT id, message, user_id FROM chats WHERE user_id = ?1 ORDER BY id")?;
  let rows = stmt
    .query_map(params![user_id], chat_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn insert_chat(
  conn: &Connection,
  user_id: i64,
  message: &str,
) -> rusqlite::Result<Chat> {
  conn.execute(
    "INSERT INTO chats (message, user_id) VALUES (?1, ?2)",
    params![message, user_id],
  )?;
  Ok(Chat { id: conn.last_insert_rowid(), message: message.to_owned(), user_id })
}

pub fn update_chat_message(
  conn: &Connection,
  chat_id: i64,
  message: &str,
) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE chats SET message = ?1 WHERE id = ?2",
    params![message, chat_id],
  )
}

/// Scoped delete of a chat and its images.
pub fn delete_chat(
  conn: &Connection,
  user_id: i64,
  chat_id: i64,
) -> rusqlite::Result<usize> {
  conn.execute(
    "DELETE FROM images WHERE chat_id IN
       (SELECT id FROM chats WHERE id = ?1 AND user_id = ?2)",
    params![chat_id, user_id],
  )?;
  conn.execute(
    "DELETE FROM chats WHERE id = ?1 AND user_id = ?2",
    params![chat_id, user_id],
  )
}

pub fn list_images(conn: &Connection, chat_id: i64) -> rusqlite::Result<Vec<Image>> {
  let mut stmt = conn
    .prepare("SELECT id, url, name, chat_id FROM images WHERE chat_id = ?1 ORDER BY id")?;
  let rows = stmt
    .query_map(params![chat_id], image_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn insert_image(
  conn: &Connection,
  chat_id: i64,
  input: &NewImage,
) -> rusqlite::Result<Image> {
  conn.execute(
    "INSERT INTO images (url, name, chat_id) VALUES (?1, ?2, ?3)",
    params![input.url, input.name, chat_id],
  )?;
  Ok(Image {
    id: conn.last_insert_rowid(),
    url: input.url.clone(),
    name: input.name.clone(),
    chat_id,
  })
}

pub fn delete_images(conn: &Connection, chat_id: i64) -> rusqlite::Result<usize> {
  conn.execute("DELETE FROM images WHERE chat_id = ?1", params![chat_id])
}

/// Second step of the chat fan-out: attach a chat's images.
pub fn with_images(conn: &Connection, chat: Chat) -> rusqlite::Result<ChatWithImages> {
  let images = list_images(conn, chat.id)?;
  Ok(ChatWithImages { chat, images })
}

// ─── Statuses ─────────────────────────────────────────────────────────────────

pub fn get_status_scoped(
  conn: &Connection,
  user_id: i64,
  status_id: i64,
) -> rusqlite::Result<Option<Status>> {
  conn
    .query_row(
      "SELECT id, content, user_id FROM statuses WHERE id = ?1 AND user_id = ?2",
      params![status_id, user_id],
      status_from_row,
    )
    .optional()
}

pub fn list_statuses(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Status>> {
  let mut stmt = conn.prepare(
    "SELECT id, content, user_id FROM statuses WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], status_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn insert_status(
  conn: &Connection,
  user_id: i64,
  input: &NewStatus,
) -> rusqlite::Result<Status> {
  conn.execute(
    "INSERT INTO statuses (content, user_id) VALUES (?1, ?2)",
    params![input.content, user_id],
  )?;
  Ok(Status {
    id: conn.last_insert_rowid(),
    content: input.content.clone(),
    user_id,
  })
}

pub fn update_status(
  conn: &Connection,
  status_id: i64,
  input: &NewStatus,
) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE statuses SET content = ?1 WHERE id = ?2",
    params![input.content, status_id],
  )
}

pub fn delete_status(
  conn: &Connection,
  user_id: i64,
  status_id: i64,
) -> rusqlite::Result<usize> {
  conn.execute(
    "DELETE FROM statuses WHERE id = ?1 AND user_id = ?2",
    params![status_id, user_id],
  )
}
