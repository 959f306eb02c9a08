//! SQL schema for the Huddle SQLite store.
//!
//! Executed once at connection startup. Every child table cascades on delete
//! of its parent; the store also deletes children explicitly, and the two
//! paths must remove the same rows.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE,
    friend_number TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS friends (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    friend_name TEXT NOT NULL,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS chats (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS statuses (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

-- Images belong to a chat, and only transitively to a user.
CREATE TABLE IF NOT EXISTS images (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    url     TEXT NOT NULL,
    name    TEXT NOT NULL,
    chat_id INTEGER NOT NULL REFERENCES chats(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS friends_user_idx   ON friends(user_id);
CREATE INDEX IF NOT EXISTS friends_name_idx   ON friends(name);
CREATE INDEX IF NOT EXISTS chats_user_idx     ON chats(user_id);
CREATE INDEX IF NOT EXISTS chats_message_idx  ON chats(message);
CREATE INDEX IF NOT EXISTS statuses_user_idx  ON statuses(user_id);
CREATE INDEX IF NOT EXISTS images_chat_idx    ON images(chat_id);

PRAGMA user_version = 1;
";
