//! Message store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create and list-all over the `message` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - User input only reaches SQL through bound parameters.
//! - `created` is computed by SQLite (`date('now')`), never by callers.
//! - Each call opens its own connection and drops it on every exit path.
//! - Writes run in a transaction; a failed insert leaves no row behind.
//! - Read paths reject rows with an unparseable `created` date.
//! - Rows with blank text are returned as stored; older files hold such rows
//!   and there is no delete operation to clear them.

use crate::config::StoreConfig;
use crate::db::{open_db, DbError};
use crate::model::message::{Message, MessageId, MessageValidationError, NewMessage};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const MESSAGE_SELECT_SQL: &str = "SELECT
    id,
    content,
    author,
    created
FROM message";

const CREATED_DATE_FORMAT: &str = "%Y-%m-%d";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of a store operation, carrying the underlying reason.
#[derive(Debug)]
pub enum StorageError {
    /// The backing file could not be opened or its schema created.
    Unavailable(DbError),
    /// A write reached the store with a missing field.
    Validation(MessageValidationError),
    /// SQL execution failed after the connection was open.
    Db(DbError),
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted message data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<MessageValidationError> for StorageError {
    fn from(value: MessageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface used by controllers.
pub trait MessageRepository {
    /// Ensures the backing table exists. Safe to call on every startup.
    fn initialize(&self) -> StorageResult<()>;
    fn create_message(&self, message: &NewMessage) -> StorageResult<MessageId>;
    /// Returns a snapshot of every message in insertion order.
    fn list_messages(&self) -> StorageResult<Vec<Message>>;
}

impl<R: MessageRepository + ?Sized> MessageRepository for &R {
    fn initialize(&self) -> StorageResult<()> {
        (**self).initialize()
    }

    fn create_message(&self, message: &NewMessage) -> StorageResult<MessageId> {
        (**self).create_message(message)
    }

    fn list_messages(&self) -> StorageResult<Vec<Message>> {
        (**self).list_messages()
    }
}

/// SQLite file-backed message store.
#[derive(Debug, Clone)]
pub struct SqliteMessageStore {
    config: StoreConfig,
}

impl SqliteMessageStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        self.config.path.as_path()
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut conn = open_db(self.path()).map_err(StorageError::Unavailable)?;
        f(&mut conn)
    }
}

impl MessageRepository for SqliteMessageStore {
    fn initialize(&self) -> StorageResult<()> {
        self.with_connection(|_| Ok(()))
    }

    fn create_message(&self, message: &NewMessage) -> StorageResult<MessageId> {
        message.validate()?;

        let result = self.with_connection(|conn| {
            let tx = conn.transaction()?;
            let id = insert_message(&tx, message)?;
            tx.commit()?;
            Ok(id)
        });

        match &result {
            Ok(id) => debug!("event=message_create module=repo status=ok id={id}"),
            Err(err) => warn!("event=message_create module=repo status=error error={err}"),
        }
        result
    }

    fn list_messages(&self) -> StorageResult<Vec<Message>> {
        let result = self.with_connection(|conn| select_all_messages(conn));

        match &result {
            Ok(messages) => debug!(
                "event=message_list module=repo status=ok count={}",
                messages.len()
            ),
            Err(err) => warn!("event=message_list module=repo status=error error={err}"),
        }
        result
    }
}

/// Inserts one message on an open connection and returns its new id.
pub fn insert_message(conn: &Connection, message: &NewMessage) -> StorageResult<MessageId> {
    message.validate()?;

    conn.execute(
        "INSERT INTO message (content, author, created)
         VALUES (?1, ?2, date('now'));",
        params![message.content.as_str(), message.author.as_str()],
    )?;

    Ok(MessageId(conn.last_insert_rowid()))
}

/// Reads every message on an open connection, ordered by id.
pub fn select_all_messages(conn: &Connection) -> StorageResult<Vec<Message>> {
    let mut stmt = conn.prepare(&format!("{MESSAGE_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut messages = Vec::new();

    while let Some(row) = rows.next()? {
        messages.push(parse_message_row(row)?);
    }

    Ok(messages)
}

fn parse_message_row(row: &Row<'_>) -> StorageResult<Message> {
    let id = MessageId(row.get("id")?);

    let created_text: String = row.get("created")?;
    let created = NaiveDate::parse_from_str(&created_text, CREATED_DATE_FORMAT).map_err(|_| {
        StorageError::InvalidData(format!(
            "invalid date `{created_text}` in message.created for id {id}"
        ))
    })?;

    let message = Message {
        id,
        content: row.get("content")?,
        author: row.get("author")?,
        created,
    };
    if let Err(err) = message.validate() {
        warn!("event=message_read module=repo status=degraded id={id} reason={err}");
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::{insert_message, select_all_messages, StorageError};
    use crate::db::open_db_in_memory;
    use crate::model::message::{MessageValidationError, NewMessage};

    #[test]
    fn insert_rejects_empty_fields_without_writing() {
        let conn = open_db_in_memory().unwrap();

        let err = insert_message(&conn, &NewMessage::new("", "ada")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(MessageValidationError::EmptyContent)
        ));
        assert!(select_all_messages(&conn).unwrap().is_empty());
    }

    #[test]
    fn select_rejects_unparseable_created_date() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO message (content, author, created) VALUES ('hi', 'ada', 'yesterday');",
            [],
        )
        .unwrap();

        let err = select_all_messages(&conn).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(ref msg) if msg.contains("yesterday")));
    }

    #[test]
    fn select_returns_blank_persisted_text_as_stored() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO message (content, author, created) VALUES ('hi', '', date('now'));",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO message (content, author, created) VALUES ('ok', 'ada', date('now'));",
            [],
        )
        .unwrap();

        let messages = select_all_messages(&conn).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, "");
        assert_eq!(messages[1].content, "ok");
    }
}
