//! Item store contract and the generic SQLite implementation.
//!
//! # Responsibility
//! - Provide `find_all`/`find_by_id`/`save`/`delete_by_id` for any kind.
//! - Keep SQL text generation in one place, parameterized by `StoredItem`.
//!
//! # Invariants
//! - Each write is a single SQL statement, so readers never observe a
//!   half-applied `save` or `delete_by_id`.
//! - Corrupt rows make the whole read degrade to empty, logged at `warn`.

use crate::db::DbError;
use crate::model::agenda::{AgendaId, AgendaKind, Identified};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for agenda persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted row could not be decoded into an item.
    InvalidData(String),
    /// Backing storage cannot be reached (for example a poisoned lock).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted agenda data: {message}"),
            Self::Unavailable(message) => write!(f, "agenda storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage capability for one agenda kind.
pub trait ItemStore<T> {
    /// Every stored item; empty when storage is empty or unreadable.
    fn find_all(&self) -> Vec<T>;
    /// The item with `id`, or `None` when absent or unreadable.
    fn find_by_id(&self, id: AgendaId) -> Option<T>;
    /// Inserts `item`, replacing any stored item with the same id.
    fn save(&self, item: &T) -> RepoResult<()>;
    /// Removes the item with `id`; absent ids are not an error.
    fn delete_by_id(&self, id: AgendaId) -> RepoResult<()>;
    /// Largest stored id, counting rows that fail to decode.
    ///
    /// Unlike the read paths this does not degrade: id allocation must see
    /// every occupied id or fail.
    fn max_id(&self) -> RepoResult<Option<AgendaId>>;
}

impl<T, S: ItemStore<T> + ?Sized> ItemStore<T> for &S {
    fn find_all(&self) -> Vec<T> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: AgendaId) -> Option<T> {
        (**self).find_by_id(id)
    }

    fn save(&self, item: &T) -> RepoResult<()> {
        (**self).save(item)
    }

    fn delete_by_id(&self, id: AgendaId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }

    fn max_id(&self) -> RepoResult<Option<AgendaId>> {
        (**self).max_id()
    }
}

/// Table mapping for one agenda kind.
///
/// `COLUMNS` must start with `id`, and `to_values` must return one value
/// per column in the same order.
pub trait StoredItem: Identified + Sized {
    const KIND: AgendaKind;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// SQLite-backed store, one instance per agenda kind.
pub struct SqliteItemStore<'conn, T> {
    conn: &'conn Connection,
    _kind: PhantomData<fn() -> T>,
}

impl<'conn, T: StoredItem> SqliteItemStore<'conn, T> {
    /// Wraps a migrated connection (see `db::open_db`).
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _kind: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    fn upsert_sql() -> String {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = T::COLUMNS
            .iter()
            .filter(|column| **column != "id")
            .map(|column| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {table} ({columns}) VALUES ({placeholders})
             ON CONFLICT(id) DO UPDATE SET
                {assignments},
                updated_at = (strftime('%s', 'now') * 1000);",
            table = T::TABLE,
            columns = T::COLUMNS.join(", "),
        )
    }

    fn try_find_all(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row)?);
        }
        Ok(items)
    }

    fn try_find_by_id(&self, id: AgendaId) -> RepoResult<Option<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let mut rows = stmt.query([i64::from(id)])?;
        match rows.next()? {
            Some(row) => Ok(Some(T::from_row(row)?)),
            None => Ok(None),
        }
    }
}

impl<T: StoredItem> ItemStore<T> for SqliteItemStore<'_, T> {
    fn find_all(&self) -> Vec<T> {
        match self.try_find_all() {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=store_read module=repo status=degraded kind={} error={err}",
                    T::KIND
                );
                Vec::new()
            }
        }
    }

    fn find_by_id(&self, id: AgendaId) -> Option<T> {
        self.try_find_by_id(id).unwrap_or_else(|err| {
            warn!(
                "event=store_read module=repo status=degraded kind={} id={id} error={err}",
                T::KIND
            );
            None
        })
    }

    fn save(&self, item: &T) -> RepoResult<()> {
        self.conn
            .execute(&Self::upsert_sql(), params_from_iter(item.to_values()))?;
        debug!(
            "event=store_write module=repo status=ok op=save kind={} id={}",
            T::KIND,
            item.agenda_id()
        );
        Ok(())
    }

    fn delete_by_id(&self, id: AgendaId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            [i64::from(id)],
        )?;
        debug!(
            "event=store_write module=repo status=ok op=delete kind={} id={id} changed={changed}",
            T::KIND
        );
        Ok(())
    }

    fn max_id(&self) -> RepoResult<Option<AgendaId>> {
        let raw: Option<i64> = self.conn.query_row(
            &format!("SELECT MAX(id) FROM {};", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        raw.map(|value| {
            AgendaId::try_from(value).map_err(|_| {
                RepoError::InvalidData(format!("invalid id `{value}` in {}.id", T::TABLE))
            })
        })
        .transpose()
    }
}
