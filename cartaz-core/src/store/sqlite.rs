//! SQLite-backed catalog implementing all three store traits.
//!
//! The database mirrors the ticketing backend's row shapes: `interests` and
//! `tags` hold JSON-encoded arrays as text, and `events.date` holds RFC 3339
//! UTC text with a `Z` suffix so lexical order matches chronological order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

use crate::{EventCandidate, UserProfile};

use super::{EventCatalog, ProfileStore, PurchaseHistory, StoreError};

const PROFILE_SQL: &str = "SELECT id, interests, location_city FROM users WHERE id = ?1";
const HISTORY_SQL: &str = "SELECT DISTINCT events.category FROM tickets \
     JOIN events ON events.id = tickets.event_id WHERE tickets.user_id = ?1";
const UPCOMING_SQL: &str = "SELECT id, title, category, tags, venue_city, is_featured, date, details \
     FROM events WHERE status = 'published' AND date >= ?1 ORDER BY date ASC LIMIT ?2";

/// Error raised when opening the catalog database.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite catalog at {path}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Read-only catalog backed by the ticketing backend's SQLite database.
#[derive(Debug)]
pub struct SqliteCatalog {
    connection: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open the catalog database read-only.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError::OpenDatabase`] when the database cannot
    /// be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteCatalogError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let connection = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&connection)
    }
}

impl ProfileStore for SqliteCatalog {
    fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        self.with_connection(|connection| {
            let mut statement = connection
                .prepare_cached(PROFILE_SQL)
                .map_err(query_error("prepare user profile lookup"))?;
            statement
                .query_row([user_id], |row| {
                    Ok(UserProfile {
                        id: row.get(0)?,
                        interests: row.get(1)?,
                        home_city: row.get(2)?,
                    })
                })
                .optional()
                .map_err(query_error("load user profile"))
        })
    }
}

impl PurchaseHistory for SqliteCatalog {
    fn purchased_categories(&self, user_id: &str) -> Result<HashSet<String>, StoreError> {
        self.with_connection(|connection| {
            let mut statement = connection
                .prepare_cached(HISTORY_SQL)
                .map_err(query_error("prepare purchase history lookup"))?;
            let rows = statement
                .query_map([user_id], |row| row.get::<_, String>(0))
                .map_err(query_error("load purchase history"))?;

            let mut categories = HashSet::new();
            for row in rows {
                let category = row.map_err(query_error("read purchase history row"))?;
                if !category.is_empty() {
                    categories.insert(category);
                }
            }
            Ok(categories)
        })
    }
}

impl EventCatalog for SqliteCatalog {
    fn upcoming_published(
        &self,
        now: DateTime<Utc>,
        max_count: usize,
    ) -> Result<Vec<EventCandidate>, StoreError> {
        let cutoff = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let limit = i64::try_from(max_count).unwrap_or(i64::MAX);

        self.with_connection(|connection| {
            let mut statement = connection
                .prepare_cached(UPCOMING_SQL)
                .map_err(query_error("prepare upcoming event lookup"))?;
            let rows = statement
                .query_map((cutoff.as_str(), limit), read_event_row)
                .map_err(query_error("load upcoming events"))?;

            let mut candidates = Vec::new();
            for row in rows {
                let raw = row.map_err(query_error("read upcoming event row"))?;
                candidates.push(raw.into_candidate()?);
            }
            Ok(candidates)
        })
    }
}

/// Event row as stored, before the start date is parsed.
struct RawEventRow {
    id: String,
    title: String,
    category: String,
    tags: Option<String>,
    venue_city: Option<String>,
    is_featured: bool,
    date: String,
    details: Option<String>,
}

impl RawEventRow {
    fn into_candidate(self) -> Result<EventCandidate, StoreError> {
        let starts_at = DateTime::parse_from_rfc3339(&self.date)
            .map_err(|source| StoreError::InvalidStartDate {
                id: self.id.clone(),
                source,
            })?
            .with_timezone(&Utc);
        // Unreadable detail payloads degrade to an absent echo.
        let payload = self
            .details
            .as_deref()
            .and_then(|details| serde_json::from_str(details).ok())
            .unwrap_or(serde_json::Value::Null);

        Ok(EventCandidate {
            id: self.id,
            title: self.title,
            category: self.category,
            tags: self.tags,
            city: self.venue_city,
            is_featured: self.is_featured,
            starts_at,
            payload,
        })
    }
}

fn read_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEventRow> {
    Ok(RawEventRow {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        tags: row.get(3)?,
        venue_city: row.get(4)?,
        is_featured: row.get(5)?,
        date: row.get(6)?,
        details: row.get(7)?,
    })
}

fn query_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |source| StoreError::Query {
        operation,
        source: Box::new(source),
    }
}
