//! Snippet insert and lookup operations.
//!
//! Every read filters on `expires > now` inside the SQL statement, with `now`
//! taken from SQLite's clock at the moment the statement runs. Two reads of
//! the same row may therefore disagree as time passes.

use super::connection::SnippetDb;
use crate::Error;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, Row, types::Type};

/// Number of snippets returned by [`SnippetDb::latest`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

// Both timestamps come from a single 'now', so expires - created is exact.
const INSERT_SNIPPET: &str = "INSERT INTO snippets (title, content, created, expires)
    VALUES (?1, ?2,
            strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            strftime('%Y-%m-%dT%H:%M:%fZ', 'now', ?3 || ' days'))";

const SELECT_ACTIVE_BY_ID: &str = "SELECT id, title, content, created, expires FROM snippets
    WHERE expires > strftime('%Y-%m-%dT%H:%M:%fZ', 'now') AND id = ?1";

const SELECT_ACTIVE_RECENT: &str = "SELECT id, title, content, created, expires FROM snippets
    WHERE expires > strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
    ORDER BY created DESC, id DESC
    LIMIT ?1";

/// A stored snippet.
///
/// Immutable once inserted. `id`, `created` and `expires` are always
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Snippet {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created: timestamp(row, 3)?,
            expires: timestamp(row, 4)?,
        })
    }
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl SnippetDb {
    /// Insert a new snippet that expires `expires_days` days from now.
    ///
    /// `expires_days` is taken as text, the way it arrives from a form, and
    /// must parse as a whole (possibly negative) number of days.
    ///
    /// Returns the identifier assigned by the store.
    pub async fn insert(&self, title: &str, content: &str, expires_days: &str) -> Result<i64, Error> {
        let days: i64 = expires_days
            .trim()
            .parse()
            .map_err(|_| Error::InvalidExpiry(expires_days.to_string()))?;
        let title = title.to_string();
        let content = content.to_string();

        self.conn
            .call(move |conn| -> Result<i64, Error> {
                let inserted = conn.execute(INSERT_SNIPPET, params![title, content, days])?;
                if inserted != 1 {
                    return Err(rusqlite::Error::StatementChangedRows(inserted).into());
                }
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// Get an active snippet by id.
    ///
    /// Returns `Error::NotFound` if the id never existed or has expired.
    pub async fn get(&self, id: i64) -> Result<Snippet, Error> {
        self.conn
            .call(move |conn| -> Result<Snippet, Error> {
                let mut stmt = conn.prepare(SELECT_ACTIVE_BY_ID)?;
                match stmt.query_row(params![id], Snippet::from_row) {
                    Ok(snippet) => Ok(snippet),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::NotFound(id)),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// List up to `limit` active snippets, newest first.
    ///
    /// Snippets created at the same instant come back in reverse insertion
    /// order. A row that fails to decode fails the whole listing.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Snippet>, Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.conn
            .call(move |conn| -> Result<Vec<Snippet>, Error> {
                let mut stmt = conn.prepare(SELECT_ACTIVE_RECENT)?;
                let rows = stmt.query_map(params![limit], Snippet::from_row)?;
                let snippets = rows.collect::<Result<Vec<_>, _>>()?;
                Ok(snippets)
            })
            .await
            .map_err(Error::from)
    }

    /// The [`DEFAULT_RECENT_LIMIT`] most recent active snippets.
    pub async fn latest(&self) -> Result<Vec<Snippet>, Error> {
        self.list_recent(DEFAULT_RECENT_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn test_db() -> SnippetDb {
        SnippetDb::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let id = db.insert("T1", "C1", "7").await.unwrap();
        assert!(id > 0);

        let snippet = db.get(id).await.unwrap();
        assert_eq!(snippet.id, id);
        assert_eq!(snippet.title, "T1");
        assert_eq!(snippet.content, "C1");
    }

    #[tokio::test]
    async fn test_expiry_window_is_exact() {
        let db = test_db().await;
        for days in [1_i64, 7, 365] {
            let id = db.insert("window", "body", &days.to_string()).await.unwrap();
            let snippet = db.get(id).await.unwrap();
            assert_eq!(snippet.expires - snippet.created, Duration::days(days));
        }
    }

    #[tokio::test]
    async fn test_created_uses_current_utc_time() {
        let db = test_db().await;
        let before = Utc::now() - Duration::seconds(5);
        let id = db.insert("now", "body", "1").await.unwrap();
        let after = Utc::now() + Duration::seconds(5);

        let snippet = db.get(id).await.unwrap();
        assert!(snippet.created > before && snippet.created < after);
    }

    #[tokio::test]
    async fn test_expired_is_indistinguishable_from_missing() {
        let db = test_db().await;
        let zero = db.insert("zero", "body", "0").await.unwrap();
        let negative = db.insert("negative", "body", "-3").await.unwrap();

        for id in [zero, negative, 9_999] {
            let err = db.get(id).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(missing) if missing == id));
        }
    }

    #[tokio::test]
    async fn test_expiry_evaluated_at_read_time() {
        let db = test_db().await;
        let id = db
            .conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO snippets (title, content, created, expires) VALUES ('short', 'lived',
                        strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                        strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '+1 seconds'))",
                    [],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .unwrap();

        assert!(db.get(id).await.is_ok());
        tokio::time::sleep(tokio::time::Duration::from_millis(1_500)).await;
        assert!(db.get(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_integer_expiry() {
        let db = test_db().await;
        for bad in ["", "seven", "7.5", "7 days"] {
            let err = db.insert("bad", "expiry", bad).await.unwrap_err();
            assert!(matches!(err, Error::InvalidExpiry(_)), "{bad:?} gave {err}");
            assert!(err.is_persistence());
        }
        assert!(db.list_recent(100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_trims_expiry() {
        let db = test_db().await;
        let id = db.insert("trim", "body", " 2 ").await.unwrap();
        let snippet = db.get(id).await.unwrap();
        assert_eq!(snippet.expires - snippet.created, Duration::days(2));
    }

    #[tokio::test]
    async fn test_list_recent_empty() {
        let db = test_db().await;
        assert!(db.latest().await.unwrap().is_empty());

        db.insert("gone", "body", "0").await.unwrap();
        assert!(db.latest().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_limit_and_order() {
        let db = test_db().await;
        let mut ids = Vec::new();
        for i in 0..12 {
            ids.push(db.insert(&format!("title {i}"), "body", "1").await.unwrap());
        }
        db.insert("expired", "body", "-1").await.unwrap();

        let latest = db.latest().await.unwrap();
        assert_eq!(latest.len(), DEFAULT_RECENT_LIMIT);
        assert!(latest.windows(2).all(|pair| pair[0].created >= pair[1].created));
        assert!(latest.iter().all(|s| s.title != "expired"));
        assert_eq!(latest[0].id, *ids.last().unwrap());

        assert_eq!(db.list_recent(3).await.unwrap().len(), 3);
        assert_eq!(db.list_recent(50).await.unwrap().len(), 12);
        assert!(db.list_recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_fails_on_undecodable_row() {
        let db = test_db().await;
        db.insert("good", "body", "1").await.unwrap();
        db.conn
            .call(|conn| {
                conn.execute(
                    "INSERT INTO snippets (title, content, created, expires)
                     VALUES ('bad', 'row', 'yesterday-ish', '9999-12-31T00:00:00.000Z')",
                    [],
                )
            })
            .await
            .unwrap();

        let err = db.latest().await.unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_snippet_serializes_timestamps_as_rfc3339() {
        let created = DateTime::parse_from_rfc3339("2026-01-02T03:04:05.678Z")
            .unwrap()
            .with_timezone(&Utc);
        let snippet =
            Snippet { id: 1, title: "t".into(), content: "c".into(), created, expires: created + Duration::days(1) };

        let json = serde_json::to_value(&snippet).unwrap();
        assert_eq!(json["created"], "2026-01-02T03:04:05.678Z");
        assert_eq!(json["expires"], "2026-01-03T03:04:05.678Z");
    }
}
