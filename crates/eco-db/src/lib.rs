//! # eco-db
//!
//! libSQL persistence for EcoInspect: establishments, inspections, checklist
//! questions, inspection results with their responses, and reporting
//! queries.
//!
//! A submission is written inside one transaction. Verdicts and
//! recommendations are computed by `eco-compliance` and stored on the result
//! row; they are recomputed once when a draft is finalized and never again.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct EcoDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl EcoDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let eco_db = Self { db, conn };
        eco_db.run_migrations().await?;
        tracing::debug!(path, "opened database");
        Ok(eco_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"res-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> EcoDb {
        EcoDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let tables = [
            "establishments",
            "inspections",
            "checklist_questions",
            "inspection_results",
            "checklist_responses",
            "conditional_field_responses",
            "utility_records",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("res").await.unwrap();
        assert!(id.starts_with("res-"), "ID should start with 'res-': {id}");
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in eco_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn one_result_per_inspection_and_establishment() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO establishments (id, name) VALUES ('est-1', 'Riverside Laundry');
                 INSERT INTO inspections (id, title, scheduled_on, quarter, year)
                     VALUES ('ins-1', 'Q4 sweep', '2026-10-17', 'q4', 2026);
                 INSERT INTO inspection_results (id, inspection_id, establishment_id, verdict)
                     VALUES ('res-1', 'ins-1', 'est-1', 'compliant');",
            )
            .await
            .unwrap();

        let dup = db
            .conn()
            .execute(
                "INSERT INTO inspection_results (id, inspection_id, establishment_id, verdict)
                 VALUES ('res-2', 'ins-1', 'est-1', 'compliant')",
                (),
            )
            .await;
        let err = DatabaseError::from(dup.unwrap_err());
        assert!(err.is_unique_violation(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO inspection_results (id, inspection_id, establishment_id, verdict)
                 VALUES ('res-1', 'ins-missing', 'est-missing', 'compliant')",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
