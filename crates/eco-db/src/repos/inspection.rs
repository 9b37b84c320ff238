//! Inspection repository.

use chrono::{Datelike, NaiveDate, Utc};

use eco_core::entities::Inspection;
use eco_core::enums::Quarter;
use eco_core::ids::PREFIX_INSPECTION;

use crate::error::DatabaseError;
use crate::helpers::{parse_date, parse_datetime, parse_enum};
use crate::service::EcoService;

const SELECT_COLS: &str = "id, title, scheduled_on, quarter, year, created_at";

fn row_to_inspection(row: &libsql::Row) -> Result<Inspection, DatabaseError> {
    Ok(Inspection {
        id: row.get(0)?,
        title: row.get(1)?,
        scheduled_on: parse_date(&row.get::<String>(2)?)?,
        quarter: parse_enum(&row.get::<String>(3)?)?,
        year: i32::try_from(row.get::<i64>(4)?)
            .map_err(|e| DatabaseError::Query(format!("year out of range: {e}")))?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl EcoService {
    /// Schedule an inspection. Quarter and year derive from the date.
    pub async fn create_inspection(
        &self,
        title: &str,
        scheduled_on: NaiveDate,
    ) -> Result<Inspection, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_INSPECTION).await?;
        let quarter = Quarter::from_month(scheduled_on.month());
        let year = scheduled_on.year();

        self.db()
            .conn()
            .execute(
                "INSERT INTO inspections (id, title, scheduled_on, quarter, year, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    title,
                    scheduled_on.format("%Y-%m-%d").to_string(),
                    quarter.as_str(),
                    i64::from(year),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(id = %id, %quarter, year, "created inspection");
        Ok(Inspection {
            id,
            title: title.to_string(),
            scheduled_on,
            quarter,
            year,
            created_at: now,
        })
    }

    pub async fn get_inspection(&self, id: &str) -> Result<Inspection, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM inspections WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "inspection",
            id: id.to_string(),
        })?;
        row_to_inspection(&row)
    }

    /// Most recently scheduled first.
    pub async fn list_inspections(&self, limit: u32) -> Result<Vec<Inspection>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM inspections ORDER BY scheduled_on DESC, created_at DESC LIMIT {limit}"
                ),
                (),
            )
            .await?;

        let mut inspections = Vec::new();
        while let Some(row) = rows.next().await? {
            inspections.push(row_to_inspection(&row)?);
        }
        Ok(inspections)
    }
}
