//! Establishment repository.

use chrono::Utc;

use eco_core::entities::Establishment;
use eco_core::ids::PREFIX_ESTABLISHMENT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::EcoService;

const SELECT_COLS: &str = "id, name, address, business_type, created_at";

fn row_to_establishment(row: &libsql::Row) -> Result<Establishment, DatabaseError> {
    Ok(Establishment {
        id: row.get(0)?,
        name: row.get(1)?,
        address: get_opt_string(row, 2)?,
        business_type: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl EcoService {
    pub async fn create_establishment(
        &self,
        name: &str,
        address: Option<&str>,
        business_type: Option<&str>,
    ) -> Result<Establishment, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidState(
                "establishment name must not be empty".into(),
            ));
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ESTABLISHMENT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO establishments (id, name, address, business_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id.as_str(), name, address, business_type, now.to_rfc3339()],
            )
            .await?;

        tracing::info!(id = %id, name, "created establishment");
        Ok(Establishment {
            id,
            name: name.to_string(),
            address: address.map(String::from),
            business_type: business_type.map(String::from),
            created_at: now,
        })
    }

    pub async fn get_establishment(&self, id: &str) -> Result<Establishment, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM establishments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "establishment",
            id: id.to_string(),
        })?;
        row_to_establishment(&row)
    }

    pub async fn list_establishments(&self, limit: u32) -> Result<Vec<Establishment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM establishments ORDER BY name LIMIT {limit}"),
                (),
            )
            .await?;

        let mut establishments = Vec::new();
        while let Some(row) = rows.next().await? {
            establishments.push(row_to_establishment(&row)?);
        }
        Ok(establishments)
    }
}
