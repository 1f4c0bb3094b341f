//! # Warehouse Repository

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stockpile_core::{NewWarehouse, Warehouse};

/// Repository for warehouse database operations.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    /// Inserts a warehouse and returns the stored record.
    pub async fn create(&self, warehouse: &NewWarehouse) -> DbResult<Warehouse> {
        debug!(name = %warehouse.name, "Inserting warehouse");

        let result = sqlx::query("INSERT INTO warehouses (name, location) VALUES (?1, ?2)")
            .bind(&warehouse.name)
            .bind(&warehouse.location)
            .execute(&self.pool)
            .await?;

        Ok(Warehouse {
            id: result.last_insert_rowid(),
            name: warehouse.name.clone(),
            location: warehouse.location.clone(),
        })
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Warehouse>> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, location FROM warehouses WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(warehouse)
    }

    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        warehouse_exists(&mut conn, id).await
    }
}

pub(crate) async fn warehouse_exists(conn: &mut SqliteConnection, id: i64) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM warehouses WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}
