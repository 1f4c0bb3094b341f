//! # Supplier Repository
//!
//! Database operations for suppliers.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockpile_core::{NewSupplier, Supplier};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a supplier and returns the stored record.
    ///
    /// Input is expected to be validated already (`NewSupplier::validate`).
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - another supplier has this email
    pub async fn create(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        debug!(name = %supplier.name, "Inserting supplier");

        let result = sqlx::query("INSERT INTO suppliers (name, email, phone) VALUES (?1, ?2, ?3)")
            .bind(&supplier.name)
            .bind(&supplier.email)
            .bind(&supplier.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => {
                    DbError::duplicate(field, supplier.email.clone().unwrap_or_default())
                }
                other => other,
            })?;

        let id = result.last_insert_rowid();
        debug!(id = %id, "Supplier inserted");

        Ok(Supplier {
            id,
            name: supplier.name.clone(),
            email: supplier.email.clone(),
            phone: supplier.phone.clone(),
        })
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, email, phone FROM suppliers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Whether a supplier with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        supplier_exists(&mut conn, id).await
    }
}

pub(crate) async fn supplier_exists(conn: &mut SqliteConnection, id: i64) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM suppliers WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use stockpile_core::NewSupplier;

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        let created = repo
            .create(&NewSupplier::new("Acme").with_email("sales@acme.test"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.exists(1).await.unwrap());
        assert!(!repo.exists(2).await.unwrap());
        assert!(repo.get_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        repo.create(&NewSupplier::new("Acme").with_email("sales@acme.test"))
            .await
            .unwrap();
        let err = repo
            .create(&NewSupplier::new("Acme Two").with_email("sales@acme.test"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "suppliers.email");
                assert_eq!(value, "sales@acme.test");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_suppliers_without_email_do_not_collide() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        repo.create(&NewSupplier::new("First")).await.unwrap();
        let second = repo.create(&NewSupplier::new("Second")).await.unwrap();
        assert_eq!(second.id, 2);
    }
}
