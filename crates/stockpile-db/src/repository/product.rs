//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Lookups and stock reads
//! - Conditional stock decrement (used by the order engine)
//! - Inventory listing (product joined with supplier and warehouse)
//!
//! ## Stock Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  UPDATE products                                                       │
//! │  SET stock_quantity = stock_quantity - :qty                            │
//! │  WHERE id = :id AND stock_quantity >= :qty                             │
//! │       │                                                                 │
//! │       ├── 1 row  → decremented                                         │
//! │       └── 0 rows → missing product or not enough stock, nothing done   │
//! │                                                                         │
//! │  The row can never go below zero, whatever ran before it.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stockpile_core::{InventoryRow, NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.get_by_id(1).await?;
/// let rows = repo.list_inventory().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, supplier_id, unit_price_cents, stock_quantity, warehouse_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Current stock of a product, `None` if the product doesn't exist.
    pub async fn get_stock(&self, id: i64) -> DbResult<Option<i64>> {
        let mut conn = self.pool.acquire().await?;
        fetch_stock(&mut conn, id).await
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Lists every product with its supplier and warehouse names.
    ///
    /// Ordered by product id. An empty catalog yields an empty vector.
    pub async fn list_inventory(&self) -> DbResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                s.name AS supplier_name,
                p.unit_price_cents,
                p.stock_quantity,
                w.name AS warehouse_name
            FROM products p
            INNER JOIN suppliers s ON s.id = p.supplier_id
            INNER JOIN warehouses w ON w.id = p.warehouse_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Inventory listed");
        Ok(rows)
    }
}

// =============================================================================
// Connection-level SQL (shared with StoreTx)
// =============================================================================

pub(crate) async fn fetch_stock(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<i64>> {
    let stock: Option<i64> =
        sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(stock)
}

/// Returns `false` when the row was left untouched (missing or short).
pub(crate) async fn decrement_stock(
    conn: &mut SqliteConnection,
    id: i64,
    quantity: i64,
) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock_quantity = stock_quantity - ?2
        WHERE id = ?1 AND stock_quantity >= ?2
        "#,
    )
    .bind(id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub(crate) async fn insert_product(
    conn: &mut SqliteConnection,
    product: &NewProduct,
) -> DbResult<Product> {
    let result = sqlx::query(
        r#"
        INSERT INTO products (name, supplier_id, unit_price_cents, stock_quantity, warehouse_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&product.name)
    .bind(product.supplier_id)
    .bind(product.unit_price_cents)
    .bind(product.stock_quantity)
    .bind(product.warehouse_id)
    .execute(&mut *conn)
    .await?;

    Ok(Product {
        id: result.last_insert_rowid(),
        name: product.name.clone(),
        supplier_id: product.supplier_id,
        unit_price_cents: product.unit_price_cents,
        stock_quantity: product.stock_quantity,
        warehouse_id: product.warehouse_id,
    })
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;
    use stockpile_core::{NewProduct, NewSupplier, NewWarehouse};

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.suppliers().create(&NewSupplier::new("Acme")).await.unwrap();
        db.warehouses().create(&NewWarehouse::new("Main")).await.unwrap();
        db
    }

    fn widget(stock: i64) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            supplier_id: 1,
            unit_price_cents: 250,
            stock_quantity: stock,
            warehouse_id: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_inventory() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.products().list_inventory().await.unwrap().is_empty());
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert_eq!(db.products().get_stock(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_and_list_inventory() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let product = super::insert_product(&mut conn, &widget(10)).await.unwrap();
        drop(conn);

        assert_eq!(product.id, 1);
        assert_eq!(db.products().get_by_id(1).await.unwrap(), Some(product));
        assert_eq!(db.products().get_stock(1).await.unwrap(), Some(10));

        let rows = db.products().list_inventory().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Widget");
        assert_eq!(rows[0].supplier_name, "Acme");
        assert_eq!(rows[0].warehouse_name, "Main");
        assert_eq!(rows[0].unit_price().to_string(), "$2.50");
        assert_eq!(rows[0].stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_decrement_is_conditional() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();
        super::insert_product(&mut conn, &widget(5)).await.unwrap();

        assert!(super::decrement_stock(&mut conn, 1, 3).await.unwrap());
        assert!(!super::decrement_stock(&mut conn, 1, 3).await.unwrap());
        assert!(super::decrement_stock(&mut conn, 1, 2).await.unwrap());
        assert!(!super::decrement_stock(&mut conn, 99, 1).await.unwrap());
        assert_eq!(super::fetch_stock(&mut conn, 1).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let orphan = NewProduct {
            supplier_id: 42,
            ..widget(1)
        };
        let err = super::insert_product(&mut conn, &orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_stock_rejected_by_schema() {
        let db = setup().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let err = super::insert_product(&mut conn, &widget(-1)).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
