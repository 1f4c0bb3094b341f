//! # Order Repository
//!
//! Reads over orders and order lines, plus the connection-level inserts the
//! order engine runs inside its transaction.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. insert_order()        status = Pending                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. insert_order_line()   for each basket line, price snapshot copied  │
//! │       │                   from products.unit_price_cents               │
//! │       ▼                                                                 │
//! │  3. update_order_status() Completed                                    │
//! │                                                                         │
//! │  All three run on the same transaction; see service::order.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockpile_core::{Order, OrderLine, OrderStatus};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_name, created_at, status FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the lines of an order, in insertion order.
    pub async fn get_lines(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Number of stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of stored order lines across all orders.
    pub async fn count_lines(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_lines")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Connection-level SQL (shared with StoreTx)
// =============================================================================

pub(crate) async fn insert_order(
    conn: &mut SqliteConnection,
    customer_name: &str,
    created_at: DateTime<Utc>,
) -> DbResult<Order> {
    let status = OrderStatus::Pending;

    let result = sqlx::query(
        "INSERT INTO orders (customer_name, created_at, status) VALUES (?1, ?2, ?3)",
    )
    .bind(customer_name)
    .bind(created_at)
    .bind(status)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!(order_id = %id, customer = %customer_name, "Order created");

    Ok(Order {
        id,
        customer_name: customer_name.to_string(),
        created_at,
        status,
    })
}

/// Inserts a line, copying the product's current price onto it.
///
/// ## Errors
/// * `DbError::NotFound` - the product doesn't exist (no row was inserted)
pub(crate) async fn insert_order_line(
    conn: &mut SqliteConnection,
    order_id: i64,
    product_id: i64,
    quantity: i64,
) -> DbResult<OrderLine> {
    let result = sqlx::query(
        r#"
        INSERT INTO order_lines (order_id, product_id, quantity, unit_price_cents)
        SELECT ?1, id, ?3, unit_price_cents
        FROM products
        WHERE id = ?2
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", product_id));
    }

    let line = sqlx::query_as::<_, OrderLine>(
        r#"
        SELECT id, order_id, product_id, quantity, unit_price_cents
        FROM order_lines
        WHERE id = ?1
        "#,
    )
    .bind(result.last_insert_rowid())
    .fetch_one(&mut *conn)
    .await?;

    Ok(line)
}

pub(crate) async fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> DbResult<()> {
    let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
        .bind(order_id)
        .bind(status)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Order", order_id));
    }

    debug!(order_id = %order_id, status = %status, "Order status updated");
    Ok(())
}
