//! # Transactional Scope
//!
//! [`StoreTx`] groups several store primitives into one all-or-nothing unit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  let mut tx = db.begin().await?;        BEGIN                          │
//! │  tx.create_order(..)                     ─┐                            │
//! │  tx.get_product_stock(..)                 │ one connection,            │
//! │  tx.add_order_line(..)                    │ invisible to other         │
//! │  tx.decrement_product_stock(..)           │ connections until commit   │
//! │  tx.set_order_status(..)                 ─┘                            │
//! │  tx.commit().await?                     COMMIT                         │
//! │                                                                         │
//! │  tx.rollback().await? / drop(tx)        ROLLBACK                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{order, product, supplier, warehouse};
use stockpile_core::{NewProduct, Order, OrderLine, OrderStatus, Product};

/// An open database transaction.
///
/// Created by [`Database::begin`](crate::Database::begin). Dropping it
/// without calling [`commit`](StoreTx::commit) rolls everything back.
pub struct StoreTx {
    tx: Transaction<'static, Sqlite>,
}

impl StoreTx {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        StoreTx { tx }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current stock of a product as seen by this transaction.
    ///
    /// Reflects decrements already made in the same scope.
    pub async fn get_product_stock(&mut self, product_id: i64) -> DbResult<Option<i64>> {
        product::fetch_stock(&mut self.tx, product_id).await
    }

    pub async fn supplier_exists(&mut self, supplier_id: i64) -> DbResult<bool> {
        supplier::supplier_exists(&mut self.tx, supplier_id).await
    }

    pub async fn warehouse_exists(&mut self, warehouse_id: i64) -> DbResult<bool> {
        warehouse::warehouse_exists(&mut self.tx, warehouse_id).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Lowers a product's stock.
    ///
    /// ## Returns
    /// * `Ok(true)` - stock decremented
    /// * `Ok(false)` - product missing or stock below `quantity`; nothing changed
    pub async fn decrement_product_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<bool> {
        product::decrement_stock(&mut self.tx, product_id, quantity).await
    }

    /// Inserts a Pending order.
    pub async fn create_order(
        &mut self,
        customer_name: &str,
        created_at: DateTime<Utc>,
    ) -> DbResult<Order> {
        order::insert_order(&mut self.tx, customer_name, created_at).await
    }

    /// Inserts an order line with the product's current unit price.
    pub async fn add_order_line(
        &mut self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<OrderLine> {
        order::insert_order_line(&mut self.tx, order_id, product_id, quantity).await
    }

    pub async fn set_order_status(&mut self, order_id: i64, status: OrderStatus) -> DbResult<()> {
        order::update_order_status(&mut self.tx, order_id, status).await
    }

    /// Inserts a product. References are not checked here; see
    /// [`validate_references`](crate::validate_references).
    pub async fn insert_product(&mut self, new_product: &NewProduct) -> DbResult<Product> {
        product::insert_product(&mut self.tx, new_product).await
    }

    // =========================================================================
    // Completion
    // =========================================================================

    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::transaction("commit", e))?;
        debug!("Transaction committed");
        Ok(())
    }

    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::transaction("rollback", e))?;
        debug!("Transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use stockpile_core::{NewProduct, NewSupplier, NewWarehouse, OrderStatus};

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.suppliers().create(&NewSupplier::new("Acme")).await.unwrap();
        db.warehouses().create(&NewWarehouse::new("Main")).await.unwrap();

        let mut tx = db.begin().await.unwrap();
        tx.insert_product(&NewProduct {
            name: "Widget".to_string(),
            supplier_id: 1,
            unit_price_cents: 250,
            stock_quantity: 10,
            warehouse_id: 1,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let db = setup().await;

        let mut tx = db.begin().await.unwrap();
        let order = tx.create_order("Alice", Utc::now()).await.unwrap();
        let line = tx.add_order_line(order.id, 1, 4).await.unwrap();
        assert!(tx.decrement_product_stock(1, 4).await.unwrap());
        assert_eq!(tx.get_product_stock(1).await.unwrap(), Some(6));
        tx.set_order_status(order.id, OrderStatus::Completed).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(line.unit_price_cents, 250);
        assert_eq!(db.products().get_stock(1).await.unwrap(), Some(6));
        assert_eq!(db.orders().get_lines(order.id).await.unwrap(), vec![line]);
    }

    #[tokio::test]
    async fn test_rollback_discards_everything() {
        let db = setup().await;

        let mut tx = db.begin().await.unwrap();
        let order = tx.create_order("Alice", Utc::now()).await.unwrap();
        tx.add_order_line(order.id, 1, 4).await.unwrap();
        tx.decrement_product_stock(1, 4).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(db.products().get_stock(1).await.unwrap(), Some(10));
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(db.orders().count_lines().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = setup().await;

        {
            let mut tx = db.begin().await.unwrap();
            tx.create_order("Alice", Utc::now()).await.unwrap();
            tx.decrement_product_stock(1, 10).await.unwrap();
        }

        assert_eq!(db.products().get_stock(1).await.unwrap(), Some(10));
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reference_checks() {
        let db = setup().await;

        let mut tx = db.begin().await.unwrap();
        assert!(tx.supplier_exists(1).await.unwrap());
        assert!(!tx.supplier_exists(2).await.unwrap());
        assert!(tx.warehouse_exists(1).await.unwrap());
        assert!(!tx.warehouse_exists(2).await.unwrap());
    }
}
