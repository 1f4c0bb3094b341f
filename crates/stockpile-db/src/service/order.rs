//! # Order Transaction Engine
//!
//! Places a customer order against current stock, all or nothing.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        place_order(request)                             │
//! │                                                                         │
//! │  OrderRequest::validate()   name, non-empty basket, quantities > 0     │
//! │       │  (rejected here → no transaction opened)                       │
//! │       ▼                                                                 │
//! │  BEGIN ── create order (Pending)                                       │
//! │       │                                                                 │
//! │       ▼   for each line, in input order                                │
//! │  ┌─────────────────────────────────────────────┐                       │
//! │  │ stock = get_product_stock(product)          │                       │
//! │  │   None            → ProductNotFound         │──┐                    │
//! │  │   stock < qty     → InsufficientStock       │──┤                    │
//! │  │ add_order_line (price snapshot)             │  │                    │
//! │  │ decrement_product_stock                     │  │                    │
//! │  └─────────────────────────────────────────────┘  │                    │
//! │       │                                           ▼                    │
//! │       ▼                                    ROLLBACK: order, lines and  │
//! │  status = Completed ── COMMIT              decrements all discarded    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Duplicate product ids in one basket accumulate: the second line reads the
//! stock left by the first.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::ServiceResult;
use crate::pool::Database;
use crate::tx::StoreTx;
use stockpile_core::{BasketLine, CoreError, OrderLine, OrderRequest, OrderStatus, PlacedOrder};

/// Places an order.
///
/// ## Returns
/// * `Ok(PlacedOrder)` - committed, status Completed, lines in input order
/// * `Err(ServiceError::Rejected(..))` - invalid request, unknown product or
///   insufficient stock; the store is unchanged
/// * `Err(ServiceError::Storage(..))` - the store failed; rolled back
///
/// ## Example
/// ```rust,ignore
/// let placed = place_order(&db, OrderRequest::from_pairs("Alice", &[(1, 4)])).await?;
/// assert_eq!(placed.status(), OrderStatus::Completed);
/// ```
pub async fn place_order(db: &Database, request: OrderRequest) -> ServiceResult<PlacedOrder> {
    let request = request.validate()?;

    debug!(
        customer = %request.customer_name,
        lines = request.lines.len(),
        "Placing order"
    );

    let mut tx = db.begin().await?;

    match fill_order(&mut tx, &request).await {
        Ok(placed) => {
            tx.commit().await?;
            info!(
                order_id = %placed.id(),
                customer = %placed.order.customer_name,
                lines = placed.lines.len(),
                "Order completed"
            );
            Ok(placed)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback of rejected order failed");
            }
            let product_id = err.as_rejection().and_then(CoreError::product_id);
            warn!(
                customer = %request.customer_name,
                product_id = ?product_id,
                reason = %err,
                "Order rejected"
            );
            Err(err)
        }
    }
}

async fn fill_order(tx: &mut StoreTx, request: &OrderRequest) -> ServiceResult<PlacedOrder> {
    let mut order = tx.create_order(&request.customer_name, Utc::now()).await?;
    let mut lines = Vec::with_capacity(request.lines.len());

    for line in &request.lines {
        check_line(tx, line).await?;
        lines.push(take_line(tx, order.id, line).await?);
    }

    tx.set_order_status(order.id, OrderStatus::Completed).await?;
    order.status = OrderStatus::Completed;

    Ok(PlacedOrder { order, lines })
}

/// Reads the product's stock inside the scope and rejects the line if it
/// cannot be filled.
async fn check_line(tx: &mut StoreTx, line: &BasketLine) -> ServiceResult<i64> {
    let available = tx
        .get_product_stock(line.product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(line.product_id))?;

    debug!(
        product_id = %line.product_id,
        requested = line.quantity,
        available,
        "Checking line"
    );

    if available < line.quantity {
        return Err(CoreError::InsufficientStock {
            product_id: line.product_id,
            available,
            requested: line.quantity,
        }
        .into());
    }

    Ok(available)
}

/// Records the line and takes its quantity out of stock.
async fn take_line(tx: &mut StoreTx, order_id: i64, line: &BasketLine) -> ServiceResult<OrderLine> {
    let stored = tx
        .add_order_line(order_id, line.product_id, line.quantity)
        .await?;

    // A miss here means stock dropped after the check
    if !tx
        .decrement_product_stock(line.product_id, line.quantity)
        .await?
    {
        let available = tx.get_product_stock(line.product_id).await?.unwrap_or(0);
        return Err(CoreError::InsufficientStock {
            product_id: line.product_id,
            available,
            requested: line.quantity,
        }
        .into());
    }

    Ok(stored)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::service::catalog::{create_product, create_supplier, create_warehouse};
    use crate::service::ServiceError;
    use stockpile_core::{NewProduct, NewSupplier, NewWarehouse, ValidationError};

    /// Stock per product (ordered by id), order count, line count.
    type Snapshot = (Vec<(i64, i64)>, i64, i64);

    /// One supplier, one warehouse, products with the given stock levels.
    async fn setup(stocks: &[i64]) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_supplier(&db, NewSupplier::new("Acme")).await.unwrap();
        create_warehouse(&db, NewWarehouse::new("Main")).await.unwrap();

        for (i, stock) in stocks.iter().enumerate() {
            create_product(
                &db,
                NewProduct {
                    name: format!("Product {}", i + 1),
                    supplier_id: 1,
                    unit_price_cents: 250,
                    stock_quantity: *stock,
                    warehouse_id: 1,
                },
            )
            .await
            .unwrap();
        }
        db
    }

    async fn snapshot(db: &Database) -> Snapshot {
        let stocks = db
            .products()
            .list_inventory()
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.product_id, row.stock_quantity))
            .collect();
        (
            stocks,
            db.orders().count().await.unwrap(),
            db.orders().count_lines().await.unwrap(),
        )
    }

    async fn stock(db: &Database, product_id: i64) -> i64 {
        db.products().get_stock(product_id).await.unwrap().unwrap()
    }

    fn rejection(err: ServiceError) -> CoreError {
        match err {
            ServiceError::Rejected(core) => core,
            ServiceError::Storage(db) => panic!("expected rejection, got storage error: {db}"),
        }
    }

    #[tokio::test]
    async fn test_basket_within_stock_completes() {
        let db = setup(&[10, 5, 7]).await;

        let placed = place_order(&db, OrderRequest::from_pairs("Alice", &[(1, 4), (2, 5)]))
            .await
            .unwrap();

        assert_eq!(placed.status(), OrderStatus::Completed);
        assert_eq!(placed.order.customer_name, "Alice");
        assert_eq!(placed.lines.len(), 2);
        assert_eq!(placed.lines[0].product_id, 1);
        assert_eq!(placed.lines[1].product_id, 2);
        assert_eq!(placed.total().map(|t| t.cents()), Some(9 * 250));

        assert_eq!(stock(&db, 1).await, 6);
        assert_eq!(stock(&db, 2).await, 0);
        assert_eq!(stock(&db, 3).await, 7);

        let stored = db.orders().get_by_id(placed.id()).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
        assert_eq!(db.orders().get_lines(placed.id()).await.unwrap(), placed.lines);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_store_unchanged() {
        let db = setup(&[10, 5]).await;
        let before = snapshot(&db).await;

        let err = place_order(&db, OrderRequest::from_pairs("Bob", &[(1, 3), (2, 6)]))
            .await
            .unwrap_err();

        assert_eq!(
            rejection(err),
            CoreError::InsufficientStock {
                product_id: 2,
                available: 5,
                requested: 6,
            }
        );
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_store_unchanged() {
        let db = setup(&[10]).await;
        let before = snapshot(&db).await;

        let err = place_order(&db, OrderRequest::from_pairs("Bob", &[(1, 2), (42, 1)]))
            .await
            .unwrap_err();

        assert_eq!(rejection(err), CoreError::ProductNotFound(42));
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_rejection_is_idempotent() {
        let db = setup(&[2]).await;
        let before = snapshot(&db).await;
        let request = OrderRequest::from_pairs("Carol", &[(1, 3)]);

        let first = rejection(place_order(&db, request.clone()).await.unwrap_err());
        let second = rejection(place_order(&db, request).await.unwrap_err());

        assert_eq!(first, second);
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_duplicate_lines_accumulate() {
        let db = setup(&[10]).await;

        let placed = place_order(&db, OrderRequest::from_pairs("Dave", &[(1, 3), (1, 4)]))
            .await
            .unwrap();

        let quantities: Vec<i64> = placed.lines.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![3, 4]);
        assert_eq!(stock(&db, 1).await, 3);
    }

    #[tokio::test]
    async fn test_duplicate_lines_fail_on_second() {
        let db = setup(&[10]).await;
        let before = snapshot(&db).await;

        let err = place_order(&db, OrderRequest::from_pairs("Eve", &[(1, 6), (1, 6)]))
            .await
            .unwrap_err();

        assert_eq!(
            rejection(err),
            CoreError::InsufficientStock {
                product_id: 1,
                available: 4,
                requested: 6,
            }
        );
        assert_eq!(stock(&db, 1).await, 10);
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_stock_dropping_after_check_is_insufficient() {
        let db = setup(&[10]).await;
        let before = snapshot(&db).await;
        let line = BasketLine::new(1, 5);

        let mut tx = db.begin().await.unwrap();
        let order = tx.create_order("Frank", Utc::now()).await.unwrap();
        assert_eq!(check_line(&mut tx, &line).await.unwrap(), 10);

        // Another decrement lands between the check and the take
        assert!(tx.decrement_product_stock(1, 9).await.unwrap());

        let err = take_line(&mut tx, order.id, &line).await.unwrap_err();
        assert_eq!(
            rejection(err),
            CoreError::InsufficientStock {
                product_id: 1,
                available: 1,
                requested: 5,
            }
        );

        tx.rollback().await.unwrap();
        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_invalid_requests_rejected_before_transaction() {
        let db = setup(&[10]).await;
        let before = snapshot(&db).await;

        let empty = place_order(&db, OrderRequest::new("Alice", Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(rejection(empty), CoreError::EmptyBasket);

        let zero = place_order(&db, OrderRequest::from_pairs("Alice", &[(1, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(
            rejection(zero),
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        let nameless = place_order(&db, OrderRequest::from_pairs("  ", &[(1, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(
            rejection(nameless),
            CoreError::Validation(ValidationError::Required { .. })
        ));

        assert_eq!(snapshot(&db).await, before);
    }

    #[tokio::test]
    async fn test_line_keeps_price_snapshot() {
        let db = setup(&[10]).await;

        let placed = place_order(&db, OrderRequest::from_pairs("Alice", &[(1, 2)]))
            .await
            .unwrap();

        sqlx::query("UPDATE products SET unit_price_cents = 999 WHERE id = 1")
            .execute(db.pool())
            .await
            .unwrap();

        let lines = db.orders().get_lines(placed.id()).await.unwrap();
        assert_eq!(lines[0].unit_price_cents, 250);
        assert_eq!(lines[0].line_total().map(|t| t.cents()), Some(500));
    }

    #[tokio::test]
    async fn test_end_to_end_alice() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let supplier = create_supplier(&db, NewSupplier::new("S1")).await.unwrap();
        let warehouse = create_warehouse(&db, NewWarehouse::new("W1")).await.unwrap();
        let product = create_product(
            &db,
            NewProduct {
                name: "P1".to_string(),
                supplier_id: supplier.id,
                unit_price_cents: 250,
                stock_quantity: 10,
                warehouse_id: warehouse.id,
            },
        )
        .await
        .unwrap();

        let placed = place_order(&db, OrderRequest::from_pairs("Alice", &[(product.id, 4)]))
            .await
            .unwrap();
        assert_eq!(placed.status(), OrderStatus::Completed);

        let rows = db.products().list_inventory().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "P1");
        assert_eq!(rows[0].supplier_name, "S1");
        assert_eq!(rows[0].warehouse_name, "W1");
        assert_eq!(rows[0].stock_quantity, 6);
    }
}
