//! Order aggregate persistence (`orders` + `order_items`).
//!
//! `update` reconciles the stored item rows against the in-memory aggregate:
//! rows whose id is no longer present are deleted, every current item is
//! upserted. Item rows keep their identity across updates, and `position`
//! records each item's index in the aggregate.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::{instrumented, RepositoryError};
use crate::domain::order::{Order, OrderItem};
use crate::domain::Repository;
use crate::metrics::Metrics;

const ENTITY: &str = "Order";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    name: String,
    price: f64,
    quantity: i32,
    order_id: String,
    product_id: String,
}

fn build_order(row: OrderRow, item_rows: Vec<OrderItemRow>) -> Result<Order, RepositoryError> {
    let items = item_rows
        .into_iter()
        .map(|item| OrderItem::new(item.id, item.name, item.price, item.product_id, item.quantity))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RepositoryError::invalid_record(ENTITY, &row.id, e))?;

    Order::new(row.id.clone(), row.customer_id, items)
        .map_err(|e| RepositoryError::invalid_record(ENTITY, row.id, e))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the order aggregate.
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
    metrics: Option<Arc<Metrics>>,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES (?, ?, ?)")
            .bind(order.id())
            .bind(order.customer_id())
            .bind(order.total())
            .execute(&mut *tx)
            .await?;

        for (position, item) in order.items().iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items (id, name, price, quantity, order_id, product_id, position)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(item.id())
            .bind(item.name())
            .bind(item.price())
            .bind(item.quantity())
            .bind(order.id())
            .bind(item.product_id())
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %order.customer_id(),
            item_count = order.items().len(),
            total = order.total(),
            "Created order"
        );
        Ok(())
    }

    async fn reconcile(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET customer_id = ?, total = ? WHERE id = ?")
            .bind(order.customer_id())
            .bind(order.total())
            .bind(order.id())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, order.id()));
        }

        let stored: HashSet<String> =
            sqlx::query_scalar::<_, String>("SELECT id FROM order_items WHERE order_id = ?")
                .bind(order.id())
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();

        let incoming: HashSet<&str> = order.items().iter().map(OrderItem::id).collect();

        let mut removed = 0usize;
        for stale_id in stored.iter().filter(|id| !incoming.contains(id.as_str())) {
            sqlx::query("DELETE FROM order_items WHERE id = ? AND order_id = ?")
                .bind(stale_id.as_str())
                .bind(order.id())
                .execute(&mut *tx)
                .await?;
            removed += 1;
        }

        let mut added = 0usize;
        for (position, item) in order.items().iter().enumerate() {
            upsert_item(&mut tx, order.id(), position as i64, item).await?;
            if !stored.contains(item.id()) {
                added += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id(),
            added,
            removed,
            kept = order.items().len() - added,
            total = order.total(),
            "Reconciled order items"
        );
        Ok(())
    }

    async fn select(&self, id: &str) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT id, customer_id FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, name, price, quantity, order_id, product_id
             FROM order_items WHERE order_id = ? ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        build_order(row, items)
    }

    async fn select_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>("SELECT id, customer_id FROM orders ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        // one pass over every item row, grouped by owning order
        let mut items_by_order: HashMap<String, Vec<OrderItemRow>> = HashMap::new();
        let mut item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, name, price, quantity, order_id, product_id FROM order_items ORDER BY order_id, position",
        )
        .fetch(&self.pool);

        while let Some(item) = item_rows.try_next().await? {
            items_by_order.entry(item.order_id.clone()).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                build_order(row, items)
            })
            .collect()
    }
}

/// Insert the item, or update it in place if it already belongs to this order
async fn upsert_item(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: &str,
    position: i64,
    item: &OrderItem,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        "INSERT INTO order_items (id, name, price, quantity, order_id, product_id, position)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT (id) DO UPDATE SET
             name = excluded.name,
             price = excluded.price,
             quantity = excluded.quantity,
             product_id = excluded.product_id,
             position = excluded.position
         WHERE order_items.order_id = excluded.order_id",
    )
    .bind(item.id())
    .bind(item.name())
    .bind(item.price())
    .bind(item.quantity())
    .bind(order_id)
    .bind(item.product_id())
    .bind(position)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::Conflict(format!(
            "order item {} belongs to another order",
            item.id()
        )));
    }
    Ok(())
}

#[async_trait]
impl Repository<Order> for OrderRepository {
    type Error = RepositoryError;

    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "order", "create", self.insert(order)).await
    }

    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "order", "update", self.reconcile(order)).await
    }

    async fn find(&self, id: &str) -> Result<Order, RepositoryError> {
        instrumented(self.metrics.as_deref(), "order", "find", self.select(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        instrumented(self.metrics.as_deref(), "order", "find_all", self.select_all()).await
    }
}

// =============================================================================
// Tests
// =============================================================================
