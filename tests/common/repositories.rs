use sqlx::Row;
use uuid::Uuid;

use post_action_tx::{Executor, TransactionResult};

use super::entities::Order;

/// Order repository bound to one session's transaction
#[derive(Clone)]
pub struct OrderRepository {
    executor: Executor,
}

impl OrderRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(&self, order: &Order) -> TransactionResult<()> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        sqlx::query("INSERT INTO post_action_orders (id, price) VALUES ($1, $2)")
            .bind(order.id)
            .bind(order.price)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> TransactionResult<Option<Order>> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query("SELECT id, price FROM post_action_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|r| Order {
            id: r.get("id"),
            price: r.get("price"),
        }))
    }

    pub async fn count(&self) -> TransactionResult<i64> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(sqlx::Error::PoolClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM post_action_orders")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }
}
