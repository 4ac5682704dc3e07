use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

/// Shared handle to one in-flight transaction.
///
/// Every repository built for a unit of work clones this handle, so all
/// audit writes join the same transaction as the change that triggered them
/// and commit or roll back together with it.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Begin a new transaction on the pool
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self::new(pool.begin().await?))
    }

    /// Commit the transaction; the executor is consumed afterwards
    pub async fn commit(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.tx.lock().await;
        match tx.take() {
            Some(transaction) => {
                transaction.commit().await?;
                Ok(())
            }
            None => Err("Transaction has been consumed".into()),
        }
    }

    /// Roll the transaction back; the executor is consumed afterwards
    pub async fn rollback(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.tx.lock().await;
        match tx.take() {
            Some(transaction) => {
                transaction.rollback().await?;
                Ok(())
            }
            None => Err("Transaction has been consumed".into()),
        }
    }
}
