use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, Owner};

/// Trait abstraction for persistent storage of owners and their holdings.
///
/// The real store lives outside this crate (a database behind the
/// transport layer); the engine only needs these three reads/writes.
#[async_trait]
pub trait HoldingsRepository: Send + Sync {
    /// Look up an owner's account record. `None` means the account does
    /// not exist — distinct from an authentication failure.
    async fn find_owner(&self, owner_id: Uuid) -> Result<Option<Owner>, CoreError>;

    /// All holding records for an owner, in insertion order.
    async fn list_holdings(&self, owner_id: Uuid) -> Result<Vec<Holding>, CoreError>;

    /// Append a new holding record. The symbol arrives validated and
    /// lowercased; existing records for the same symbol are left alone.
    async fn create_holding(
        &self,
        owner_id: Uuid,
        symbol: &str,
        amount: f64,
    ) -> Result<Holding, CoreError>;
}
