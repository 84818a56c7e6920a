use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::traits::HoldingsRepository;
use crate::errors::CoreError;
use crate::models::holding::{Holding, Owner};

/// In-memory holdings repository backed by `HashMap`s.
///
/// Suitable for tests and single-process embedding; anything durable
/// belongs behind [`HoldingsRepository`] in the host application.
#[derive(Default)]
pub struct MemoryHoldingsRepository {
    owners: Mutex<HashMap<Uuid, Owner>>,
    holdings: Mutex<HashMap<Uuid, Vec<Holding>>>,
}

impl MemoryHoldingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the owner account for `address` if it does not exist yet,
    /// returning the (new or existing) record. Addresses are compared
    /// lowercased, so repeated calls for one wallet are idempotent.
    pub fn upsert_owner(&self, address: &str) -> Owner {
        let address = address.to_lowercase();
        let mut owners = self.owners.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = owners.values().find(|o| o.address == address) {
            return existing.clone();
        }
        let owner = Owner::new(address);
        owners.insert(owner.id, owner.clone());
        owner
    }

    /// Number of holding records stored for an owner.
    pub fn holding_count(&self, owner_id: Uuid) -> usize {
        let holdings = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        holdings.get(&owner_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl HoldingsRepository for MemoryHoldingsRepository {
    async fn find_owner(&self, owner_id: Uuid) -> Result<Option<Owner>, CoreError> {
        let owners = self.owners.lock().unwrap_or_else(|e| e.into_inner());
        Ok(owners.get(&owner_id).cloned())
    }

    async fn list_holdings(&self, owner_id: Uuid) -> Result<Vec<Holding>, CoreError> {
        let holdings = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        Ok(holdings.get(&owner_id).cloned().unwrap_or_default())
    }

    async fn create_holding(
        &self,
        owner_id: Uuid,
        symbol: &str,
        amount: f64,
    ) -> Result<Holding, CoreError> {
        let holding = Holding::new(owner_id, symbol, amount);
        let mut holdings = self.holdings.lock().unwrap_or_else(|e| e.into_inner());
        holdings
            .entry(owner_id)
            .or_default()
            .push(holding.clone());
        Ok(holding)
    }
}
