use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account that owns holdings, keyed by its wallet address.
///
/// Accounts are created elsewhere (the identity layer upserts them after
/// signature verification); this crate only reads them through the
/// holdings repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,

    /// Wallet address, lowercased (e.g., "0xabc…").
    pub address: String,
}

impl Owner {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            address: address.into().to_lowercase(),
        }
    }
}

/// A single holding record: an owner holds `amount` units of `symbol`.
///
/// Multiple records for the same (owner, symbol) pair are allowed and are
/// summed during aggregation, never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,

    pub owner_id: Uuid,

    /// Canonical asset id, lowercased (e.g., "bitcoin"). Keys the caches
    /// and the market-data provider.
    pub symbol: String,

    /// Units held. Positive.
    pub amount: f64,
}

impl Holding {
    pub fn new(owner_id: Uuid, symbol: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            symbol: symbol.into().to_lowercase(),
            amount,
        }
    }
}

/// Outcome of the add-holding command.
///
/// `UnknownOwner` distinguishes "account record missing" from "not logged
/// in" — the former is a non-fatal outcome, the latter a `CoreError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddHoldingOutcome {
    Created,
    UnknownOwner,
}
