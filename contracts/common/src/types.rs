//! Core Types for the Star Notary contracts
//!
//! This module defines the fundamental data structures shared by the
//! contract, the development chain, and the call dispatch layer.

use crate::String;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for account addresses (32 bytes)
pub type Address = [u8; 32];

/// Type alias for star token identifiers (chosen by the minter)
pub type StarId = u64;

/// Native value in wei
pub type Wei = u128;

/// Type alias for transaction hashes
pub type TxHash = [u8; 32];

// ============ Star Types ============

/// A registered star token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Star {
    /// Token id chosen at mint
    pub id: StarId,
    /// Name given at mint, never changes
    pub name: String,
    /// Current owner
    pub owner: Address,
    /// Block height when the star was minted
    pub minted_at: u64,
}

impl Star {
    /// Creates a freshly minted star
    pub fn new(id: StarId, name: String, owner: Address, block_height: u64) -> Self {
        Self {
            id,
            name,
            owner,
            minted_at: block_height,
        }
    }

    /// Returns true if `account` currently owns this star
    pub fn is_owned_by(&self, account: &Address) -> bool {
        self.owner == *account
    }
}

/// Value the contract owes an account once a call succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Payout {
    /// Recipient
    pub to: Address,
    /// Amount in wei
    pub amount: Wei,
}

// ============ Action Types ============

/// State-changing methods of the Star Notary contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StarAction {
    /// Mint a new star owned by the caller
    CreateStar { name: String, star_id: StarId },
    /// List an owned star at a price
    PutStarUpForSale { star_id: StarId, price: Wei },
    /// Withdraw an existing listing
    RemoveStarFromSale { star_id: StarId },
    /// Buy a listed star (payable)
    BuyStar { star_id: StarId },
    /// Let `spender` act on an owned star in an exchange
    Approve { spender: Address, star_id: StarId },
    /// Swap the owners of two stars
    ExchangeStars { star_a: StarId, star_b: StarId },
    /// Give an owned star to `to`
    TransferStar { to: Address, star_id: StarId },
}

impl StarAction {
    /// Contract method name as exposed to clients
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::CreateStar { .. } => "createStar",
            Self::PutStarUpForSale { .. } => "putStarUpForSale",
            Self::RemoveStarFromSale { .. } => "removeStarFromSale",
            Self::BuyStar { .. } => "buyStar",
            Self::Approve { .. } => "approve",
            Self::ExchangeStars { .. } => "exchangeStars",
            Self::TransferStar { .. } => "transferStar",
        }
    }

    /// Whether the method accepts value with the call
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::BuyStar { .. })
    }
}

/// Read-only methods of the Star Notary contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StarQuery {
    /// Collection name
    Name,
    /// Collection symbol
    Symbol,
    /// Name registered for a star
    GetRegistryEntry { star_id: StarId },
    /// Current owner of a star
    OwnerOf { star_id: StarId },
    /// Number of stars held by an account
    BalanceOf { owner: Address },
    /// Listed price of a star, zero when unlisted
    Listings { star_id: StarId },
    /// Account approved for a star, if any
    GetApproved { star_id: StarId },
}

/// Answer to a [`StarQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum QueryResult {
    Text(String),
    Account(Address),
    Count(u64),
    Price(Wei),
    Approved(Option<Address>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_buy_is_payable() {
        let actions = [
            StarAction::CreateStar { name: "Vega".into(), star_id: 1 },
            StarAction::PutStarUpForSale { star_id: 1, price: 10 },
            StarAction::RemoveStarFromSale { star_id: 1 },
            StarAction::Approve { spender: [2u8; 32], star_id: 1 },
            StarAction::ExchangeStars { star_a: 1, star_b: 2 },
            StarAction::TransferStar { to: [2u8; 32], star_id: 1 },
        ];
        assert!(actions.iter().all(|a| !a.is_payable()));
        assert!(StarAction::BuyStar { star_id: 1 }.is_payable());
    }

    #[test]
    fn test_star_ownership() {
        let star = Star::new(7, "Sirius".into(), [3u8; 32], 12);
        assert!(star.is_owned_by(&[3u8; 32]));
        assert!(!star.is_owned_by(&[4u8; 32]));
        assert_eq!(star.minted_at, 12);
    }
}
