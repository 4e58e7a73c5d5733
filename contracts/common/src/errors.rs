//! Error Types for the Star Notary contracts
//!
//! Every error is a revert: the caller's transaction is aborted and all
//! state changes it made are undone.

use crate::types::{Address, StarId, Wei};

/// Result type alias for Star Notary operations
pub type StarNotaryResult<T> = Result<T, StarNotaryError>;

/// Main error enum for all Star Notary errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarNotaryError {
    // ============ Registry Errors ============
    /// No star minted with the given id
    StarNotFound { star_id: StarId },

    /// A star with the given id already exists
    StarAlreadyExists { star_id: StarId },

    /// Star names must not be empty
    EmptyName,

    // ============ Authorization Errors ============
    /// Caller does not own the star
    NotOwner { star_id: StarId, caller: Address },

    /// Caller neither owns nor is approved for the star
    NotApproved { star_id: StarId, caller: Address },

    /// Approving the current owner is meaningless
    ApprovalToOwner { star_id: StarId },

    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    // ============ Marketplace Errors ============
    /// Star has no listing
    NotForSale { star_id: StarId },

    /// Listing price must be nonzero
    ZeroPrice,

    /// Value sent does not cover the listed price
    InsufficientPayment { sent: Wei, price: Wei },

    /// Value was sent to a method that does not accept it
    NonPayable { method: &'static str, value: Wei },

    // ============ Ledger Errors ============
    /// Account balance too low for a debit
    InsufficientBalance { available: Wei, requested: Wei },

    /// Value received by the contract was not fully paid out
    ConservationViolated { received: Wei, paid: Wei },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    // ============ Input Validation Errors ============
    /// Invalid input parameter
    InvalidInput { param: &'static str, reason: &'static str },

    /// Call payload could not be decoded
    InvalidCallData,

    /// No contract deployed or no account available
    NotConnected,
}

impl StarNotaryError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::StarNotFound { .. } => "E001_STAR_NOT_FOUND",
            Self::StarAlreadyExists { .. } => "E002_STAR_EXISTS",
            Self::EmptyName => "E003_EMPTY_NAME",
            Self::NotOwner { .. } => "E020_NOT_OWNER",
            Self::NotApproved { .. } => "E021_NOT_APPROVED",
            Self::ApprovalToOwner { .. } => "E022_APPROVAL_TO_OWNER",
            Self::InvalidAddress { .. } => "E023_INVALID_ADDRESS",
            Self::NotForSale { .. } => "E030_NOT_FOR_SALE",
            Self::ZeroPrice => "E031_ZERO_PRICE",
            Self::InsufficientPayment { .. } => "E032_INSUFFICIENT_PAYMENT",
            Self::NonPayable { .. } => "E033_NON_PAYABLE",
            Self::InsufficientBalance { .. } => "E040_INSUFFICIENT_BALANCE",
            Self::ConservationViolated { .. } => "E041_CONSERVATION",
            Self::Overflow => "E080_OVERFLOW",
            Self::Underflow => "E081_UNDERFLOW",
            Self::InvalidInput { .. } => "E090_INVALID_INPUT",
            Self::InvalidCallData => "E091_INVALID_CALL_DATA",
            Self::NotConnected => "E100_NOT_CONNECTED",
        }
    }

    /// Returns true if the caller can retry successfully with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPayment { .. } // Send more value
                | Self::InsufficientBalance { .. } // Fund the account
                | Self::InvalidInput { .. }
        )
    }
}
