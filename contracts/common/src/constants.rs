//! Protocol Constants
//!
//! Token metadata defaults, value units, and development chain parameters
//! for the Star Notary contracts.

/// Token Metadata
pub mod token {
    /// Default collection name used at deployment
    pub const DEFAULT_NAME: &str = "Rinkeby Star Tokens";
    /// Default collection symbol used at deployment
    pub const DEFAULT_SYMBOL: &str = "RST";
}

/// Native value units (all balances are held in wei)
pub mod units {
    /// One wei
    pub const WEI: u128 = 1;
    /// One gwei (1e9 wei)
    pub const GWEI: u128 = 1_000_000_000;
    /// One ether (1e18 wei)
    pub const ETHER: u128 = 1_000_000_000_000_000_000;

    /// Decimal places of gwei relative to wei
    pub const GWEI_DECIMALS: u32 = 9;
    /// Decimal places of ether relative to wei
    pub const ETHER_DECIMALS: u32 = 18;
}

/// Addresses with special meaning
pub mod address {
    use crate::types::Address;

    /// The null account. Never a valid owner or transfer target.
    pub const ZERO: Address = [0u8; 32];
}

/// Local development chain configuration
///
/// Mirrors a typical local test network with a fixed set of pre-funded
/// accounts.
pub mod chain {
    use super::units::ETHER;

    /// Number of pre-funded development accounts
    pub const DEV_ACCOUNT_COUNT: u32 = 10;

    /// Starting balance of every development account (100 ether)
    pub const DEV_ACCOUNT_BALANCE: u128 = 100 * ETHER;

    /// Domain separator for deterministic account derivation
    pub const ACCOUNT_SEED_DOMAIN: &[u8] = b"star-notary/dev-account";

    /// Domain separator for contract address derivation
    pub const CONTRACT_SEED_DOMAIN: &[u8] = b"star-notary/contract";

    /// Block height of the genesis block
    pub const GENESIS_HEIGHT: u64 = 0;
}
