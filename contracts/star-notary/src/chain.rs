//! Local development chain hosting a single Star Notary deployment.
//!
//! Calls execute as atomic transactions: value sent with a call is moved
//! into the contract's escrow account, the contract runs, and its payouts
//! are settled from escrow. If any step fails the contract state and the
//! ledger are restored to what they were before the call.

use sha2::{Digest, Sha256};

use star_notary_common::{
    constants::chain,
    errors::{StarNotaryError, StarNotaryResult},
    events::StarEvent,
    ledger::Ledger,
    types::{Address, QueryResult, StarAction, StarQuery, TxHash, Wei},
};

use crate::{execute, CallContext, StarNotaryState};

/// Outcome of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Reverted(StarNotaryError),
}

/// Record of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub from: Address,
    pub nonce: u64,
    pub block_height: u64,
    pub method: &'static str,
    pub value: Wei,
    pub status: TxStatus,
    /// Events emitted by the call (empty when reverted)
    pub events: Vec<StarEvent>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == TxStatus::Success
    }
}

/// Single-contract development chain
#[derive(Debug, Clone)]
pub struct DevChain {
    contract: Address,
    state: StarNotaryState,
    ledger: Ledger,
    accounts: Vec<Address>,
    block_height: u64,
    nonce: u64,
    receipts: Vec<Receipt>,
}

impl DevChain {
    /// Deploy a collection on an empty chain
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            contract: derive_contract_address(0),
            state: StarNotaryState::new(name, symbol),
            ledger: Ledger::new(),
            accounts: Vec::new(),
            block_height: chain::GENESIS_HEIGHT,
            nonce: 0,
            receipts: Vec::new(),
        }
    }

    /// Deploy a collection and pre-fund the standard development accounts
    pub fn with_dev_accounts(
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> StarNotaryResult<Self> {
        let mut dev = Self::new(name, symbol);
        for index in 0..chain::DEV_ACCOUNT_COUNT {
            let account = derive_account(index);
            dev.fund(&account, chain::DEV_ACCOUNT_BALANCE)?;
            dev.accounts.push(account);
        }
        Ok(dev)
    }

    /// Credit an account from outside the contract (genesis allocation)
    pub fn fund(&mut self, account: &Address, amount: Wei) -> StarNotaryResult<()> {
        self.ledger.credit(account, amount)
    }

    /// Pre-funded accounts, in derivation order
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Address of the deployed contract (holds escrow during calls)
    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    /// Native balance of `account`
    pub fn balance_of(&self, account: &Address) -> Wei {
        self.ledger.balance_of(account)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Current contract state
    pub fn contract(&self) -> &StarNotaryState {
        &self.state
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Run a read-only query against the contract
    pub fn call(&self, query: &StarQuery) -> StarNotaryResult<QueryResult> {
        self.state.query(query)
    }

    /// Submit a state-changing call from `from` carrying `value` wei
    ///
    /// Returns the receipt on success and the revert reason on failure. A
    /// reverted call still consumes a nonce and leaves a receipt.
    pub fn send(
        &mut self,
        from: &Address,
        value: Wei,
        action: StarAction,
    ) -> StarNotaryResult<Receipt> {
        let nonce = self.nonce;
        let tx_hash = transaction_hash(from, nonce, value, &action)?;
        self.nonce += 1;
        let block_height = self.block_height + 1;

        let state_snapshot = self.state.clone();
        let ledger_snapshot = self.ledger.clone();

        let result = self.apply(from, value, &action, block_height);

        let (status, events) = match &result {
            Ok(events) => {
                self.block_height = block_height;
                (TxStatus::Success, events.clone())
            }
            Err(err) => {
                self.state = state_snapshot;
                self.ledger = ledger_snapshot;
                (TxStatus::Reverted(err.clone()), Vec::new())
            }
        };

        let receipt = Receipt {
            tx_hash,
            from: *from,
            nonce,
            block_height: if result.is_ok() { block_height } else { self.block_height },
            method: action.method_name(),
            value,
            status,
            events,
        };
        self.receipts.push(receipt.clone());

        result.map(|_| receipt)
    }

    fn apply(
        &mut self,
        from: &Address,
        value: Wei,
        action: &StarAction,
        block_height: u64,
    ) -> StarNotaryResult<Vec<StarEvent>> {
        // Escrow the call value
        self.ledger.transfer(from, &self.contract, value)?;

        let mut ctx = CallContext::new(*from, value, block_height);
        execute(&mut self.state, &mut ctx, action)?;

        for payout in &ctx.payouts {
            self.ledger.transfer(&self.contract, &payout.to, payout.amount)?;
        }

        // Escrow must be fully settled by the end of the call
        let paid = ctx.total_payout();
        if paid != value {
            return Err(StarNotaryError::ConservationViolated {
                received: value,
                paid,
            });
        }

        Ok(ctx.events.into_events())
    }
}

// ============ Helper Functions ============

/// Derive the development account at `index`
pub fn derive_account(index: u32) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(chain::ACCOUNT_SEED_DOMAIN);
    hasher.update(index.to_le_bytes());
    finish(hasher)
}

/// Derive a contract address from the deployment nonce
pub fn derive_contract_address(deploy_nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(chain::CONTRACT_SEED_DOMAIN);
    hasher.update(deploy_nonce.to_le_bytes());
    finish(hasher)
}

/// Deterministic transaction hash
pub fn transaction_hash(
    from: &Address,
    nonce: u64,
    value: Wei,
    action: &StarAction,
) -> StarNotaryResult<TxHash> {
    let payload = borsh::to_vec(action).map_err(|_| StarNotaryError::InvalidCallData)?;

    let mut hasher = Sha256::new();
    hasher.update(from);
    hasher.update(nonce.to_le_bytes());
    hasher.update(value.to_le_bytes());
    hasher.update(payload);
    Ok(finish(hasher))
}

fn finish(hasher: Sha256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}
