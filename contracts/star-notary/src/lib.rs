//! Star Notary Contract
//!
//! Registry, marketplace, and exchange for uniquely identified "star"
//! tokens. Any account may mint a star under an unused id; the owner can
//! list it for sale, give it away, or approve another account to swap it
//! for one of theirs.
//!
//! Contract logic is pure: [`execute`] mutates [`StarNotaryState`] and
//! records the value the contract owes in [`CallContext::payouts`]. Moving
//! native value and rolling back failed calls is the job of the hosting
//! chain (see [`chain::DevChain`]).

use std::collections::BTreeMap;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub mod app;
pub mod chain;
pub mod dispatch;


use star_notary_common::{
    constants::{address, token},
    errors::{StarNotaryError, StarNotaryResult},
    events::{EventLog, StarEvent},
    math::checked_sub,
    types::{Address, Payout, QueryResult, Star, StarAction, StarId, StarQuery, Wei},
};

// ============ Contract State ============

/// Star Notary contract storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct StarNotaryState {
    /// Collection name, fixed at deployment
    pub name: String,
    /// Collection symbol, fixed at deployment
    pub symbol: String,
    /// Minted stars by id
    pub stars: BTreeMap<StarId, Star>,
    /// Number of stars held per account
    pub holdings: BTreeMap<Address, u64>,
    /// Sale prices of listed stars (absent means not for sale)
    pub listings: BTreeMap<StarId, Wei>,
    /// Approved account per star
    pub approvals: BTreeMap<StarId, Address>,
    /// Total stars ever minted
    pub total_minted: u64,
}

impl StarNotaryState {
    /// Deploy a fresh collection
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            stars: BTreeMap::new(),
            holdings: BTreeMap::new(),
            listings: BTreeMap::new(),
            approvals: BTreeMap::new(),
            total_minted: 0,
        }
    }

    // ============ Views ============

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Name registered for `star_id`
    pub fn get_registry_entry(&self, star_id: StarId) -> StarNotaryResult<&str> {
        Ok(&self.star(star_id)?.name)
    }

    /// Current owner of `star_id`
    pub fn owner_of(&self, star_id: StarId) -> StarNotaryResult<Address> {
        Ok(self.star(star_id)?.owner)
    }

    /// Number of stars held by `owner`
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.holdings.get(owner).copied().unwrap_or(0)
    }

    /// Listed price of `star_id`, zero when not for sale
    pub fn listings(&self, star_id: StarId) -> Wei {
        self.listings.get(&star_id).copied().unwrap_or(0)
    }

    /// Account approved for `star_id`, if any
    pub fn get_approved(&self, star_id: StarId) -> StarNotaryResult<Option<Address>> {
        self.star(star_id)?;
        Ok(self.approvals.get(&star_id).copied())
    }

    /// Answer a read-only query
    pub fn query(&self, query: &StarQuery) -> StarNotaryResult<QueryResult> {
        Ok(match query {
            StarQuery::Name => QueryResult::Text(self.name.clone()),
            StarQuery::Symbol => QueryResult::Text(self.symbol.clone()),
            StarQuery::GetRegistryEntry { star_id } => {
                QueryResult::Text(self.get_registry_entry(*star_id)?.to_string())
            }
            StarQuery::OwnerOf { star_id } => QueryResult::Account(self.owner_of(*star_id)?),
            StarQuery::BalanceOf { owner } => QueryResult::Count(self.balance_of(owner)),
            StarQuery::Listings { star_id } => QueryResult::Price(self.listings(*star_id)),
            StarQuery::GetApproved { star_id } => {
                QueryResult::Approved(self.get_approved(*star_id)?)
            }
        })
    }

    // ============ Internal Helpers ============

    fn star(&self, star_id: StarId) -> StarNotaryResult<&Star> {
        self.stars
            .get(&star_id)
            .ok_or(StarNotaryError::StarNotFound { star_id })
    }

    fn require_owner(&self, star_id: StarId, caller: &Address) -> StarNotaryResult<&Star> {
        let star = self.star(star_id)?;
        if !star.is_owned_by(caller) {
            return Err(StarNotaryError::NotOwner {
                star_id,
                caller: *caller,
            });
        }
        Ok(star)
    }

    fn is_approved(&self, star_id: StarId, account: &Address) -> bool {
        self.approvals.get(&star_id) == Some(account)
    }

    /// Reassign ownership. Clears the approval and any listing, since both
    /// were granted by the previous owner.
    fn move_star(
        &mut self,
        star_id: StarId,
        to: Address,
        events: &mut EventLog,
        block_height: u64,
    ) -> StarNotaryResult<()> {
        let star = self
            .stars
            .get_mut(&star_id)
            .ok_or(StarNotaryError::StarNotFound { star_id })?;
        let from = star.owner;
        star.owner = to;

        match self.balance_of(&from) {
            0 => return Err(StarNotaryError::Underflow),
            1 => {
                self.holdings.remove(&from);
            }
            held => {
                self.holdings.insert(from, held - 1);
            }
        }
        *self.holdings.entry(to).or_insert(0) += 1;

        self.approvals.remove(&star_id);
        self.listings.remove(&star_id);

        events.emit(StarEvent::Transfer {
            star_id,
            from: Some(from),
            to,
            block_height,
        });
        Ok(())
    }
}

impl Default for StarNotaryState {
    fn default() -> Self {
        Self::new(token::DEFAULT_NAME, token::DEFAULT_SYMBOL)
    }
}

// ============ Call Context ============

/// Environment of a single contract call
pub struct CallContext {
    /// Account that signed the call
    pub sender: Address,
    /// Value sent with the call, already held by the contract
    pub value: Wei,
    /// Block the call executes in
    pub block_height: u64,
    /// Value the contract must pay out if the call succeeds
    pub payouts: Vec<Payout>,
    /// Event log for emitting events
    pub events: EventLog,
}

impl CallContext {
    pub fn new(sender: Address, value: Wei, block_height: u64) -> Self {
        Self {
            sender,
            value,
            block_height,
            payouts: Vec::new(),
            events: EventLog::new(),
        }
    }

    fn pay(&mut self, to: Address, amount: Wei) {
        if amount > 0 {
            self.payouts.push(Payout { to, amount });
        }
    }

    /// Sum of all pending payouts
    pub fn total_payout(&self) -> Wei {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}

// ============ Execution ============

/// Main entry point for state-changing calls
///
/// On error the state may be partially modified; callers must discard it.
pub fn execute(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    action: &StarAction,
) -> StarNotaryResult<()> {
    if ctx.value > 0 && !action.is_payable() {
        return Err(StarNotaryError::NonPayable {
            method: action.method_name(),
            value: ctx.value,
        });
    }

    match action {
        StarAction::CreateStar { name, star_id } => create_star(state, ctx, name, *star_id),
        StarAction::PutStarUpForSale { star_id, price } => {
            put_star_up_for_sale(state, ctx, *star_id, *price)
        }
        StarAction::RemoveStarFromSale { star_id } => remove_star_from_sale(state, ctx, *star_id),
        StarAction::BuyStar { star_id } => buy_star(state, ctx, *star_id),
        StarAction::Approve { spender, star_id } => approve(state, ctx, spender, *star_id),
        StarAction::ExchangeStars { star_a, star_b } => {
            exchange_stars(state, ctx, *star_a, *star_b)
        }
        StarAction::TransferStar { to, star_id } => transfer_star(state, ctx, to, *star_id),
    }
}

/// Mint a star owned by the caller
fn create_star(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    name: &str,
    star_id: StarId,
) -> StarNotaryResult<()> {
    if name.is_empty() {
        return Err(StarNotaryError::EmptyName);
    }
    if state.stars.contains_key(&star_id) {
        return Err(StarNotaryError::StarAlreadyExists { star_id });
    }

    let total_minted = state
        .total_minted
        .checked_add(1)
        .ok_or(StarNotaryError::Overflow)?;

    state.stars.insert(
        star_id,
        Star::new(star_id, name.to_string(), ctx.sender, ctx.block_height),
    );
    *state.holdings.entry(ctx.sender).or_insert(0) += 1;
    state.total_minted = total_minted;

    ctx.events.emit(StarEvent::Transfer {
        star_id,
        from: None,
        to: ctx.sender,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// List an owned star at `price`
fn put_star_up_for_sale(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    star_id: StarId,
    price: Wei,
) -> StarNotaryResult<()> {
    state.require_owner(star_id, &ctx.sender)?;
    // Zero is reserved for "not listed"
    if price == 0 {
        return Err(StarNotaryError::ZeroPrice);
    }

    state.listings.insert(star_id, price);

    ctx.events.emit(StarEvent::StarListed {
        star_id,
        owner: ctx.sender,
        price,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// Withdraw a listing
fn remove_star_from_sale(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    star_id: StarId,
) -> StarNotaryResult<()> {
    state.require_owner(star_id, &ctx.sender)?;
    if state.listings.remove(&star_id).is_none() {
        return Err(StarNotaryError::NotForSale { star_id });
    }

    ctx.events.emit(StarEvent::StarUnlisted {
        star_id,
        owner: ctx.sender,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// Take a listing: pay the seller the price, refund the rest to the buyer
fn buy_star(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    star_id: StarId,
) -> StarNotaryResult<()> {
    let price = state.listings(star_id);
    if price == 0 {
        return Err(StarNotaryError::NotForSale { star_id });
    }
    if ctx.value < price {
        return Err(StarNotaryError::InsufficientPayment {
            sent: ctx.value,
            price,
        });
    }

    let seller = state.owner_of(star_id)?;
    let buyer = ctx.sender;
    let refund = checked_sub(ctx.value, price)?;

    // Clears the listing
    state.move_star(star_id, buyer, &mut ctx.events, ctx.block_height)?;

    ctx.pay(seller, price);
    ctx.pay(buyer, refund);

    ctx.events.emit(StarEvent::StarSold {
        star_id,
        seller,
        buyer,
        price,
        refund,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// Approve `spender` for an owned star
fn approve(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    spender: &Address,
    star_id: StarId,
) -> StarNotaryResult<()> {
    state.require_owner(star_id, &ctx.sender)?;
    if *spender == ctx.sender {
        return Err(StarNotaryError::ApprovalToOwner { star_id });
    }
    if *spender == address::ZERO {
        return Err(StarNotaryError::InvalidAddress {
            reason: "cannot approve the zero address",
        });
    }

    state.approvals.insert(star_id, *spender);

    ctx.events.emit(StarEvent::Approval {
        star_id,
        owner: ctx.sender,
        approved: *spender,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// Swap the owners of two stars
///
/// The caller must own one of them. The other must either also belong to
/// the caller, which leaves ownership unchanged, or carry an approval for
/// the caller from its owner. Argument order does not matter.
fn exchange_stars(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    star_a: StarId,
    star_b: StarId,
) -> StarNotaryResult<()> {
    let caller = ctx.sender;
    let owner_a = state.owner_of(star_a)?;
    let owner_b = state.owner_of(star_b)?;

    let (mine, theirs, counterparty) = match (owner_a == caller, owner_b == caller) {
        (true, true) => return Ok(()),
        (true, false) => (star_a, star_b, owner_b),
        (false, true) => (star_b, star_a, owner_a),
        (false, false) => {
            return Err(StarNotaryError::NotOwner {
                star_id: star_a,
                caller,
            })
        }
    };

    if !state.is_approved(theirs, &caller) {
        return Err(StarNotaryError::NotApproved {
            star_id: theirs,
            caller,
        });
    }

    state.move_star(mine, counterparty, &mut ctx.events, ctx.block_height)?;
    state.move_star(theirs, caller, &mut ctx.events, ctx.block_height)?;

    ctx.events.emit(StarEvent::StarsExchanged {
        star_a,
        star_b,
        initiator: caller,
        counterparty,
        block_height: ctx.block_height,
    });
    Ok(())
}

/// Give an owned star to `to`
fn transfer_star(
    state: &mut StarNotaryState,
    ctx: &mut CallContext,
    to: &Address,
    star_id: StarId,
) -> StarNotaryResult<()> {
    state.require_owner(star_id, &ctx.sender)?;
    if *to == address::ZERO {
        return Err(StarNotaryError::InvalidAddress {
            reason: "cannot transfer a star to the zero address",
        });
    }

    state.move_star(star_id, *to, &mut ctx.events, ctx.block_height)
}

// ============ Helper Functions ============

/// Get the default collection name
pub fn default_name() -> &'static str {
    token::DEFAULT_NAME
}

/// Get the default collection symbol
pub fn default_symbol() -> &'static str {
    token::DEFAULT_SYMBOL
}

// ============ Tests ============
