//! Call Dispatch for the Star Notary contract
//!
//! Translates encoded method calls into [`StarAction`]s. A call is a
//! [`StarCall`] carrying an op code plus the arguments that method needs,
//! serialized as CBOR.
//!
//! ## Operations
//!
//! - **CreateStar (0x01)**: `name`, `star_id`
//! - **PutStarUpForSale (0x02)**: `star_id`, `price`
//! - **RemoveStarFromSale (0x03)**: `star_id`
//! - **BuyStar (0x04)**: `star_id` (payable)
//! - **Approve (0x05)**: `to` (spender), `star_id`
//! - **ExchangeStars (0x06)**: `star_id`, `other_star_id`
//! - **TransferStar (0x07)**: `to`, `star_id`

use serde::{Deserialize, Serialize};

use star_notary_common::{
    errors::{StarNotaryError, StarNotaryResult},
    types::{Address, StarAction, StarId, Wei},
};

use crate::chain::{DevChain, Receipt};

/// Operation codes carried in call data
pub const OP_CREATE_STAR: u8 = 0x01;
pub const OP_PUT_STAR_UP_FOR_SALE: u8 = 0x02;
pub const OP_REMOVE_STAR_FROM_SALE: u8 = 0x03;
pub const OP_BUY_STAR: u8 = 0x04;
pub const OP_APPROVE: u8 = 0x05;
pub const OP_EXCHANGE_STARS: u8 = 0x06;
pub const OP_TRANSFER_STAR: u8 = 0x07;

/// Encoded method call (serialized via serde)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCall {
    pub op: u8,
    #[serde(default)]
    pub star_id: Option<StarId>,
    #[serde(default)]
    pub other_star_id: Option<StarId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Wei>,
    #[serde(default)]
    pub to: Option<Address>,
}

impl StarCall {
    /// Resolve the call into a contract action, if its fields fit the op
    pub fn to_action(&self) -> Option<StarAction> {
        match self.op {
            OP_CREATE_STAR => Some(StarAction::CreateStar {
                name: self.name.clone()?,
                star_id: self.star_id?,
            }),
            OP_PUT_STAR_UP_FOR_SALE => Some(StarAction::PutStarUpForSale {
                star_id: self.star_id?,
                price: self.price?,
            }),
            OP_REMOVE_STAR_FROM_SALE => Some(StarAction::RemoveStarFromSale {
                star_id: self.star_id?,
            }),
            OP_BUY_STAR => Some(StarAction::BuyStar {
                star_id: self.star_id?,
            }),
            OP_APPROVE => Some(StarAction::Approve {
                spender: self.to?,
                star_id: self.star_id?,
            }),
            OP_EXCHANGE_STARS => Some(StarAction::ExchangeStars {
                star_a: self.star_id?,
                star_b: self.other_star_id?,
            }),
            OP_TRANSFER_STAR => Some(StarAction::TransferStar {
                to: self.to?,
                star_id: self.star_id?,
            }),
            _ => None,
        }
    }
}

impl From<&StarAction> for StarCall {
    fn from(action: &StarAction) -> Self {
        match action {
            StarAction::CreateStar { name, star_id } => StarCall {
                op: OP_CREATE_STAR,
                star_id: Some(*star_id),
                name: Some(name.clone()),
                ..Default::default()
            },
            StarAction::PutStarUpForSale { star_id, price } => StarCall {
                op: OP_PUT_STAR_UP_FOR_SALE,
                star_id: Some(*star_id),
                price: Some(*price),
                ..Default::default()
            },
            StarAction::RemoveStarFromSale { star_id } => StarCall {
                op: OP_REMOVE_STAR_FROM_SALE,
                star_id: Some(*star_id),
                ..Default::default()
            },
            StarAction::BuyStar { star_id } => StarCall {
                op: OP_BUY_STAR,
                star_id: Some(*star_id),
                ..Default::default()
            },
            StarAction::Approve { spender, star_id } => StarCall {
                op: OP_APPROVE,
                star_id: Some(*star_id),
                to: Some(*spender),
                ..Default::default()
            },
            StarAction::ExchangeStars { star_a, star_b } => StarCall {
                op: OP_EXCHANGE_STARS,
                star_id: Some(*star_a),
                other_star_id: Some(*star_b),
                ..Default::default()
            },
            StarAction::TransferStar { to, star_id } => StarCall {
                op: OP_TRANSFER_STAR,
                star_id: Some(*star_id),
                to: Some(*to),
                ..Default::default()
            },
        }
    }
}

/// Op code for a client-facing method name
pub fn op_for_method(method: &str) -> Option<u8> {
    match method {
        "createStar" => Some(OP_CREATE_STAR),
        "putStarUpForSale" => Some(OP_PUT_STAR_UP_FOR_SALE),
        "removeStarFromSale" => Some(OP_REMOVE_STAR_FROM_SALE),
        "buyStar" => Some(OP_BUY_STAR),
        "approve" => Some(OP_APPROVE),
        "exchangeStars" => Some(OP_EXCHANGE_STARS),
        "transferStar" => Some(OP_TRANSFER_STAR),
        _ => None,
    }
}

/// Encode an action as CBOR call data
pub fn encode_call(action: &StarAction) -> StarNotaryResult<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::into_writer(&StarCall::from(action), &mut bytes)
        .map_err(|_| StarNotaryError::InvalidCallData)?;
    Ok(bytes)
}

/// Decode CBOR call data into an action
pub fn decode_call(bytes: &[u8]) -> StarNotaryResult<StarAction> {
    if bytes.is_empty() {
        return Err(StarNotaryError::InvalidCallData);
    }
    let call: StarCall =
        ciborium::from_reader(bytes).map_err(|_| StarNotaryError::InvalidCallData)?;
    call.to_action().ok_or(StarNotaryError::InvalidCallData)
}

/// Decode call data and submit it to the chain
pub fn send_encoded(
    chain: &mut DevChain,
    from: &Address,
    value: Wei,
    call_data: &[u8],
) -> StarNotaryResult<Receipt> {
    let action = decode_call(call_data)?;
    chain.send(from, value, action)
}
