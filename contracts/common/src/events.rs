//! Contract Events for Star Notary
//!
//! Events are emitted during contract execution and recorded in the
//! transaction receipt, where they can be indexed off-chain.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::{Address, StarId, Wei};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Token Events (0x01 - 0x1F)
    Transfer = 0x01,
    Approval = 0x02,

    // Marketplace Events (0x20 - 0x3F)
    StarListed = 0x20,
    StarUnlisted = 0x21,
    StarSold = 0x22,

    // Exchange Events (0x40 - 0x5F)
    StarsExchanged = 0x40,
}

/// Main event enum containing all possible contract events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StarEvent {
    // ============ Token Events ============

    /// Ownership change. `from == None` signals a mint.
    Transfer {
        star_id: StarId,
        from: Option<Address>,
        to: Address,
        block_height: u64,
    },

    /// Approval granted on a star
    Approval {
        star_id: StarId,
        owner: Address,
        approved: Address,
        block_height: u64,
    },

    // ============ Marketplace Events ============

    /// Star put up for sale
    StarListed {
        star_id: StarId,
        owner: Address,
        price: Wei,
        block_height: u64,
    },

    /// Listing withdrawn by the owner
    StarUnlisted {
        star_id: StarId,
        owner: Address,
        block_height: u64,
    },

    /// Listing taken by a buyer
    StarSold {
        star_id: StarId,
        seller: Address,
        buyer: Address,
        price: Wei,
        refund: Wei,
        block_height: u64,
    },

    // ============ Exchange Events ============

    /// Owners of two stars swapped
    StarsExchanged {
        star_a: StarId,
        star_b: StarId,
        initiator: Address,
        counterparty: Address,
        block_height: u64,
    },
}

impl StarEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Transfer { .. } => EventType::Transfer,
            Self::Approval { .. } => EventType::Approval,
            Self::StarListed { .. } => EventType::StarListed,
            Self::StarUnlisted { .. } => EventType::StarUnlisted,
            Self::StarSold { .. } => EventType::StarSold,
            Self::StarsExchanged { .. } => EventType::StarsExchanged,
        }
    }

    /// Get the block height when event occurred
    pub fn block_height(&self) -> u64 {
        match self {
            Self::Transfer { block_height, .. }
            | Self::Approval { block_height, .. }
            | Self::StarListed { block_height, .. }
            | Self::StarUnlisted { block_height, .. }
            | Self::StarSold { block_height, .. }
            | Self::StarsExchanged { block_height, .. } => *block_height,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<StarEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: StarEvent) {
        self.events.push(event);
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<StarEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&StarEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = StarEvent::StarListed {
            star_id: 15,
            owner: [2u8; 32],
            price: 10_000_000_000_000_000,
            block_height: 100,
        };

        assert_eq!(event.event_type(), EventType::StarListed);
        assert_eq!(event.block_height(), 100);
    }

    #[test]
    fn test_event_serialization() {
        let event = StarEvent::Transfer {
            star_id: 1,
            from: None,
            to: [2u8; 32],
            block_height: 200,
        };

        let bytes = event.to_bytes();
        let restored = StarEvent::from_bytes(&bytes).unwrap();

        assert_eq!(event, restored);
    }

    #[test]
    fn test_event_log() {
        let mut log = EventLog::new();

        log.emit(StarEvent::Transfer {
            star_id: 2,
            from: None,
            to: [2u8; 32],
            block_height: 100,
        });

        log.emit(StarEvent::StarSold {
            star_id: 2,
            seller: [2u8; 32],
            buyer: [3u8; 32],
            price: 10,
            refund: 40,
            block_height: 101,
        });

        assert_eq!(log.len(), 2);
        assert!(log.has_events());

        let sales = log.filter_by_type(EventType::StarSold);
        assert_eq!(sales.len(), 1);
    }
}
