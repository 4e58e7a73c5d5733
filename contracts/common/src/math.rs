//! Value Utilities for Star Notary
//!
//! Checked wei arithmetic and conversion of decimal unit strings
//! ("0.01" ether) into wei.

use crate::constants::units;
use crate::errors::{StarNotaryError, StarNotaryResult};
use crate::types::Wei;

/// Denomination of a decimal value string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Wei,
    Gwei,
    Ether,
}

impl Unit {
    /// Number of decimal places between this unit and wei
    pub fn decimals(self) -> u32 {
        match self {
            Unit::Wei => 0,
            Unit::Gwei => units::GWEI_DECIMALS,
            Unit::Ether => units::ETHER_DECIMALS,
        }
    }

    /// Wei in one whole unit
    pub fn scale(self) -> Wei {
        match self {
            Unit::Wei => units::WEI,
            Unit::Gwei => units::GWEI,
            Unit::Ether => units::ETHER,
        }
    }
}

/// Convert a decimal string in `unit` to wei
///
/// Accepts forms such as `"1"`, `"0.01"`, `".05"`, and `"2."`. Fractions
/// finer than one wei are rejected rather than truncated.
pub fn to_wei(amount: &str, unit: Unit) -> StarNotaryResult<Wei> {
    let amount = amount.trim();
    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(StarNotaryError::InvalidInput {
            param: "amount",
            reason: "empty value",
        });
    }
    if fraction.len() > unit.decimals() as usize {
        return Err(StarNotaryError::InvalidInput {
            param: "amount",
            reason: "more decimal places than the unit allows",
        });
    }

    let whole_wei = parse_digits(whole)?
        .checked_mul(unit.scale())
        .ok_or(StarNotaryError::Overflow)?;

    // Right-pad the fraction to the unit's precision: "01" ether -> 10^16
    let padding = unit.decimals() - fraction.len() as u32;
    let fraction_wei = parse_digits(fraction)?
        .checked_mul(10u128.pow(padding))
        .ok_or(StarNotaryError::Overflow)?;

    checked_add(whole_wei, fraction_wei)
}

fn parse_digits(digits: &str) -> StarNotaryResult<Wei> {
    digits.bytes().try_fold(0u128, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(StarNotaryError::InvalidInput {
                param: "amount",
                reason: "not a decimal number",
            });
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as u128))
            .ok_or(StarNotaryError::Overflow)
    })
}

/// Split wei into whole units and remainder for display
pub fn from_wei(amount: Wei, unit: Unit) -> (Wei, Wei) {
    let scale = unit.scale();
    (amount / scale, amount % scale)
}

/// Checked wei addition
pub fn checked_add(a: Wei, b: Wei) -> StarNotaryResult<Wei> {
    a.checked_add(b).ok_or(StarNotaryError::Overflow)
}

/// Checked wei subtraction
pub fn checked_sub(a: Wei, b: Wei) -> StarNotaryResult<Wei> {
    a.checked_sub(b).ok_or(StarNotaryError::Underflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wei_ether_fractions() {
        assert_eq!(to_wei("0.01", Unit::Ether).unwrap(), 10_000_000_000_000_000);
        assert_eq!(to_wei("0.05", Unit::Ether).unwrap(), 50_000_000_000_000_000);
        assert_eq!(to_wei(".05", Unit::Ether).unwrap(), 50_000_000_000_000_000);
        assert_eq!(to_wei("0.005", Unit::Ether).unwrap(), 5_000_000_000_000_000);
        assert_eq!(to_wei("2.", Unit::Ether).unwrap(), 2 * units::ETHER);
    }

    #[test]
    fn test_to_wei_other_units() {
        assert_eq!(to_wei("3", Unit::Gwei).unwrap(), 3_000_000_000);
        assert_eq!(to_wei("42", Unit::Wei).unwrap(), 42);
    }

    #[test]
    fn test_to_wei_rejects_bad_input() {
        assert!(matches!(
            to_wei("1.5", Unit::Wei),
            Err(StarNotaryError::InvalidInput { .. })
        ));
        assert!(matches!(
            to_wei("abc", Unit::Ether),
            Err(StarNotaryError::InvalidInput { .. })
        ));
        assert!(matches!(
            to_wei(".", Unit::Ether),
            Err(StarNotaryError::InvalidInput { .. })
        ));
        assert!(matches!(
            to_wei("-1", Unit::Ether),
            Err(StarNotaryError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_to_wei_overflow() {
        let huge = "999999999999999999999999999999";
        assert_eq!(to_wei(huge, Unit::Ether), Err(StarNotaryError::Overflow));
    }

    #[test]
    fn test_from_wei() {
        let (whole, rest) = from_wei(to_wei("1.25", Unit::Ether).unwrap(), Unit::Ether);
        assert_eq!(whole, 1);
        assert_eq!(rest, 250_000_000_000_000_000);
    }

    #[test]
    fn test_checked_ops() {
        assert_eq!(checked_add(Wei::MAX, 1), Err(StarNotaryError::Overflow));
        assert_eq!(checked_sub(0, 1), Err(StarNotaryError::Underflow));
        assert_eq!(checked_sub(5, 3), Ok(2));
    }
}
