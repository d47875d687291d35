use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Rounding direction for [`mul_div`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Truncate toward zero (floor)
    Down,
    /// Round any remainder up (ceil)
    Up,
}

/// Compute `a * b / denominator` with an explicit rounding direction
///
/// The product is taken in u128, so `a * b` never overflows for u64 operands.
/// Only the final quotient has to fit back into u64.
///
/// Security: every share/asset conversion goes through here, so the rounding
/// direction chosen by the caller decides who keeps the remainder.
pub fn mul_div(a: u64, b: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    require!(denominator != 0, VaultError::DivisionByZero);

    // (2^64 - 1)^2 < 2^128
    let product = (a as u128) * (b as u128);
    let denominator = denominator as u128;

    let mut quotient = product / denominator;
    if rounding == Rounding::Up && product % denominator != 0 {
        quotient += 1;
    }

    u64::try_from(quotient).map_err(|_| error!(VaultError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division_ignores_rounding() {
        assert_eq!(mul_div(500, 1000, 2000, Rounding::Down).unwrap(), 250);
        assert_eq!(mul_div(500, 1000, 2000, Rounding::Up).unwrap(), 250);
    }

    #[test]
    fn test_remainder_rounds_by_direction() {
        // 100 * 333 / 1000 = 33.3
        assert_eq!(mul_div(100, 333, 1000, Rounding::Down).unwrap(), 33);
        assert_eq!(mul_div(100, 333, 1000, Rounding::Up).unwrap(), 34);
    }

    #[test]
    fn test_wide_intermediate_does_not_overflow() {
        // u64::MAX * u64::MAX overflows u64 but the quotient fits
        assert_eq!(
            mul_div(u64::MAX, u64::MAX, u64::MAX, Rounding::Down).unwrap(),
            u64::MAX
        );
        assert_eq!(mul_div(u64::MAX, 3, 4, Rounding::Up).unwrap(), u64::MAX - u64::MAX / 4);
    }

    #[test]
    fn test_zero_denominator() {
        assert!(mul_div(1, 1, 0, Rounding::Down).is_err());
    }

    #[test]
    fn test_quotient_overflow() {
        assert!(mul_div(u64::MAX, 2, 1, Rounding::Down).is_err());
    }

    #[test]
    fn test_zero_numerator_rounds_to_zero() {
        assert_eq!(mul_div(0, 7, 3, Rounding::Up).unwrap(), 0);
    }
}
