use anchor_lang::prelude::*;

use crate::math::{mul_div, Rounding};

/// Snapshot of the two quantities that price a share
///
/// Built fresh for every operation from the idle balance, the live strategy
/// balances and the ledger's total supply. Never stored.
///
/// ERC-4626 rounding policy:
/// - deposit/redeem side rounds down (caller receives less)
/// - mint/withdraw side rounds up (caller pays more)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareAccounting {
    /// Idle balance plus every registered strategy's balance
    pub total_assets: u64,

    /// Shares issued by the ledger
    pub total_shares: u64,
}

impl ShareAccounting {
    pub fn new(total_assets: u64, total_shares: u64) -> Self {
        Self {
            total_assets,
            total_shares,
        }
    }

    /// Shares worth `assets`, rounded down
    ///
    /// ERC-4626 formula:
    /// - If no shares exist: shares = assets
    /// - Otherwise: shares = assets * totalShares / totalAssets
    pub fn convert_to_shares(&self, assets: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(assets);
        }
        mul_div(assets, self.total_shares, self.total_assets, Rounding::Down)
    }

    /// Assets backing `shares`, rounded down
    ///
    /// ERC-4626 formula: assets = shares * totalAssets / totalShares
    pub fn convert_to_assets(&self, shares: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(shares);
        }
        mul_div(shares, self.total_assets, self.total_shares, Rounding::Down)
    }

    /// Shares minted for depositing `assets`
    pub fn preview_deposit(&self, assets: u64) -> Result<u64> {
        self.convert_to_shares(assets)
    }

    /// Assets a caller must supply to mint exactly `shares`
    pub fn preview_mint(&self, shares: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(shares);
        }
        mul_div(shares, self.total_assets, self.total_shares, Rounding::Up)
    }

    /// Shares burned to withdraw exactly `assets`
    pub fn preview_withdraw(&self, assets: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(assets);
        }
        mul_div(assets, self.total_shares, self.total_assets, Rounding::Up)
    }

    /// Assets paid out for redeeming `shares`
    pub fn preview_redeem(&self, shares: u64) -> Result<u64> {
        self.convert_to_assets(shares)
    }
}
