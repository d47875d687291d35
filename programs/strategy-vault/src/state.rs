use anchor_lang::prelude::*;

use crate::waterfall::DrainOrder;

/// Global vault accounting state
///
/// Security considerations:
/// - Total assets are deliberately absent: they are recomputed from live
///   strategy balances on every operation so accrued yield or loss is
///   always priced in
/// - `total_shares` mirrors the share ledger after every mint and burn
/// - 64 bytes padding for future upgrades
#[account]
pub struct VaultState {
    /// Vault identity; strategies only accept calls from this key
    pub vault: Pubkey,              // 32 bytes

    /// Native value held directly, not delegated to any strategy
    pub idle_balance: u64,          // 8 bytes

    /// Shares issued to depositors, as last reported by the ledger
    pub total_shares: u64,          // 8 bytes

    /// Order in which the withdrawal waterfall drains strategies
    pub drain_order: DrainOrder,    // 1 byte

    /// Bump seed for the vault identity PDA
    pub bump: u8,                   // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 64],        // 64 bytes
}

impl VaultState {
    pub fn new(vault: Pubkey, bump: u8, drain_order: DrainOrder) -> Self {
        Self {
            vault,
            idle_balance: 0,
            total_shares: 0,
            drain_order,
            bump,
            _reserved: [0; 64],
        }
    }

    /// Add inbound value to the idle balance
    pub fn credit_idle(&mut self, amount: u64) -> Result<()> {
        self.idle_balance = self
            .idle_balance
            .checked_add(amount)
            .ok_or(crate::errors::VaultError::MathOverflow)?;
        Ok(())
    }

    /// Remove outbound value from the idle balance
    pub fn debit_idle(&mut self, amount: u64) -> Result<()> {
        self.idle_balance = self
            .idle_balance
            .checked_sub(amount)
            .ok_or(crate::errors::VaultError::InsufficientLiquidity)?;
        Ok(())
    }
}
