use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::UNLIMITED_ALLOWANCE;
use crate::errors::VaultError;

/// Share token bookkeeping the vault issues against
///
/// The vault is the only minter and burner. Transfers and approvals are
/// user-facing share-token operations and live on the implementation.
pub trait ShareLedger {
    fn total_supply(&self) -> u64;

    fn balance_of(&self, account: &Pubkey) -> u64;

    /// Shares `spender` may burn or move on behalf of `owner`
    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64;

    fn mint(&mut self, account: &Pubkey, amount: u64) -> Result<()>;

    fn burn(&mut self, account: &Pubkey, amount: u64) -> Result<()>;

    /// Spend `amount` of `spender`'s allowance on `owner`
    ///
    /// Must be a no-op when the allowance is [`UNLIMITED_ALLOWANCE`].
    fn decrease_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()>;

    /// Give back `amount` of allowance spent by an operation that failed
    ///
    /// Must be a no-op when the allowance is [`UNLIMITED_ALLOWANCE`].
    fn increase_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()>;
}

/// In-memory share ledger
#[derive(Clone, Debug, Default)]
pub struct ShareBook {
    total_supply: u64,
    balances: BTreeMap<Pubkey, u64>,
    allowances: BTreeMap<(Pubkey, Pubkey), u64>,
}

impl ShareBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `spender`'s allowance on `owner`, replacing any previous value
    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) {
        if amount == 0 {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Move `owner`'s shares as `spender`, spending allowance
    pub fn transfer_from(
        &mut self,
        spender: &Pubkey,
        owner: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        require!(
            self.balance_of(owner) >= amount,
            VaultError::InsufficientShares
        );
        self.decrease_allowance(owner, spender, amount)?;
        self.transfer(owner, to, amount)
    }

    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry(*account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    fn debit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        let remaining = self
            .balance_of(account)
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientShares)?;
        if remaining == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, remaining);
        }
        Ok(())
    }
}

impl ShareLedger for ShareBook {
    fn total_supply(&self) -> u64 {
        self.total_supply
    }

    fn balance_of(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn mint(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.credit(account, amount)?;
        self.total_supply = total_supply;
        Ok(())
    }

    fn burn(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        self.debit(account, amount)?;
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    fn decrease_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        let allowance = self.allowance(owner, spender);
        if allowance == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientAllowance)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    fn increase_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        let allowance = self.allowance(owner, spender);
        if allowance == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        let restored = allowance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.approve(owner, spender, restored);
        Ok(())
    }
}
