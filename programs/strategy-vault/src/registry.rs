use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::strategy::Strategy;

/// Registered strategy handle together with the key it was registered under
struct RegisteredStrategy {
    key: Pubkey,
    handle: Box<dyn Strategy>,
}

/// Ordered set of strategies the vault may deploy value to
///
/// Architecture:
/// - `entries` holds handles in registry order; the waterfall walks it
/// - `index` maps key -> position for O(1) membership checks
/// - removal swaps the last entry into the hole, so registration order of
///   the survivors is NOT preserved
#[derive(Default)]
pub struct StrategyRegistry {
    entries: Vec<RegisteredStrategy>,
    index: HashMap<Pubkey, usize>,
    active: Option<Pubkey>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in current registry order
    pub fn keys(&self) -> impl Iterator<Item = &Pubkey> + '_ {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn active(&self) -> Option<Pubkey> {
        self.active
    }

    pub fn get(&self, key: &Pubkey) -> Option<&dyn Strategy> {
        let position = *self.index.get(key)?;
        Some(self.entries[position].handle.as_ref())
    }

    pub fn get_mut(&mut self, key: &Pubkey) -> Option<&mut (dyn Strategy + 'static)> {
        let position = *self.index.get(key)?;
        Some(self.entries[position].handle.as_mut())
    }

    pub fn at(&self, position: usize) -> Option<&dyn Strategy> {
        self.entries.get(position).map(|entry| entry.handle.as_ref())
    }

    /// Balance of every registered strategy, in registry order
    pub fn balances(&self) -> Result<Vec<u64>> {
        self.entries
            .iter()
            .map(|entry| entry.handle.balance())
            .collect()
    }

    /// Sum of every registered strategy's balance
    pub fn total_balance(&self) -> Result<u64> {
        self.entries.iter().try_fold(0u64, |total, entry| {
            let balance = entry.handle.balance()?;
            total
                .checked_add(balance)
                .ok_or_else(|| error!(VaultError::MathOverflow))
        })
    }

    /// Append a strategy, returning the key it is registered under
    pub fn insert(&mut self, handle: Box<dyn Strategy>) -> Result<Pubkey> {
        let key = handle.key();
        require!(key != Pubkey::default(), VaultError::ZeroAddress);
        require!(!self.contains(&key), VaultError::AlreadyRegistered);

        self.index.insert(key, self.entries.len());
        self.entries.push(RegisteredStrategy { key, handle });
        Ok(key)
    }

    /// Remove a strategy by swapping the last entry into its slot
    ///
    /// Clears the active pointer if it referenced `key`. Does not touch the
    /// strategy's balance; callers drain it first.
    pub fn remove(&mut self, key: &Pubkey) -> Result<Box<dyn Strategy>> {
        let position = self
            .index
            .remove(key)
            .ok_or(VaultError::NotRegistered)?;

        let removed = self.entries.swap_remove(position);
        if let Some(moved) = self.entries.get(position) {
            self.index.insert(moved.key, position);
        }
        if self.active == Some(*key) {
            self.active = None;
        }
        Ok(removed.handle)
    }

    /// Point new deposits at `key`, or stop auto-deployment with `None`
    ///
    /// Returns the previous active strategy.
    pub fn set_active(&mut self, key: Option<Pubkey>) -> Result<Option<Pubkey>> {
        if let Some(key) = key {
            require!(self.contains(&key), VaultError::NotRegistered);
        }
        Ok(std::mem::replace(&mut self.active, key))
    }
}
