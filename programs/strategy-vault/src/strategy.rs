use std::cell::RefCell;
use std::rc::Rc;

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// A yield-bearing custodian of vault value
///
/// The vault never touches strategy-held value directly. It observes it via
/// [`Strategy::balance`] and moves it only through deposit/withdraw.
///
/// Implementations must:
/// - reject `deposit`/`withdraw` when `caller` is not the owning vault
/// - deliver exactly `amount` back to the vault on `withdraw`
/// - report accrued yield and realized losses in `balance`
pub trait Strategy {
    /// Registry identity of this strategy
    fn key(&self) -> Pubkey;

    /// Take custody of `amount` from the vault
    fn deposit(&mut self, caller: &Pubkey, amount: u64) -> Result<()>;

    /// Return `amount` to the vault
    fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<()>;

    /// Value currently custodied, including accrued yield
    fn balance(&self) -> Result<u64>;
}

/// Strategy that simply holds value for its vault
///
/// Custody is shared between clones, so a host (or a keeper) holding a clone
/// can book externally earned yield or losses while the vault holds the
/// registered handle.
#[derive(Clone, Debug)]
pub struct HoldingStrategy {
    key: Pubkey,
    vault: Pubkey,
    custody: Rc<RefCell<u64>>,
}

impl HoldingStrategy {
    pub fn new(key: Pubkey, vault: Pubkey) -> Self {
        Self {
            key,
            vault,
            custody: Rc::new(RefCell::new(0)),
        }
    }

    /// Book yield earned outside the vault
    pub fn accrue(&self, amount: u64) -> Result<()> {
        let mut custody = self.custody.borrow_mut();
        *custody = custody
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        Ok(())
    }

    /// Book a loss; saturates at zero
    pub fn realize_loss(&self, amount: u64) {
        let mut custody = self.custody.borrow_mut();
        *custody = custody.saturating_sub(amount);
    }

    pub fn custody(&self) -> u64 {
        *self.custody.borrow()
    }
}

impl Strategy for HoldingStrategy {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn deposit(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*caller, self.vault, VaultError::UnauthorizedStrategyCaller);
        self.accrue(amount)
    }

    fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*caller, self.vault, VaultError::UnauthorizedStrategyCaller);

        let mut custody = self.custody.borrow_mut();
        *custody = custody
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientStrategyBalance)?;
        Ok(())
    }

    fn balance(&self) -> Result<u64> {
        Ok(self.custody())
    }
}
