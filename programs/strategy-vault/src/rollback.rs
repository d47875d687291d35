use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::ledger::ShareLedger;
use crate::registry::StrategyRegistry;
use crate::state::VaultState;
use crate::transfer::ValueTransfer;
use crate::vault::Vault;

/// Effect applied by an in-flight operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Effect {
    /// Value moved from a strategy into idle
    Pulled { strategy: Pubkey, amount: u64 },
    /// Value moved from idle into a strategy
    Deployed { strategy: Pubkey, amount: u64 },
    IdleCredited(u64),
    IdleDebited(u64),
    Minted { account: Pubkey, shares: u64 },
    Burned { account: Pubkey, shares: u64 },
    AllowanceSpent { owner: Pubkey, spender: Pubkey, shares: u64 },
}

/// Undo log that makes a vault operation all-or-nothing
///
/// Handlers apply every effect through the log. When the operation fails,
/// [`Rollback::revert`] applies the inverse of each recorded effect, newest
/// first, leaving shares, allowances, idle balance and strategy balances as
/// they were before the call.
///
/// Idle balance moves in the same step as each successful strategy call, so
/// vault value stays conserved even if a compensating strategy call fails
/// during revert; the value then stays idle instead of returning to the
/// strategy.
#[derive(Debug, Default)]
pub struct Rollback {
    effects: Vec<Effect>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit_idle(&mut self, state: &mut VaultState, amount: u64) -> Result<()> {
        state.credit_idle(amount)?;
        self.effects.push(Effect::IdleCredited(amount));
        Ok(())
    }

    pub fn debit_idle(&mut self, state: &mut VaultState, amount: u64) -> Result<()> {
        state.debit_idle(amount)?;
        self.effects.push(Effect::IdleDebited(amount));
        Ok(())
    }

    /// Withdraw `amount` from `strategy` into idle
    pub fn pull(
        &mut self,
        registry: &mut StrategyRegistry,
        state: &mut VaultState,
        strategy: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        let idle_balance = state
            .idle_balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        registry
            .get_mut(strategy)
            .ok_or(VaultError::NotRegistered)?
            .withdraw(&state.vault, amount)?;

        state.idle_balance = idle_balance;
        self.effects.push(Effect::Pulled {
            strategy: *strategy,
            amount,
        });
        Ok(())
    }

    /// Deposit `amount` of idle value into `strategy`
    pub fn deploy(
        &mut self,
        registry: &mut StrategyRegistry,
        state: &mut VaultState,
        strategy: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        let idle_balance = state
            .idle_balance
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientLiquidity)?;
        registry
            .get_mut(strategy)
            .ok_or(VaultError::NotRegistered)?
            .deposit(&state.vault, amount)?;

        state.idle_balance = idle_balance;
        self.effects.push(Effect::Deployed {
            strategy: *strategy,
            amount,
        });
        Ok(())
    }

    pub fn mint<L: ShareLedger>(
        &mut self,
        ledger: &mut L,
        state: &mut VaultState,
        account: &Pubkey,
        shares: u64,
    ) -> Result<()> {
        ledger.mint(account, shares)?;
        state.total_shares = ledger.total_supply();
        self.effects.push(Effect::Minted {
            account: *account,
            shares,
        });
        Ok(())
    }

    pub fn burn<L: ShareLedger>(
        &mut self,
        ledger: &mut L,
        state: &mut VaultState,
        account: &Pubkey,
        shares: u64,
    ) -> Result<()> {
        ledger.burn(account, shares)?;
        state.total_shares = ledger.total_supply();
        self.effects.push(Effect::Burned {
            account: *account,
            shares,
        });
        Ok(())
    }

    pub fn spend_allowance<L: ShareLedger>(
        &mut self,
        ledger: &mut L,
        owner: &Pubkey,
        spender: &Pubkey,
        shares: u64,
    ) -> Result<()> {
        ledger.decrease_allowance(owner, spender, shares)?;
        self.effects.push(Effect::AllowanceSpent {
            owner: *owner,
            spender: *spender,
            shares,
        });
        Ok(())
    }

    /// Undo every recorded effect, newest first
    pub fn revert<L: ShareLedger>(
        self,
        registry: &mut StrategyRegistry,
        state: &mut VaultState,
        ledger: &mut L,
    ) {
        for effect in self.effects.into_iter().rev() {
            if let Err(err) = undo(effect, registry, state, ledger) {
                msg!("[vault] rollback of {:?} incomplete: {}", effect, err);
            }
        }
    }
}

fn undo<L: ShareLedger>(
    effect: Effect,
    registry: &mut StrategyRegistry,
    state: &mut VaultState,
    ledger: &mut L,
) -> Result<()> {
    match effect {
        Effect::Pulled { strategy, amount } => {
            let idle_balance = state
                .idle_balance
                .checked_sub(amount)
                .ok_or(VaultError::InsufficientLiquidity)?;
            registry
                .get_mut(&strategy)
                .ok_or(VaultError::NotRegistered)?
                .deposit(&state.vault, amount)?;
            state.idle_balance = idle_balance;
        }
        Effect::Deployed { strategy, amount } => {
            let idle_balance = state
                .idle_balance
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?;
            registry
                .get_mut(&strategy)
                .ok_or(VaultError::NotRegistered)?
                .withdraw(&state.vault, amount)?;
            state.idle_balance = idle_balance;
        }
        Effect::IdleCredited(amount) => state.debit_idle(amount)?,
        Effect::IdleDebited(amount) => state.credit_idle(amount)?,
        Effect::Minted { account, shares } => {
            ledger.burn(&account, shares)?;
            state.total_shares = ledger.total_supply();
        }
        Effect::Burned { account, shares } => {
            ledger.mint(&account, shares)?;
            state.total_shares = ledger.total_supply();
        }
        Effect::AllowanceSpent {
            owner,
            spender,
            shares,
        } => ledger.increase_allowance(&owner, &spender, shares)?,
    }
    Ok(())
}

/// Run `operation` against `vault`, reverting everything it applied on failure
pub fn atomically<L, P, T, F>(vault: &mut Vault<L, P>, operation: F) -> Result<T>
where
    L: ShareLedger,
    P: ValueTransfer,
    F: FnOnce(&mut Vault<L, P>, &mut Rollback) -> Result<T>,
{
    let mut rollback = Rollback::new();
    match operation(vault, &mut rollback) {
        Ok(value) => Ok(value),
        Err(err) => {
            msg!("[vault] operation failed, reverting: {}", err);
            rollback.revert(&mut vault.registry, &mut vault.state, &mut vault.ledger);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ShareBook;
    use crate::strategy::{HoldingStrategy, Strategy};
    use crate::waterfall::DrainOrder;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn setup() -> (StrategyRegistry, VaultState, HoldingStrategy, HoldingStrategy) {
        let vault = key(0xAA);
        let mut registry = StrategyRegistry::new();
        let a = HoldingStrategy::new(key(1), vault);
        let b = HoldingStrategy::new(key(2), vault);
        registry.insert(Box::new(a.clone())).unwrap();
        registry.insert(Box::new(b.clone())).unwrap();
        (registry, VaultState::new(vault, 255, DrainOrder::default()), a, b)
    }

    #[test]
    fn test_revert_restores_strategies_and_idle() {
        let (mut registry, mut state, a, b) = setup();
        a.accrue(40).unwrap();
        state.credit_idle(10).unwrap();

        let mut rollback = Rollback::new();
        rollback.pull(&mut registry, &mut state, &key(1), 40).unwrap();
        rollback.deploy(&mut registry, &mut state, &key(2), 30).unwrap();
        assert_eq!((state.idle_balance, a.custody(), b.custody()), (20, 0, 30));

        rollback.revert(&mut registry, &mut state, &mut ShareBook::new());
        assert_eq!((state.idle_balance, a.custody(), b.custody()), (10, 40, 0));
    }

    #[test]
    fn test_revert_restores_ledger() {
        let (mut registry, mut state, _, _) = setup();
        let mut ledger = ShareBook::new();
        ledger.mint(&key(5), 100).unwrap();
        ledger.approve(&key(5), &key(6), 70);

        let mut rollback = Rollback::new();
        rollback
            .spend_allowance(&mut ledger, &key(5), &key(6), 60)
            .unwrap();
        rollback.burn(&mut ledger, &mut state, &key(5), 60).unwrap();
        rollback.mint(&mut ledger, &mut state, &key(7), 5).unwrap();

        rollback.revert(&mut registry, &mut state, &mut ledger);
        assert_eq!(ledger.balance_of(&key(5)), 100);
        assert_eq!(ledger.balance_of(&key(7)), 0);
        assert_eq!(ledger.allowance(&key(5), &key(6)), 70);
        assert_eq!(state.total_shares, 100);
    }

    #[test]
    fn test_failed_pull_records_nothing() {
        let (mut registry, mut state, a, _) = setup();
        a.accrue(5).unwrap();

        let mut rollback = Rollback::new();
        assert!(rollback.pull(&mut registry, &mut state, &key(1), 6).is_err());
        assert_eq!(state.idle_balance, 0);
        assert_eq!(registry.get(&key(1)).unwrap().balance().unwrap(), 5);

        rollback.revert(&mut registry, &mut state, &mut ShareBook::new());
        assert_eq!(a.custody(), 5);
    }
}
