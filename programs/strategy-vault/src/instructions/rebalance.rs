use anchor_lang::prelude::*;

use crate::{
    authority::*, errors::*, events::*, ledger::ShareLedger, registry::StrategyRegistry,
    rollback, transfer::ValueTransfer, vault::Vault,
};

/// Recall all strategy value into idle, then redeploy per the allocation
///
/// Security considerations:
/// - Authority-only function
/// - Every target must already be registered
/// - Cumulative allocation may not exceed idle balance after recall
/// - The whole allocation is validated before anything moves, so an
///   invalid request leaves every balance untouched
/// - A strategy failing mid-flight reverts every recall and deployment
/// - Emits the full target list for auditability
pub fn handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    authority: &impl Authorizer,
    caller: &Pubkey,
    targets: &[Pubkey],
    amounts: &[u64],
) -> Result<()> {
    // CHECKS: Validate caller and allocation
    require_authorized(authority, caller)?;
    require!(
        targets.len() == amounts.len(),
        VaultError::ArrayLengthMismatch
    );
    let available = vault.total_assets()?;
    let allocation = plan_allocation(&vault.registry, targets, amounts, available)?;

    let recall: Vec<(Pubkey, u64)> = vault
        .registry
        .keys()
        .copied()
        .zip(vault.registry.balances()?)
        .filter(|&(_, balance)| balance > 0)
        .collect();

    rollback::atomically(vault, |vault, rollback| {
        // Phase 1: full recall
        let mut recalled = 0u64;
        for (strategy, balance) in &recall {
            rollback.pull(&mut vault.registry, &mut vault.state, strategy, *balance)?;
            recalled = recalled
                .checked_add(*balance)
                .ok_or(VaultError::MathOverflow)?;
        }

        // Phase 2: redeploy
        let mut deployed = 0u64;
        for (target, amount) in &allocation {
            rollback.deploy(&mut vault.registry, &mut vault.state, target, *amount)?;
            deployed = deployed
                .checked_add(*amount)
                .ok_or(VaultError::MathOverflow)?;
        }

        let idle_balance = vault.state.idle_balance;
        emit!(Rebalanced {
            vault: vault.state.vault,
            targets: targets.to_vec(),
            amounts: amounts.to_vec(),
            recalled,
            deployed,
            idle_balance,
        });
        msg!(
            "[vault] rebalance recalled={} deployed={} idle={}",
            recalled,
            deployed,
            idle_balance
        );

        Ok(())
    })
}

/// Validate an allocation against `available` value
///
/// Zero amounts are skipped before the registration check, matching the
/// order deployment would visit them. Returns the non-zero pairs in order.
pub fn plan_allocation(
    registry: &StrategyRegistry,
    targets: &[Pubkey],
    amounts: &[u64],
    available: u64,
) -> Result<Vec<(Pubkey, u64)>> {
    require!(
        targets.len() == amounts.len(),
        VaultError::ArrayLengthMismatch
    );

    let mut allocated = 0u64;
    let mut allocation = Vec::with_capacity(targets.len());
    for (target, &amount) in targets.iter().zip(amounts) {
        if amount == 0 {
            continue;
        }
        require!(registry.contains(target), VaultError::TargetNotRegistered);

        allocated = allocated
            .checked_add(amount)
            .ok_or(VaultError::InsufficientFundsForRebalance)?;
        require!(
            allocated <= available,
            VaultError::InsufficientFundsForRebalance
        );
        allocation.push((*target, amount));
    }
    Ok(allocation)
}
