use anchor_lang::prelude::*;

use crate::{
    authority::*, errors::*, events::*, ledger::ShareLedger, rollback, strategy::Strategy,
    transfer::ValueTransfer, vault::Vault,
};

/// Drain a strategy into idle balance and remove it from the registry
///
/// Security considerations:
/// - Authority-only function
/// - Full balance is recalled before removal so no value is stranded
/// - Clears the active pointer if it referenced this strategy
/// - Swap-removes: the last registered strategy takes the freed slot
pub fn handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    authority: &impl Authorizer,
    caller: &Pubkey,
    strategy: &Pubkey,
) -> Result<Box<dyn Strategy>> {
    // CHECKS: Validate caller and registration
    require_authorized(authority, caller)?;
    let recalled = vault
        .registry
        .get(strategy)
        .ok_or(VaultError::NotRegistered)?
        .balance()?;

    rollback::atomically(vault, |vault, rollback| {
        // INTERACTIONS: Recall everything the strategy holds
        if recalled > 0 {
            rollback.pull(&mut vault.registry, &mut vault.state, strategy, recalled)?;
        }

        // EFFECTS: Unregister
        let removed = vault.registry.remove(strategy)?;

        emit!(StrategyRemoved {
            vault: vault.state.vault,
            strategy: *strategy,
            recalled,
        });
        msg!(
            "[vault] strategy removed {} recalled={} idle={}",
            strategy,
            recalled,
            vault.state.idle_balance
        );

        Ok(removed)
    })
}
