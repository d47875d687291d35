use anchor_lang::prelude::*;

use crate::{
    authority::*, events::*, ledger::ShareLedger, strategy::Strategy, transfer::ValueTransfer,
    vault::Vault,
};

/// Add a new strategy to the registry
///
/// Security considerations:
/// - Authority-only function
/// - Rejects the default key and duplicates
/// - New strategies start inactive; deposits only flow to them once
///   selected with `update_active_strategy` or funded by `rebalance`
pub fn handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    authority: &impl Authorizer,
    caller: &Pubkey,
    strategy: Box<dyn Strategy>,
) -> Result<Pubkey> {
    // CHECKS: Validate caller
    require_authorized(authority, caller)?;

    // EFFECTS: Add strategy to registry
    let key = vault.registry.insert(strategy)?;

    emit!(StrategyAdded {
        vault: vault.state.vault,
        strategy: key,
    });
    msg!("[vault] strategy added {} count={}", key, vault.registry.len());

    Ok(key)
}
