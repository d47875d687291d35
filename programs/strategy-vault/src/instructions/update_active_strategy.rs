use anchor_lang::prelude::*;

use crate::{authority::*, events::*, ledger::ShareLedger, transfer::ValueTransfer, vault::Vault};

/// Select the strategy that receives new deposits
///
/// `None` halts auto-deployment without unregistering anything.
pub fn handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    authority: &impl Authorizer,
    caller: &Pubkey,
    strategy: Option<Pubkey>,
) -> Result<()> {
    require_authorized(authority, caller)?;

    let previous = vault.registry.set_active(strategy)?;

    emit!(ActiveStrategyUpdated {
        vault: vault.state.vault,
        previous,
        current: strategy,
    });
    msg!("[vault] active strategy {:?} -> {:?}", previous, strategy);

    Ok(())
}
