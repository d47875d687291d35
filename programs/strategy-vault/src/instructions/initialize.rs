use anchor_lang::prelude::*;

use crate::{
    constants::*, events::*, ledger::ShareLedger, registry::StrategyRegistry, state::*,
    transfer::ValueTransfer, vault::{Vault, VaultConfig},
};

/// Create a vault whose identity is the PDA of `[VAULT_SEED, namespace]`
pub fn handler<L: ShareLedger, P: ValueTransfer>(
    config: VaultConfig,
    ledger: L,
    payout: P,
) -> Result<Vault<L, P>> {
    let (vault, bump) =
        Pubkey::find_program_address(&[VAULT_SEED, config.namespace.as_ref()], &crate::ID);

    let mut state = VaultState::new(vault, bump, config.drain_order);
    state.total_shares = ledger.total_supply();

    emit!(VaultInitialized {
        vault,
        namespace: config.namespace,
        drain_order: config.drain_order,
    });
    msg!("[vault] initialized {} drain_order={:?}", vault, config.drain_order);

    Ok(Vault {
        state,
        registry: StrategyRegistry::new(),
        ledger,
        payout,
    })
}
