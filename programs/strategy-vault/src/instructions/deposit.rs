use anchor_lang::prelude::*;

use crate::{
    errors::*,
    events::*,
    ledger::ShareLedger,
    rollback::{self, Rollback},
    transfer::ValueTransfer,
    vault::Vault,
};

/// Deposit exactly `assets` and mint the shares they are worth
///
/// Security checklist:
/// ✅ MATH SAFETY: shares priced with u128 intermediates, rounded down
/// ✅ BUSINESS LOGIC: zero-share deposits rejected
/// ✅ BUSINESS LOGIC: checks-effects-interactions ordering
/// ✅ EVENTS: emits Deposited
pub fn deposit_handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    assets: u64,
    receiver: &Pubkey,
) -> Result<u64> {
    // CHECKS: price before the incoming value is counted
    let shares = vault.preview_deposit(assets)?;
    require!(shares > 0, VaultError::ZeroShares);

    settle(vault, caller, receiver, assets, shares)?;
    Ok(shares)
}

/// Mint exactly `shares`, charging the rounded-up asset price
pub fn mint_handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    shares: u64,
    receiver: &Pubkey,
    supplied: u64,
) -> Result<u64> {
    // CHECKS: validate amount and payment
    require!(shares > 0, VaultError::ZeroShares);
    let assets = vault.preview_mint(shares)?;
    require!(supplied == assets, VaultError::IncorrectDepositValue);

    settle(vault, caller, receiver, assets, shares)?;
    Ok(assets)
}

fn settle<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    receiver: &Pubkey,
    assets: u64,
    shares: u64,
) -> Result<()> {
    rollback::atomically(vault, |vault, rollback| {
        // EFFECTS: record the inbound value and issue shares
        rollback.credit_idle(&mut vault.state, assets)?;
        rollback.mint(&mut vault.ledger, &mut vault.state, receiver, shares)?;

        // INTERACTIONS: hand the deposit to the active strategy
        let deployed_to = deploy_to_active(vault, rollback, assets)?;

        emit!(Deposited {
            vault: vault.state.vault,
            caller: *caller,
            receiver: *receiver,
            assets,
            shares,
            deployed_to,
        });
        msg!(
            "[vault] deposit assets={} shares={} receiver={} idle={}",
            assets,
            shares,
            receiver,
            vault.state.idle_balance
        );
        Ok(())
    })
}

/// Post-deposit hook: forward `assets` to the active strategy, if one is set
///
/// A refused deposit fails the whole operation, so the shares are never
/// left unbacked.
fn deploy_to_active<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    rollback: &mut Rollback,
    assets: u64,
) -> Result<Option<Pubkey>> {
    let Some(active) = vault.registry.active() else {
        return Ok(None);
    };

    rollback.deploy(&mut vault.registry, &mut vault.state, &active, assets)?;
    Ok(Some(active))
}
