use anchor_lang::prelude::*;

use crate::{
    constants::*, errors::*, events::*, ledger::ShareLedger, rollback, transfer::ValueTransfer,
    vault::Vault, waterfall,
};

/// Withdraw exactly `assets`, burning the rounded-up share cost
///
/// Security checklist:
/// ✅ AUTHORITY: third-party callers spend the owner's allowance
/// ✅ MATH SAFETY: shares rounded up so the withdrawer never gets extra
/// ✅ BUSINESS LOGIC: liquidity sourced and shares burned before payout
/// ✅ ATOMICITY: a failed pull or payout reverts every effect
/// ✅ EVENTS: emits Withdrawn
pub fn withdraw_handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    assets: u64,
    receiver: &Pubkey,
    owner: &Pubkey,
) -> Result<u64> {
    require!(assets > 0, VaultError::ZeroAssets);
    let shares = vault.preview_withdraw(assets)?;

    exit(vault, caller, receiver, owner, assets, shares)?;
    Ok(shares)
}

/// Redeem exactly `shares`, paying out their rounded-down value
pub fn redeem_handler<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    shares: u64,
    receiver: &Pubkey,
    owner: &Pubkey,
) -> Result<u64> {
    let assets = vault.preview_redeem(shares)?;
    require!(assets > 0, VaultError::ZeroAssets);

    exit(vault, caller, receiver, owner, assets, shares)?;
    Ok(assets)
}

fn exit<L: ShareLedger, P: ValueTransfer>(
    vault: &mut Vault<L, P>,
    caller: &Pubkey,
    receiver: &Pubkey,
    owner: &Pubkey,
    assets: u64,
    shares: u64,
) -> Result<()> {
    // CHECKS: everything that can fail before a strategy is touched
    let spends_allowance = caller != owner;
    if spends_allowance {
        let allowance = vault.ledger.allowance(owner, caller);
        require!(
            allowance == UNLIMITED_ALLOWANCE || allowance >= shares,
            VaultError::InsufficientAllowance
        );
    }
    let pulls = waterfall::plan(
        &vault.registry,
        vault.state.idle_balance,
        assets,
        vault.state.drain_order,
    )?;
    require!(
        vault.ledger.balance_of(owner) >= shares,
        VaultError::InsufficientShares
    );

    rollback::atomically(vault, |vault, rollback| {
        // EFFECTS: pull liquidity, spend allowance, burn shares
        waterfall::execute(&mut vault.registry, &mut vault.state, &pulls, rollback)?;
        if spends_allowance {
            rollback.spend_allowance(&mut vault.ledger, owner, caller, shares)?;
        }
        rollback.burn(&mut vault.ledger, &mut vault.state, owner, shares)?;
        rollback.debit_idle(&mut vault.state, assets)?;

        // INTERACTIONS: single outbound transfer, last
        vault.payout.send(receiver, assets).map_err(|err| {
            msg!("[vault] transfer of {} to {} failed: {}", assets, receiver, err);
            error!(VaultError::ValueTransferFailed)
        })?;

        emit!(Withdrawn {
            vault: vault.state.vault,
            caller: *caller,
            receiver: *receiver,
            owner: *owner,
            assets,
            shares,
        });
        msg!(
            "[vault] withdraw assets={} shares={} owner={} idle={}",
            assets,
            shares,
            owner,
            vault.state.idle_balance
        );
        Ok(())
    })
}
