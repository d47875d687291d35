use anchor_lang::prelude::*;

use crate::accounting::ShareAccounting;
use crate::authority::Authorizer;
use crate::errors::VaultError;
use crate::instructions;
use crate::ledger::ShareLedger;
use crate::registry::StrategyRegistry;
use crate::state::VaultState;
use crate::strategy::Strategy;
use crate::transfer::ValueTransfer;
use crate::waterfall::DrainOrder;

/// Initialization parameters for a vault
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultConfig {
    /// Distinguishes vaults derived under the same program
    pub namespace: Pubkey,

    /// Order in which withdrawals drain strategies
    pub drain_order: DrainOrder,
}

/// Native-asset vault routing idle value into pluggable strategies
///
/// `L` is the share ledger the vault mints and burns against; `P` moves
/// native value out to withdrawers.
pub struct Vault<L, P> {
    pub(crate) state: VaultState,
    pub(crate) registry: StrategyRegistry,
    pub(crate) ledger: L,
    pub(crate) payout: P,
}

impl<L: ShareLedger, P: ValueTransfer> Vault<L, P> {
    /// Create an empty vault with its identity derived from `config.namespace`
    pub fn initialize(config: VaultConfig, ledger: L, payout: P) -> Result<Self> {
        instructions::initialize::handler(config, ledger, payout)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Vault identity; strategies accept calls only from this key
    pub fn key(&self) -> Pubkey {
        self.state.vault
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Share-token side of the ledger (approvals, transfers)
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn payout(&self) -> &P {
        &self.payout
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn idle_balance(&self) -> u64 {
        self.state.idle_balance
    }

    pub fn total_shares(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// Idle balance plus every registered strategy's live balance
    pub fn total_assets(&self) -> Result<u64> {
        let deployed = self.registry.total_balance()?;
        self.state
            .idle_balance
            .checked_add(deployed)
            .ok_or_else(|| error!(VaultError::MathOverflow))
    }

    /// Fresh share price inputs for this instant
    pub fn accounting(&self) -> Result<ShareAccounting> {
        Ok(ShareAccounting::new(
            self.total_assets()?,
            self.total_shares(),
        ))
    }

    pub fn convert_to_shares(&self, assets: u64) -> Result<u64> {
        self.accounting()?.convert_to_shares(assets)
    }

    pub fn convert_to_assets(&self, shares: u64) -> Result<u64> {
        self.accounting()?.convert_to_assets(shares)
    }

    pub fn preview_deposit(&self, assets: u64) -> Result<u64> {
        self.accounting()?.preview_deposit(assets)
    }

    pub fn preview_mint(&self, shares: u64) -> Result<u64> {
        self.accounting()?.preview_mint(shares)
    }

    pub fn preview_withdraw(&self, assets: u64) -> Result<u64> {
        self.accounting()?.preview_withdraw(assets)
    }

    pub fn preview_redeem(&self, shares: u64) -> Result<u64> {
        self.accounting()?.preview_redeem(shares)
    }

    pub fn max_deposit(&self, _receiver: &Pubkey) -> u64 {
        u64::MAX
    }

    pub fn max_mint(&self, _receiver: &Pubkey) -> u64 {
        u64::MAX
    }

    /// Assets `owner` could withdraw by redeeming every share they hold
    pub fn max_withdraw(&self, owner: &Pubkey) -> Result<u64> {
        self.preview_redeem(self.ledger.balance_of(owner))
    }

    pub fn max_redeem(&self, owner: &Pubkey) -> u64 {
        self.ledger.balance_of(owner)
    }

    /// Registered strategy keys in current registry order
    pub fn strategies(&self) -> Vec<Pubkey> {
        self.registry.keys().copied().collect()
    }

    pub fn is_strategy(&self, key: &Pubkey) -> bool {
        self.registry.contains(key)
    }

    pub fn active_strategy(&self) -> Option<Pubkey> {
        self.registry.active()
    }

    pub fn strategy_balance(&self, key: &Pubkey) -> Result<u64> {
        self.registry
            .get(key)
            .ok_or(VaultError::NotRegistered)?
            .balance()
    }

    // ------------------------------------------------------------------
    // User operations
    // ------------------------------------------------------------------

    /// Deposit `assets` supplied by `caller` and mint shares to `receiver`
    ///
    /// Security considerations:
    /// - Shares are priced before the incoming value is counted
    /// - Rounds shares down; a deposit worth zero shares is rejected
    /// - Forwards the deposit to the active strategy, if any
    pub fn deposit(&mut self, caller: &Pubkey, assets: u64, receiver: &Pubkey) -> Result<u64> {
        instructions::deposit::deposit_handler(self, caller, assets, receiver)
    }

    /// Mint exactly `shares` to `receiver` for `supplied` value
    ///
    /// `supplied` must equal `preview_mint(shares)`, which rounds up.
    pub fn mint(
        &mut self,
        caller: &Pubkey,
        shares: u64,
        receiver: &Pubkey,
        supplied: u64,
    ) -> Result<u64> {
        instructions::deposit::mint_handler(self, caller, shares, receiver, supplied)
    }

    /// Burn `owner`'s shares to send exactly `assets` to `receiver`
    ///
    /// Security considerations:
    /// - Rounds burned shares up
    /// - Spends `caller`'s allowance when acting for someone else
    /// - Sources missing liquidity from strategies before burning
    /// - The outbound transfer is the last thing that happens
    pub fn withdraw(
        &mut self,
        caller: &Pubkey,
        assets: u64,
        receiver: &Pubkey,
        owner: &Pubkey,
    ) -> Result<u64> {
        instructions::withdraw::withdraw_handler(self, caller, assets, receiver, owner)
    }

    /// Burn exactly `shares` of `owner` and send their value to `receiver`
    pub fn redeem(
        &mut self,
        caller: &Pubkey,
        shares: u64,
        receiver: &Pubkey,
        owner: &Pubkey,
    ) -> Result<u64> {
        instructions::withdraw::redeem_handler(self, caller, shares, receiver, owner)
    }

    // ------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------

    /// Register a strategy the vault may deploy value to
    pub fn add_strategy(
        &mut self,
        authority: &impl Authorizer,
        caller: &Pubkey,
        strategy: Box<dyn Strategy>,
    ) -> Result<Pubkey> {
        instructions::add_strategy::handler(self, authority, caller, strategy)
    }

    /// Drain a strategy back to idle and unregister it
    ///
    /// Returns the removed handle.
    pub fn remove_strategy(
        &mut self,
        authority: &impl Authorizer,
        caller: &Pubkey,
        strategy: &Pubkey,
    ) -> Result<Box<dyn Strategy>> {
        instructions::remove_strategy::handler(self, authority, caller, strategy)
    }

    /// Choose the strategy that receives new deposits; `None` keeps them idle
    pub fn update_active_strategy(
        &mut self,
        authority: &impl Authorizer,
        caller: &Pubkey,
        strategy: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_active_strategy::handler(self, authority, caller, strategy)
    }

    /// Recall everything from strategies and redeploy per `targets`/`amounts`
    ///
    /// All-or-nothing: the allocation is validated before anything moves.
    pub fn rebalance(
        &mut self,
        authority: &impl Authorizer,
        caller: &Pubkey,
        targets: &[Pubkey],
        amounts: &[u64],
    ) -> Result<()> {
        instructions::rebalance::handler(self, authority, caller, targets, amounts)
    }
}
