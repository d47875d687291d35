use anchor_lang::prelude::*;

use crate::waterfall::DrainOrder;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub namespace: Pubkey,
    pub drain_order: DrainOrder,
}

/// Event emitted when assets are deposited (by `deposit` or `mint`)
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub assets: u64,
    pub shares: u64,
    /// Strategy that received the deposit, if any
    pub deployed_to: Option<Pubkey>,
}

/// Event emitted when assets leave the vault (by `withdraw` or `redeem`)
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

/// Event emitted for each strategy drained by the withdrawal waterfall
#[event]
pub struct LiquidityPulled {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub amount: u64,
}

/// Event emitted when a strategy is added to the registry
#[event]
pub struct StrategyAdded {
    pub vault: Pubkey,
    pub strategy: Pubkey,
}

/// Event emitted when a strategy is drained and removed
#[event]
pub struct StrategyRemoved {
    pub vault: Pubkey,
    pub strategy: Pubkey,
    pub recalled: u64,
}

/// Event emitted when the active strategy pointer changes
#[event]
pub struct ActiveStrategyUpdated {
    pub vault: Pubkey,
    pub previous: Option<Pubkey>,
    pub current: Option<Pubkey>,
}

/// Event emitted after a rebalance, carrying the full allocation for audit
#[event]
pub struct Rebalanced {
    pub vault: Pubkey,
    pub targets: Vec<Pubkey>,
    pub amounts: Vec<u64>,
    pub recalled: u64,
    pub deployed: u64,
    pub idle_balance: u64,
}
