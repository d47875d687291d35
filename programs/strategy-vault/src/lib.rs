// Strategy Vault - ERC-4626-style native-asset vault with pluggable yield strategies
// Security: Checks-effects-interactions on every operation, rounding always favors the pool
// Architecture: Strategy registry + active strategy + withdrawal waterfall + rebalancer

use anchor_lang::prelude::*;

pub mod accounting;
pub mod authority;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod registry;
pub mod rollback;
pub mod state;
pub mod strategy;
pub mod transfer;
pub mod vault;
pub mod waterfall;

pub use accounting::ShareAccounting;
pub use authority::{AuthoritySet, Authorizer, SingleAuthority};
pub use errors::VaultError;
pub use ledger::{ShareBook, ShareLedger};
pub use strategy::{HoldingStrategy, Strategy};
pub use transfer::ValueTransfer;
pub use vault::{Vault, VaultConfig};
pub use waterfall::DrainOrder;

declare_id!("tdm1gTyK4tUuRZvhNVfbkcUMyEAEmaZZRRS1dEphxqM");
