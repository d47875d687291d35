use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::LiquidityPulled;
use crate::registry::StrategyRegistry;
use crate::rollback::Rollback;
use crate::state::VaultState;

/// Order in which the waterfall drains strategies to cover a shortfall
///
/// Neither order is liquidity-optimal. Newest-first is the default because it
/// tends to unwind the most recent deployment before long-standing ones.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrainOrder {
    /// Walk the registry from its last entry to its first
    #[default]
    NewestFirst,
    /// Walk the registry from its first entry to its last
    OldestFirst,
}

/// One withdrawal the waterfall will issue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pull {
    pub strategy: Pubkey,
    pub amount: u64,
}

/// Plan the strategy withdrawals needed for `idle >= assets`
///
/// Reads balances only; no strategy is called to withdraw. Returns an empty
/// plan when idle balance already covers `assets`.
pub fn plan(
    registry: &StrategyRegistry,
    idle_balance: u64,
    assets: u64,
    order: DrainOrder,
) -> Result<Vec<Pull>> {
    let mut pulls = Vec::new();
    if idle_balance >= assets {
        return Ok(pulls);
    }

    let mut needed = assets - idle_balance;
    let positions: Box<dyn Iterator<Item = usize>> = match order {
        DrainOrder::NewestFirst => Box::new((0..registry.len()).rev()),
        DrainOrder::OldestFirst => Box::new(0..registry.len()),
    };

    for position in positions {
        let strategy = registry
            .at(position)
            .ok_or(VaultError::NotRegistered)?;
        let balance = strategy.balance()?;
        if balance == 0 {
            continue;
        }

        let amount = balance.min(needed);
        pulls.push(Pull {
            strategy: strategy.key(),
            amount,
        });
        needed -= amount;
        if needed == 0 {
            break;
        }
    }

    require!(needed == 0, VaultError::InsufficientLiquidity);
    Ok(pulls)
}

/// Issue planned withdrawals, crediting idle as each one lands
///
/// Returns the total value pulled. Every pull is recorded on `rollback`.
pub fn execute(
    registry: &mut StrategyRegistry,
    state: &mut VaultState,
    pulls: &[Pull],
    rollback: &mut Rollback,
) -> Result<u64> {
    let mut pulled = 0u64;
    for pull in pulls {
        rollback.pull(registry, state, &pull.strategy, pull.amount)?;

        pulled = pulled
            .checked_add(pull.amount)
            .ok_or(VaultError::MathOverflow)?;

        emit!(LiquidityPulled {
            vault: state.vault,
            strategy: pull.strategy,
            amount: pull.amount,
        });
        msg!("[vault] pulled {} from strategy {}", pull.amount, pull.strategy);
    }
    Ok(pulled)
}
