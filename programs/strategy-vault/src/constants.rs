// Constants for the Strategy Vault program

/// Seed for the vault identity PDA
pub const VAULT_SEED: &[u8] = b"strategy_vault";

/// Allowance value that is never decremented when spent
pub const UNLIMITED_ALLOWANCE: u64 = u64::MAX;

/// Space for VaultState account (8 discriminator + 32 vault + 8 idle_balance +
/// 8 total_shares + 1 drain_order + 1 bump + 64 padding)
pub const VAULT_STATE_SIZE: usize = 8 + 32 + 8 + 8 + 1 + 1 + 64;
