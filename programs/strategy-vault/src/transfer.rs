use anchor_lang::prelude::*;

/// Moves native value out of the vault
///
/// Called exactly once per withdraw/redeem, after every state change. Any
/// error is surfaced to the withdrawer as `ValueTransferFailed`.
pub trait ValueTransfer {
    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}
