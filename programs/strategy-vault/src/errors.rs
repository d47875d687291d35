use anchor_lang::prelude::*;

/// Custom error codes for the Strategy Vault program
#[error_code]
pub enum VaultError {
    #[msg("Deposit would mint zero shares")]
    ZeroShares,

    #[msg("Operation would move zero assets")]
    ZeroAssets,

    #[msg("Idle balance and strategies cannot cover the withdrawal")]
    InsufficientLiquidity,

    #[msg("Rebalance allocation exceeds the recalled balance")]
    InsufficientFundsForRebalance,

    #[msg("Rebalance target is not a registered strategy")]
    TargetNotRegistered,

    #[msg("Rebalance targets and amounts differ in length")]
    ArrayLengthMismatch,

    #[msg("Strategy is already registered")]
    AlreadyRegistered,

    #[msg("Strategy is not registered")]
    NotRegistered,

    #[msg("Strategy key must not be the default address")]
    ZeroAddress,

    #[msg("Unauthorized - caller may not manage this vault")]
    NotAuthorized,

    #[msg("Outbound value transfer failed")]
    ValueTransferFailed,

    #[msg("Cannot divide by zero")]
    DivisionByZero,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Supplied value does not match the mint price")]
    IncorrectDepositValue,

    #[msg("Owner holds fewer shares than requested")]
    InsufficientShares,

    #[msg("Spender allowance is below the requested shares")]
    InsufficientAllowance,

    #[msg("Strategy holds less than the requested amount")]
    InsufficientStrategyBalance,

    #[msg("Strategy may only be called by its vault")]
    UnauthorizedStrategyCaller,
}
