pub mod add_strategy;
pub mod deposit;
pub mod initialize;
pub mod rebalance;
pub mod remove_strategy;
pub mod update_active_strategy;
pub mod withdraw;
