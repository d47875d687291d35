// Shared fixtures for the Strategy Vault integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use strategy_vault::{
    DrainOrder, HoldingStrategy, ShareBook, SingleAuthority, Strategy, ValueTransfer, Vault,
    VaultConfig, VaultError,
};

pub type TestVault = Vault<ShareBook, Payouts>;

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn admin() -> Pubkey {
    key(0xAD)
}

pub fn authority() -> SingleAuthority {
    SingleAuthority(admin())
}

pub fn alice() -> Pubkey {
    key(0xA1)
}

pub fn bob() -> Pubkey {
    key(0xB0)
}

/// Records every outbound transfer; recipients can be set to refuse value
#[derive(Clone, Debug, Default)]
pub struct Payouts {
    pub sent: BTreeMap<Pubkey, u64>,
    pub rejecting: Vec<Pubkey>,
}

impl Payouts {
    pub fn received(&self, account: &Pubkey) -> u64 {
        self.sent.get(account).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.sent.values().sum()
    }
}

impl ValueTransfer for Payouts {
    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        if self.rejecting.contains(to) {
            return err!(VaultError::ValueTransferFailed);
        }
        *self.sent.entry(*to).or_insert(0) += amount;
        Ok(())
    }
}

/// Strategy whose calls can be made to fail, sharing state with the test
#[derive(Clone)]
pub struct FlakyStrategy {
    pub inner: HoldingStrategy,
    pub fail_withdraw: Rc<RefCell<bool>>,
    pub fail_deposit: Rc<RefCell<bool>>,
}

impl FlakyStrategy {
    pub fn new(key: Pubkey, vault: Pubkey) -> Self {
        Self {
            inner: HoldingStrategy::new(key, vault),
            fail_withdraw: Rc::new(RefCell::new(false)),
            fail_deposit: Rc::new(RefCell::new(false)),
        }
    }
}

impl Strategy for FlakyStrategy {
    fn key(&self) -> Pubkey {
        self.inner.key()
    }

    fn deposit(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        if *self.fail_deposit.borrow() {
            return err!(VaultError::ValueTransferFailed);
        }
        self.inner.deposit(caller, amount)
    }

    fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<()> {
        if *self.fail_withdraw.borrow() {
            return err!(VaultError::InsufficientStrategyBalance);
        }
        self.inner.withdraw(caller, amount)
    }

    fn balance(&self) -> Result<u64> {
        self.inner.balance()
    }
}

pub fn new_vault() -> TestVault {
    new_vault_with(DrainOrder::NewestFirst)
}

pub fn new_vault_with(drain_order: DrainOrder) -> TestVault {
    Vault::initialize(
        VaultConfig {
            namespace: key(0x01),
            drain_order,
        },
        ShareBook::new(),
        Payouts::default(),
    )
    .unwrap()
}

/// Register a holding strategy and return the test's handle on its custody
pub fn add_holding(vault: &mut TestVault, n: u8) -> HoldingStrategy {
    let strategy = HoldingStrategy::new(key(n), vault.key());
    vault
        .add_strategy(&authority(), &admin(), Box::new(strategy.clone()))
        .unwrap();
    strategy
}

/// Register a flaky strategy and return the test's handle on it
pub fn add_flaky(vault: &mut TestVault, n: u8) -> FlakyStrategy {
    let strategy = FlakyStrategy::new(key(n), vault.key());
    vault
        .add_strategy(&authority(), &admin(), Box::new(strategy.clone()))
        .unwrap();
    strategy
}

/// Place vault value into strategies through an admin rebalance
pub fn seed(vault: &mut TestVault, targets: &[Pubkey], amounts: &[u64]) {
    vault
        .rebalance(&authority(), &admin(), targets, amounts)
        .unwrap();
}

/// Assert that `result` failed with `expected`
pub fn assert_vault_error<T>(result: Result<T>, expected: VaultError) {
    let expected = format!("{:?}", expected);
    match result {
        Err(Error::AnchorError(err)) => assert_eq!(err.error_name, expected),
        Err(other) => panic!("expected {}, got {:?}", expected, other),
        Ok(_) => panic!("expected {}, got Ok", expected),
    }
}
