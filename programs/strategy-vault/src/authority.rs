use std::collections::BTreeSet;

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Decides whether a caller may run an admin operation
///
/// Passed explicitly into `add_strategy`, `remove_strategy`,
/// `update_active_strategy` and `rebalance` alongside the caller key.
pub trait Authorizer {
    fn is_authorized(&self, caller: &Pubkey) -> bool;
}

/// Exactly one key may administer the vault
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleAuthority(pub Pubkey);

impl Authorizer for SingleAuthority {
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self.0 == *caller
    }
}

/// Any member of a fixed set may administer the vault
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthoritySet(BTreeSet<Pubkey>);

impl AuthoritySet {
    pub fn new(members: impl IntoIterator<Item = Pubkey>) -> Self {
        Self(members.into_iter().collect())
    }
}

impl Authorizer for AuthoritySet {
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self.0.contains(caller)
    }
}

impl<F> Authorizer for F
where
    F: Fn(&Pubkey) -> bool,
{
    fn is_authorized(&self, caller: &Pubkey) -> bool {
        self(caller)
    }
}

/// Fail with `NotAuthorized` unless `authorizer` accepts `caller`
pub fn require_authorized(authorizer: &impl Authorizer, caller: &Pubkey) -> Result<()> {
    require!(
        authorizer.is_authorized(caller),
        VaultError::NotAuthorized
    );
    Ok(())
}
