//! Caller checks run before any ledger mutation.
//!
//! These are pure predicates over the caller handed in by the runtime, so they
//! hold no state and read nothing from storage.

use crate::{error::LedgerError, ledger::Balance};

/// Mutating operations reject zero amounts.
pub fn ensure_positive(amount: Balance) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// `caller` must be the token owner. A ledger without an owner accepts nobody.
pub fn ensure_owner<AccountId: PartialEq>(
    caller: &AccountId,
    owner: Option<&AccountId>,
) -> Result<(), LedgerError> {
    match owner {
        Some(owner) if owner == caller => Ok(()),
        _ => Err(LedgerError::OwnerOnly),
    }
}

/// `caller` must be the account whose funds are being spent.
pub fn ensure_account_holder<AccountId: PartialEq>(
    caller: &AccountId,
    account: &AccountId,
) -> Result<(), LedgerError> {
    if caller != account {
        return Err(LedgerError::NotTokenOwner);
    }
    Ok(())
}
