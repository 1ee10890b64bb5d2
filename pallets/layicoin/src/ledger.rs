//! Ledger store: the balance map and the total-supply counter.
//!
//! All mutation goes through [`Ledger`], which plans a [`Changeset`] with
//! checked arithmetic and only writes to the underlying [`LedgerStore`] once
//! the whole delta is known to be valid. A failed operation therefore never
//! leaves a partial write behind, and `total_supply == sum(balances)` holds
//! before and after every call.
//!
//! The store itself is a trait so the same logic runs against pallet storage
//! ([`PalletStore`]) and against a plain map ([`MemoryStore`]).

use core::marker::PhantomData;

use sp_std::{collections::btree_map::BTreeMap, vec::Vec};

use crate::{error::LedgerError, Balances, Config, TotalSupply};

/// Token amount in base units (10^-decimals of a whole token).
pub type Balance = u128;

/// Raw persistence behind a [`Ledger`].
///
/// Implementations only read and write; they never validate. Writing a zero
/// balance means the account is absent.
pub trait LedgerStore {
    type AccountId: Clone + PartialEq;

    fn balance_of(&self, who: &Self::AccountId) -> Balance;
    fn total_supply(&self) -> Balance;
    fn write_balance(&mut self, who: &Self::AccountId, balance: Balance);
    fn write_total_supply(&mut self, supply: Balance);
}

/// A validated state delta: new absolute balances plus, optionally, a new supply.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Changeset<AccountId> {
    balances: Vec<(AccountId, Balance)>,
    total_supply: Option<Balance>,
}

impl<AccountId> Default for Changeset<AccountId> {
    fn default() -> Self {
        Self { balances: Vec::new(), total_supply: None }
    }
}

impl<AccountId> Changeset<AccountId> {
    fn with_balance(mut self, who: AccountId, balance: Balance) -> Self {
        self.balances.push((who, balance));
        self
    }

    fn with_total_supply(mut self, supply: Balance) -> Self {
        self.total_supply = Some(supply);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.total_supply.is_none()
    }
}

/// Owns one store and exposes the invariant-preserving primitives.
pub struct Ledger<S> {
    store: S,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current balance of `who`, zero if the account was never credited.
    pub fn balance_of(&self, who: &S::AccountId) -> Balance {
        self.store.balance_of(who)
    }

    pub fn total_supply(&self) -> Balance {
        self.store.total_supply()
    }

    /// Adds `amount` to `who` without touching the supply.
    ///
    /// Only meaningful when paired with a matching debit or supply change;
    /// on its own it breaks `total_supply == sum(balances)`.
    pub fn credit(&mut self, who: &S::AccountId, amount: Balance) -> Result<(), LedgerError> {
        let changes = self.plan_credit(who, amount)?;
        self.commit(changes);
        Ok(())
    }

    /// Removes `amount` from `who` without touching the supply.
    pub fn debit(&mut self, who: &S::AccountId, amount: Balance) -> Result<(), LedgerError> {
        let changes = self.plan_debit(who, amount)?;
        self.commit(changes);
        Ok(())
    }

    /// Creates `amount` new tokens in `who`'s account.
    pub fn mint(&mut self, who: &S::AccountId, amount: Balance) -> Result<(), LedgerError> {
        let changes = self.plan_mint(who, amount)?;
        self.commit(changes);
        Ok(())
    }

    /// Destroys `amount` tokens held by `who`.
    pub fn burn(&mut self, who: &S::AccountId, amount: Balance) -> Result<(), LedgerError> {
        let changes = self.plan_burn(who, amount)?;
        self.commit(changes);
        Ok(())
    }

    /// Moves `amount` from `from` to `to`; the supply is unchanged.
    ///
    /// A self-transfer still requires `from` to hold `amount` and then writes
    /// nothing.
    pub fn transfer_internal(
        &mut self,
        from: &S::AccountId,
        to: &S::AccountId,
        amount: Balance,
    ) -> Result<(), LedgerError> {
        let changes = self.plan_transfer(from, to, amount)?;
        self.commit(changes);
        Ok(())
    }

    fn plan_credit(
        &self,
        who: &S::AccountId,
        amount: Balance,
    ) -> Result<Changeset<S::AccountId>, LedgerError> {
        let balance =
            self.store.balance_of(who).checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(Changeset::default().with_balance(who.clone(), balance))
    }

    fn plan_debit(
        &self,
        who: &S::AccountId,
        amount: Balance,
    ) -> Result<Changeset<S::AccountId>, LedgerError> {
        let balance = self
            .store
            .balance_of(who)
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        Ok(Changeset::default().with_balance(who.clone(), balance))
    }

    fn plan_mint(
        &self,
        who: &S::AccountId,
        amount: Balance,
    ) -> Result<Changeset<S::AccountId>, LedgerError> {
        let supply =
            self.store.total_supply().checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(self.plan_credit(who, amount)?.with_total_supply(supply))
    }

    fn plan_burn(
        &self,
        who: &S::AccountId,
        amount: Balance,
    ) -> Result<Changeset<S::AccountId>, LedgerError> {
        let changes = self.plan_debit(who, amount)?;
        // Cannot fail while the supply covers every balance.
        let supply = self
            .store
            .total_supply()
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        Ok(changes.with_total_supply(supply))
    }

    fn plan_transfer(
        &self,
        from: &S::AccountId,
        to: &S::AccountId,
        amount: Balance,
    ) -> Result<Changeset<S::AccountId>, LedgerError> {
        let debited = self.plan_debit(from, amount)?;
        if from == to {
            return Ok(Changeset::default());
        }
        let credited =
            self.store.balance_of(to).checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(debited.with_balance(to.clone(), credited))
    }

    fn commit(&mut self, changes: Changeset<S::AccountId>) {
        for (who, balance) in &changes.balances {
            self.store.write_balance(who, *balance);
        }
        if let Some(supply) = changes.total_supply {
            self.store.write_total_supply(supply);
        }
    }
}

/// [`LedgerStore`] over the pallet's `Balances` map and `TotalSupply` value.
pub struct PalletStore<T>(PhantomData<T>);

impl<T> Default for PalletStore<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Config> LedgerStore for PalletStore<T> {
    type AccountId = T::AccountId;

    fn balance_of(&self, who: &T::AccountId) -> Balance {
        Balances::<T>::get(who)
    }

    fn total_supply(&self) -> Balance {
        TotalSupply::<T>::get()
    }

    fn write_balance(&mut self, who: &T::AccountId, balance: Balance) {
        if balance == 0 {
            Balances::<T>::remove(who);
        } else {
            Balances::<T>::insert(who, balance);
        }
    }

    fn write_total_supply(&mut self, supply: Balance) {
        TotalSupply::<T>::put(supply);
    }
}

/// In-memory [`LedgerStore`], for running the ledger without a runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryStore<AccountId: Ord> {
    balances: BTreeMap<AccountId, Balance>,
    total_supply: Balance,
}

impl<AccountId: Ord> Default for MemoryStore<AccountId> {
    fn default() -> Self {
        Self { balances: BTreeMap::new(), total_supply: 0 }
    }
}

impl<AccountId: Ord> MemoryStore<AccountId> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts with a non-zero balance.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Balance)> {
        self.balances.iter()
    }

    /// Sum of every stored balance, `None` if it does not fit in a [`Balance`].
    pub fn sum_of_balances(&self) -> Option<Balance> {
        self.balances.values().try_fold(0u128, |acc, b| acc.checked_add(*b))
    }
}

impl<AccountId: Ord + Clone> LedgerStore for MemoryStore<AccountId> {
    type AccountId = AccountId;

    fn balance_of(&self, who: &AccountId) -> Balance {
        self.balances.get(who).copied().unwrap_or_default()
    }

    fn total_supply(&self) -> Balance {
        self.total_supply
    }

    fn write_balance(&mut self, who: &AccountId, balance: Balance) {
        if balance == 0 {
            self.balances.remove(who);
        } else {
            self.balances.insert(who.clone(), balance);
        }
    }

    fn write_total_supply(&mut self, supply: Balance) {
        self.total_supply = supply;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: u64 = 1;
    const BOB: u64 = 2;

    fn ledger_with(alice: Balance) -> Ledger<MemoryStore<u64>> {
        let mut ledger = Ledger::new(MemoryStore::new());
        ledger.mint(&ALICE, alice).unwrap();
        ledger
    }

    fn assert_supply_matches(ledger: &Ledger<MemoryStore<u64>>) {
        assert_eq!(ledger.store().sum_of_balances(), Some(ledger.total_supply()));
    }

    #[test]
    fn unknown_account_reads_zero() {
        let ledger = Ledger::new(MemoryStore::<u64>::new());
        assert_eq!(ledger.balance_of(&ALICE), 0);
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn mint_credits_balance_and_supply() {
        let mut ledger = ledger_with(1_000);
        ledger.mint(&BOB, 500).unwrap();

        assert_eq!(ledger.balance_of(&BOB), 500);
        assert_eq!(ledger.total_supply(), 1_500);
        assert_supply_matches(&ledger);
    }

    #[test]
    fn mint_overflow_changes_nothing() {
        let mut ledger = ledger_with(Balance::MAX - 10);
        let before = ledger.store().clone();

        assert_eq!(ledger.mint(&BOB, 11), Err(LedgerError::Overflow));
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn credit_overflow_is_checked() {
        let mut ledger = ledger_with(Balance::MAX);
        assert_eq!(ledger.credit(&ALICE, 1), Err(LedgerError::Overflow));
        assert_eq!(ledger.balance_of(&ALICE), Balance::MAX);
    }

    #[test]
    fn credit_and_debit_leave_supply_alone() {
        let mut ledger = ledger_with(1_000);
        ledger.debit(&ALICE, 300).unwrap();
        ledger.credit(&BOB, 300).unwrap();

        assert_eq!(ledger.balance_of(&ALICE), 700);
        assert_eq!(ledger.balance_of(&BOB), 300);
        assert_eq!(ledger.total_supply(), 1_000);
    }

    #[test]
    fn debit_beyond_balance_fails() {
        let mut ledger = ledger_with(1_000);
        assert_eq!(ledger.debit(&ALICE, 1_001), Err(LedgerError::InsufficientBalance));
        assert_eq!(ledger.balance_of(&ALICE), 1_000);
    }

    #[test]
    fn burn_reduces_balance_and_supply() {
        let mut ledger = ledger_with(1_000);
        ledger.burn(&ALICE, 400).unwrap();

        assert_eq!(ledger.balance_of(&ALICE), 600);
        assert_eq!(ledger.total_supply(), 600);
        assert_supply_matches(&ledger);
    }

    #[test]
    fn burn_beyond_balance_changes_nothing() {
        let mut ledger = ledger_with(1_000);
        ledger.mint(&BOB, 5_000).unwrap();
        let before = ledger.store().clone();

        assert_eq!(ledger.burn(&ALICE, 1_001), Err(LedgerError::InsufficientBalance));
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn burning_everything_removes_the_account() {
        let mut ledger = ledger_with(1_000);
        ledger.burn(&ALICE, 1_000).unwrap();

        assert_eq!(ledger.store().accounts().count(), 0);
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn transfer_moves_funds() {
        let mut ledger = ledger_with(1_000);
        ledger.transfer_internal(&ALICE, &BOB, 250).unwrap();

        assert_eq!(ledger.balance_of(&ALICE), 750);
        assert_eq!(ledger.balance_of(&BOB), 250);
        assert_eq!(ledger.total_supply(), 1_000);
        assert_supply_matches(&ledger);
    }

    #[test]
    fn transfer_of_whole_balance_empties_sender() {
        let mut ledger = ledger_with(1_000);
        ledger.transfer_internal(&ALICE, &BOB, 1_000).unwrap();

        assert_eq!(ledger.balance_of(&ALICE), 0);
        assert_eq!(ledger.store().accounts().collect::<Vec<_>>(), vec![(&BOB, &1_000)]);
    }

    #[test]
    fn failed_transfer_touches_neither_account() {
        let mut ledger = ledger_with(1_000);
        let before = ledger.store().clone();

        assert_eq!(
            ledger.transfer_internal(&ALICE, &BOB, 1_001),
            Err(LedgerError::InsufficientBalance)
        );
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn transfer_into_full_account_overflows() {
        let mut ledger = ledger_with(1_000);
        // Bypass the supply to place a receiver at the limit.
        ledger.credit(&BOB, Balance::MAX).unwrap();
        let before = ledger.store().clone();

        assert_eq!(ledger.transfer_internal(&ALICE, &BOB, 1), Err(LedgerError::Overflow));
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn self_transfer_is_a_checked_no_op() {
        let mut ledger = ledger_with(1_000);
        let before = ledger.store().clone();

        ledger.transfer_internal(&ALICE, &ALICE, 1_000).unwrap();
        assert_eq!(ledger.store(), &before);

        assert_eq!(
            ledger.transfer_internal(&ALICE, &ALICE, 1_001),
            Err(LedgerError::InsufficientBalance)
        );
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn mint_then_burn_round_trips() {
        let mut ledger = ledger_with(1_000);
        let before = ledger.store().clone();

        ledger.mint(&BOB, 777).unwrap();
        ledger.burn(&BOB, 777).unwrap();
        assert_eq!(ledger.store(), &before);
    }

    #[test]
    fn zero_amounts_are_accepted_by_primitives() {
        let mut ledger = ledger_with(1_000);
        ledger.mint(&BOB, 0).unwrap();
        ledger.transfer_internal(&ALICE, &BOB, 0).unwrap();
        ledger.burn(&ALICE, 0).unwrap();

        assert_eq!(ledger.balance_of(&ALICE), 1_000);
        assert_eq!(ledger.store().accounts().count(), 1);
        assert_supply_matches(&ledger);
    }

    #[test]
    fn empty_changeset_for_self_transfer() {
        let ledger = ledger_with(10);
        assert!(ledger.plan_transfer(&ALICE, &ALICE, 10).unwrap().is_empty());
        assert!(!ledger.plan_transfer(&ALICE, &BOB, 10).unwrap().is_empty());
    }
}
