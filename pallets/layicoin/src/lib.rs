#![cfg_attr(not(feature = "std"), no_std)]
// The pallet-level `RuntimeEvent` associated type is deprecated upstream but still required here.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Layicoin
//!
//! A single fungible token with fixed metadata, an immutable owner and a
//! mutable total supply. Holders move their own funds with `transfer`, the
//! owner creates supply with `mint`, and holders destroy their own funds with
//! `burn`.
//!
//! Balance bookkeeping lives in [`ledger`], caller checks in [`auth`]. The
//! dispatchables here only glue the two together and emit events.

use frame_support::{dispatch::DispatchResult, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::{DispatchError, ModuleError};
use sp_std::prelude::*;

pub use pallet::*;

pub mod auth;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod weights;

pub use error::LedgerError;
pub use ledger::{Balance, Ledger, LedgerStore, MemoryStore, PalletStore};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "pallet-layicoin";

pub const TOKEN_NAME: &[u8] = b"Layicoin";
pub const TOKEN_SYMBOL: &[u8] = b"LAYI";
pub const TOKEN_DECIMALS: u8 = 6;
/// One million whole tokens, in base units.
pub const INITIAL_SUPPLY: Balance = 1_000_000_000_000;

/// Opaque transfer memo. Emitted with the transfer event, never stored.
pub type Memo<T> = BoundedVec<u8, <T as Config>::MaxMemoLength>;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Longest memo accepted by `transfer`, in bytes.
        #[pallet::constant]
        type MaxMemoLength: Get<u32>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name, set at genesis.
    #[pallet::storage]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol, set at genesis.
    #[pallet::storage]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Number of decimal places of one whole token.
    #[pallet::storage]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// The only account allowed to mint. Written once, at genesis.
    #[pallet::storage]
    pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Sum of all balances.
    #[pallet::storage]
    pub type TotalSupply<T> = StorageValue<_, Balance, ValueQuery>;

    /// Account balances. Accounts holding nothing have no entry.
    #[pallet::storage]
    pub type Balances<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens moved between accounts
        Transferred {
            from: T::AccountId,
            to: T::AccountId,
            amount: Balance,
            memo: Option<Memo<T>>,
        },
        /// New tokens minted
        Minted { to: T::AccountId, amount: Balance },
        /// Tokens destroyed
        Burned { from: T::AccountId, amount: Balance },
    }

    /// Variant order follows the numeric codes of [`LedgerError`] (100 + index).
    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the token owner (100).
        OwnerOnly,
        /// Caller does not hold the source account (101).
        NotTokenOwner,
        /// Source account balance is too low (102).
        InsufficientBalance,
        /// Amount must be greater than zero (103).
        InvalidAmount,
        /// Balance or total supply would overflow (104).
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Move `amount` from `from` to `to`. The signer must be `from`.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(
            origin: OriginFor<T>,
            amount: Balance,
            from: T::AccountId,
            to: T::AccountId,
            memo: Option<Memo<T>>,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_transfer(&caller, amount, from, to, memo)
        }

        /// Create `amount` new tokens for `recipient`. Owner only.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(
            origin: OriginFor<T>,
            amount: Balance,
            recipient: T::AccountId,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_mint(&caller, amount, recipient)
        }

        /// Destroy `amount` of `holder`'s tokens. The signer must be `holder`.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, amount: Balance, holder: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_burn(&caller, amount, holder)
        }
    }

    #[pallet::genesis_config]
    pub struct GenesisConfig<T: Config> {
        /// Owner account, the only minter
        pub owner: Option<T::AccountId>,
        /// Receives `initial_supply`; falls back to `owner`
        pub initial_holder: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Supply minted at genesis, in base units
        pub initial_supply: Balance,
    }

    /// Layicoin metadata with no owner and nothing minted. Chain specs set
    /// `owner` and `initial_supply` (usually [`INITIAL_SUPPLY`]) explicitly.
    impl<T: Config> Default for GenesisConfig<T> {
        fn default() -> Self {
            Self {
                owner: None,
                initial_holder: None,
                token_name: TOKEN_NAME.to_vec(),
                token_symbol: TOKEN_SYMBOL.to_vec(),
                decimals: TOKEN_DECIMALS,
                initial_supply: 0,
            }
        }
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            if let Some(ref owner) = self.owner {
                Owner::<T>::put(owner);
            }

            let holder = self.initial_holder.as_ref().or(self.owner.as_ref());
            let minted = match holder {
                Some(holder) if self.initial_supply > 0 => {
                    Pallet::<T>::ledger()
                        .mint(holder, self.initial_supply)
                        .expect("Initial supply fits in an empty ledger");
                    self.initial_supply
                },
                None if self.initial_supply > 0 => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Genesis: no owner or initial holder, skipping {} base units",
                        self.initial_supply
                    );
                    0
                },
                _ => 0,
            };

            log::info!(
                target: LOG_TARGET,
                "Genesis: {} base units minted, owner set: {}",
                minted,
                self.owner.is_some()
            );
        }
    }
}

impl<T: Config> From<LedgerError> for Error<T> {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OwnerOnly => Error::OwnerOnly,
            LedgerError::NotTokenOwner => Error::NotTokenOwner,
            LedgerError::InsufficientBalance => Error::InsufficientBalance,
            LedgerError::InvalidAmount => Error::InvalidAmount,
            LedgerError::Overflow => Error::Overflow,
        }
    }
}

impl<T: Config> Pallet<T> {
    /// The ledger over this pallet's storage.
    pub fn ledger() -> Ledger<PalletStore<T>> {
        Ledger::new(PalletStore::default())
    }

    /// Transfer on behalf of `caller`, who must be `from`.
    pub fn do_transfer(
        caller: &T::AccountId,
        amount: Balance,
        from: T::AccountId,
        to: T::AccountId,
        memo: Option<Memo<T>>,
    ) -> DispatchResult {
        auth::ensure_positive(amount).map_err(Self::reject)?;
        auth::ensure_account_holder(caller, &from).map_err(Self::reject)?;

        Self::ledger().transfer_internal(&from, &to, amount).map_err(Self::reject)?;

        log::debug!(target: LOG_TARGET, "Transferred {amount} from {from:?} to {to:?}");
        Self::deposit_event(Event::Transferred { from, to, amount, memo });
        Ok(())
    }

    /// Mint on behalf of `caller`, who must be the owner.
    pub fn do_mint(
        caller: &T::AccountId,
        amount: Balance,
        recipient: T::AccountId,
    ) -> DispatchResult {
        let owner = Owner::<T>::get();
        auth::ensure_owner(caller, owner.as_ref()).map_err(Self::reject)?;
        auth::ensure_positive(amount).map_err(Self::reject)?;

        Self::ledger().mint(&recipient, amount).map_err(Self::reject)?;

        log::debug!(target: LOG_TARGET, "Minted {amount} to {recipient:?}");
        Self::deposit_event(Event::Minted { to: recipient, amount });
        Ok(())
    }

    /// Burn on behalf of `caller`, who must be `holder`.
    pub fn do_burn(caller: &T::AccountId, amount: Balance, holder: T::AccountId) -> DispatchResult {
        auth::ensure_account_holder(caller, &holder).map_err(Self::reject)?;
        auth::ensure_positive(amount).map_err(Self::reject)?;

        Self::ledger().burn(&holder, amount).map_err(Self::reject)?;

        log::debug!(target: LOG_TARGET, "Burned {amount} from {holder:?}");
        Self::deposit_event(Event::Burned { from: holder, amount });
        Ok(())
    }

    fn reject(err: LedgerError) -> DispatchError {
        log::debug!(target: LOG_TARGET, "Rejected: {err}");
        Error::<T>::from(err).into()
    }

    pub fn get_name() -> Vec<u8> {
        TokenName::<T>::get().into_inner()
    }

    pub fn get_symbol() -> Vec<u8> {
        TokenSymbol::<T>::get().into_inner()
    }

    pub fn get_decimals() -> u8 {
        Decimals::<T>::get()
    }

    pub fn get_balance(who: &T::AccountId) -> Balance {
        Self::ledger().balance_of(who)
    }

    pub fn get_total_supply() -> Balance {
        Self::ledger().total_supply()
    }

    pub fn owner() -> Option<T::AccountId> {
        Owner::<T>::get()
    }

    /// Numeric ledger code of a dispatch error raised by this pallet.
    pub fn error_code(err: &DispatchError) -> Option<u32> {
        let index = <Self as PalletInfoAccess>::index() as u8;
        match err {
            DispatchError::Module(ModuleError { index: module, error, .. }) if *module == index => {
                let code = 100 + u32::from(error[0]);
                LedgerError::try_from(code).ok().map(LedgerError::code)
            },
            _ => None,
        }
    }

    /// Checks that the supply equals the sum of balances and that no empty
    /// balance entry is stored.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let mut sum: Balance = 0;
        for (_, balance) in Balances::<T>::iter() {
            frame_support::ensure!(balance > 0, "Zero balance stored");
            sum = sum.checked_add(balance).ok_or("Sum of balances overflows")?;
        }
        frame_support::ensure!(
            sum == TotalSupply::<T>::get(),
            "Total supply differs from sum of balances"
        );
        Ok(())
    }
}
