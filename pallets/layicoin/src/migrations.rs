//! Storage migrations for pallet-layicoin.
//!
//! Each migration checks the on-chain storage version first, so it runs at most
//! once and is safe to leave wired into the runtime's `Executive` after it has
//! been applied:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     pallet_layicoin::migrations::v1::MigrateToV1<Runtime>,
//! >;
//! ```

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::{marker::PhantomData, vec::Vec};

use crate::{Balance, Balances, Config, Pallet, TotalSupply, LOG_TARGET};

/// Version 0 stored balances without a trustworthy supply counter.
pub mod v1 {
    use super::*;

    /// Recomputes `TotalSupply` from the balance map and drops empty balance
    /// entries, then marks storage as version 1.
    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            if on_chain_version >= 1 {
                log::info!(
                    target: LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );
                return T::DbWeight::get().reads(1);
            }

            let mut reads: u64 = 2;
            // `None` once the balances no longer fit in a `Balance`.
            let mut sum: Option<Balance> = Some(0);
            let mut empty: Vec<T::AccountId> = Vec::new();
            for (who, balance) in Balances::<T>::iter() {
                reads = reads.saturating_add(1);
                if balance == 0 {
                    empty.push(who);
                } else {
                    sum = sum.and_then(|s| s.checked_add(balance));
                }
            }

            for who in &empty {
                Balances::<T>::remove(who);
            }
            let mut writes = 1u64.saturating_add(empty.len() as u64);

            let recorded = TotalSupply::<T>::get();
            match sum {
                Some(sum) => {
                    if recorded != sum {
                        log::warn!(
                            target: LOG_TARGET,
                            "Total supply {recorded} did not match balances {sum}; corrected"
                        );
                    }
                    TotalSupply::<T>::put(sum);
                    writes = writes.saturating_add(1);
                },
                None => log::error!(
                    target: LOG_TARGET,
                    "Balances overflow the supply counter; total supply {recorded} left as is"
                ),
            }

            StorageVersion::new(1).put::<Pallet<T>>();
            log::info!(target: LOG_TARGET, "Migrated storage v0 -> v1");

            T::DbWeight::get().reads_writes(reads, writes)
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            log::info!(
                target: LOG_TARGET,
                "Pre-upgrade: on-chain storage version is {:?}",
                on_chain_version
            );
            Ok(on_chain_version.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let pre_version: u16 = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;

            frame_support::ensure!(
                Pallet::<T>::on_chain_storage_version() >= 1,
                sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
            );
            if pre_version < 1 {
                Pallet::<T>::do_try_state()?;
            }
            Ok(())
        }
    }
}
