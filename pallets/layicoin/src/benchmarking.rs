//! Benchmarking setup for pallet-layicoin

use super::*;

#[allow(unused)]
use crate::Pallet as Layicoin;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

const SEED: u32 = 0;

fn fund<T: Config>(who: &T::AccountId, amount: Balance) {
    Pallet::<T>::ledger().mint(who, amount).expect("Benchmark funding fits");
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, SEED);
        let amount: Balance = 1_000_000;
        fund::<T>(&caller, 10 * amount);
        let memo: Memo<T> = sp_std::vec![0u8; T::MaxMemoLength::get() as usize]
            .try_into()
            .expect("Memo sized to the bound");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), amount, caller.clone(), recipient.clone(), Some(memo));

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn mint() {
        let owner: T::AccountId = account("owner", 0, SEED);
        let recipient: T::AccountId = account("recipient", 0, SEED);
        let amount: Balance = 1_000_000;
        Owner::<T>::put(&owner);
        let supply = TotalSupply::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), amount, recipient.clone());

        assert_eq!(Balances::<T>::get(&recipient), amount);
        assert_eq!(TotalSupply::<T>::get(), supply + amount);
    }

    #[benchmark]
    fn burn() {
        let holder: T::AccountId = whitelisted_caller();
        let amount: Balance = 1_000_000;
        fund::<T>(&holder, 10 * amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(holder.clone()), amount, holder.clone());

        assert_eq!(Balances::<T>::get(&holder), 9 * amount);
    }

    impl_benchmark_test_suite!(Layicoin, crate::mock::new_test_ext(), crate::mock::Test);
}
