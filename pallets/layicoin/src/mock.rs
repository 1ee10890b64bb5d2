use crate as pallet_layicoin;
use frame_support::{derive_impl, parameter_types};
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Layicoin: pallet_layicoin,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

/// Deploys the token and owns it.
pub const DEPLOYER: u64 = 1;
pub const WALLET_1: u64 = 2;
pub const WALLET_2: u64 = 3;

parameter_types! {
    pub const MaxMemoLength: u32 = 34;
}

impl pallet_layicoin::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type MaxMemoLength = MaxMemoLength;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_layicoin::GenesisConfig::<Test> {
        owner: Some(DEPLOYER),
        initial_supply: pallet_layicoin::INITIAL_SUPPLY,
        ..Default::default()
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
