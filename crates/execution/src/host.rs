use bytes::Bytes;
use ethereum_types::U256;
use ethrex_exec_core::{Address, StorageSlot, StorageValue};

use crate::errors::VMError;
use crate::state::{TransientStorage, WorldState};

/// Narrow vtable the interpreter uses for external state (§4.7). Deliberately minimal:
/// nested calls are handled inside the interpreter against its own journal, and this is
/// only the bridge to committed world state, so every mutation here participates in
/// whatever [`crate::state::ExecutionContext`] scope is active when it's called.
pub trait HostAdapter {
    fn get_balance(&self, address: Address) -> U256;
    fn set_balance(&mut self, address: Address, balance: U256);
    fn get_nonce(&self, address: Address) -> u64;
    fn set_nonce(&mut self, address: Address, nonce: u64);
    fn get_code(&self, address: Address) -> Bytes;
    fn set_code(&mut self, address: Address, code: Bytes);
    fn get_storage(&self, address: Address, slot: StorageSlot) -> StorageValue;
    fn set_storage(&mut self, address: Address, slot: StorageSlot, value: StorageValue) -> Result<(), VMError>;
    fn get_transient_storage(&self, address: Address, slot: StorageSlot) -> StorageValue;
    fn set_transient_storage(&mut self, address: Address, slot: StorageSlot, value: StorageValue);
}

/// The only production [`HostAdapter`]: a thin wrapper over [`WorldState`] and
/// [`TransientStorage`] so every host call routes through the journal, EIP-1153 storage
/// included.
pub struct WorldStateHost<'a> {
    world_state: &'a mut WorldState,
    transient_storage: &'a mut TransientStorage,
}

impl<'a> WorldStateHost<'a> {
    pub fn new(world_state: &'a mut WorldState, transient_storage: &'a mut TransientStorage) -> Self {
        Self {
            world_state,
            transient_storage,
        }
    }
}

impl HostAdapter for WorldStateHost<'_> {
    fn get_balance(&self, address: Address) -> U256 {
        self.world_state.get_account(address).balance
    }

    fn set_balance(&mut self, address: Address, balance: U256) {
        let mut account = self.world_state.get_account(address);
        account.balance = balance;
        self.world_state.set_account(address, account);
    }

    fn get_nonce(&self, address: Address) -> u64 {
        self.world_state.get_account(address).nonce
    }

    fn set_nonce(&mut self, address: Address, nonce: u64) {
        let mut account = self.world_state.get_account(address);
        account.nonce = nonce;
        self.world_state.set_account(address, account);
    }

    fn get_code(&self, address: Address) -> Bytes {
        self.world_state.get_code(address)
    }

    fn set_code(&mut self, address: Address, code: Bytes) {
        self.world_state.set_code(address, code);
    }

    fn get_storage(&self, address: Address, slot: StorageSlot) -> StorageValue {
        self.world_state.get_storage(address, slot)
    }

    fn set_storage(&mut self, address: Address, slot: StorageSlot, value: StorageValue) -> Result<(), VMError> {
        self.world_state.set_storage(address, slot, value)
    }

    fn get_transient_storage(&self, address: Address, slot: StorageSlot) -> StorageValue {
        self.transient_storage.get(address, slot)
    }

    fn set_transient_storage(&mut self, address: Address, slot: StorageSlot, value: StorageValue) {
        self.transient_storage.set(address, slot, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_round_trips_through_world_state() {
        let mut world_state = WorldState::default();
        let mut transient_storage = TransientStorage::default();
        let address = Address::from_low_u64_be(1);
        world_state.set_account(address, Default::default());
        let mut host = WorldStateHost::new(&mut world_state, &mut transient_storage);
        host.set_balance(address, U256::from(100));
        assert_eq!(host.get_balance(address), U256::from(100));
    }

    #[test]
    fn transient_storage_round_trips_and_stays_separate_from_world_state_storage() {
        let mut world_state = WorldState::default();
        let mut transient_storage = TransientStorage::default();
        let address = Address::from_low_u64_be(1);
        let slot = StorageSlot::zero();
        world_state.set_account(address, Default::default());
        let mut host = WorldStateHost::new(&mut world_state, &mut transient_storage);

        host.set_transient_storage(address, slot, StorageValue::from(42));
        assert_eq!(host.get_transient_storage(address, slot), StorageValue::from(42));
        assert_eq!(host.get_storage(address, slot), StorageValue::zero());
    }
}
