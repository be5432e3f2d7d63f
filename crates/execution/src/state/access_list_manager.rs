use ethrex_exec_core::{Address, StorageSlot};

use crate::access_list::AccessListSet;
use crate::state::journal::JournaledMap;

/// Runtime warm/cold tracking for EIP-2929, seeded from [`crate::access_list::build`]'s
/// output at the start of a transaction and mutated by the interpreter as it runs (§4.8).
/// Scoped identically to [`crate::state::WorldState`].
#[derive(Debug, Default)]
pub struct AccessListManager {
    warm_addresses: JournaledMap<Address, ()>,
    warm_slots: JournaledMap<(Address, StorageSlot), ()>,
}

impl AccessListManager {
    pub fn seed(&mut self, initial: &AccessListSet) {
        for address in &initial.addresses {
            self.warm_addresses.set(*address, ());
        }
        for key in &initial.storage_keys {
            self.warm_slots.set(*key, ());
        }
    }

    pub fn warm_address(&mut self, address: Address) {
        self.warm_addresses.set(address, ());
    }

    pub fn warm_slot(&mut self, address: Address, slot: StorageSlot) {
        self.warm_slots.set((address, slot), ());
    }

    pub fn is_address_warm(&self, address: Address) -> bool {
        self.warm_addresses.get(&address).is_some()
    }

    pub fn is_slot_warm(&self, address: Address, slot: StorageSlot) -> bool {
        self.warm_slots.get(&(address, slot)).is_some()
    }

    pub(crate) fn begin_scope(&mut self) {
        self.warm_addresses.begin_scope();
        self.warm_slots.begin_scope();
    }

    pub(crate) fn commit_scope(&mut self) {
        self.warm_addresses.commit_scope();
        self.warm_slots.commit_scope();
    }

    pub(crate) fn rollback_scope(&mut self) {
        self.warm_addresses.rollback_scope();
        self.warm_slots.rollback_scope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warming_is_scoped_like_storage() {
        let mut manager = AccessListManager::default();
        let address = Address::from_low_u64_be(1);

        manager.begin_scope();
        manager.warm_address(address);
        assert!(manager.is_address_warm(address));
        manager.rollback_scope();
        assert!(!manager.is_address_warm(address));
    }
}
