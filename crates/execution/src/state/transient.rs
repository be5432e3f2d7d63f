use ethrex_exec_core::{Address, StorageSlot, StorageValue};

use crate::state::journal::JournaledMap;

/// EIP-1153 transient storage: same scoping as [`crate::state::WorldState`] storage, but
/// with no account dependency, and unconditionally cleared at the start of every
/// transaction regardless of whether the previous transaction committed or rolled back.
#[derive(Debug, Default)]
pub struct TransientStorage {
    values: JournaledMap<(Address, StorageSlot), StorageValue>,
}

impl TransientStorage {
    pub fn get(&self, address: Address, slot: StorageSlot) -> StorageValue {
        self.values.get(&(address, slot)).copied().unwrap_or_default()
    }

    pub fn set(&mut self, address: Address, slot: StorageSlot, value: StorageValue) {
        self.values.set((address, slot), value);
    }

    /// Drops all values and all open scopes. Called by the environment builder before
    /// every transaction; not itself subject to commit/rollback.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin_scope(&mut self) {
        self.values.begin_scope();
    }

    pub(crate) fn commit_scope(&mut self) {
        self.values.commit_scope();
    }

    pub(crate) fn rollback_scope(&mut self) {
        self.values.rollback_scope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_regardless_of_open_scopes() {
        let mut ts = TransientStorage::default();
        ts.begin_scope();
        ts.set(Address::zero(), StorageSlot::zero(), StorageValue::from(7));
        ts.clear();
        assert_eq!(ts.get(Address::zero(), StorageSlot::zero()), StorageValue::zero());
    }
}
