use bytes::Bytes;
use ethrex_exec_core::{code_hash as compute_code_hash, Address, AccountState, StorageSlot, StorageValue};

use crate::errors::VMError;
use crate::state::journal::JournaledMap;

/// In-memory address → account-state view, plus per-account storage and code, each
/// independently journaled (§3 `WorldState`). Trie construction is out of scope: `storage_root`
/// is carried opaquely and left at its default for accounts created in memory.
#[derive(Debug, Default)]
pub struct WorldState {
    accounts: JournaledMap<Address, AccountState>,
    storage: JournaledMap<(Address, StorageSlot), StorageValue>,
    code: JournaledMap<Address, Bytes>,
    created_accounts: JournaledMap<Address, ()>,
    selfdestructed: JournaledMap<Address, ()>,
    touched: JournaledMap<Address, ()>,
}

impl WorldState {
    pub fn get_account(&self, address: Address) -> AccountState {
        self.accounts.get(&address).cloned().unwrap_or_default()
    }

    pub fn get_account_optional(&self, address: Address) -> Option<AccountState> {
        self.accounts.get(&address).cloned()
    }

    pub fn set_account(&mut self, address: Address, state: AccountState) {
        self.accounts.set(address, state);
        self.touched.set(address, ());
    }

    /// Removes the account and all of its storage and code. Storage keys are dropped via
    /// `JournaledMap::remove`, which still journals the pre-image for rollback.
    pub fn destroy_account(&mut self, address: Address) {
        self.accounts.remove(&address);
        self.code.remove(&address);
        self.selfdestructed.set(address, ());
    }

    pub fn mark_created(&mut self, address: Address) {
        self.created_accounts.set(address, ());
    }

    pub fn is_created_this_block(&self, address: Address) -> bool {
        self.created_accounts.get(&address).is_some()
    }

    pub fn get_code(&self, address: Address) -> Bytes {
        self.code.get(&address).cloned().unwrap_or_default()
    }

    /// Updates the owning account's `code_hash` atomically with the code write. Empty
    /// bytes deletes code and resets the account to the canonical empty-code hash.
    pub fn set_code(&mut self, address: Address, code: Bytes) {
        let mut account = self.get_account(address);
        account.code_hash = compute_code_hash(&code);
        if code.is_empty() {
            self.code.remove(&address);
        } else {
            self.code.set(address, code);
        }
        self.set_account(address, account);
    }

    pub fn get_storage(&self, address: Address, slot: StorageSlot) -> StorageValue {
        if self.accounts.get(&address).is_none() {
            return StorageValue::zero();
        }
        self.storage.get(&(address, slot)).copied().unwrap_or_default()
    }

    pub fn set_storage(
        &mut self,
        address: Address,
        slot: StorageSlot,
        value: StorageValue,
    ) -> Result<(), VMError> {
        if self.accounts.get(&address).is_none() {
            return Err(VMError::MissingAccount(address));
        }
        self.storage.set((address, slot), value);
        Ok(())
    }

    pub fn is_selfdestructed(&self, address: Address) -> bool {
        self.selfdestructed.get(&address).is_some()
    }

    pub fn is_touched(&self, address: Address) -> bool {
        self.touched.get(&address).is_some()
    }

    pub(crate) fn begin_scope(&mut self) {
        self.accounts.begin_scope();
        self.storage.begin_scope();
        self.code.begin_scope();
        self.created_accounts.begin_scope();
        self.selfdestructed.begin_scope();
        self.touched.begin_scope();
    }

    pub(crate) fn commit_scope(&mut self) {
        self.accounts.commit_scope();
        self.storage.commit_scope();
        self.code.commit_scope();
        self.created_accounts.commit_scope();
        self.selfdestructed.commit_scope();
        self.touched.commit_scope();
    }

    pub(crate) fn rollback_scope(&mut self) {
        self.accounts.rollback_scope();
        self.storage.rollback_scope();
        self.code.rollback_scope();
        self.created_accounts.rollback_scope();
        self.selfdestructed.rollback_scope();
        self.touched.rollback_scope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::U256;

    #[test]
    fn reading_storage_of_missing_account_is_zero() {
        let state = WorldState::default();
        assert_eq!(
            state.get_storage(Address::zero(), StorageSlot::zero()),
            StorageValue::zero()
        );
    }

    #[test]
    fn set_storage_on_missing_account_fails() {
        let mut state = WorldState::default();
        let result = state.set_storage(Address::zero(), StorageSlot::zero(), U256::one());
        assert_eq!(result, Err(VMError::MissingAccount(Address::zero())));
    }

    #[test]
    fn setting_code_updates_code_hash_atomically() {
        let mut state = WorldState::default();
        let address = Address::from_low_u64_be(1);
        state.set_account(address, AccountState::default());
        state.set_code(address, Bytes::from_static(b"abc"));
        let account = state.get_account(address);
        assert_eq!(account.code_hash, keccak_hash::keccak(b"abc".as_ref()));
        assert_eq!(state.get_code(address), Bytes::from_static(b"abc"));
    }
}
