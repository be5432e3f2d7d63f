use std::collections::HashSet;

use ethrex_exec_core::{Address, StorageSlot, Transaction};

use crate::errors::VMError;
use crate::hardfork::ReleaseSpec;

/// Prewarm set computed ahead of execution (§4.2): no duplicate addresses, no duplicate
/// `(address, slot)` pairs. Insertion order is not observable — callers that need a stable
/// order should sort the drained vectors themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessListSet {
    pub addresses: HashSet<Address>,
    pub storage_keys: HashSet<(Address, StorageSlot)>,
}

fn tx_carries_access_list(tx: &Transaction) -> bool {
    matches!(
        tx,
        Transaction::EIP2930(_) | Transaction::EIP1559(_) | Transaction::EIP4844(_) | Transaction::EIP7702(_)
    )
}

/// Computes the prewarm set from the transaction's declared access list plus, when
/// `is_eip3651_enabled` (EIP-3651), the coinbase address. Reads the flag off the
/// `ReleaseSpec` passed in — never off a global default — matching the EIP-3651 text.
pub fn build(tx: &Transaction, coinbase: Address, spec: &ReleaseSpec) -> Result<AccessListSet, VMError> {
    if tx_carries_access_list(tx) && !spec.is_eip2930_enabled {
        return Err(VMError::UnsupportedAccessListFeature);
    }

    let mut set = AccessListSet::default();
    for entry in tx.access_list() {
        set.addresses.insert(entry.address);
        for slot in &entry.storage_keys {
            set.storage_keys.insert((entry.address, *slot));
        }
    }

    if spec.is_eip3651_enabled {
        set.addresses.insert(coinbase);
    }

    Ok(set)
}
