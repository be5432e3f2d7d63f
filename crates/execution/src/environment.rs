use ethereum_types::U256;
use ethrex_exec_core::{Address, Hash, StorageSlot, Transaction};

use crate::access_list;
use crate::errors::VMError;
use crate::hardfork::ReleaseSpec;
use crate::intrinsic_gas::intrinsic_gas;
use crate::state::{AccessListManager, TransientStorage};

/// Per-transaction execution environment handed to the EvmExecutor (§3, §4.10). Built once
/// by [`TransactionEnvironmentBuilder::build`] and immutable afterward.
#[derive(Debug, Clone)]
pub struct TransactionEnvironment {
    pub origin: Address,
    pub gas_price: U256,
    pub gas: U256,
    pub access_list_addresses: Vec<Address>,
    pub access_list_storage_keys: Vec<(Address, StorageSlot)>,
    pub blob_versioned_hashes: Vec<Hash>,
    pub index_in_block: Option<u64>,
    pub tx_hash: Option<Hash>,
}

/// Assembles a [`TransactionEnvironment`] from a transaction and its surrounding block
/// context (§4.10), delegating to [`IntrinsicGasCalculator`](crate::intrinsic_gas) and
/// [`AccessListBuilder`](crate::access_list) rather than duplicating their logic.
pub struct TransactionEnvironmentBuilder<'a> {
    pub tx: &'a Transaction,
    pub origin: Address,
    pub coinbase: Address,
    pub gas_price: U256,
    pub index_in_block: Option<u64>,
    pub tx_hash: Option<Hash>,
}

impl<'a> TransactionEnvironmentBuilder<'a> {
    pub fn build(
        self,
        spec: &ReleaseSpec,
        transient_storage: &mut TransientStorage,
        access_list_manager: &mut AccessListManager,
    ) -> Result<TransactionEnvironment, VMError> {
        let (intrinsic_gas, calldata_floor_gas) = intrinsic_gas(self.tx);
        let floor = intrinsic_gas.max(calldata_floor_gas);

        let access_list = access_list::build(self.tx, self.coinbase, spec)?;
        access_list_manager.seed(&access_list);

        let gas_limit = U256::from(self.tx.gas_limit());
        if gas_limit < floor {
            return Err(VMError::InsufficientTransactionGas);
        }
        let gas = gas_limit.checked_sub(intrinsic_gas).ok_or(VMError::InsufficientTransactionGas)?;

        transient_storage.clear();

        Ok(TransactionEnvironment {
            origin: self.origin,
            gas_price: self.gas_price,
            gas,
            access_list_addresses: access_list.addresses.into_iter().collect(),
            access_list_storage_keys: access_list.storage_keys.into_iter().collect(),
            blob_versioned_hashes: self.tx.blob_versioned_hashes().to_vec(),
            index_in_block: self.index_in_block,
            tx_hash: self.tx_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardfork::Hardfork;
    use bytes::Bytes;
    use ethrex_exec_core::{LegacyTransaction, TxKind};

    #[test]
    fn builds_environment_and_subtracts_intrinsic_gas_from_gas_limit() {
        let tx = Transaction::Legacy(LegacyTransaction {
            gas_limit: 100_000,
            to: TxKind::Call(Address::zero()),
            data: Bytes::new(),
            ..Default::default()
        });
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut transient_storage = TransientStorage::default();
        transient_storage.set(Address::zero(), StorageSlot::zero(), U256::from(7));
        let mut access_list_manager = AccessListManager::default();

        let builder = TransactionEnvironmentBuilder {
            tx: &tx,
            origin: Address::from_low_u64_be(1),
            coinbase: Address::from_low_u64_be(2),
            gas_price: U256::from(10),
            index_in_block: Some(0),
            tx_hash: None,
        };
        let env = builder
            .build(&spec, &mut transient_storage, &mut access_list_manager)
            .unwrap();

        assert_eq!(env.gas, U256::from(100_000 - 21_000));
        assert_eq!(transient_storage.get(Address::zero(), StorageSlot::zero()), U256::zero());
        assert!(access_list_manager.is_address_warm(Address::from_low_u64_be(2)));
    }

    #[test]
    fn rejects_gas_limit_below_intrinsic_gas() {
        let tx = Transaction::Legacy(LegacyTransaction {
            gas_limit: 1,
            to: TxKind::Call(Address::zero()),
            data: Bytes::new(),
            ..Default::default()
        });
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut transient_storage = TransientStorage::default();
        let mut access_list_manager = AccessListManager::default();
        let builder = TransactionEnvironmentBuilder {
            tx: &tx,
            origin: Address::zero(),
            coinbase: Address::zero(),
            gas_price: U256::zero(),
            index_in_block: None,
            tx_hash: None,
        };
        assert_eq!(
            builder.build(&spec, &mut transient_storage, &mut access_list_manager),
            Err(VMError::InsufficientTransactionGas)
        );
    }
}
