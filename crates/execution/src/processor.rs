use bytes::Bytes;
use ethereum_types::U256;
use ethrex_exec_core::{Address, Hash, Log, Transaction};

use crate::constants::{
    BLOB_VERSIONED_HASH_VERSION, DELEGATION_DESIGNATION_LEN, DELEGATION_DESIGNATION_PREFIX,
    GAS_PER_BLOB,
};
use crate::environment::TransactionEnvironmentBuilder;
use crate::errors::VMError;
use crate::evm::{CallFrameSpec, EvmExecutor};
use crate::fee::effective_gas_price;
use crate::gas_accounting::{self, GasAccountingInput};
use crate::hardfork::ReleaseSpec;
use crate::host::WorldStateHost;
use crate::state::ExecutionContext;

/// Block-level context consumed from the collaborator that owns block assembly/validation
/// (§6 "Consumed from collaborators"). Not owned by this crate.
#[derive(Clone, Debug)]
pub struct BlockContext {
    pub coinbase: Address,
    pub base_fee_per_gas: U256,
    pub blob_gas_price: U256,
    pub block_gas_limit: U256,
    pub block_gas_used: U256,
    pub max_blob_gas_per_block: U256,
    pub block_blob_gas_used: U256,
}

/// Everything a caller supplies for one transaction (§6).
#[derive(Clone, Debug)]
pub struct ProcessTransactionInput<'a> {
    pub tx: &'a Transaction,
    pub sender: Address,
    pub index_in_block: Option<u64>,
    pub tx_hash: Option<Hash>,
}

/// Output of §4.11.8, accumulated by the block processor across a block's transactions.
#[derive(Clone, Debug)]
pub struct FinalizedTransactionExecution {
    pub gas_used_before_refund: U256,
    pub claimable_refund: U256,
    pub gas_used_after_refund: U256,
    pub sender_balance_delta: U256,
    pub coinbase_balance_delta: U256,
    pub priority_fee_per_gas: U256,
    pub logs: Vec<Log>,
    pub accounts_to_delete: Vec<Address>,
    pub block_gas_used_delta: U256,
    pub block_blob_gas_used_delta: U256,
}

/// Orchestrates the full per-transaction pipeline (§4.11) against an [`ExecutionContext`]
/// and an [`EvmExecutor`], in the strict order the state machine in §4.11 requires.
pub struct TransactionProcessor<'a, E: EvmExecutor> {
    pub ctx: &'a mut ExecutionContext,
    pub evm: &'a mut E,
    pub spec: ReleaseSpec,
}

impl<'a, E: EvmExecutor> TransactionProcessor<'a, E> {
    /// Runs `input` to completion under a fresh transaction boundary. On any failure the
    /// boundary rolls back and world state is left byte-identical to before this call.
    pub fn process_transaction(
        &mut self,
        input: ProcessTransactionInput<'_>,
        block: &BlockContext,
    ) -> Result<FinalizedTransactionExecution, VMError> {
        let _span = tracing::debug_span!(
            "process_transaction",
            index = ?input.index_in_block,
            tx_hash = ?input.tx_hash,
        )
        .entered();

        self.ctx.begin_transaction();
        match self.run(input, block) {
            Ok(result) => {
                self.ctx.commit_transaction()?;
                Ok(result)
            }
            Err(err) => {
                self.ctx.rollback_transaction()?;
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        input: ProcessTransactionInput<'_>,
        block: &BlockContext,
    ) -> Result<FinalizedTransactionExecution, VMError> {
        let tx = input.tx;

        // 4.11.1 fee calculation
        let (effective_gas_price, priority_fee_per_gas) =
            effective_gas_price(tx, block.base_fee_per_gas)?;

        let tx_blob_gas_used = U256::from(tx.blob_versioned_hashes().len())
            .checked_mul(U256::from(GAS_PER_BLOB))
            .ok_or(VMError::InvalidGas)?;

        // 4.11.2 max-fee & balance check
        self.check_max_gas_fee_and_balance(tx, input.sender, block)?;

        // 4.11.3 inclusion availability & sender code, run before any mutation
        self.check_inclusion_availability_and_sender_code(tx, input.sender, block, tx_blob_gas_used)?;

        // 4.11.4 buy gas and bump nonce
        let current_blob_gas_price = block.blob_gas_price;
        self.buy_gas_and_increment_nonce(
            tx,
            input.sender,
            effective_gas_price,
            current_blob_gas_price,
            tx_blob_gas_used,
        )?;

        // 4.11.6 execute
        let (_, calldata_floor_gas) = crate::intrinsic_gas::intrinsic_gas(tx);
        let env = TransactionEnvironmentBuilder {
            tx,
            origin: input.sender,
            coinbase: block.coinbase,
            gas_price: effective_gas_price,
            index_in_block: input.index_in_block,
            tx_hash: input.tx_hash,
        }
        .build(&self.spec, &mut self.ctx.transient_storage, &mut self.ctx.access_list)?;

        let call = CallFrameSpec {
            to: tx.to().unwrap_or(Address::zero()),
            input: tx.data().clone(),
            value: tx.value(),
            is_static: false,
        };

        let evm = &mut self.evm;
        let output = self.ctx.run_in_call_frame_boundary(|ctx| {
            evm.execute(
                &env,
                call,
                &mut WorldStateHost::new(&mut ctx.world_state, &mut ctx.transient_storage),
            )
        })?;

        // 4.11.7 settle
        let (accounting, sender_delta, coinbase_delta) = self.settle_post_execution_balances(
            tx,
            input.sender,
            block.coinbase,
            effective_gas_price,
            block.base_fee_per_gas,
            calldata_floor_gas,
            output.gas_left,
            output.refund_counter,
        )?;

        // 4.11.8 finalize
        for address in &output.accounts_to_delete {
            self.ctx.world_state.destroy_account(*address);
        }

        Ok(FinalizedTransactionExecution {
            gas_used_before_refund: accounting.gas_used_before_refund,
            claimable_refund: accounting.claimable_refund,
            gas_used_after_refund: accounting.gas_used_after_refund,
            sender_balance_delta: sender_delta,
            coinbase_balance_delta: coinbase_delta,
            priority_fee_per_gas,
            logs: output.logs,
            accounts_to_delete: output.accounts_to_delete,
            block_gas_used_delta: accounting.gas_used_after_refund,
            block_blob_gas_used_delta: tx_blob_gas_used,
        })
    }

    fn check_inclusion_availability_and_sender_code(
        &self,
        tx: &Transaction,
        sender: Address,
        block: &BlockContext,
        tx_blob_gas_used: U256,
    ) -> Result<bool, VMError> {
        let gas_limit = U256::from(tx.gas_limit());
        let remaining_block_gas = block
            .block_gas_limit
            .checked_sub(block.block_gas_used)
            .ok_or(VMError::BlockGasLimitExceeded)?;
        if gas_limit > remaining_block_gas {
            return Err(VMError::BlockGasLimitExceeded);
        }

        let remaining_blob_gas = block
            .max_blob_gas_per_block
            .checked_sub(block.block_blob_gas_used)
            .ok_or(VMError::BlockBlobGasLimitExceeded)?;
        if tx_blob_gas_used > remaining_blob_gas {
            return Err(VMError::BlockBlobGasLimitExceeded);
        }

        let sender_code = self.ctx.world_state.get_code(sender);
        let has_delegation_code = is_delegation_designation(&sender_code);
        if !sender_code.is_empty() && !has_delegation_code {
            return Err(VMError::InvalidSenderAccountCode);
        }
        Ok(has_delegation_code)
    }

    fn check_max_gas_fee_and_balance(
        &self,
        tx: &Transaction,
        sender: Address,
        block: &BlockContext,
    ) -> Result<(), VMError> {
        let per_gas_fee = match tx {
            Transaction::Legacy(_) | Transaction::EIP2930(_) => U256::from(tx.gas_price()),
            _ => U256::from(tx.max_fee_per_gas().ok_or(VMError::InvalidGasPrice)?),
        };
        let mut max_gas_fee = U256::from(tx.gas_limit())
            .checked_mul(per_gas_fee)
            .ok_or(VMError::InvalidGas)?;

        match tx {
            Transaction::EIP4844(eip4844) => {
                if tx.to().is_none() {
                    return Err(VMError::TransactionTypeContractCreation);
                }
                if eip4844.blob_versioned_hashes.is_empty() {
                    return Err(VMError::NoBlobData);
                }
                for (index, hash) in eip4844.blob_versioned_hashes.iter().enumerate() {
                    if hash.as_bytes().first() != Some(&BLOB_VERSIONED_HASH_VERSION) {
                        return Err(VMError::InvalidBlobVersionedHash(index));
                    }
                }
                if eip4844.max_fee_per_blob_gas < block.blob_gas_price {
                    return Err(VMError::InsufficientMaxFeePerBlobGas);
                }
                let blob_gas_used = U256::from(eip4844.blob_versioned_hashes.len())
                    .checked_mul(U256::from(GAS_PER_BLOB))
                    .ok_or(VMError::InvalidGas)?;
                let blob_gas_fee = blob_gas_used
                    .checked_mul(eip4844.max_fee_per_blob_gas)
                    .ok_or(VMError::InvalidGas)?;
                max_gas_fee = max_gas_fee.checked_add(blob_gas_fee).ok_or(VMError::InvalidGas)?;
            }
            Transaction::EIP7702(eip7702) => {
                if tx.to().is_none() {
                    return Err(VMError::TransactionTypeContractCreation);
                }
                if eip7702.authorization_list.is_empty() {
                    return Err(VMError::EmptyAuthorizationList);
                }
            }
            _ => {}
        }

        let required = max_gas_fee.checked_add(tx.value()).ok_or(VMError::InvalidBalance)?;
        let sender_balance = self.ctx.world_state.get_account(sender).balance;
        if sender_balance < required {
            return Err(VMError::InsufficientSenderBalance);
        }
        Ok(())
    }

    fn buy_gas_and_increment_nonce(
        &mut self,
        tx: &Transaction,
        sender: Address,
        effective_gas_price: U256,
        current_blob_gas_price: U256,
        tx_blob_gas_used: U256,
    ) -> Result<(), VMError> {
        let mut account = self.ctx.world_state.get_account(sender);
        if tx.nonce() < account.nonce {
            return Err(VMError::TransactionNonceTooLow);
        }
        if tx.nonce() > account.nonce {
            return Err(VMError::TransactionNonceTooHigh);
        }

        let gas_fee = U256::from(tx.gas_limit())
            .checked_mul(effective_gas_price)
            .ok_or(VMError::InvalidGas)?;
        let blob_fee = tx_blob_gas_used
            .checked_mul(current_blob_gas_price)
            .ok_or(VMError::InvalidGas)?;
        let precharge = gas_fee.checked_add(blob_fee).ok_or(VMError::InvalidGas)?;

        account.balance = account
            .balance
            .checked_sub(precharge)
            .ok_or(VMError::InsufficientSenderBalance)?;
        account.nonce = account.nonce.checked_add(1).ok_or(VMError::TransactionNonceTooHigh)?;
        self.ctx.world_state.set_account(sender, account);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn settle_post_execution_balances(
        &mut self,
        tx: &Transaction,
        sender: Address,
        coinbase: Address,
        effective_gas_price: U256,
        base_fee_per_gas: U256,
        calldata_floor_gas: U256,
        gas_left: U256,
        refund_counter: U256,
    ) -> Result<(gas_accounting::GasAccountingOutput, U256, U256), VMError> {
        let gas_limit = U256::from(tx.gas_limit());
        if gas_left > gas_limit {
            return Err(VMError::GasLeftExceedsGasLimit);
        }
        if calldata_floor_gas > gas_limit {
            return Err(VMError::CalldataFloorGasExceedsGasLimit);
        }

        let accounting = gas_accounting::compute(
            GasAccountingInput {
                gas_limit,
                gas_left,
                refund_counter,
                effective_gas_price,
                calldata_floor_gas,
            },
            &self.spec,
        )?;

        let priority_fee_per_gas = effective_gas_price
            .checked_sub(base_fee_per_gas)
            .ok_or(VMError::InvalidGasPrice)?;

        let mut sender_account = self.ctx.world_state.get_account(sender);
        sender_account.balance = sender_account
            .balance
            .checked_add(accounting.sender_refund_amount)
            .ok_or(VMError::InvalidBalance)?;
        self.ctx.world_state.set_account(sender, sender_account);

        let transaction_fee = accounting
            .gas_used_after_refund
            .checked_mul(priority_fee_per_gas)
            .ok_or(VMError::InvalidBalance)?;
        let mut coinbase_account = self.ctx.world_state.get_account(coinbase);
        coinbase_account.balance = coinbase_account
            .balance
            .checked_add(transaction_fee)
            .ok_or(VMError::InvalidBalance)?;
        self.ctx.world_state.set_account(coinbase, coinbase_account);

        Ok((accounting, accounting.sender_refund_amount, transaction_fee))
    }
}

fn is_delegation_designation(code: &Bytes) -> bool {
    code.len() == DELEGATION_DESIGNATION_LEN && code.starts_with(&DELEGATION_DESIGNATION_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evm::NoopEvmExecutor;
    use crate::hardfork::Hardfork;
    use ethrex_exec_core::{AccountState, LegacyTransaction, TxKind};

    fn block() -> BlockContext {
        BlockContext {
            coinbase: Address::from_low_u64_be(0xc0),
            base_fee_per_gas: U256::from(10),
            blob_gas_price: U256::from(1),
            block_gas_limit: U256::from(30_000_000),
            block_gas_used: U256::zero(),
            max_blob_gas_per_block: U256::from(786_432),
            block_blob_gas_used: U256::zero(),
        }
    }

    #[test]
    fn processes_a_simple_value_transfer() {
        let sender = Address::from_low_u64_be(1);
        let recipient = Address::from_low_u64_be(2);
        let mut ctx = ExecutionContext::default();
        ctx.world_state.set_account(
            sender,
            AccountState {
                balance: U256::from(10_000_000),
                nonce: 0,
                ..Default::default()
            },
        );
        ctx.world_state.set_account(recipient, AccountState::default());
        ctx.world_state.set_account(
            block().coinbase,
            AccountState::default(),
        );

        let tx = Transaction::Legacy(LegacyTransaction {
            nonce: 0,
            gas_price: 20,
            gas_limit: 21_000,
            to: TxKind::Call(recipient),
            value: U256::from(100),
            data: Bytes::new(),
            ..Default::default()
        });

        let sender_balance_before = ctx.world_state.get_account(sender).balance;
        let coinbase_balance_before = ctx.world_state.get_account(block().coinbase).balance;

        let mut evm = NoopEvmExecutor;
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut processor = TransactionProcessor {
            ctx: &mut ctx,
            evm: &mut evm,
            spec,
        };

        let result = processor
            .process_transaction(
                ProcessTransactionInput {
                    tx: &tx,
                    sender,
                    index_in_block: Some(0),
                    tx_hash: None,
                },
                &block(),
            )
            .unwrap();

        assert_eq!(ctx.world_state.get_account(sender).nonce, 1);

        let sender_balance_after = ctx.world_state.get_account(sender).balance;
        let coinbase_balance_after = ctx.world_state.get_account(block().coinbase).balance;
        let sender_spent = sender_balance_before.checked_sub(sender_balance_after).unwrap();
        let expected_spent = result
            .gas_used_after_refund
            .checked_mul(U256::from(20))
            .unwrap()
            .checked_add(U256::from(100))
            .unwrap();
        assert_eq!(sender_spent, expected_spent);

        let coinbase_gained = coinbase_balance_after.checked_sub(coinbase_balance_before).unwrap();
        let expected_coinbase_gain = result
            .gas_used_after_refund
            .checked_mul(result.priority_fee_per_gas)
            .unwrap();
        assert_eq!(coinbase_gained, expected_coinbase_gain);
    }

    #[test]
    fn failed_inclusion_check_leaves_nonce_and_balance_unchanged() {
        let sender = Address::from_low_u64_be(1);
        let mut ctx = ExecutionContext::default();
        let starting_balance = U256::from(2_000_000_000u64);
        ctx.world_state.set_account(
            sender,
            AccountState {
                balance: starting_balance,
                nonce: 0,
                ..Default::default()
            },
        );

        let tx = Transaction::Legacy(LegacyTransaction {
            nonce: 0,
            gas_price: 20,
            gas_limit: 40_000_000,
            to: TxKind::Call(Address::from_low_u64_be(2)),
            value: U256::zero(),
            data: Bytes::new(),
            ..Default::default()
        });

        let mut evm = NoopEvmExecutor;
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut processor = TransactionProcessor {
            ctx: &mut ctx,
            evm: &mut evm,
            spec,
        };

        let result = processor.process_transaction(
            ProcessTransactionInput {
                tx: &tx,
                sender,
                index_in_block: Some(0),
                tx_hash: None,
            },
            &block(),
        );

        assert_eq!(result, Err(VMError::BlockGasLimitExceeded));
        assert_eq!(ctx.world_state.get_account(sender).nonce, 0);
        assert_eq!(ctx.world_state.get_account(sender).balance, starting_balance);
    }

    #[test]
    fn sender_with_non_delegation_code_is_rejected() {
        let sender = Address::from_low_u64_be(1);
        let mut ctx = ExecutionContext::default();
        ctx.world_state.set_account(
            sender,
            AccountState {
                balance: U256::from(10_000_000),
                nonce: 0,
                ..Default::default()
            },
        );
        ctx.world_state.set_code(sender, Bytes::from_static(b"not a delegation designation"));

        let tx = Transaction::Legacy(LegacyTransaction {
            nonce: 0,
            gas_price: 20,
            gas_limit: 21_000,
            to: TxKind::Call(Address::from_low_u64_be(2)),
            value: U256::zero(),
            data: Bytes::new(),
            ..Default::default()
        });

        let mut evm = NoopEvmExecutor;
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut processor = TransactionProcessor {
            ctx: &mut ctx,
            evm: &mut evm,
            spec,
        };

        let result = processor.process_transaction(
            ProcessTransactionInput {
                tx: &tx,
                sender,
                index_in_block: Some(0),
                tx_hash: None,
            },
            &block(),
        );

        assert_eq!(result, Err(VMError::InvalidSenderAccountCode));
    }

    struct AlwaysFailsEvmExecutor;

    impl EvmExecutor for AlwaysFailsEvmExecutor {
        fn execute(
            &mut self,
            _env: &crate::environment::TransactionEnvironment,
            _call: CallFrameSpec,
            _host: &mut dyn crate::host::HostAdapter,
        ) -> Result<crate::evm::EvmOutput, VMError> {
            Err(VMError::EvmExecutionError("boom".into()))
        }
    }

    #[test]
    fn evm_failure_rolls_back_the_whole_transaction_including_the_nonce_bump() {
        let sender = Address::from_low_u64_be(1);
        let mut ctx = ExecutionContext::default();
        let starting_balance = U256::from(10_000_000);
        ctx.world_state.set_account(
            sender,
            AccountState {
                balance: starting_balance,
                nonce: 0,
                ..Default::default()
            },
        );

        let tx = Transaction::Legacy(LegacyTransaction {
            nonce: 0,
            gas_price: 20,
            gas_limit: 21_000,
            to: TxKind::Call(Address::from_low_u64_be(2)),
            value: U256::zero(),
            data: Bytes::new(),
            ..Default::default()
        });

        let mut evm = AlwaysFailsEvmExecutor;
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let mut processor = TransactionProcessor {
            ctx: &mut ctx,
            evm: &mut evm,
            spec,
        };

        let result = processor.process_transaction(
            ProcessTransactionInput {
                tx: &tx,
                sender,
                index_in_block: Some(0),
                tx_hash: None,
            },
            &block(),
        );

        assert!(matches!(result, Err(VMError::EvmExecutionError(_))));
        assert_eq!(ctx.world_state.get_account(sender).nonce, 0);
        assert_eq!(ctx.world_state.get_account(sender).balance, starting_balance);
        assert_eq!(ctx.depth(), 0);
    }
}
