use bytes::Bytes;
use ethereum_types::U256;
use ethrex_exec_core::{Address, Log};

use crate::environment::TransactionEnvironment;
use crate::errors::VMError;
use crate::host::HostAdapter;

/// One outer call frame, as handed to the EvmExecutor boundary (§4.9).
#[derive(Debug, Clone)]
pub struct CallFrameSpec {
    pub to: Address,
    pub input: Bytes,
    pub value: U256,
    pub is_static: bool,
}

/// Result of running a call frame to completion. Logs and `accounts_to_delete` reflect
/// only committed effects — an implementation must not surface either for a frame that
/// itself rolled back.
#[derive(Debug, Clone, Default)]
pub struct EvmOutput {
    pub gas_left: U256,
    pub refund_counter: U256,
    pub logs: Vec<Log>,
    pub accounts_to_delete: Vec<Address>,
}

/// Boundary this core does not implement the interior of (§4.9): an opcode interpreter
/// lives on the other side of this trait. Required guarantees from any implementation:
/// every state mutation routes through [`HostAdapter`] (and hence `WorldState` +
/// `TransactionBoundary`), nested calls run inside `run_in_call_frame_boundary`, and a VM
/// revert rolls back only the call frame's own boundary scope, not the outer transaction.
pub trait EvmExecutor {
    fn execute(
        &mut self,
        env: &TransactionEnvironment,
        call: CallFrameSpec,
        host: &mut dyn HostAdapter,
    ) -> Result<EvmOutput, VMError>;
}

/// Reference implementation sufficient to exercise the processor end-to-end without an
/// opcode interpreter: a call frame that performs a pure value transfer and nothing else.
/// Grounded in the teacher's test `Db`/`CacheDB` stand-ins, which the teacher's own test
/// suite uses in place of a real EVM to isolate the surrounding pipeline.
#[derive(Debug, Default)]
pub struct NoopEvmExecutor;

impl EvmExecutor for NoopEvmExecutor {
    fn execute(
        &mut self,
        env: &TransactionEnvironment,
        call: CallFrameSpec,
        host: &mut dyn HostAdapter,
    ) -> Result<EvmOutput, VMError> {
        if !call.value.is_zero() {
            let sender_balance = host.get_balance(env.origin);
            let sender_balance = sender_balance
                .checked_sub(call.value)
                .ok_or(VMError::InvalidBalance)?;
            host.set_balance(env.origin, sender_balance);

            let recipient_balance = host.get_balance(call.to);
            let recipient_balance = recipient_balance
                .checked_add(call.value)
                .ok_or(VMError::InvalidBalance)?;
            host.set_balance(call.to, recipient_balance);
        }

        Ok(EvmOutput {
            gas_left: env.gas,
            refund_counter: U256::zero(),
            logs: Vec::new(),
            accounts_to_delete: Vec::new(),
        })
    }
}
