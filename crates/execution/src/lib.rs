pub mod access_list;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod evm;
pub mod fee;
pub mod gas_accounting;
pub mod hardfork;
pub mod host;
pub mod intrinsic_gas;
pub mod processor;
pub mod refund;
pub mod state;

pub use environment::{TransactionEnvironment, TransactionEnvironmentBuilder};
pub use errors::VMError;
pub use evm::{CallFrameSpec, EvmExecutor, EvmOutput, NoopEvmExecutor};
pub use hardfork::{Hardfork, ReleaseSpec};
pub use host::{HostAdapter, WorldStateHost};
pub use processor::{BlockContext, FinalizedTransactionExecution, ProcessTransactionInput, TransactionProcessor};
pub use state::{AccessListManager, ExecutionContext, TransientStorage, WorldState};
