use ethereum_types::Address;
use thiserror::Error;

/// Every failure the transaction pipeline can produce. Unwound via the active
/// [`crate::state::ExecutionContext`] boundary; never caught to silently continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VMError {
    /// Part of the taxonomy's decode/validation kind (§7); unreachable from this crate
    /// alone since transaction decoding lives in `ethrex_exec_core`'s RLP codec and a
    /// malformed transaction never reaches `TransactionProcessor` as a `Transaction`
    /// value in the first place. Kept for callers that want one flat `VMError` surface
    /// spanning decode and execution.
    #[error("invalid transaction")]
    InvalidTransaction,
    /// Part of the taxonomy's decode/validation kind (§7); unreachable here because
    /// `base_fee_per_gas` is validated by the block-header/consensus component that
    /// builds `BlockContext` (§6, "consumed from collaborators") and is taken as given
    /// by this crate.
    #[error("invalid base fee")]
    InvalidBaseFee,
    #[error("invalid gas price")]
    InvalidGasPrice,
    #[error("invalid balance")]
    InvalidBalance,
    #[error("invalid gas")]
    InvalidGas,
    #[error("invalid refund amount")]
    InvalidRefundAmount,
    #[error("invalid blob versioned hash at index {0}")]
    InvalidBlobVersionedHash(usize),
    #[error("invalid sender account code")]
    InvalidSenderAccountCode,
    /// Part of the taxonomy's decode/validation kind (§7, "other types"); unreachable
    /// given this crate's closed `Transaction` enum, whose 5 typed variants are matched
    /// exhaustively in `fee::effective_gas_price` — a 6th variant would fail to compile
    /// rather than fall through to this error at runtime.
    #[error("unsupported transaction type")]
    UnsupportedTransactionType,
    #[error("access list feature not enabled for this release")]
    UnsupportedAccessListFeature,

    #[error("gas price below base fee")]
    GasPriceBelowBaseFee,
    #[error("priority fee greater than max fee")]
    PriorityFeeGreaterThanMaxFee,
    #[error("max fee per gas below base fee")]
    InsufficientMaxFeePerGas,
    #[error("max fee per blob gas below blob base fee")]
    InsufficientMaxFeePerBlobGas,
    #[error("sender balance insufficient to cover max gas fee and value")]
    InsufficientSenderBalance,
    #[error("gas limit below intrinsic or calldata-floor gas")]
    InsufficientTransactionGas,
    #[error("evm output gasLeft exceeds tx gasLimit")]
    GasLeftExceedsGasLimit,
    #[error("calldata floor gas exceeds tx gasLimit")]
    CalldataFloorGasExceedsGasLimit,

    #[error("transaction nonce too low")]
    TransactionNonceTooLow,
    #[error("transaction nonce too high")]
    TransactionNonceTooHigh,
    #[error("block gas limit exceeded")]
    BlockGasLimitExceeded,
    #[error("block blob gas limit exceeded")]
    BlockBlobGasLimitExceeded,
    #[error("EIP-4844 transaction carries no blob data")]
    NoBlobData,
    #[error("EIP-7702 authorization list is empty")]
    EmptyAuthorizationList,
    #[error("transaction type does not support contract creation")]
    TransactionTypeContractCreation,

    #[error("no active transaction boundary")]
    NoActiveTransaction,
    /// Part of the taxonomy's scope-control kind (§7); unreachable because
    /// `ExecutionContext`'s `JournaledMap` scopes are an implicit push/pop stack, not
    /// caller-held snapshot handles — there is no snapshot identifier that can go stale
    /// or be replayed out of order for this error to report on.
    #[error("invalid snapshot")]
    InvalidSnapshot,

    #[error("missing account {0:#x}")]
    MissingAccount(Address),

    #[error("evm execution error: {0}")]
    EvmExecutionError(String),
}
