use ethereum_types::U256;

use crate::errors::VMError;
use crate::hardfork::ReleaseSpec;
use crate::refund::claimable_refund;

/// Inputs to post-execution gas accounting (§4.5), one step shared by [`crate::refund`]
/// scenarios and [`crate::processor::TransactionProcessor::settle_post_execution_balances`].
#[derive(Clone, Copy, Debug)]
pub struct GasAccountingInput {
    pub gas_limit: U256,
    pub gas_left: U256,
    pub refund_counter: U256,
    pub effective_gas_price: U256,
    pub calldata_floor_gas: U256,
}

/// Outcome of [`compute`]: gas used before/after refund and the amount owed back to the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasAccountingOutput {
    pub gas_used_before_refund: U256,
    pub claimable_refund: U256,
    pub gas_used_after_refund: U256,
    pub gas_left_after_refund: U256,
    pub sender_refund_amount: U256,
}

pub fn compute(input: GasAccountingInput, spec: &ReleaseSpec) -> Result<GasAccountingOutput, VMError> {
    if input.gas_left > input.gas_limit {
        return Err(VMError::GasLeftExceedsGasLimit);
    }
    let gas_used_before_refund = input
        .gas_limit
        .checked_sub(input.gas_left)
        .ok_or(VMError::InvalidGas)?;

    let claimable = claimable_refund(gas_used_before_refund, input.refund_counter, spec);

    let gas_used_after_refund = gas_used_before_refund
        .checked_sub(claimable)
        .unwrap_or(U256::zero())
        .max(input.calldata_floor_gas);

    let gas_left_after_refund = input
        .gas_limit
        .checked_sub(gas_used_after_refund)
        .ok_or(VMError::InvalidGas)?;

    let sender_refund_amount = gas_left_after_refund
        .checked_mul(input.effective_gas_price)
        .ok_or(VMError::InvalidRefundAmount)?;

    Ok(GasAccountingOutput {
        gas_used_before_refund,
        claimable_refund: claimable,
        gas_used_after_refund,
        gas_left_after_refund,
        sender_refund_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardfork::Hardfork;

    fn run(
        gas_limit: u64,
        gas_left: u64,
        refund_counter: u64,
        effective_gas_price: u64,
        calldata_floor_gas: u64,
        hardfork: Hardfork,
    ) -> GasAccountingOutput {
        let spec = ReleaseSpec::from_hardfork(hardfork);
        compute(
            GasAccountingInput {
                gas_limit: U256::from(gas_limit),
                gas_left: U256::from(gas_left),
                refund_counter: U256::from(refund_counter),
                effective_gas_price: U256::from(effective_gas_price),
                calldata_floor_gas: U256::from(calldata_floor_gas),
            },
            &spec,
        )
        .unwrap()
    }

    #[test]
    fn s1_legacy_refund_divisor_two_berlin() {
        let out = run(100, 20, 50, 2, 0, Hardfork::Berlin);
        assert_eq!(out.gas_used_after_refund, U256::from(40));
        assert_eq!(out.sender_refund_amount, U256::from(120));
    }

    #[test]
    fn s2_post_london_refund_divisor_five() {
        let out = run(100, 20, 50, 2, 0, Hardfork::Prague);
        assert_eq!(out.gas_used_after_refund, U256::from(64));
        assert_eq!(out.sender_refund_amount, U256::from(72));
    }

    #[test]
    fn s3_refund_below_cap() {
        let out = run(100, 70, 5, 2, 0, Hardfork::Prague);
        assert_eq!(out.gas_used_after_refund, U256::from(25));
        assert_eq!(out.sender_refund_amount, U256::from(150));
    }

    #[test]
    fn s4_calldata_floor_clamp() {
        let out = run(100, 20, 50, 2, 70, Hardfork::Prague);
        assert_eq!(out.gas_used_after_refund, U256::from(70));
        assert_eq!(out.sender_refund_amount, U256::from(60));
    }
}
