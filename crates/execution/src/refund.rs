use ethereum_types::U256;

use crate::hardfork::ReleaseSpec;

/// `min(total_refund_counter, spent_gas / divisor)`, divisor = 5 post-London else 2 (§4.4).
/// `U256` is unsigned, so the "negative input" failure mode named in the distilled spec
/// cannot arise here and is not modeled.
pub fn claimable_refund(spent_gas: U256, total_refund_counter: U256, spec: &ReleaseSpec) -> U256 {
    let divisor = U256::from(spec.refund_quotient());
    let cap = spent_gas.checked_div(divisor).unwrap_or(U256::zero());
    total_refund_counter.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardfork::Hardfork;

    #[test]
    fn s1_refund_capped_by_divisor_two_pre_london() {
        let spec = ReleaseSpec::from_hardfork(Hardfork::Berlin);
        let refund = claimable_refund(U256::from(80), U256::from(50), &spec);
        assert_eq!(refund, U256::from(40));
    }

    #[test]
    fn refund_capped_by_counter_when_below_divisor_share() {
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let refund = claimable_refund(U256::from(30), U256::from(5), &spec);
        assert_eq!(refund, U256::from(5));
    }

    #[test]
    fn is_idempotent() {
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        let a = claimable_refund(U256::from(100), U256::from(50), &spec);
        let b = claimable_refund(U256::from(100), U256::from(50), &spec);
        assert_eq!(a, b);
    }
}
