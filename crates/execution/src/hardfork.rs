use serde::{Deserialize, Serialize};

/// Totally ordered hardfork sequence. Consumers should branch on [`ReleaseSpec`] flags
/// rather than comparing variants directly; the ordering exists so [`ReleaseSpec::from_hardfork`]
/// can derive flags with a single `>=` comparison each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hardfork {
    Frontier,
    Homestead,
    Byzantium,
    Constantinople,
    Istanbul,
    Berlin,
    London,
    Shanghai,
    Cancun,
    #[default]
    Prague,
    Osaka,
}

impl Hardfork {
    pub fn is_at_least(&self, other: Hardfork) -> bool {
        *self >= other
    }
}

/// Immutable, hardfork-derived feature-flag record. The sole protocol configuration
/// surface consumed by the rest of this crate; new EIPs that change gas, refund, or
/// tx-acceptance rules add a flag here instead of comparing [`Hardfork`] ordinals
/// directly in consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSpec {
    pub hardfork: Hardfork,
    pub is_eip2028_enabled: bool,
    pub is_eip2930_enabled: bool,
    pub is_eip3529_enabled: bool,
    pub is_eip3651_enabled: bool,
    pub is_eip3860_enabled: bool,
    pub is_eip7623_enabled: bool,
    pub is_eip7702_enabled: bool,
    pub is_eip2935_enabled: bool,
}

impl ReleaseSpec {
    pub fn from_hardfork(hardfork: Hardfork) -> Self {
        Self {
            hardfork,
            is_eip2028_enabled: hardfork.is_at_least(Hardfork::Istanbul),
            is_eip2930_enabled: hardfork.is_at_least(Hardfork::Berlin),
            is_eip3529_enabled: hardfork.is_at_least(Hardfork::London),
            is_eip3651_enabled: hardfork.is_at_least(Hardfork::Shanghai),
            is_eip3860_enabled: hardfork.is_at_least(Hardfork::Shanghai),
            is_eip7623_enabled: hardfork.is_at_least(Hardfork::Prague),
            is_eip7702_enabled: hardfork.is_at_least(Hardfork::Prague),
            is_eip2935_enabled: hardfork.is_at_least(Hardfork::Prague),
        }
    }

    pub fn refund_quotient(&self) -> u64 {
        if self.is_eip3529_enabled {
            crate::constants::REFUND_QUOTIENT
        } else {
            crate::constants::REFUND_QUOTIENT_PRE_LONDON
        }
    }
}

impl Default for ReleaseSpec {
    fn default() -> Self {
        Self::from_hardfork(Hardfork::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn berlin_has_pre_london_refund_quotient() {
        let spec = ReleaseSpec::from_hardfork(Hardfork::Berlin);
        assert!(!spec.is_eip3529_enabled);
        assert_eq!(spec.refund_quotient(), 2);
    }

    #[test]
    fn prague_enables_eip7623_and_eip7702() {
        let spec = ReleaseSpec::from_hardfork(Hardfork::Prague);
        assert!(spec.is_eip7623_enabled);
        assert!(spec.is_eip7702_enabled);
        assert_eq!(spec.refund_quotient(), 5);
    }

    #[test]
    fn hardfork_ordering_is_total() {
        assert!(Hardfork::Prague.is_at_least(Hardfork::London));
        assert!(!Hardfork::Berlin.is_at_least(Hardfork::London));
    }
}
