//! Approval level derivation and maker-checker enforcement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::VoucherError;

/// Approval level required for a voucher, derived from its total amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApprovalLevel {
    /// Totals up to and including 50,000.
    Level1,
    /// Totals up to and including 500,000.
    Level2,
    /// Everything above 500,000.
    Level3,
}

impl ApprovalLevel {
    /// Derives the approval level for a voucher total.
    #[must_use]
    pub fn for_amount(total: Decimal) -> Self {
        if total <= Decimal::from(50_000u32) {
            Self::Level1
        } else if total <= Decimal::from(500_000u32) {
            Self::Level2
        } else {
            Self::Level3
        }
    }

    /// Returns the stored string form of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level1 => "LEVEL_1",
            Self::Level2 => "LEVEL_2",
            Self::Level3 => "LEVEL_3",
        }
    }
}

impl std::fmt::Display for ApprovalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApprovalLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEVEL_1" => Ok(Self::Level1),
            "LEVEL_2" => Ok(Self::Level2),
            "LEVEL_3" => Ok(Self::Level3),
            other => Err(format!("Unknown approval level: {other}")),
        }
    }
}

/// Rejects an approval or rejection attempt by the voucher's own creator.
///
/// # Errors
///
/// Returns [`VoucherError::MakerChecker`] when the actor created the voucher.
pub fn validate_approver(approver_id: Uuid, creator_id: Uuid) -> Result<(), VoucherError> {
    if approver_id == creator_id {
        return Err(VoucherError::MakerChecker);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(ApprovalLevel::for_amount(dec!(0)), ApprovalLevel::Level1);
        assert_eq!(ApprovalLevel::for_amount(dec!(50000)), ApprovalLevel::Level1);
        assert_eq!(
            ApprovalLevel::for_amount(dec!(50000.01)),
            ApprovalLevel::Level2
        );
        assert_eq!(
            ApprovalLevel::for_amount(dec!(500000)),
            ApprovalLevel::Level2
        );
        assert_eq!(
            ApprovalLevel::for_amount(dec!(500000.01)),
            ApprovalLevel::Level3
        );
        assert_eq!(
            ApprovalLevel::for_amount(dec!(10000000)),
            ApprovalLevel::Level3
        );
    }

    #[test]
    fn test_level_round_trip() {
        for level in [
            ApprovalLevel::Level1,
            ApprovalLevel::Level2,
            ApprovalLevel::Level3,
        ] {
            let parsed: ApprovalLevel = level.as_str().parse().unwrap();
            assert_eq!(parsed, level);
        }
        assert!("LEVEL_4".parse::<ApprovalLevel>().is_err());
    }

    #[test]
    fn test_maker_checker() {
        let creator = Uuid::new_v4();
        let reviewer = Uuid::new_v4();

        assert!(validate_approver(reviewer, creator).is_ok());
        assert!(matches!(
            validate_approver(creator, creator),
            Err(VoucherError::MakerChecker)
        ));
    }
}
