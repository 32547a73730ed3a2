//! Loyalty tier calculator.
//!
//! Every completed order earns one reward point. Points map to tiers with
//! an advisory discount percentage shown to the customer; the discount is
//! not applied to persisted order totals.

use serde::{Deserialize, Serialize};

/// Gold tier threshold in points.
pub const GOLD_THRESHOLD: i32 = 10;
/// Silver tier threshold in points.
pub const SILVER_THRESHOLD: i32 = 5;
/// Bronze tier threshold in points.
pub const BRONZE_THRESHOLD: i32 = 3;

/// A loyalty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTier {
    Starter,
    Bronze,
    Silver,
    Gold,
}

impl std::fmt::Display for RewardTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Starter => "Starter",
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        };
        f.write_str(s)
    }
}

/// A customer's standing in the loyalty program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub tier: RewardTier,
    /// Advisory discount shown to the customer, in whole percent.
    pub discount_percent: u8,
    /// The tier the customer is working toward, `None` at Gold.
    pub next_tier: Option<RewardTier>,
    /// Progress toward the next tier's threshold, 0 to 100.
    pub progress_percent: f64,
    pub points: i32,
}

/// Compute the tier standing for a point balance.
///
/// Thresholds: Gold at 10+ points (5% discount), Silver at 5 (3%),
/// Bronze at 3 (1%), Starter below that. Progress is the fraction of the
/// next threshold already earned; Gold reports 100 with no next tier.
#[must_use]
pub fn tier_for_points(points: i32) -> TierInfo {
    let points = points.max(0);
    let (tier, discount_percent, next_tier, threshold) = if points >= GOLD_THRESHOLD {
        (RewardTier::Gold, 5, None, None)
    } else if points >= SILVER_THRESHOLD {
        (RewardTier::Silver, 3, Some(RewardTier::Gold), Some(GOLD_THRESHOLD))
    } else if points >= BRONZE_THRESHOLD {
        (
            RewardTier::Bronze,
            1,
            Some(RewardTier::Silver),
            Some(SILVER_THRESHOLD),
        )
    } else {
        (
            RewardTier::Starter,
            0,
            Some(RewardTier::Bronze),
            Some(BRONZE_THRESHOLD),
        )
    };

    let progress_percent = threshold.map_or(100.0, |t| f64::from(points) / f64::from(t) * 100.0);

    TierInfo {
        tier,
        discount_percent,
        next_tier,
        progress_percent,
        points,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_table() {
        let cases = [
            (0, RewardTier::Starter, 0),
            (2, RewardTier::Starter, 0),
            (3, RewardTier::Bronze, 1),
            (4, RewardTier::Bronze, 1),
            (5, RewardTier::Silver, 3),
            (9, RewardTier::Silver, 3),
            (10, RewardTier::Gold, 5),
            (25, RewardTier::Gold, 5),
        ];
        for (points, tier, discount) in cases {
            let info = tier_for_points(points);
            assert_eq!(info.tier, tier, "points = {points}");
            assert_eq!(info.discount_percent, discount, "points = {points}");
        }
    }

    #[test]
    fn test_next_tier_ladder() {
        assert_eq!(tier_for_points(0).next_tier, Some(RewardTier::Bronze));
        assert_eq!(tier_for_points(3).next_tier, Some(RewardTier::Silver));
        assert_eq!(tier_for_points(5).next_tier, Some(RewardTier::Gold));
        assert_eq!(tier_for_points(10).next_tier, None);
    }

    #[test]
    fn test_progress() {
        assert_eq!(tier_for_points(0).progress_percent, 0.0);
        assert_eq!(tier_for_points(2).progress_percent, (2.0 / 3.0) * 100.0);
        assert_eq!(tier_for_points(4).progress_percent, 80.0);
        assert_eq!(tier_for_points(9).progress_percent, 90.0);
        assert_eq!(tier_for_points(10).progress_percent, 100.0);
        assert_eq!(tier_for_points(40).progress_percent, 100.0);
    }

    #[test]
    fn test_negative_points_treated_as_zero() {
        let info = tier_for_points(-4);
        assert_eq!(info.tier, RewardTier::Starter);
        assert_eq!(info.points, 0);
        assert_eq!(info.progress_percent, 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(tier_for_points(5)).unwrap();
        assert_eq!(json["tier"], "Silver");
        assert_eq!(json["discountPercent"], 3);
        assert_eq!(json["nextTier"], "Gold");
        assert_eq!(json["points"], 5);
    }
}
