//! Plan billing periods and end-date arithmetic.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Billing period of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDuration {
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanDuration {
    pub const ALL: [PlanDuration; 3] = [
        PlanDuration::Monthly,
        PlanDuration::Quarterly,
        PlanDuration::Yearly,
    ];

    /// Number of calendar months covered by one period.
    pub fn months(&self) -> u32 {
        match self {
            PlanDuration::Monthly => 1,
            PlanDuration::Quarterly => 3,
            PlanDuration::Yearly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanDuration::Monthly => "monthly",
            PlanDuration::Quarterly => "quarterly",
            PlanDuration::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(PlanDuration::Monthly),
            "quarterly" => Ok(PlanDuration::Quarterly),
            "yearly" => Ok(PlanDuration::Yearly),
            other => Err(ValidationError::invalid_format(
                "duration",
                format!("unknown billing period '{}'", other),
            )),
        }
    }
}

/// Computes when a subscription that starts at `start` runs out.
///
/// Uses calendar-month arithmetic; see [`Timestamp::add_calendar_months`]
/// for how short months are handled.
pub fn compute_end_date(start: Timestamp, duration: PlanDuration) -> Timestamp {
    start.add_calendar_months(duration.months())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn monthly_adds_one_calendar_month() {
        assert_eq!(compute_end_date(ts(2024, 1, 15), PlanDuration::Monthly), ts(2024, 2, 15));
    }

    #[test]
    fn quarterly_adds_three_calendar_months() {
        assert_eq!(compute_end_date(ts(2024, 1, 15), PlanDuration::Quarterly), ts(2024, 4, 15));
    }

    #[test]
    fn yearly_adds_one_calendar_year() {
        assert_eq!(compute_end_date(ts(2024, 1, 15), PlanDuration::Yearly), ts(2025, 1, 15));
    }

    #[test]
    fn month_end_start_clamps() {
        assert_eq!(compute_end_date(ts(2024, 1, 31), PlanDuration::Monthly), ts(2024, 2, 29));
        assert_eq!(compute_end_date(ts(2024, 11, 30), PlanDuration::Quarterly), ts(2025, 2, 28));
    }

    #[test]
    fn parses_known_periods_only() {
        assert_eq!("quarterly".parse::<PlanDuration>().unwrap(), PlanDuration::Quarterly);
        assert!("weekly".parse::<PlanDuration>().is_err());
        assert!("Monthly".parse::<PlanDuration>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&PlanDuration::Yearly).unwrap(), "\"yearly\"");
        assert!(serde_json::from_str::<PlanDuration>("\"biweekly\"").is_err());
    }

    fn any_start() -> impl Strategy<Value = Timestamp> {
        // 1970-01-01 .. 2200-01-01
        (0i64..7_258_118_400i64).prop_map(|secs| {
            Timestamp::from_datetime(Utc.timestamp_opt(secs, 0).single().unwrap())
        })
    }

    proptest! {
        #[test]
        fn periods_are_strictly_ordered(start in any_start()) {
            let monthly = compute_end_date(start, PlanDuration::Monthly);
            let quarterly = compute_end_date(start, PlanDuration::Quarterly);
            let yearly = compute_end_date(start, PlanDuration::Yearly);
            prop_assert!(start < monthly);
            prop_assert!(monthly < quarterly);
            prop_assert!(quarterly < yearly);
        }

        #[test]
        fn computation_is_deterministic(start in any_start()) {
            for duration in PlanDuration::ALL {
                prop_assert_eq!(compute_end_date(start, duration), compute_end_date(start, duration));
            }
        }
    }
}
