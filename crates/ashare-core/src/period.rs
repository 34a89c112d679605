//! Reporting period definitions.
//!
//! This module defines [`PeriodClass`], the two statement periods the
//! A-share semi-annual reporting convention recognizes.

use serde::{Deserialize, Serialize};

/// Period class of a financial statement.
///
/// A-share companies publish full fiscal-year statements dated December and
/// half-year statements dated June. Statements dated in any other month
/// (quarterly filings) are outside this classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodClass {
    /// Fiscal year-end reporting period (December).
    #[default]
    Annual,
    /// Mid-year reporting period (June).
    HalfYear,
}

impl PeriodClass {
    /// Classifies a report-date month, if it maps to a known period class.
    #[must_use]
    pub const fn from_month(month: u32) -> Option<Self> {
        match month {
            12 => Some(Self::Annual),
            6 => Some(Self::HalfYear),
            _ => None,
        }
    }

    /// Returns the period class as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::HalfYear => "half_year",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_month() {
        assert_eq!(PeriodClass::from_month(12), Some(PeriodClass::Annual));
        assert_eq!(PeriodClass::from_month(6), Some(PeriodClass::HalfYear));
        assert_eq!(PeriodClass::from_month(3), None);
        assert_eq!(PeriodClass::from_month(9), None);
        assert_eq!(PeriodClass::from_month(1), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(PeriodClass::Annual.as_str(), "annual");
        assert_eq!(PeriodClass::HalfYear.as_str(), "half_year");
    }
}
