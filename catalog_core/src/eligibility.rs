//! Interval training eligibility.

use crate::{AgeBracket, HistoryBracket};

/// Whether interval-style cardio may be offered to this user
///
/// Beginners (no exercise in the past year, or less than monthly) never get
/// intervals. Age alone never disqualifies; an older user is only held back
/// when they also trained just 1-2 times per month.
pub fn is_interval_eligible(history: &HistoryBracket, age: &AgeBracket) -> bool {
    match history {
        HistoryBracket::NoneInPastYear | HistoryBracket::LessThanMonthly => false,
        HistoryBracket::OneToTwoPerMonth if age.is_older_cohort() => false,
        _ => true,
    }
}
