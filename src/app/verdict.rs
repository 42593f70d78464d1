use std::fmt;

/// Success rate (x100) at or above which an endpoint passes.
pub(crate) const PASS_THRESHOLD_X100: u64 = 9900;
/// Success rate (x100) at or above which an endpoint only warns.
pub(crate) const WARNING_THRESHOLD_X100: u64 = 9500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Passed,
    Warning,
    Failed,
}

impl Verdict {
    pub(crate) const fn from_success_rate(success_rate_x100: u64) -> Self {
        if success_rate_x100 >= PASS_THRESHOLD_X100 {
            Self::Passed
        } else if success_rate_x100 >= WARNING_THRESHOLD_X100 {
            Self::Warning
        } else {
            Self::Failed
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Warning => "WARNING",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extra precision a plan average carries over an x100 rate (six more decimals).
pub(crate) const AVERAGE_FINE_PER_X100: u128 = 1_000_000;

/// Verdict over a whole plan: only the pass threshold matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverallVerdict {
    Passed,
    NeedsImprovement,
}

impl OverallVerdict {
    /// `average_fine` is the mean success rate in units of
    /// 1 / `AVERAGE_FINE_PER_X100` of an x100 rate.
    pub(crate) fn from_average(average_fine: u128) -> Self {
        let threshold = u128::from(PASS_THRESHOLD_X100).saturating_mul(AVERAGE_FINE_PER_X100);
        if average_fine >= threshold {
            Self::Passed
        } else {
            Self::NeedsImprovement
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::NeedsImprovement => "NEEDS IMPROVEMENT",
        }
    }
}

impl fmt::Display for OverallVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() -> Result<(), String> {
        let cases = [
            (10_000, Verdict::Passed),
            (9900, Verdict::Passed),
            (9899, Verdict::Warning),
            (9500, Verdict::Warning),
            (9499, Verdict::Failed),
            (7000, Verdict::Failed),
            (0, Verdict::Failed),
        ];
        for (rate, expected) in cases {
            let verdict = Verdict::from_success_rate(rate);
            if verdict != expected {
                return Err(format!("{} gave {}, expected {}", rate, verdict, expected));
            }
        }
        Ok(())
    }

    #[test]
    fn overall_verdict_ignores_warning_band() -> Result<(), String> {
        if OverallVerdict::from_average(9_900_000_000) != OverallVerdict::Passed {
            return Err("99.00% should pass".to_owned());
        }
        if OverallVerdict::from_average(9_899_999_999) != OverallVerdict::NeedsImprovement {
            return Err("Just under 99.00% should need improvement".to_owned());
        }
        if OverallVerdict::from_average(9_600_000_000) != OverallVerdict::NeedsImprovement {
            return Err("96.00% should need improvement".to_owned());
        }
        if OverallVerdict::from_average(0).label() != "NEEDS IMPROVEMENT" {
            return Err("Unexpected label for empty plan".to_owned());
        }
        Ok(())
    }
}
