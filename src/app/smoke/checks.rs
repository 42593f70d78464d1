use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::metrics::ratio_x100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    /// Path is used as-is (health routes live outside the API prefix).
    Root,
    /// Path is appended to the API prefix.
    Api,
}

/// One GET check from the fixed catalog.
#[derive(Debug, Clone, Copy)]
pub(super) struct CheckSpec {
    pub(super) name: &'static str,
    pub(super) scope: Scope,
    /// Request path, including any query string.
    pub(super) target: &'static str,
    /// Path recorded in the results; IDs and queries are elided.
    pub(super) label: &'static str,
    pub(super) accepted: &'static [u16],
    pub(super) passed_message: &'static str,
    pub(super) failed_message: &'static str,
}

impl CheckSpec {
    pub(super) fn accepts(&self, status: u16) -> bool {
        self.accepted.contains(&status)
    }
}

/// A named batch of checks printed under one header.
#[derive(Debug, Clone, Copy)]
pub(super) struct CheckGroup {
    pub(super) title: &'static str,
    /// Word used in the skip warning when the group needs a token.
    pub(super) subject: &'static str,
    pub(super) requires_auth: bool,
    pub(super) checks: &'static [CheckSpec],
}

const OK: &[u16] = &[200];
const OK_OR_UNAVAILABLE: &[u16] = &[200, 503];
const OK_OR_MISSING: &[u16] = &[200, 404];
const OK_FORBIDDEN_OR_MISSING: &[u16] = &[200, 403, 404];

pub(super) const HEALTH_GROUP: CheckGroup = CheckGroup {
    title: "HEALTH CHECK TESTS",
    subject: "health",
    requires_auth: false,
    checks: &[
        CheckSpec {
            name: "Health Check",
            scope: Scope::Root,
            target: "/health",
            label: "/health",
            accepted: OK,
            passed_message: "Health check response",
            failed_message: "Health check failed",
        },
        CheckSpec {
            name: "Liveness Check",
            scope: Scope::Root,
            target: "/health/live",
            label: "/health/live",
            accepted: OK,
            passed_message: "Liveness check passed",
            failed_message: "Liveness check failed",
        },
        CheckSpec {
            name: "Readiness Check",
            scope: Scope::Root,
            target: "/health/ready",
            label: "/health/ready",
            accepted: OK_OR_UNAVAILABLE,
            passed_message: "Readiness check answered",
            failed_message: "Readiness check failed",
        },
    ],
};

pub(super) const BRANCH_GROUP: CheckGroup = CheckGroup {
    title: "PUBLIC BRANCH TESTS",
    subject: "branch",
    requires_auth: false,
    checks: &[
        CheckSpec {
            name: "Get Branches",
            scope: Scope::Api,
            target: "/branches",
            label: "/branches",
            accepted: OK_OR_MISSING,
            passed_message: "Branches retrieved",
            failed_message: "Failed to retrieve branches",
        },
        CheckSpec {
            name: "Get Branch by ID",
            scope: Scope::Api,
            target: "/branches/550e8400-e29b-41d4-a716-446655440000",
            label: "/branches/:id",
            accepted: OK_OR_MISSING,
            passed_message: "Branch lookup answered",
            failed_message: "Branch lookup failed",
        },
        CheckSpec {
            name: "Get Nearest Branches",
            scope: Scope::Api,
            target: "/branches/nearest?lat=-6.2088&lon=106.8456",
            label: "/branches/nearest",
            accepted: OK_OR_MISSING,
            passed_message: "Nearest branches retrieved",
            failed_message: "Failed to retrieve nearest branches",
        },
    ],
};

pub(super) const AUTHENTICATED_GROUPS: [CheckGroup; 3] = [
    CheckGroup {
        title: "ORDER TESTS",
        subject: "order",
        requires_auth: true,
        checks: &[CheckSpec {
            name: "Get Orders",
            scope: Scope::Api,
            target: "/orders",
            label: "/orders",
            accepted: OK_OR_MISSING,
            passed_message: "Orders retrieved",
            failed_message: "Failed to retrieve orders",
        }],
    },
    CheckGroup {
        title: "MEMBERSHIP TESTS",
        subject: "membership",
        requires_auth: true,
        checks: &[
            CheckSpec {
                name: "Get Membership Tiers",
                scope: Scope::Api,
                target: "/membership/tiers",
                label: "/membership/tiers",
                accepted: OK_OR_MISSING,
                passed_message: "Membership tiers retrieved",
                failed_message: "Failed to retrieve tiers",
            },
            CheckSpec {
                name: "Get Membership",
                scope: Scope::Api,
                target: "/membership",
                label: "/membership",
                accepted: OK_OR_MISSING,
                passed_message: "Membership details retrieved",
                failed_message: "No membership found",
            },
        ],
    },
    CheckGroup {
        title: "REPORT TESTS",
        subject: "report",
        requires_auth: true,
        checks: &[
            CheckSpec {
                name: "Current Month Report",
                scope: Scope::Api,
                target: "/reports/current-month",
                label: "/reports/current-month",
                accepted: OK_FORBIDDEN_OR_MISSING,
                passed_message: "Report retrieved",
                failed_message: "Failed to retrieve report",
            },
            CheckSpec {
                name: "Monthly Report",
                scope: Scope::Api,
                target: "/reports/monthly?year=2024&month=1",
                label: "/reports/monthly",
                accepted: OK_FORBIDDEN_OR_MISSING,
                passed_message: "Monthly report retrieved",
                failed_message: "Failed to retrieve monthly report",
            },
        ],
    },
];

/// Outcome of one smoke check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckResult {
    pub(crate) name: String,
    pub(crate) endpoint: String,
    pub(crate) method: &'static str,
    /// 0 when no response was received.
    pub(crate) status_code: u16,
    pub(crate) passed: bool,
    pub(crate) message: String,
    pub(crate) response_time: Duration,
    pub(crate) timestamp: DateTime<Utc>,
}

/// Ordered results of a smoke run.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckLog {
    results: Vec<CheckResult>,
}

impl CheckLog {
    pub(crate) fn record(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub(crate) fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub(crate) fn total(&self) -> u64 {
        u64::try_from(self.results.len()).unwrap_or(u64::MAX)
    }

    pub(crate) fn passed(&self) -> u64 {
        u64::try_from(self.results.iter().filter(|result| result.passed).count())
            .unwrap_or(u64::MAX)
    }

    pub(crate) fn failed(&self) -> u64 {
        self.total().saturating_sub(self.passed())
    }

    pub(crate) fn passed_x100(&self) -> u64 {
        ratio_x100(self.passed(), self.total())
    }

    pub(crate) fn failed_x100(&self) -> u64 {
        ratio_x100(self.failed(), self.total())
    }

    pub(crate) fn average_response_time(&self) -> Duration {
        let sum = self.results.iter().fold(0u128, |sum, result| {
            sum.saturating_add(result.response_time.as_nanos())
        });
        let average = sum.checked_div(u128::from(self.total())).unwrap_or(0);
        Duration::from_nanos(u64::try_from(average).unwrap_or(u64::MAX))
    }

    /// Results grouped by endpoint, in first-seen order.
    pub(crate) fn by_endpoint(&self) -> Vec<(&str, Vec<&CheckResult>)> {
        let mut groups: Vec<(&str, Vec<&CheckResult>)> = Vec::new();
        for result in &self.results {
            match groups
                .iter_mut()
                .find(|(endpoint, _)| *endpoint == result.endpoint)
            {
                Some((_, members)) => members.push(result),
                None => groups.push((result.endpoint.as_str(), vec![result])),
            }
        }
        groups
    }
}
