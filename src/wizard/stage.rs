//! Bookkeeping for self-transitioning verification stages

use super::step::StepId;
use super::verification::VerificationRequest;
use serde::Serialize;

/// Where a verification stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StageStatus {
    Pending,
    Success,
    Failure,
}

/// Result of one verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    pub status: StageStatus,
    /// Identifier produced on success, e.g. a record number
    pub payload: Option<String>,
    /// Attempt number this result belongs to
    pub attempts: u32,
    pub detail: String,
}

impl StageResult {
    pub fn pending(attempt: u32) -> Self {
        Self {
            status: StageStatus::Pending,
            payload: None,
            attempts: attempt,
            detail: String::new(),
        }
    }

    pub fn success(attempt: u32, payload: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Success,
            payload,
            attempts: attempt,
            detail: detail.into(),
        }
    }

    pub fn failure(attempt: u32, detail: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Failure,
            payload: None,
            attempts: attempt,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StageStatus::Success
    }
}

/// Handle for a running verification.
///
/// Only the result carrying the ticket's id is accepted; anything else was
/// cancelled or superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTicket {
    pub id: u64,
    pub step: StepId,
    pub attempt: u32,
    pub request: VerificationRequest,
}

/// Attempts used and allowed for one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptBudget {
    pub used: u32,
    pub max: Option<u32>,
}

impl AttemptBudget {
    pub fn remaining(&self) -> Option<u32> {
        self.max.map(|max| max.saturating_sub(self.used))
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_budget_never_exhausts() {
        let budget = AttemptBudget {
            used: 100,
            max: None,
        };
        assert_eq!(budget.remaining(), None);
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_bounded_budget_counts_down() {
        let mut budget = AttemptBudget {
            used: 0,
            max: Some(3),
        };
        assert_eq!(budget.remaining(), Some(3));
        budget.used = 3;
        assert!(budget.is_exhausted());
        budget.used = 5;
        assert_eq!(budget.remaining(), Some(0));
    }

    #[test]
    fn test_result_constructors() {
        assert!(StageResult::success(1, Some("MRN-1".into()), "ok").is_success());
        assert!(!StageResult::failure(2, "no").is_success());
        assert_eq!(StageResult::pending(3).status, StageStatus::Pending);
    }
}
