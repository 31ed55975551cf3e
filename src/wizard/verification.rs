//! External verification seam
//!
//! Record lookups and face matching happen outside the portal. The wizard only
//! sees the [`Verifier`] trait; the default [`SimulatedVerifier`] stands in for
//! the real services with a fixed delay and random outcomes.

use super::stage::StageResult;
use anyhow::{bail, Result};
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which external check a stage performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationKind {
    /// Search the records system for an existing entry
    RecordLookup,
    /// Compare a live capture against the photo on record
    FaceMatch,
}

impl VerificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::RecordLookup => "Searching records",
            Self::FaceMatch => "Matching face",
        }
    }
}

/// What the verifier is asked to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub kind: VerificationKind,
    /// Identifier of the person being checked
    pub subject: String,
    /// 1-based attempt number within the session
    pub attempt: u32,
}

/// Answer from the verifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub matched: bool,
    /// Identifier issued on success, e.g. a record number
    pub reference: Option<String>,
    pub detail: String,
}

/// Trait for external verification services, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Run one check
    async fn verify(&self, request: VerificationRequest) -> Result<VerificationReport>;
}

/// Stand-in for the real record and biometric services
#[derive(Debug, Clone)]
pub struct SimulatedVerifier {
    delay: Duration,
    existing_record_rate: f64,
    face_match_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(delay: Duration, existing_record_rate: f64, face_match_rate: f64) -> Self {
        Self {
            delay,
            existing_record_rate: existing_record_rate.clamp(0.0, 1.0),
            face_match_rate: face_match_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl Verifier for SimulatedVerifier {
    async fn verify(&self, request: VerificationRequest) -> Result<VerificationReport> {
        if request.subject.trim().is_empty() {
            bail!("nothing identifies the applicant");
        }

        // ThreadRng is not Send; roll before suspending
        let (roll, number) = {
            let mut rng = rand::thread_rng();
            (rng.gen::<f64>(), rng.gen_range(10_000_000u32..100_000_000))
        };

        tokio::time::sleep(self.delay).await;

        let report = match request.kind {
            VerificationKind::RecordLookup => {
                if roll < self.existing_record_rate {
                    VerificationReport {
                        matched: false,
                        reference: None,
                        detail: "A record already exists for these details".to_string(),
                    }
                } else {
                    VerificationReport {
                        matched: true,
                        reference: Some(format!("MRN-{number}")),
                        detail: "No existing record; a new number was issued".to_string(),
                    }
                }
            }
            VerificationKind::FaceMatch => {
                if roll < self.face_match_rate {
                    VerificationReport {
                        matched: true,
                        reference: Some(format!("SP-{number}")),
                        detail: "Face matches the photo on record".to_string(),
                    }
                } else {
                    VerificationReport {
                        matched: false,
                        reference: None,
                        detail: "Face did not match the photo on record".to_string(),
                    }
                }
            }
        };
        Ok(report)
    }
}

/// Run a check with a deadline.
///
/// Verifier errors and timeouts become failed results so the wizard can
/// route them like any other mismatch.
pub async fn run_verification(
    verifier: &dyn Verifier,
    request: VerificationRequest,
    timeout: Duration,
) -> StageResult {
    let attempt = request.attempt;
    let kind = request.kind;
    match tokio::time::timeout(timeout, verifier.verify(request)).await {
        Ok(Ok(report)) if report.matched => {
            tracing::info!("{kind:?} attempt {attempt} matched");
            StageResult::success(attempt, report.reference, report.detail)
        }
        Ok(Ok(report)) => {
            tracing::info!("{kind:?} attempt {attempt} did not match");
            StageResult::failure(attempt, report.detail)
        }
        Ok(Err(err)) => {
            tracing::warn!("{kind:?} attempt {attempt} failed: {err:#}");
            StageResult::failure(attempt, format!("Verification service error: {err}"))
        }
        Err(_) => {
            tracing::warn!("{kind:?} attempt {attempt} timed out after {timeout:?}");
            StageResult::failure(
                attempt,
                format!("No answer within {} seconds", timeout.as_secs()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::stage::StageStatus;

    fn request(kind: VerificationKind) -> VerificationRequest {
        VerificationRequest {
            kind,
            subject: "NID-1234".to_string(),
            attempt: 1,
        }
    }

    /// Verifier that never answers in time
    struct StalledVerifier;

    #[async_trait]
    impl Verifier for StalledVerifier {
        async fn verify(&self, _request: VerificationRequest) -> Result<VerificationReport> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            bail!("unreachable")
        }
    }

    mod simulated {
        use super::*;

        #[tokio::test]
        async fn test_lookup_without_existing_records_issues_number() {
            let verifier = SimulatedVerifier::new(Duration::ZERO, 0.0, 0.0);
            let report = verifier
                .verify(request(VerificationKind::RecordLookup))
                .await
                .unwrap();
            assert!(report.matched);
            assert!(report.reference.unwrap().starts_with("MRN-"));
        }

        #[tokio::test]
        async fn test_lookup_with_existing_record_fails() {
            let verifier = SimulatedVerifier::new(Duration::ZERO, 1.0, 0.0);
            let report = verifier
                .verify(request(VerificationKind::RecordLookup))
                .await
                .unwrap();
            assert!(!report.matched);
            assert!(report.reference.is_none());
        }

        #[tokio::test]
        async fn test_face_match_rate_bounds() {
            let always = SimulatedVerifier::new(Duration::ZERO, 0.0, 1.0);
            let never = SimulatedVerifier::new(Duration::ZERO, 0.0, 0.0);
            assert!(always.verify(request(VerificationKind::FaceMatch)).await.unwrap().matched);
            assert!(!never.verify(request(VerificationKind::FaceMatch)).await.unwrap().matched);
        }

        #[test]
        fn test_empty_subject_is_an_error() {
            let verifier = SimulatedVerifier::new(Duration::ZERO, 0.0, 1.0);
            let mut req = request(VerificationKind::FaceMatch);
            req.subject = "  ".to_string();
            assert!(tokio_test::block_on(verifier.verify(req)).is_err());
        }

        #[test]
        fn test_rates_are_clamped() {
            let verifier = SimulatedVerifier::new(Duration::ZERO, -1.0, 4.0);
            assert_eq!(verifier.existing_record_rate, 0.0);
            assert_eq!(verifier.face_match_rate, 1.0);
        }
    }

    mod run {
        use super::*;

        #[tokio::test]
        async fn test_match_becomes_success_with_payload() {
            let mut mock = MockVerifier::new();
            mock.expect_verify().times(1).returning(|_| {
                Ok(VerificationReport {
                    matched: true,
                    reference: Some("MRN-42".to_string()),
                    detail: "ok".to_string(),
                })
            });

            let result =
                run_verification(&mock, request(VerificationKind::RecordLookup), Duration::from_secs(1))
                    .await;
            assert_eq!(result.status, StageStatus::Success);
            assert_eq!(result.payload.as_deref(), Some("MRN-42"));
            assert_eq!(result.attempts, 1);
        }

        #[tokio::test]
        async fn test_mismatch_becomes_failure() {
            let mut mock = MockVerifier::new();
            mock.expect_verify().returning(|_| {
                Ok(VerificationReport {
                    matched: false,
                    reference: None,
                    detail: "no".to_string(),
                })
            });

            let result =
                run_verification(&mock, request(VerificationKind::FaceMatch), Duration::from_secs(1))
                    .await;
            assert_eq!(result.status, StageStatus::Failure);
            assert_eq!(result.detail, "no");
        }

        #[tokio::test]
        async fn test_service_error_becomes_failure() {
            let mut mock = MockVerifier::new();
            mock.expect_verify()
                .returning(|_| Err(anyhow::anyhow!("connection refused")));

            let result =
                run_verification(&mock, request(VerificationKind::FaceMatch), Duration::from_secs(1))
                    .await;
            assert_eq!(result.status, StageStatus::Failure);
            assert!(result.detail.contains("connection refused"));
        }

        #[tokio::test]
        async fn test_timeout_becomes_failure() {
            let result = run_verification(
                &StalledVerifier,
                request(VerificationKind::FaceMatch),
                Duration::from_millis(20),
            )
            .await;
            assert_eq!(result.status, StageStatus::Failure);
            assert!(result.payload.is_none());
        }
    }
}
