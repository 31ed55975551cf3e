//! Wizard error types

use super::field::FieldPath;
use thiserror::Error;

/// Why a wizard operation was refused.
///
/// All of these are local and recoverable: the session is left exactly as it
/// was before the call, except where a variant says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step \"{step}\" is incomplete: {}", .missing.join(", "))]
    IncompleteStep {
        step: &'static str,
        missing: Vec<String>,
    },

    #[error("already at the final step")]
    AtFinalStep,

    #[error("submission is only possible from the final step")]
    NotAtFinalStep,

    #[error("unknown step \"{0}\"")]
    UnknownStep(String),

    #[error("unknown section \"{0}\"")]
    UnknownSection(String),

    #[error("unknown field \"{section}.{field}\"")]
    UnknownField { section: String, field: String },

    #[error("field \"{section}.{field}\" holds a different kind of value")]
    FieldKindMismatch { section: String, field: String },

    #[error("a verification is still running")]
    StagePending,

    #[error("the current step does not run a verification")]
    NotAStage,

    #[error("this step completes when its verification finishes")]
    AwaitingVerification,

    #[error("no verification is running")]
    NothingPending,

    #[error("verification result is no longer expected")]
    StaleResult,

    /// The stage budget is spent; the controller has already moved to the
    /// fallback step when one is configured.
    #[error("verification attempts exhausted after {attempts} tries")]
    RetryBudgetExhausted { attempts: u32 },

    #[error("nothing to retry from this step")]
    NothingToRetry,

    #[error("application already submitted")]
    AlreadySubmitted,
}

/// A wizard definition that cannot be mounted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("wizard \"{0}\" has no steps")]
    NoSteps(&'static str),

    #[error("wizard \"{wizard}\" declares step \"{step}\" twice")]
    DuplicateStep {
        wizard: &'static str,
        step: &'static str,
    },

    #[error("wizard \"{wizard}\" declares section \"{section}\" twice")]
    DuplicateSection {
        wizard: &'static str,
        section: &'static str,
    },

    #[error("section \"{section}\" declares field \"{field}\" twice")]
    DuplicateField {
        section: &'static str,
        field: &'static str,
    },

    #[error("step \"{step}\" stores its verification reference in \"{path}\", which is not a text field")]
    PayloadNotText { step: &'static str, path: FieldPath },

    #[error("step \"{step}\" references unknown field \"{path}\"")]
    UnknownField { step: &'static str, path: FieldPath },

    #[error("step \"{step}\" routes to unknown step \"{target}\"")]
    UnknownTarget {
        step: &'static str,
        target: &'static str,
    },

    #[error("step \"{step}\" retries \"{target}\", which is not a verification step")]
    RetryTargetNotStage {
        step: &'static str,
        target: &'static str,
    },
}
