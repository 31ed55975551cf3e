//! Generic multi-step form wizard
//!
//! Every application form is a [`WizardDefinition`] (data) driven by a
//! [`WizardController`] (behaviour). Views render from the controller and send
//! input back through it.

mod controller;
mod definition;
mod error;
mod field;
mod form_state;
mod gate;
mod progress;
mod stage;
mod step;
mod submission;
mod verification;

pub use controller::{SessionStatus, WizardController};
pub use definition::WizardDefinition;
pub use error::{DefinitionError, WizardError};
pub use field::{FieldKind, FieldPath, FieldSpec, FieldValue, FileRef, SectionSpec};
pub use form_state::FormState;
pub use gate::{mount, BlockedExit, BlockedNotice, Credentials};
pub use progress::{ProgressSnapshot, StepVisual};
pub use stage::StageResult;
pub use step::{MenuOption, Requirement, StageSpec, StepDefinition, StepId, StepKind, Tone};
pub use submission::Submission;
#[cfg(test)]
pub use submission::MockCompletionHandler;
pub use verification::{
    run_verification, SimulatedVerifier, VerificationKind, VerificationReport,
    VerificationRequest, Verifier,
};
#[cfg(test)]
pub use verification::MockVerifier;
