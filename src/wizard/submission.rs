//! Terminal hand-off of a completed wizard

use super::definition::WizardDefinition;
use super::form_state::FormState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A submitted application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub reference: String,
    pub wizard_id: &'static str,
    pub wizard_title: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub form: FormState,
}

impl Submission {
    pub fn new(definition: &WizardDefinition, form: FormState) -> Self {
        Self {
            reference: generate_reference(definition.reference_prefix),
            wizard_id: definition.id,
            wizard_title: definition.title,
            submitted_at: Utc::now(),
            form,
        }
    }
}

/// Reference number such as `DLR-3F9A0C21B7`
pub fn generate_reference(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{prefix}-{}", &id[..10])
}

/// Receives the submission when a wizard completes
#[cfg_attr(test, mockall::automock)]
pub trait CompletionHandler {
    fn on_complete(&mut self, submission: Submission);
}

/// Collecting handler, used by the app to pick up what was submitted
impl CompletionHandler for Vec<Submission> {
    fn on_complete(&mut self, submission: Submission) {
        self.push(submission);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_has_prefix_and_fixed_length() {
        let reference = generate_reference("MRN");
        assert!(reference.starts_with("MRN-"));
        assert_eq!(reference.len(), 14);
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_references_are_unique() {
        assert_ne!(generate_reference("X"), generate_reference("X"));
    }

    #[test]
    fn test_vec_handler_collects() {
        let mut collected: Vec<Submission> = Vec::new();
        let submission = Submission {
            reference: "T-1".into(),
            wizard_id: "t",
            wizard_title: "Test",
            submitted_at: Utc::now(),
            form: FormState::default(),
        };
        collected.on_complete(submission.clone());
        assert_eq!(collected, vec![submission]);
    }
}
