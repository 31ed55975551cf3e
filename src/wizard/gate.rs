//! Authentication gate in front of protected wizards

use super::controller::WizardController;
use super::definition::WizardDefinition;
use std::sync::Arc;

/// Host-owned credential flags, read-only to the wizard core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Credentials {
    pub is_authenticated: bool,
    pub has_elevated_credential: bool,
}

/// Whether a wizard may mount for the given credentials
pub fn may_mount(credentials: Credentials, requires_elevation: bool) -> bool {
    !requires_elevation || credentials.has_elevated_credential
}

/// The two ways out of a blocked wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedExit {
    /// Return to the page that linked here
    GoBack,
    /// Start SEVIS Pass enrollment
    AcquireCredential,
}

impl BlockedExit {
    pub const ALL: [BlockedExit; 2] = [BlockedExit::GoBack, BlockedExit::AcquireCredential];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GoBack => "Go back",
            Self::AcquireCredential => "Get SEVIS Pass",
        }
    }
}

/// Shown in place of a wizard the user may not open yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedNotice {
    pub wizard_id: &'static str,
    pub wizard_title: &'static str,
    /// Signed in, but without the elevated credential
    pub signed_in: bool,
}

impl BlockedNotice {
    pub fn exits(&self) -> &'static [BlockedExit] {
        &BlockedExit::ALL
    }

    pub fn message(&self) -> String {
        if self.signed_in {
            format!(
                "{} needs a verified SEVIS Pass. Your password sign-in is not enough.",
                self.wizard_title
            )
        } else {
            format!("{} needs a verified SEVIS Pass.", self.wizard_title)
        }
    }
}

/// Build a controller for `definition`, or the notice explaining why not.
///
/// No form state exists for a blocked wizard.
pub fn mount(
    definition: Arc<WizardDefinition>,
    requires_elevation: bool,
    credentials: Credentials,
) -> Result<WizardController, BlockedNotice> {
    if may_mount(credentials, requires_elevation) {
        tracing::info!("Mounting {}", definition.id);
        Ok(WizardController::new(definition))
    } else {
        tracing::info!("{} blocked: elevated credential required", definition.id);
        Err(BlockedNotice {
            wizard_id: definition.id,
            wizard_title: definition.title,
            signed_in: credentials.is_authenticated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::step::StepDefinition;

    fn definition() -> Arc<WizardDefinition> {
        Arc::new(
            WizardDefinition::new(
                "protected",
                "Protected service",
                "PS",
                Vec::new(),
                vec![StepDefinition::review("review", "Review", "☰")],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_gate_over_all_flag_combinations() {
        for requires_elevation in [false, true] {
            for is_authenticated in [false, true] {
                for has_elevated_credential in [false, true] {
                    let credentials = Credentials {
                        is_authenticated,
                        has_elevated_credential,
                    };
                    let expected = !requires_elevation || has_elevated_credential;
                    assert_eq!(
                        may_mount(credentials, requires_elevation),
                        expected,
                        "requires={requires_elevation} auth={is_authenticated} elevated={has_elevated_credential}"
                    );
                    assert_eq!(
                        mount(definition(), requires_elevation, credentials).is_ok(),
                        expected
                    );
                }
            }
        }
    }

    #[test]
    fn test_blocked_notice_offers_exactly_two_exits() {
        let notice = mount(definition(), true, Credentials::default()).unwrap_err();
        assert_eq!(notice.exits().len(), 2);
        assert_eq!(notice.wizard_id, "protected");
        assert!(!notice.signed_in);
    }

    #[test]
    fn test_password_sign_in_is_not_enough() {
        let credentials = Credentials {
            is_authenticated: true,
            has_elevated_credential: false,
        };
        let notice = mount(definition(), true, credentials).unwrap_err();
        assert!(notice.signed_in);
        assert!(notice.message().contains("password"));
    }
}
