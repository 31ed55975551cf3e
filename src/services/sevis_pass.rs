//! SEVIS Pass enrollment: face verification with an in-person fallback

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, MenuOption, SectionSpec, StageSpec, StepDefinition,
    Tone, VerificationKind, WizardDefinition,
};

/// Issued only when the face check succeeds
pub const PASS_NUMBER: FieldPath = FieldPath::new("enrollment", "pass_number");

const NID: FieldPath = FieldPath::new("identity", "nid_number");
const METHOD: FieldPath = FieldPath::new("enrollment", "method");

/// Face capture attempts per session
const FACE_ATTEMPTS: u32 = 3;

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "identity",
            "Identity",
            vec![
                FieldSpec::text("full_name", "Full name"),
                FieldSpec::text("nid_number", "NID number"),
                FieldSpec::text("date_of_birth", "Date of birth"),
                FieldSpec::text("phone", "Mobile number"),
            ],
        ),
        SectionSpec::new(
            "enrollment",
            "Enrollment",
            vec![
                FieldSpec::choice("method", "Verification method", &["face", "in_person"]),
                FieldSpec::text("pass_number", "SEVIS Pass number").optional(),
            ],
        ),
        SectionSpec::new(
            "camera",
            "Camera",
            vec![
                FieldSpec::consent("consent", "I allow the camera to capture my face"),
                FieldSpec::flag("good_light", "I am in a well lit place"),
            ],
        ),
        SectionSpec::new(
            "appointment",
            "Appointment",
            vec![
                FieldSpec::choice(
                    "office",
                    "Registration office",
                    &["Waigani", "Lae", "Mt Hagen", "Kokopo", "Madang"],
                ),
                FieldSpec::text("date", "Preferred date"),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I am the person named on this NID",
            )],
        ),
    ];

    let steps = vec![
        StepDefinition::form(
            "identity",
            "Identity",
            "👤",
            &[
                FieldPath::new("identity", "full_name"),
                NID,
                FieldPath::new("identity", "date_of_birth"),
                FieldPath::new("identity", "phone"),
            ],
        ),
        StepDefinition::menu(
            "method",
            "Verification method",
            "🔐",
            METHOD,
            vec![
                MenuOption {
                    label: "Face verification",
                    description: "Match your face against your NID photo now",
                    value: "face",
                    target: "prepare",
                },
                MenuOption {
                    label: "In person",
                    description: "Book a visit to a registration office",
                    value: "in_person",
                    target: "in_person",
                },
            ],
        ),
        StepDefinition::form(
            "prepare",
            "Prepare camera",
            "📷",
            &[
                FieldPath::new("camera", "consent"),
                FieldPath::new("camera", "good_light"),
            ],
        )
        .describe("Remove glasses and hats, and face the camera"),
        StepDefinition::verification(
            "capture",
            "Face verification",
            "🙂",
            StageSpec {
                kind: VerificationKind::FaceMatch,
                subject: NID,
                on_success: "verified",
                on_failure: "face_failed",
                on_cancel: "method",
                max_attempts: Some(FACE_ATTEMPTS),
                on_exhausted: Some("in_person"),
                payload_field: Some(PASS_NUMBER),
            },
        )
        .describe("Hold still while we compare your face with your NID photo"),
        StepDefinition::outcome(
            "face_failed",
            "Not verified",
            "✗",
            Tone::Failure,
            "We could not match your face to your NID photo",
        )
        .retrying("capture")
        .branch(|_| Some("in_person")),
        StepDefinition::form(
            "in_person",
            "Book a visit",
            "🏢",
            &[
                FieldPath::new("appointment", "office"),
                FieldPath::new("appointment", "date"),
            ],
        )
        .describe("Bring your NID card to the office")
        .branch(|_| Some("review")),
        StepDefinition::outcome(
            "verified",
            "Verified",
            "✓",
            Tone::Success,
            "Your identity is verified",
        )
        .showing(PASS_NUMBER),
        StepDefinition::form(
            "review",
            "Review and submit",
            "☰",
            &[FieldPath::new("declaration", "accepted")],
        ),
    ];

    WizardDefinition::new(
        "sevis_pass",
        "SEVIS Pass enrollment",
        "SVP",
        sections,
        steps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::fill_current_step;
    use crate::wizard::{StageResult, WizardController, WizardError};
    use std::sync::Arc;

    fn at_capture() -> WizardController {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        fill_current_step(&mut ctl);
        ctl.advance().unwrap();
        assert_eq!(ctl.choose(0), Ok("prepare"));
        fill_current_step(&mut ctl);
        assert_eq!(ctl.advance(), Ok("capture"));
        ctl
    }

    fn fail(ctl: &mut WizardController) {
        let ticket = ctl.begin_stage().unwrap();
        ctl.complete_stage(ticket.id, StageResult::failure(ticket.attempt, "no match"))
            .unwrap();
    }

    #[test]
    fn test_three_failures_then_retry_falls_back_to_in_person() {
        let mut ctl = at_capture();
        fail(&mut ctl);
        ctl.retry().unwrap();
        fail(&mut ctl);
        ctl.retry().unwrap();
        fail(&mut ctl);
        assert_eq!(ctl.current_step().id, "face_failed");

        assert_eq!(
            ctl.retry(),
            Err(WizardError::RetryBudgetExhausted { attempts: 3 })
        );
        assert_eq!(ctl.current_step().id, "in_person");
        assert!(ctl.form().text(PASS_NUMBER).is_empty());
    }

    #[test]
    fn test_success_issues_pass_number() {
        let mut ctl = at_capture();
        let ticket = ctl.begin_stage().unwrap();
        ctl.complete_stage(ticket.id, StageResult::success(1, Some("SP-1".into()), "ok"))
            .unwrap();
        assert_eq!(ctl.current_step().id, "verified");
        assert_eq!(ctl.form().text(PASS_NUMBER), "SP-1");
        assert_eq!(ctl.advance(), Ok("review"));
    }

    #[test]
    fn test_camera_consent_is_required() {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        ctl.jump_to("prepare").unwrap();
        assert!(matches!(
            ctl.advance(),
            Err(WizardError::IncompleteStep { step: "prepare", .. })
        ));
    }

    #[test]
    fn test_in_person_path_skips_camera() {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        fill_current_step(&mut ctl);
        ctl.advance().unwrap();
        assert_eq!(ctl.choose(1), Ok("in_person"));
        fill_current_step(&mut ctl);
        assert_eq!(ctl.advance(), Ok("review"));
    }
}
