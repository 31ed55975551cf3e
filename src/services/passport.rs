//! Passport application: type menu, previous passport skipped for new ones

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, MenuOption, Requirement, SectionSpec, StepDefinition,
    WizardDefinition,
};

const KIND: FieldPath = FieldPath::new("application", "kind");
const LOSS_REPORT: FieldPath = FieldPath::new("previous", "loss_report");

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "application",
            "Application",
            vec![FieldSpec::choice(
                "kind",
                "Application type",
                &["new", "renewal", "replacement"],
            )],
        ),
        SectionSpec::new(
            "personal",
            "Personal details",
            vec![
                FieldSpec::text("surname", "Surname"),
                FieldSpec::text("given_names", "Given names"),
                FieldSpec::text("date_of_birth", "Date of birth"),
                FieldSpec::text("place_of_birth", "Place of birth"),
                FieldSpec::choice("sex", "Sex", &["Female", "Male"]),
                FieldSpec::text("nid_number", "NID number"),
            ],
        ),
        SectionSpec::new(
            "previous",
            "Previous passport",
            vec![
                FieldSpec::text("number", "Passport number"),
                FieldSpec::text("issue_date", "Date of issue"),
                FieldSpec::file("loss_report", "Police report of loss").optional(),
            ],
        ),
        SectionSpec::new(
            "emergency",
            "Emergency contact",
            vec![
                FieldSpec::text("name", "Contact name"),
                FieldSpec::text("relationship", "Relationship"),
                FieldSpec::text("phone", "Phone"),
            ],
        ),
        SectionSpec::new(
            "documents",
            "Documents",
            vec![
                FieldSpec::file("birth_certificate", "Birth certificate"),
                FieldSpec::file("photo", "Passport photo"),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I am a citizen and the information I gave is true",
            )],
        ),
    ];

    let option = |label, description, value| MenuOption {
        label,
        description,
        value,
        target: "personal",
    };

    let steps = vec![
        StepDefinition::menu(
            "kind",
            "Application type",
            "🛂",
            KIND,
            vec![
                option("New passport", "You have never held a passport", "new"),
                option("Renewal", "Your passport is expiring or expired", "renewal"),
                option("Replacement", "Your passport was lost, stolen or damaged", "replacement"),
            ],
        ),
        StepDefinition::form(
            "personal",
            "Personal details",
            "👤",
            &[
                FieldPath::new("personal", "surname"),
                FieldPath::new("personal", "given_names"),
                FieldPath::new("personal", "date_of_birth"),
                FieldPath::new("personal", "place_of_birth"),
                FieldPath::new("personal", "sex"),
                FieldPath::new("personal", "nid_number"),
            ],
        )
        .branch(|form| (form.text(KIND) == "new").then_some("emergency")),
        StepDefinition::form(
            "previous",
            "Previous passport",
            "📕",
            &[
                FieldPath::new("previous", "number"),
                FieldPath::new("previous", "issue_date"),
                LOSS_REPORT,
            ],
        )
        .require(Requirement::Custom {
            description: "Attach a police report for a lost passport",
            check: |form| form.text(KIND) != "replacement" || form.is_filled(LOSS_REPORT),
        }),
        StepDefinition::form(
            "emergency",
            "Emergency contact",
            "☎",
            &[
                FieldPath::new("emergency", "name"),
                FieldPath::new("emergency", "relationship"),
                FieldPath::new("emergency", "phone"),
            ],
        ),
        StepDefinition::form(
            "documents",
            "Documents",
            "📎",
            &[
                FieldPath::new("documents", "birth_certificate"),
                FieldPath::new("documents", "photo"),
            ],
        ),
        StepDefinition::form(
            "review",
            "Review and submit",
            "☰",
            &[FieldPath::new("declaration", "accepted")],
        ),
    ];

    WizardDefinition::new("passport", "Passport application", "PPT", sections, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::fill_current_step;
    use crate::wizard::WizardController;
    use std::sync::Arc;

    fn after_personal(option: usize) -> WizardController {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        assert_eq!(ctl.choose(option), Ok("personal"));
        fill_current_step(&mut ctl);
        ctl.advance().unwrap();
        ctl
    }

    #[test]
    fn test_new_passport_skips_previous() {
        let ctl = after_personal(0);
        assert_eq!(ctl.current_step().id, "emergency");
        assert_eq!(ctl.form().text(KIND), "new");
    }

    #[test]
    fn test_renewal_asks_for_previous_passport() {
        let mut ctl = after_personal(1);
        assert_eq!(ctl.current_step().id, "previous");
        fill_current_step(&mut ctl);
        assert!(ctl.can_advance());
    }

    #[test]
    fn test_replacement_needs_loss_report() {
        let mut ctl = after_personal(2);
        fill_current_step(&mut ctl);
        assert_eq!(
            ctl.unmet_requirements(),
            vec!["Attach a police report for a lost passport".to_string()]
        );
    }

    #[test]
    fn test_retreat_from_emergency_returns_to_personal() {
        let mut ctl = after_personal(0);
        assert!(ctl.retreat());
        assert_eq!(ctl.current_step().id, "personal");
    }
}
