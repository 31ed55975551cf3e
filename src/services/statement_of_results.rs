//! Statement of results request

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, FieldValue, Requirement, SectionSpec, StepDefinition,
    WizardDefinition,
};

const YEAR: FieldPath = FieldPath::new("exam", "year");
const METHOD: FieldPath = FieldPath::new("delivery", "method");
const EMAIL: FieldPath = FieldPath::new("delivery", "email");
const POSTAL: FieldPath = FieldPath::new("delivery", "postal_address");

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "student",
            "Student",
            vec![
                FieldSpec::text("full_name", "Full name at time of exam"),
                FieldSpec::text("candidate_number", "Candidate number"),
                FieldSpec::text("date_of_birth", "Date of birth"),
            ],
        ),
        SectionSpec::new(
            "exam",
            "Examination",
            vec![
                FieldSpec::text("school", "School"),
                FieldSpec::number("year", "Year sat"),
                FieldSpec::choice("level", "Level", &["Grade 8", "Grade 10", "Grade 12"]),
                FieldSpec::number("copies", "Number of copies"),
            ],
        ),
        SectionSpec::new(
            "delivery",
            "Delivery",
            vec![
                FieldSpec::choice("method", "Delivery method", &["Collect", "Post", "Email"]),
                FieldSpec::text("email", "Email address").optional(),
                FieldSpec::text("postal_address", "Postal address").optional(),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I am the candidate or authorised by them",
            )],
        ),
    ];

    let steps = vec![
        StepDefinition::form(
            "student",
            "Student",
            "🎓",
            &[
                FieldPath::new("student", "full_name"),
                FieldPath::new("student", "candidate_number"),
                FieldPath::new("student", "date_of_birth"),
            ],
        ),
        StepDefinition::form(
            "exam",
            "Examination",
            "📝",
            &[
                FieldPath::new("exam", "school"),
                YEAR,
                FieldPath::new("exam", "level"),
                FieldPath::new("exam", "copies"),
            ],
        )
        .require(Requirement::Custom {
            description: "Year sat must be 1975 or later",
            check: |form| {
                matches!(form.get(YEAR), Some(FieldValue::Number(Some(year))) if *year >= 1975)
            },
        }),
        StepDefinition::form("delivery", "Delivery", "📬", &[METHOD, EMAIL, POSTAL])
            .require(Requirement::Custom {
                description: "Email address for email delivery",
                check: |form| form.text(METHOD) != "Email" || form.is_filled(EMAIL),
            })
            .require(Requirement::Custom {
                description: "Postal address for delivery by post",
                check: |form| form.text(METHOD) != "Post" || form.is_filled(POSTAL),
            }),
        StepDefinition::form(
            "review",
            "Review and submit",
            "☰",
            &[FieldPath::new("declaration", "accepted")],
        ),
    ];

    WizardDefinition::new(
        "statement_of_results",
        "Statement of results",
        "SOR",
        sections,
        steps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::set;
    use crate::wizard::WizardController;
    use std::sync::Arc;

    fn controller() -> WizardController {
        WizardController::new(Arc::new(definition().unwrap()))
    }

    #[test]
    fn test_email_delivery_needs_address() {
        let mut ctl = controller();
        ctl.jump_to("delivery").unwrap();
        set(&mut ctl, "delivery", "method", "Email");
        assert!(!ctl.can_advance());
        set(&mut ctl, "delivery", "email", "kila@example.pg");
        assert!(ctl.can_advance());
    }

    #[test]
    fn test_collection_needs_no_address() {
        let mut ctl = controller();
        ctl.jump_to("delivery").unwrap();
        set(&mut ctl, "delivery", "method", "Collect");
        assert!(ctl.can_advance());
    }

    #[test]
    fn test_exam_year_lower_bound() {
        let mut ctl = controller();
        ctl.jump_to("exam").unwrap();
        set(&mut ctl, "exam", "school", "Sogeri National High");
        set(&mut ctl, "exam", "level", "Grade 12");
        ctl.update_field("exam", "copies", FieldValue::Number(Some(2)))
            .unwrap();
        ctl.update_field("exam", "year", FieldValue::Number(Some(1960)))
            .unwrap();
        assert_eq!(
            ctl.unmet_requirements(),
            vec!["Year sat must be 1975 or later".to_string()]
        );
        ctl.update_field("exam", "year", FieldValue::Number(Some(2019)))
            .unwrap();
        assert!(ctl.can_advance());
    }
}
