//! Police clearance certificate

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, Requirement, SectionSpec, StepDefinition,
    WizardDefinition,
};

const PURPOSE: FieldPath = FieldPath::new("purpose", "reason");
const DESTINATION: FieldPath = FieldPath::new("purpose", "destination_country");

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "applicant",
            "Applicant",
            vec![
                FieldSpec::text("full_name", "Full name"),
                FieldSpec::text("other_names", "Other names used").optional(),
                FieldSpec::text("date_of_birth", "Date of birth"),
                FieldSpec::text("nid_number", "NID number"),
                FieldSpec::text("phone", "Phone"),
            ],
        ),
        SectionSpec::new(
            "address",
            "Address history",
            vec![
                FieldSpec::text("current", "Current address"),
                FieldSpec::number("years_at_current", "Years at current address"),
                FieldSpec::multiline("previous", "Previous addresses (last 5 years)").optional(),
            ],
        ),
        SectionSpec::new(
            "purpose",
            "Purpose",
            vec![
                FieldSpec::choice(
                    "reason",
                    "Purpose of certificate",
                    &["Employment", "Visa", "Adoption", "Firearm licence", "Other"],
                ),
                FieldSpec::text("destination_country", "Destination country").optional(),
            ],
        ),
        SectionSpec::new(
            "fingerprints",
            "Fingerprint appointment",
            vec![
                FieldSpec::choice(
                    "station",
                    "Police station",
                    &["Boroko", "Gordons", "Waigani", "Lae Top Town", "Mt Hagen"],
                ),
                FieldSpec::text("preferred_date", "Preferred date"),
            ],
        ),
        SectionSpec::new(
            "documents",
            "Documents",
            vec![
                FieldSpec::file("id_copy", "Copy of NID card"),
                FieldSpec::file("photo", "Passport-size photo"),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I consent to a search of police records",
            )],
        ),
    ];

    let steps = vec![
        StepDefinition::form(
            "applicant",
            "Applicant",
            "👤",
            &[
                FieldPath::new("applicant", "full_name"),
                FieldPath::new("applicant", "other_names"),
                FieldPath::new("applicant", "date_of_birth"),
                FieldPath::new("applicant", "nid_number"),
                FieldPath::new("applicant", "phone"),
            ],
        ),
        StepDefinition::form(
            "address",
            "Address history",
            "🏠",
            &[
                FieldPath::new("address", "current"),
                FieldPath::new("address", "years_at_current"),
                FieldPath::new("address", "previous"),
            ],
        )
        .describe("List every address from the last five years"),
        StepDefinition::form("purpose", "Purpose", "🎯", &[PURPOSE, DESTINATION]).require(
            Requirement::Custom {
                description: "Destination country is needed for a visa",
                check: |form| form.text(PURPOSE) != "Visa" || form.is_filled(DESTINATION),
            },
        ),
        StepDefinition::form(
            "fingerprints",
            "Fingerprints",
            "🖐",
            &[
                FieldPath::new("fingerprints", "station"),
                FieldPath::new("fingerprints", "preferred_date"),
            ],
        )
        .describe("Fingerprints are taken in person at the station you pick"),
        StepDefinition::form(
            "documents",
            "Documents",
            "📎",
            &[
                FieldPath::new("documents", "id_copy"),
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

    WizardDefinition::new(
        "police_clearance",
        "Police clearance certificate",
        "PCC",
        sections,
        steps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fill_current_step, set};
    use crate::wizard::{WizardController, WizardError};
    use std::sync::Arc;

    fn at_purpose() -> WizardController {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        ctl.jump_to("purpose").unwrap();
        ctl
    }

    #[test]
    fn test_visa_needs_destination() {
        let mut ctl = at_purpose();
        set(&mut ctl, "purpose", "reason", "Visa");
        let err = ctl.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::IncompleteStep {
                step: "purpose",
                missing: vec!["Destination country is needed for a visa".into()]
            }
        );

        set(&mut ctl, "purpose", "destination_country", "Australia");
        assert_eq!(ctl.advance(), Ok("fingerprints"));
    }

    #[test]
    fn test_employment_needs_no_destination() {
        let mut ctl = at_purpose();
        fill_current_step(&mut ctl);
        assert!(ctl.can_advance());
    }
}
