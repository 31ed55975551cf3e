//! City pass: the stated purpose picks one detail step

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, FormState, SectionSpec, StepDefinition, StepId,
    WizardDefinition,
};

const PURPOSE: FieldPath = FieldPath::new("purpose", "kind");

fn detail_step(form: &FormState) -> Option<StepId> {
    match form.text(PURPOSE) {
        "work" => Some("work"),
        "studying" => Some("study"),
        "business" => Some("business"),
        "visiting" => Some("visiting"),
        _ => None,
    }
}

fn to_documents(_: &FormState) -> Option<StepId> {
    Some("documents")
}

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "applicant",
            "Applicant",
            vec![
                FieldSpec::text("full_name", "Full name"),
                FieldSpec::text("nid_number", "NID number"),
                FieldSpec::text("phone", "Phone"),
                FieldSpec::text("home_province", "Home province"),
            ],
        ),
        SectionSpec::new(
            "purpose",
            "Purpose",
            vec![FieldSpec::choice(
                "kind",
                "Purpose of stay",
                &["work", "studying", "business", "visiting"],
            )],
        ),
        SectionSpec::new(
            "work",
            "Employment",
            vec![
                FieldSpec::text("employer", "Employer"),
                FieldSpec::text("job_title", "Job title"),
                FieldSpec::file("letter", "Employment letter"),
            ],
        ),
        SectionSpec::new(
            "study",
            "Studies",
            vec![
                FieldSpec::text("institution", "Institution"),
                FieldSpec::text("course", "Course"),
                FieldSpec::file("enrolment", "Proof of enrolment"),
            ],
        ),
        SectionSpec::new(
            "business",
            "Business",
            vec![
                FieldSpec::text("name", "Business name"),
                FieldSpec::text("ipa_number", "IPA registration number"),
            ],
        ),
        SectionSpec::new(
            "visiting",
            "Visit",
            vec![
                FieldSpec::text("host_name", "Host name"),
                FieldSpec::text("host_address", "Host address"),
                FieldSpec::number("days", "Length of stay (days)"),
            ],
        ),
        SectionSpec::new(
            "documents",
            "Documents",
            vec![
                FieldSpec::file("id_copy", "Copy of NID card"),
                FieldSpec::file("photo", "Photo"),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I will follow city by-laws during my stay",
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
                FieldPath::new("applicant", "nid_number"),
                FieldPath::new("applicant", "phone"),
                FieldPath::new("applicant", "home_province"),
            ],
        ),
        StepDefinition::form("purpose", "Purpose", "🎯", &[PURPOSE]).branch(detail_step),
        StepDefinition::form(
            "work",
            "Employment",
            "💼",
            &[
                FieldPath::new("work", "employer"),
                FieldPath::new("work", "job_title"),
                FieldPath::new("work", "letter"),
            ],
        )
        .branch(to_documents),
        StepDefinition::form(
            "study",
            "Studies",
            "🎓",
            &[
                FieldPath::new("study", "institution"),
                FieldPath::new("study", "course"),
                FieldPath::new("study", "enrolment"),
            ],
        )
        .branch(to_documents),
        StepDefinition::form(
            "business",
            "Business",
            "🏢",
            &[
                FieldPath::new("business", "name"),
                FieldPath::new("business", "ipa_number"),
            ],
        )
        .branch(to_documents),
        StepDefinition::form(
            "visiting",
            "Visit",
            "🧳",
            &[
                FieldPath::new("visiting", "host_name"),
                FieldPath::new("visiting", "host_address"),
                FieldPath::new("visiting", "days"),
            ],
        )
        .branch(to_documents),
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

    WizardDefinition::new("city_pass", "City pass", "NCP", sections, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{fill_current_step, set};
    use crate::wizard::WizardController;
    use std::sync::Arc;

    fn at_purpose() -> WizardController {
        let mut ctl = WizardController::new(Arc::new(definition().unwrap()));
        fill_current_step(&mut ctl);
        ctl.advance().unwrap();
        ctl
    }

    #[test]
    fn test_visiting_skips_other_detail_steps() {
        let mut ctl = at_purpose();
        set(&mut ctl, "purpose", "kind", "visiting");
        assert_eq!(ctl.advance(), Ok("visiting"));

        fill_current_step(&mut ctl);
        assert_eq!(ctl.advance(), Ok("documents"));

        let def = ctl.definition();
        for skipped in ["work", "study", "business"] {
            let index = def.index_of(skipped).unwrap();
            assert!(!ctl.has_visited(index), "{skipped} was visited");
        }
    }

    #[test]
    fn test_each_purpose_routes_to_its_detail_step() {
        for (purpose, step) in [
            ("work", "work"),
            ("studying", "study"),
            ("business", "business"),
            ("visiting", "visiting"),
        ] {
            let mut ctl = at_purpose();
            set(&mut ctl, "purpose", "kind", purpose);
            assert_eq!(ctl.advance(), Ok(step));
        }
    }

    #[test]
    fn test_work_detail_goes_straight_to_documents() {
        let mut ctl = at_purpose();
        set(&mut ctl, "purpose", "kind", "work");
        ctl.advance().unwrap();
        fill_current_step(&mut ctl);
        assert_eq!(ctl.advance(), Ok("documents"));
        assert!(ctl.retreat());
        assert_eq!(ctl.current_step().id, "work");
    }
}
