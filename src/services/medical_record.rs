//! Medical record number: a record search decides between issue and review

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, SectionSpec, StageSpec, StepDefinition, Tone,
    VerificationKind, WizardDefinition,
};

const NID: FieldPath = FieldPath::new("patient", "nid_number");
const MRN: FieldPath = FieldPath::new("record", "mrn");

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "patient",
            "Patient",
            vec![
                FieldSpec::text("full_name", "Full name"),
                FieldSpec::text("date_of_birth", "Date of birth"),
                FieldSpec::choice("sex", "Sex", &["Female", "Male"]),
                FieldSpec::text("nid_number", "NID number"),
            ],
        ),
        SectionSpec::new(
            "contact",
            "Contact",
            vec![
                FieldSpec::text("phone", "Phone"),
                FieldSpec::text("village", "Village or suburb"),
                FieldSpec::text("next_of_kin", "Next of kin").optional(),
            ],
        ),
        SectionSpec::new(
            "facility",
            "Facility",
            vec![
                FieldSpec::choice(
                    "name",
                    "Registering facility",
                    &[
                        "Port Moresby General Hospital",
                        "Angau Memorial Hospital",
                        "Mt Hagen Provincial Hospital",
                        "Nonga General Hospital",
                    ],
                ),
                FieldSpec::multiline("reason", "Reason for visit").optional(),
            ],
        ),
        SectionSpec::new(
            "record",
            "Record",
            vec![FieldSpec::text("mrn", "Medical record number").optional()],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "I agree to my health records being linked to this number",
            )],
        ),
    ];

    let steps = vec![
        StepDefinition::form(
            "patient",
            "Patient",
            "👤",
            &[
                FieldPath::new("patient", "full_name"),
                FieldPath::new("patient", "date_of_birth"),
                FieldPath::new("patient", "sex"),
                NID,
            ],
        ),
        StepDefinition::form(
            "contact",
            "Contact",
            "☎",
            &[
                FieldPath::new("contact", "phone"),
                FieldPath::new("contact", "village"),
                FieldPath::new("contact", "next_of_kin"),
            ],
        ),
        StepDefinition::form(
            "facility",
            "Facility",
            "🏥",
            &[
                FieldPath::new("facility", "name"),
                FieldPath::new("facility", "reason"),
            ],
        ),
        StepDefinition::verification(
            "search",
            "Record search",
            "🔎",
            StageSpec {
                kind: VerificationKind::RecordLookup,
                subject: NID,
                on_success: "issued",
                on_failure: "human_review",
                on_cancel: "facility",
                max_attempts: None,
                on_exhausted: None,
                payload_field: Some(MRN),
            },
        )
        .describe("Checking the national register for an existing record"),
        StepDefinition::outcome(
            "issued",
            "Number issued",
            "✓",
            Tone::Success,
            "Your medical record number has been issued",
        )
        .showing(MRN)
        .branch(|_| Some("review")),
        StepDefinition::outcome(
            "human_review",
            "Needs review",
            "⚠",
            Tone::Info,
            "A records officer will check your details and contact you",
        )
        .retrying("search"),
        StepDefinition::form(
            "review",
            "Review and submit",
            "☰",
            &[FieldPath::new("declaration", "accepted")],
        ),
    ];

    WizardDefinition::new(
        "medical_record",
        "Medical record number",
        "MRN",
        sections,
        steps,
    )
}
