//! Driver's license renewal: seven linear steps

use crate::wizard::{
    DefinitionError, FieldPath, FieldSpec, SectionSpec, StepDefinition, WizardDefinition,
};

const PROVINCES: &[&str] = &[
    "National Capital District",
    "Central",
    "Morobe",
    "Eastern Highlands",
    "Western Highlands",
    "East New Britain",
    "Madang",
];

pub fn definition() -> Result<WizardDefinition, DefinitionError> {
    let sections = vec![
        SectionSpec::new(
            "license",
            "Current license",
            vec![
                FieldSpec::text("number", "License number"),
                FieldSpec::text("expiry_date", "Expiry date"),
                FieldSpec::choice("class", "License class", &["C", "1", "2", "3", "4"]),
            ],
        ),
        SectionSpec::new(
            "personal",
            "Personal details",
            vec![
                FieldSpec::text("full_name", "Full name"),
                FieldSpec::text("date_of_birth", "Date of birth"),
                FieldSpec::text("nid_number", "NID number"),
            ],
        ),
        SectionSpec::new(
            "address",
            "Address",
            vec![
                FieldSpec::choice("province", "Province", PROVINCES),
                FieldSpec::text("district", "District"),
                FieldSpec::text("street", "Street or section/lot").optional(),
            ],
        ),
        SectionSpec::new(
            "medical",
            "Medical fitness",
            vec![
                FieldSpec::choice("eyesight", "Eyesight", &["Normal", "Corrective lenses"]),
                FieldSpec::multiline("conditions", "Medical conditions").optional(),
                FieldSpec::consent("fit_to_drive", "I am medically fit to drive"),
            ],
        ),
        SectionSpec::new(
            "photo",
            "Photo and signature",
            vec![
                FieldSpec::file("portrait", "Passport-size photo"),
                FieldSpec::file("signature", "Signature scan"),
            ],
        ),
        SectionSpec::new(
            "payment",
            "Payment",
            vec![
                FieldSpec::choice("period", "Renewal period", &["1 year", "3 years", "5 years"]),
                FieldSpec::choice(
                    "method",
                    "Payment method",
                    &["Card", "Mobile money", "Bank transfer"],
                ),
            ],
        ),
        SectionSpec::new(
            "declaration",
            "Declaration",
            vec![FieldSpec::consent(
                "accepted",
                "The information I gave is true and complete",
            )],
        ),
    ];

    let steps = vec![
        StepDefinition::form(
            "license",
            "Current license",
            "🪪",
            &[
                FieldPath::new("license", "number"),
                FieldPath::new("license", "expiry_date"),
                FieldPath::new("license", "class"),
            ],
        )
        .describe("Details of the license you are renewing"),
        StepDefinition::form(
            "personal",
            "Personal details",
            "👤",
            &[
                FieldPath::new("personal", "full_name"),
                FieldPath::new("personal", "date_of_birth"),
                FieldPath::new("personal", "nid_number"),
            ],
        ),
        StepDefinition::form(
            "address",
            "Address",
            "🏠",
            &[
                FieldPath::new("address", "province"),
                FieldPath::new("address", "district"),
                FieldPath::new("address", "street"),
            ],
        ),
        StepDefinition::form(
            "medical",
            "Medical fitness",
            "⚕",
            &[
                FieldPath::new("medical", "eyesight"),
                FieldPath::new("medical", "conditions"),
                FieldPath::new("medical", "fit_to_drive"),
            ],
        )
        .describe("Declare anything that affects your ability to drive"),
        StepDefinition::form(
            "photo",
            "Photo and signature",
            "📷",
            &[
                FieldPath::new("photo", "portrait"),
                FieldPath::new("photo", "signature"),
            ],
        ),
        StepDefinition::form(
            "payment",
            "Payment",
            "💳",
            &[
                FieldPath::new("payment", "period"),
                FieldPath::new("payment", "method"),
            ],
        )
        .describe("Fee is K150 per year of validity"),
        StepDefinition::form(
            "review",
            "Review and submit",
            "☰",
            &[FieldPath::new("declaration", "accepted")],
        ),
    ];

    WizardDefinition::new(
        "drivers_license",
        "Driver's license renewal",
        "DLR",
        sections,
        steps,
    )
}
