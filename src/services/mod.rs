//! Services directory and the wizard behind each service

mod city_pass;
mod drivers_license;
mod medical_record;
mod passport;
mod police_clearance;
mod sevis_pass;
mod statement_of_results;

use crate::wizard::{DefinitionError, WizardDefinition};
use std::sync::Arc;

pub use sevis_pass::PASS_NUMBER;

/// Directory grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Identity,
    Transport,
    Justice,
    Education,
    Health,
    Municipal,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Identity,
        Category::Transport,
        Category::Justice,
        Category::Education,
        Category::Health,
        Category::Municipal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Transport => "Transport",
            Self::Justice => "Justice",
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Municipal => "Municipal",
        }
    }

    /// Next filter in the cycle `All -> Identity -> ... -> Municipal -> All`
    pub fn next_filter(filter: Option<Category>) -> Option<Category> {
        match filter {
            None => Some(Self::ALL[0]),
            Some(current) => {
                let index = Self::ALL.iter().position(|c| *c == current).unwrap_or(0);
                Self::ALL.get(index + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    DriversLicense,
    PoliceClearance,
    Passport,
    StatementOfResults,
    MedicalRecord,
    CityPass,
    SevisPass,
}

/// A directory entry
#[derive(Debug, Clone, Copy)]
pub struct Service {
    pub kind: ServiceKind,
    pub title: &'static str,
    pub summary: &'static str,
    pub category: Category,
    pub requires_elevation: bool,
    pub fee: &'static str,
}

const CATALOG: [Service; 7] = [
    Service {
        kind: ServiceKind::SevisPass,
        title: "SEVIS Pass enrollment",
        summary: "Verify your identity once to unlock protected services",
        category: Category::Identity,
        requires_elevation: false,
        fee: "Free",
    },
    Service {
        kind: ServiceKind::DriversLicense,
        title: "Driver's license renewal",
        summary: "Renew an expiring or expired driver's license",
        category: Category::Transport,
        requires_elevation: true,
        fee: "K150",
    },
    Service {
        kind: ServiceKind::PoliceClearance,
        title: "Police clearance certificate",
        summary: "Certificate of good conduct for work, travel or adoption",
        category: Category::Justice,
        requires_elevation: true,
        fee: "K100",
    },
    Service {
        kind: ServiceKind::Passport,
        title: "Passport application",
        summary: "Apply for a new passport, or renew or replace one",
        category: Category::Identity,
        requires_elevation: true,
        fee: "K300",
    },
    Service {
        kind: ServiceKind::StatementOfResults,
        title: "Statement of results",
        summary: "Request an official copy of national examination results",
        category: Category::Education,
        requires_elevation: false,
        fee: "K50",
    },
    Service {
        kind: ServiceKind::MedicalRecord,
        title: "Medical record number",
        summary: "Get a national medical record number for hospital visits",
        category: Category::Health,
        requires_elevation: false,
        fee: "Free",
    },
    Service {
        kind: ServiceKind::CityPass,
        title: "City pass",
        summary: "Residency pass for working, studying or visiting the capital",
        category: Category::Municipal,
        requires_elevation: false,
        fee: "K80",
    },
];

pub fn catalog() -> &'static [Service] {
    &CATALOG
}

/// Services in a category, or all of them
pub fn filtered(filter: Option<Category>) -> Vec<&'static Service> {
    catalog()
        .iter()
        .filter(|s| filter.map_or(true, |c| s.category == c))
        .collect()
}

impl ServiceKind {
    pub fn service(&self) -> &'static Service {
        CATALOG
            .iter()
            .find(|s| s.kind == *self)
            .unwrap_or(&CATALOG[0])
    }

    pub fn title(&self) -> &'static str {
        self.service().title
    }

    pub fn requires_elevation(&self) -> bool {
        self.service().requires_elevation
    }

    /// Fresh wizard definition for this service
    pub fn definition(&self) -> Result<Arc<WizardDefinition>, DefinitionError> {
        let definition = match self {
            Self::DriversLicense => drivers_license::definition(),
            Self::PoliceClearance => police_clearance::definition(),
            Self::Passport => passport::definition(),
            Self::StatementOfResults => statement_of_results::definition(),
            Self::MedicalRecord => medical_record::definition(),
            Self::CityPass => city_pass::definition(),
            Self::SevisPass => sevis_pass::definition(),
        }?;
        Ok(Arc::new(definition))
    }
}

/// Helpers shared by the wizard walkthrough tests
#[cfg(test)]
pub(crate) mod testing {
    use crate::wizard::{FieldKind, FieldValue, FileRef, StepKind, WizardController};

    /// Fill every required field of the current form step with a valid value
    pub fn fill_current_step(ctl: &mut WizardController) {
        let StepKind::Form { fields } = ctl.current_step().kind.clone() else {
            return;
        };
        for path in fields {
            let spec = *ctl.definition().field_spec(path).unwrap();
            if !spec.required {
                continue;
            }
            let value = match spec.kind {
                FieldKind::Text | FieldKind::Multiline => FieldValue::Text("Sample".into()),
                FieldKind::Choice(options) => FieldValue::Text(options[0].into()),
                FieldKind::Flag => FieldValue::Flag(true),
                FieldKind::Number => FieldValue::Number(Some(3)),
                FieldKind::File => FieldValue::File(Some(FileRef {
                    name: "scan.pdf".into(),
                })),
            };
            ctl.update_field(path.section, path.field, value).unwrap();
        }
    }

    pub fn set(ctl: &mut WizardController, section: &str, field: &str, value: &str) {
        ctl.update_field(section, field, FieldValue::Text(value.into()))
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ServiceKind; 7] = [
        ServiceKind::DriversLicense,
        ServiceKind::PoliceClearance,
        ServiceKind::Passport,
        ServiceKind::StatementOfResults,
        ServiceKind::MedicalRecord,
        ServiceKind::CityPass,
        ServiceKind::SevisPass,
    ];

    #[test]
    fn test_every_definition_validates() {
        for kind in ALL {
            let definition = kind.definition();
            assert!(definition.is_ok(), "{kind:?}: {:?}", definition.err());
        }
    }

    #[test]
    fn test_every_kind_is_in_catalog() {
        for kind in ALL {
            assert_eq!(kind.service().kind, kind);
        }
        assert_eq!(catalog().len(), ALL.len());
    }

    #[test]
    fn test_reference_prefixes_are_unique() {
        let mut prefixes: Vec<&str> = ALL
            .iter()
            .map(|k| k.definition().unwrap().reference_prefix)
            .collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), ALL.len());
    }

    #[test]
    fn test_sevis_pass_is_never_gated() {
        assert!(!ServiceKind::SevisPass.requires_elevation());
        assert!(ServiceKind::DriversLicense.requires_elevation());
    }

    #[test]
    fn test_category_filter_cycles_back_to_all() {
        let mut filter = None;
        let mut seen = Vec::new();
        for _ in 0..Category::ALL.len() {
            filter = Category::next_filter(filter);
            seen.push(filter.unwrap());
        }
        assert_eq!(seen, Category::ALL.to_vec());
        assert_eq!(Category::next_filter(filter), None);
    }

    #[test]
    fn test_filtered_by_category() {
        assert_eq!(filtered(None).len(), 7);
        let identity: Vec<_> = filtered(Some(Category::Identity))
            .iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(identity, vec![ServiceKind::SevisPass, ServiceKind::Passport]);
    }
}
