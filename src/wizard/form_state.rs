//! Section-keyed form values shared by every step of a wizard

use super::field::{FieldPath, FieldValue, SectionSpec};
use super::WizardError;
use serde::Serialize;

/// A single named value inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub name: &'static str,
    pub value: FieldValue,
}

/// All values stored under one section key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionValues {
    pub name: &'static str,
    pub fields: Vec<FieldEntry>,
}

/// Every field value of a wizard, keyed by section then field.
///
/// The set of sections and fields is fixed when the state is built from the
/// wizard's section specs. Only values change afterwards, and only through
/// [`FormState::update_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FormState {
    sections: Vec<SectionValues>,
}

impl FormState {
    /// Build an empty state with one entry per declared field
    pub fn from_sections(specs: &[SectionSpec]) -> Self {
        let sections = specs
            .iter()
            .map(|spec| SectionValues {
                name: spec.name,
                fields: spec
                    .fields
                    .iter()
                    .map(|field| FieldEntry {
                        name: field.name,
                        value: field.kind.default_value(),
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionValues] {
        &self.sections
    }

    /// Look up a value by section and field name
    pub fn value(&self, section: &str, field: &str) -> Option<&FieldValue> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| &f.value)
    }

    pub fn get(&self, path: FieldPath) -> Option<&FieldValue> {
        self.value(path.section, path.field)
    }

    /// Text of a field, or "" when missing or not textual
    pub fn text(&self, path: FieldPath) -> &str {
        self.get(path).map(FieldValue::as_text).unwrap_or("")
    }

    /// Flag of a field, false when missing
    pub fn flag(&self, path: FieldPath) -> bool {
        self.get(path).is_some_and(FieldValue::as_flag)
    }

    pub fn is_filled(&self, path: FieldPath) -> bool {
        self.get(path).is_some_and(|v| !v.is_empty())
    }

    /// Replace one field value.
    ///
    /// Fails when the section or field was not declared, or when the new value
    /// is of a different kind than the declared one.
    pub fn update_field(
        &mut self,
        section: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        let values = self
            .sections
            .iter_mut()
            .find(|s| s.name == section)
            .ok_or_else(|| WizardError::UnknownSection(section.to_string()))?;
        let entry = values
            .fields
            .iter_mut()
            .find(|f| f.name == field)
            .ok_or_else(|| WizardError::UnknownField {
                section: section.to_string(),
                field: field.to_string(),
            })?;
        if !entry.value.same_kind(&value) {
            return Err(WizardError::FieldKindMismatch {
                section: section.to_string(),
                field: field.to_string(),
            });
        }
        entry.value = value;
        Ok(())
    }

    /// Number of fields that hold a non-empty value
    pub fn filled_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter(|f| !f.value.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::field::{FieldSpec, FileRef};

    fn sample_specs() -> Vec<SectionSpec> {
        vec![
            SectionSpec::new(
                "applicant",
                "Applicant",
                vec![
                    FieldSpec::text("full_name", "Full name"),
                    FieldSpec::number("age", "Age"),
                ],
            ),
            SectionSpec::new(
                "documents",
                "Documents",
                vec![
                    FieldSpec::file("photo", "Photo"),
                    FieldSpec::consent("declaration", "I declare"),
                ],
            ),
        ]
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_every_declared_field_starts_empty() {
            let state = FormState::from_sections(&sample_specs());
            assert_eq!(state.sections().len(), 2);
            assert_eq!(state.filled_count(), 0);
            assert_eq!(
                state.value("applicant", "full_name"),
                Some(&FieldValue::Text(String::new()))
            );
            assert_eq!(
                state.value("documents", "declaration"),
                Some(&FieldValue::Flag(false))
            );
        }

        #[test]
        fn test_default_state_has_no_sections() {
            let state = FormState::default();
            assert!(state.sections().is_empty());
            assert!(state.value("applicant", "full_name").is_none());
        }
    }

    mod update_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_updates_named_field_only() {
            let mut state = FormState::from_sections(&sample_specs());
            let before = state.clone();
            state
                .update_field("applicant", "full_name", FieldValue::Text("Kila".into()))
                .unwrap();

            assert_eq!(state.text(FieldPath::new("applicant", "full_name")), "Kila");
            assert_eq!(
                state.value("documents", "photo"),
                before.value("documents", "photo")
            );
            assert_eq!(state.filled_count(), 1);
        }

        #[test]
        fn test_unknown_section_is_rejected() {
            let mut state = FormState::from_sections(&sample_specs());
            let err = state
                .update_field("payment", "method", FieldValue::Text("cash".into()))
                .unwrap_err();
            assert_eq!(err, WizardError::UnknownSection("payment".into()));
        }

        #[test]
        fn test_unknown_field_is_rejected() {
            let mut state = FormState::from_sections(&sample_specs());
            let err = state
                .update_field("applicant", "nickname", FieldValue::Text("K".into()))
                .unwrap_err();
            assert!(matches!(err, WizardError::UnknownField { .. }));
        }

        #[test]
        fn test_kind_mismatch_is_rejected_and_value_kept() {
            let mut state = FormState::from_sections(&sample_specs());
            let err = state
                .update_field("applicant", "age", FieldValue::Text("ten".into()))
                .unwrap_err();
            assert!(matches!(err, WizardError::FieldKindMismatch { .. }));
            assert_eq!(
                state.value("applicant", "age"),
                Some(&FieldValue::Number(None))
            );
        }

        #[test]
        fn test_file_and_flag_values() {
            let mut state = FormState::from_sections(&sample_specs());
            state
                .update_field(
                    "documents",
                    "photo",
                    FieldValue::File(Some(FileRef {
                        name: "me.jpg".into(),
                    })),
                )
                .unwrap();
            state
                .update_field("documents", "declaration", FieldValue::Flag(true))
                .unwrap();

            assert!(state.is_filled(FieldPath::new("documents", "photo")));
            assert!(state.flag(FieldPath::new("documents", "declaration")));
        }
    }

    #[test]
    fn test_missing_paths_read_as_empty() {
        let state = FormState::from_sections(&sample_specs());
        let missing = FieldPath::new("nowhere", "nothing");
        assert_eq!(state.text(missing), "");
        assert!(!state.flag(missing));
        assert!(!state.is_filled(missing));
    }
}
