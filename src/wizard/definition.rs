//! Validated wizard definitions

use super::error::DefinitionError;
use super::field::{FieldKind, FieldPath, FieldSpec, SectionSpec};
use super::step::{Requirement, StepDefinition, StepKind};
use std::collections::HashSet;

/// A complete, validated wizard: sections of fields and an ordered step list.
///
/// Form steps automatically gain a `Filled` (or `Checked`, for checkboxes)
/// requirement for each required field they show, so rendering and gating
/// read the same requirement list.
#[derive(Debug, Clone)]
pub struct WizardDefinition {
    pub id: &'static str,
    pub title: &'static str,
    /// Prefix of generated reference numbers, e.g. "DLR"
    pub reference_prefix: &'static str,
    sections: Vec<SectionSpec>,
    steps: Vec<StepDefinition>,
}

impl WizardDefinition {
    pub fn new(
        id: &'static str,
        title: &'static str,
        reference_prefix: &'static str,
        sections: Vec<SectionSpec>,
        mut steps: Vec<StepDefinition>,
    ) -> Result<Self, DefinitionError> {
        if steps.is_empty() {
            return Err(DefinitionError::NoSteps(id));
        }

        let mut section_names = HashSet::new();
        for section in &sections {
            if !section_names.insert(section.name) {
                return Err(DefinitionError::DuplicateSection {
                    wizard: id,
                    section: section.name,
                });
            }
            let mut field_names = HashSet::new();
            for field in &section.fields {
                if !field_names.insert(field.name) {
                    return Err(DefinitionError::DuplicateField {
                        section: section.name,
                        field: field.name,
                    });
                }
            }
        }

        let mut step_ids = HashSet::new();
        for step in &steps {
            if !step_ids.insert(step.id) {
                return Err(DefinitionError::DuplicateStep {
                    wizard: id,
                    step: step.id,
                });
            }
        }

        for step in &mut steps {
            let StepKind::Form { fields } = &step.kind else {
                continue;
            };
            let derived: Vec<Requirement> = fields
                .iter()
                .filter_map(|path| {
                    let spec = find_field(&sections, *path)?;
                    if !spec.required {
                        return None;
                    }
                    Some(match spec.kind {
                        FieldKind::Flag => Requirement::Checked(*path),
                        _ => Requirement::Filled(*path),
                    })
                })
                .collect();
            step.requirements.splice(0..0, derived);
        }

        let definition = Self {
            id,
            title,
            reference_prefix,
            sections,
            steps,
        };
        definition.validate_references()?;
        Ok(definition)
    }

    fn validate_references(&self) -> Result<(), DefinitionError> {
        for step in &self.steps {
            for path in step.fields_referenced() {
                if self.field_spec(path).is_none() {
                    return Err(DefinitionError::UnknownField {
                        step: step.id,
                        path,
                    });
                }
            }
            for target in step.targets() {
                if self.index_of(target).is_none() {
                    return Err(DefinitionError::UnknownTarget {
                        step: step.id,
                        target,
                    });
                }
            }
            if let Some(path) = step.stage().and_then(|stage| stage.payload_field) {
                let holds_text = self
                    .field_spec(path)
                    .is_some_and(|f| matches!(f.kind, FieldKind::Text | FieldKind::Multiline));
                if !holds_text {
                    return Err(DefinitionError::PayloadNotText {
                        step: step.id,
                        path,
                    });
                }
            }
            if let StepKind::Outcome {
                retry: Some(target),
                ..
            } = &step.kind
            {
                let is_stage = self.step_by_id(target).is_some_and(StepDefinition::is_stage);
                if !is_stage {
                    return Err(DefinitionError::RetryTargetNotStage {
                        step: step.id,
                        target: *target,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn step_by_id(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn field_spec(&self, path: FieldPath) -> Option<&FieldSpec> {
        find_field(&self.sections, path)
    }

    pub fn section_title(&self, name: &str) -> &'static str {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.title)
            .unwrap_or("")
    }

    /// Human readable text for an unmet requirement
    pub fn describe(&self, requirement: &Requirement) -> String {
        match requirement {
            Requirement::Filled(path) => self
                .field_spec(*path)
                .map(|f| f.label.to_string())
                .unwrap_or_else(|| path.to_string()),
            Requirement::Checked(path) => self
                .field_spec(*path)
                .map(|f| format!("Tick \"{}\"", f.label))
                .unwrap_or_else(|| path.to_string()),
            Requirement::Custom { description, .. } => description.to_string(),
        }
    }
}

fn find_field(sections: &[SectionSpec], path: FieldPath) -> Option<&FieldSpec> {
    sections
        .iter()
        .find(|s| s.name == path.section)?
        .fields
        .iter()
        .find(|f| f.name == path.field)
}
