//! Step definitions: what a step shows, what it needs, and where it leads

use super::field::FieldPath;
use super::form_state::FormState;
use super::verification::VerificationKind;

/// Stable identifier of a step within its wizard
pub type StepId = &'static str;

/// Picks the next step from the current form values.
///
/// Returning `None` falls through to the next step in sequence.
pub type BranchSelector = fn(&FormState) -> Option<StepId>;

/// One condition of a step's completion gate
#[derive(Debug, Clone)]
pub enum Requirement {
    /// Field must hold a non-empty value
    Filled(FieldPath),
    /// Checkbox must be ticked
    Checked(FieldPath),
    /// Arbitrary pure check over the form
    Custom {
        description: &'static str,
        check: fn(&FormState) -> bool,
    },
}

impl Requirement {
    pub fn is_met(&self, form: &FormState) -> bool {
        match self {
            Requirement::Filled(path) => form.is_filled(*path),
            Requirement::Checked(path) => form.flag(*path),
            Requirement::Custom { check, .. } => check(form),
        }
    }

    /// Field this requirement is about, if any
    pub fn field(&self) -> Option<FieldPath> {
        match self {
            Requirement::Filled(path) | Requirement::Checked(path) => Some(*path),
            Requirement::Custom { .. } => None,
        }
    }
}

/// Visual tone of an outcome step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    Info,
}

/// An entry of a selection menu step
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub label: &'static str,
    pub description: &'static str,
    /// Value written to the menu's field when chosen
    pub value: &'static str,
    /// Step the wizard jumps to when chosen
    pub target: StepId,
}

/// Configuration of a verification stage
#[derive(Debug, Clone)]
pub struct StageSpec {
    pub kind: VerificationKind,
    /// Field whose value identifies the subject being checked
    pub subject: FieldPath,
    pub on_success: StepId,
    pub on_failure: StepId,
    /// Where "Cancel" returns to
    pub on_cancel: StepId,
    /// Maximum number of attempts for the session, unbounded when `None`
    pub max_attempts: Option<u32>,
    /// Where control goes once the attempts are spent
    pub on_exhausted: Option<StepId>,
    /// Field that receives the success payload
    pub payload_field: Option<FieldPath>,
}

/// Table-driven description of what a step is
#[derive(Debug, Clone)]
pub enum StepKind {
    /// Input fields bound to the form
    Form { fields: Vec<FieldPath> },
    /// Explicit selection that jumps to another step
    Menu {
        field: FieldPath,
        options: Vec<MenuOption>,
    },
    /// Self-transitioning external check
    Verification(StageSpec),
    /// Result of an earlier stage
    Outcome {
        tone: Tone,
        message: &'static str,
        /// Field to highlight, e.g. an issued record number
        shows: Option<FieldPath>,
        /// Stage that "Retry" re-enters
        retry: Option<StepId>,
    },
    /// Summary of every answer before submission
    Review,
}

/// A single step of a wizard
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub kind: StepKind,
    pub requirements: Vec<Requirement>,
    pub branch: Option<BranchSelector>,
}

impl StepDefinition {
    fn new(id: StepId, title: &'static str, icon: &'static str, kind: StepKind) -> Self {
        Self {
            id,
            title,
            icon,
            description: "",
            kind,
            requirements: Vec::new(),
            branch: None,
        }
    }

    pub fn form(id: StepId, title: &'static str, icon: &'static str, fields: &[FieldPath]) -> Self {
        Self::new(
            id,
            title,
            icon,
            StepKind::Form {
                fields: fields.to_vec(),
            },
        )
    }

    pub fn menu(
        id: StepId,
        title: &'static str,
        icon: &'static str,
        field: FieldPath,
        options: Vec<MenuOption>,
    ) -> Self {
        let mut step = Self::new(id, title, icon, StepKind::Menu { field, options });
        step.requirements.push(Requirement::Filled(field));
        step
    }

    pub fn verification(id: StepId, title: &'static str, icon: &'static str, stage: StageSpec) -> Self {
        Self::new(id, title, icon, StepKind::Verification(stage))
    }

    pub fn outcome(
        id: StepId,
        title: &'static str,
        icon: &'static str,
        tone: Tone,
        message: &'static str,
    ) -> Self {
        Self::new(
            id,
            title,
            icon,
            StepKind::Outcome {
                tone,
                message,
                shows: None,
                retry: None,
            },
        )
    }

    pub fn review(id: StepId, title: &'static str, icon: &'static str) -> Self {
        Self::new(id, title, icon, StepKind::Review)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn require(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn branch(mut self, selector: BranchSelector) -> Self {
        self.branch = Some(selector);
        self
    }

    /// Outcome step: highlight a field value
    pub fn showing(mut self, path: FieldPath) -> Self {
        if let StepKind::Outcome { shows, .. } = &mut self.kind {
            *shows = Some(path);
        }
        self
    }

    /// Outcome step: offer "Retry" into the given stage
    pub fn retrying(mut self, stage: StepId) -> Self {
        if let StepKind::Outcome { retry, .. } = &mut self.kind {
            *retry = Some(stage);
        }
        self
    }

    pub fn stage(&self) -> Option<&StageSpec> {
        match &self.kind {
            StepKind::Verification(stage) => Some(stage),
            _ => None,
        }
    }

    pub fn is_stage(&self) -> bool {
        self.stage().is_some()
    }

    /// Requirements that do not hold for `form`
    pub fn unmet<'a>(&'a self, form: &'a FormState) -> impl Iterator<Item = &'a Requirement> + 'a {
        self.requirements.iter().filter(move |r| !r.is_met(form))
    }

    /// Completion predicate over the form
    pub fn is_complete(&self, form: &FormState) -> bool {
        self.unmet(form).next().is_none()
    }

    /// Every step id this step can route to
    pub(crate) fn targets(&self) -> Vec<StepId> {
        match &self.kind {
            StepKind::Menu { options, .. } => options.iter().map(|o| o.target).collect(),
            StepKind::Verification(stage) => {
                let mut targets = vec![stage.on_success, stage.on_failure, stage.on_cancel];
                targets.extend(stage.on_exhausted);
                targets
            }
            StepKind::Outcome { retry, .. } => retry.iter().copied().collect(),
            StepKind::Form { .. } | StepKind::Review => Vec::new(),
        }
    }

    /// Every field path this step reads
    pub(crate) fn fields_referenced(&self) -> Vec<FieldPath> {
        let mut paths: Vec<FieldPath> = match &self.kind {
            StepKind::Form { fields } => fields.clone(),
            StepKind::Menu { field, .. } => vec![*field],
            StepKind::Verification(stage) => {
                let mut paths = vec![stage.subject];
                paths.extend(stage.payload_field);
                paths
            }
            StepKind::Outcome { shows, .. } => shows.iter().copied().collect(),
            StepKind::Review => Vec::new(),
        };
        paths.extend(self.requirements.iter().filter_map(Requirement::field));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::field::{FieldSpec, FieldValue, SectionSpec};

    const NAME: FieldPath = FieldPath::new("applicant", "name");
    const AGREE: FieldPath = FieldPath::new("applicant", "agree");

    fn form() -> FormState {
        FormState::from_sections(&[SectionSpec::new(
            "applicant",
            "Applicant",
            vec![
                FieldSpec::text("name", "Name"),
                FieldSpec::consent("agree", "Agree"),
            ],
        )])
    }

    #[test]
    fn test_requirements_gate_completion() {
        let step = StepDefinition::form("one", "One", "1", &[NAME, AGREE])
            .require(Requirement::Filled(NAME))
            .require(Requirement::Checked(AGREE));
        let mut form = form();
        assert!(!step.is_complete(&form));
        assert_eq!(step.unmet(&form).count(), 2);

        form.update_field("applicant", "name", FieldValue::Text("Ani".into()))
            .unwrap();
        assert_eq!(step.unmet(&form).count(), 1);

        form.update_field("applicant", "agree", FieldValue::Flag(true))
            .unwrap();
        assert!(step.is_complete(&form));
    }

    #[test]
    fn test_custom_requirement_is_evaluated() {
        let step = StepDefinition::review("review", "Review", "✓").require(Requirement::Custom {
            description: "Name must be at least three letters",
            check: |form| form.text(NAME).len() >= 3,
        });
        let mut form = form();
        form.update_field("applicant", "name", FieldValue::Text("Al".into()))
            .unwrap();
        assert!(!step.is_complete(&form));
        form.update_field("applicant", "name", FieldValue::Text("Ali".into()))
            .unwrap();
        assert!(step.is_complete(&form));
    }

    #[test]
    fn test_menu_requires_its_field() {
        let step = StepDefinition::menu("kind", "Kind", "?", NAME, Vec::new());
        assert!(!step.is_complete(&form()));
        assert_eq!(step.fields_referenced(), vec![NAME, NAME]);
    }

    #[test]
    fn test_outcome_builders_only_touch_outcomes() {
        let outcome = StepDefinition::outcome("done", "Done", "✓", Tone::Success, "ok")
            .showing(NAME)
            .retrying("capture");
        assert_eq!(outcome.targets(), vec!["capture"]);
        assert_eq!(outcome.fields_referenced(), vec![NAME]);

        let form_step = StepDefinition::form("f", "F", "f", &[]).retrying("capture");
        assert!(form_step.targets().is_empty());
    }
}
