//! Focus state of the wizard view
//!
//! The controller owns the answers; this only tracks which input has focus
//! on the step being shown.

use crate::wizard::{FieldPath, StepDefinition, StepId, StepKind};

#[derive(Debug, Default)]
pub struct WizardScreen {
    /// Step the focus indices belong to
    step: Option<StepId>,
    /// Focused input of a form step
    pub active_field: usize,
    /// Highlighted entry of a menu step
    pub menu_index: usize,
}

impl WizardScreen {
    /// Reset focus when the controller moved to another step
    pub fn sync(&mut self, step: StepId) {
        if self.step != Some(step) {
            self.step = Some(step);
            self.active_field = 0;
            self.menu_index = 0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of focusable entries on a step
    pub fn focus_count(step: &StepDefinition) -> usize {
        match &step.kind {
            StepKind::Form { fields } => fields.len(),
            StepKind::Menu { options, .. } => options.len(),
            _ => 0,
        }
    }

    pub fn next(&mut self, step: &StepDefinition) {
        let count = Self::focus_count(step);
        if count == 0 {
            return;
        }
        let index = self.index_mut(step);
        *index = (*index + 1) % count;
    }

    pub fn prev(&mut self, step: &StepDefinition) {
        let count = Self::focus_count(step);
        if count == 0 {
            return;
        }
        let index = self.index_mut(step);
        *index = (*index + count - 1) % count;
    }

    fn index_mut(&mut self, step: &StepDefinition) -> &mut usize {
        match step.kind {
            StepKind::Menu { .. } => &mut self.menu_index,
            _ => &mut self.active_field,
        }
    }

    /// Field under the cursor on a form step
    pub fn focused_field(&self, step: &StepDefinition) -> Option<FieldPath> {
        match &step.kind {
            StepKind::Form { fields } => fields.get(self.active_field).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{MenuOption, StepDefinition};

    const NAME: FieldPath = FieldPath::new("a", "name");
    const AGE: FieldPath = FieldPath::new("a", "age");

    fn form() -> StepDefinition {
        StepDefinition::form("form", "Form", "•", &[NAME, AGE])
    }

    fn menu() -> StepDefinition {
        let option = |value| MenuOption {
            label: value,
            description: "",
            value,
            target: "form",
        };
        StepDefinition::menu("menu", "Menu", "•", NAME, vec![option("x"), option("y"), option("z")])
    }

    #[test]
    fn test_form_focus_wraps() {
        let step = form();
        let mut screen = WizardScreen::default();
        screen.sync(step.id);
        assert_eq!(screen.focused_field(&step), Some(NAME));
        screen.next(&step);
        assert_eq!(screen.focused_field(&step), Some(AGE));
        screen.next(&step);
        assert_eq!(screen.focused_field(&step), Some(NAME));
        screen.prev(&step);
        assert_eq!(screen.focused_field(&step), Some(AGE));
    }

    #[test]
    fn test_menu_moves_its_own_index() {
        let step = menu();
        let mut screen = WizardScreen::default();
        screen.prev(&step);
        assert_eq!(screen.menu_index, 2);
        assert_eq!(screen.active_field, 0);
        assert_eq!(screen.focused_field(&step), None);
    }

    #[test]
    fn test_sync_resets_on_new_step_only() {
        let mut screen = WizardScreen::default();
        screen.sync("form");
        screen.active_field = 1;
        screen.sync("form");
        assert_eq!(screen.active_field, 1);
        screen.sync("menu");
        assert_eq!(screen.active_field, 0);
    }

    #[test]
    fn test_outcome_has_nothing_to_focus() {
        let step = StepDefinition::review("review", "Review", "☰");
        let mut screen = WizardScreen::default();
        screen.next(&step);
        assert_eq!(screen.active_field, 0);
        assert_eq!(WizardScreen::focus_count(&step), 0);
    }
}
