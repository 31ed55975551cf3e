//! Read-only projection of a session for the step indicator

use super::controller::WizardController;

/// Visual state of one step in the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepVisual {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMarker {
    pub title: &'static str,
    pub icon: &'static str,
    pub visual: StepVisual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// 1-based
    pub current: usize,
    pub total: usize,
    pub percent: u16,
    pub steps: Vec<StepMarker>,
}

impl ProgressSnapshot {
    /// Completion comes from the visited history, not from the requirements
    pub fn of(controller: &WizardController) -> Self {
        let active = controller.current_index();
        let steps = controller
            .definition()
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepMarker {
                title: step.title,
                icon: step.icon,
                visual: if index == active {
                    StepVisual::Active
                } else if controller.has_visited(index) {
                    StepVisual::Completed
                } else {
                    StepVisual::Pending
                },
            })
            .collect();

        Self {
            current: controller.current_ordinal(),
            total: controller.total_steps(),
            percent: controller.progress_percent(),
            steps,
        }
    }

    pub fn label(&self) -> String {
        format!("Step {} of {}", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::definition::WizardDefinition;
    use crate::wizard::step::StepDefinition;
    use std::sync::Arc;

    fn controller() -> WizardController {
        let definition = WizardDefinition::new(
            "linear",
            "Linear",
            "LN",
            Vec::new(),
            vec![
                StepDefinition::form("a", "A", "1", &[]),
                StepDefinition::form("b", "B", "2", &[]),
                StepDefinition::form("c", "C", "3", &[]),
                StepDefinition::review("d", "D", "4"),
            ],
        )
        .unwrap();
        WizardController::new(Arc::new(definition))
    }

    fn visuals(snapshot: &ProgressSnapshot) -> Vec<StepVisual> {
        snapshot.steps.iter().map(|s| s.visual).collect()
    }

    #[test]
    fn test_initial_snapshot() {
        let snapshot = ProgressSnapshot::of(&controller());
        assert_eq!(snapshot.current, 1);
        assert_eq!(snapshot.total, 4);
        assert_eq!(snapshot.percent, 25);
        assert_eq!(snapshot.label(), "Step 1 of 4");
        assert_eq!(
            visuals(&snapshot),
            vec![
                StepVisual::Active,
                StepVisual::Pending,
                StepVisual::Pending,
                StepVisual::Pending
            ]
        );
    }

    #[test]
    fn test_visited_steps_are_completed() {
        let mut ctl = controller();
        ctl.advance().unwrap();
        ctl.advance().unwrap();
        let snapshot = ProgressSnapshot::of(&ctl);
        assert_eq!(snapshot.percent, 75);
        assert_eq!(
            visuals(&snapshot),
            vec![
                StepVisual::Completed,
                StepVisual::Completed,
                StepVisual::Active,
                StepVisual::Pending
            ]
        );
    }

    #[test]
    fn test_retreat_drops_completion_of_left_step() {
        let mut ctl = controller();
        ctl.advance().unwrap();
        ctl.retreat();
        let snapshot = ProgressSnapshot::of(&ctl);
        assert_eq!(snapshot.steps[0].visual, StepVisual::Active);
        assert_eq!(snapshot.steps[1].visual, StepVisual::Pending);
    }
}
