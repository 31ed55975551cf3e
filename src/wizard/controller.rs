//! Step navigation, completion gates and verification stages for one session

use super::definition::WizardDefinition;
use super::error::WizardError;
use super::field::FieldValue;
use super::form_state::FormState;
use super::stage::{AttemptBudget, StageResult, StageStatus, StageTicket};
use super::step::{StepDefinition, StepId, StepKind};
use super::submission::{CompletionHandler, Submission};
use super::verification::VerificationRequest;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of a wizard session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
}

/// Drives one run through a wizard.
///
/// Holds the form values, the current step and the history of visited steps.
/// Every transition goes through here; views only read.
#[derive(Debug)]
pub struct WizardController {
    definition: Arc<WizardDefinition>,
    form: FormState,
    current: usize,
    /// Steps left behind by forward transitions, most recent last
    history: Vec<usize>,
    status: SessionStatus,
    pending: Option<StageTicket>,
    /// Completed attempts per stage, never reset within a session
    attempts: HashMap<StepId, u32>,
    last_result: Option<StageResult>,
    next_ticket: u64,
}

impl WizardController {
    pub fn new(definition: Arc<WizardDefinition>) -> Self {
        let form = FormState::from_sections(definition.sections());
        Self {
            definition,
            form,
            current: 0,
            history: Vec::new(),
            status: SessionStatus::NotStarted,
            pending: None,
            attempts: HashMap::new(),
            last_result: None,
            next_ticket: 0,
        }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Zero-based index of the current step
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// One-based position of the current step
    pub fn current_ordinal(&self) -> usize {
        self.current + 1
    }

    pub fn total_steps(&self) -> usize {
        self.definition.len()
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.definition.steps()[self.current]
    }

    pub fn is_final_step(&self) -> bool {
        self.current + 1 == self.definition.len()
    }

    pub fn progress_percent(&self) -> u16 {
        (self.current_ordinal() * 100 / self.total_steps().max(1)) as u16
    }

    /// Whether a forward transition has left step `index` behind
    pub fn has_visited(&self, index: usize) -> bool {
        self.history.contains(&index)
    }

    /// Descriptions of what the current step still needs
    pub fn unmet_requirements(&self) -> Vec<String> {
        self.current_step()
            .unmet(&self.form)
            .map(|r| self.definition.describe(r))
            .collect()
    }

    pub fn can_advance(&self) -> bool {
        self.ensure_editable().is_ok()
            && !self.current_step().is_stage()
            && !self.is_final_step()
            && self.current_step().is_complete(&self.form)
    }

    pub fn can_submit(&self) -> bool {
        self.ensure_editable().is_ok()
            && self.is_final_step()
            && self.current_step().is_complete(&self.form)
    }

    pub fn is_stage_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<&StageTicket> {
        self.pending.as_ref()
    }

    pub fn last_stage_result(&self) -> Option<&StageResult> {
        self.last_result.as_ref()
    }

    /// Attempts used and allowed for a stage step
    pub fn budget(&self, stage: StepId) -> AttemptBudget {
        AttemptBudget {
            used: self.attempts.get(stage).copied().unwrap_or(0),
            max: self
                .definition
                .step_by_id(stage)
                .and_then(StepDefinition::stage)
                .and_then(|s| s.max_attempts),
        }
    }

    /// Budget of the stage the current outcome step retries, if any
    pub fn retry_budget(&self) -> Option<AttemptBudget> {
        match &self.current_step().kind {
            StepKind::Outcome {
                retry: Some(stage), ..
            } => Some(self.budget(*stage)),
            _ => None,
        }
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.status == SessionStatus::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.pending.is_some() {
            return Err(WizardError::StagePending);
        }
        Ok(())
    }

    fn mark_started(&mut self) {
        if self.status == SessionStatus::NotStarted {
            self.status = SessionStatus::InProgress;
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, WizardError> {
        self.definition
            .index_of(id)
            .ok_or_else(|| WizardError::UnknownStep(id.to_string()))
    }

    /// Replace one field value
    pub fn update_field(
        &mut self,
        section: &str,
        field: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.form.update_field(section, field, value)?;
        self.mark_started();
        Ok(())
    }

    /// Move forward if the current step is complete.
    ///
    /// Goes to the step chosen by the branch selector, or the next one.
    pub fn advance(&mut self) -> Result<StepId, WizardError> {
        self.ensure_editable()?;
        let step = self.current_step();
        if step.is_stage() {
            return Err(WizardError::AwaitingVerification);
        }
        if self.is_final_step() {
            return Err(WizardError::AtFinalStep);
        }
        let missing = self.unmet_requirements();
        if !missing.is_empty() {
            debug!("Advance refused on {}: {}", step.id, missing.join(", "));
            return Err(WizardError::IncompleteStep {
                step: step.id,
                missing,
            });
        }

        let target = match step.branch.and_then(|select| select(&self.form)) {
            Some(id) => self.index_of(id)?,
            None => self.current + 1,
        };
        self.enter(target, true)
    }

    /// Go back to the previously visited step.
    ///
    /// Returns false when there is nowhere to go or a stage is running.
    pub fn retreat(&mut self) -> bool {
        if self.ensure_editable().is_err() {
            return false;
        }
        let previous = match self.history.pop() {
            Some(index) => index,
            None if self.current > 0 => self.current - 1,
            None => return false,
        };
        debug!(
            "Retreat from {} to {}",
            self.current_step().id,
            self.definition.steps()[previous].id
        );
        self.current = previous;
        true
    }

    /// Go straight to a step, bypassing completion gates
    pub fn jump_to(&mut self, id: &str) -> Result<StepId, WizardError> {
        self.ensure_editable()?;
        let target = self.index_of(id)?;
        self.enter(target, true)
    }

    /// Pick an entry of the current menu step and jump to its target
    pub fn choose(&mut self, option: usize) -> Result<StepId, WizardError> {
        self.ensure_editable()?;
        let (field, chosen) = match &self.current_step().kind {
            StepKind::Menu { field, options } => match options.get(option) {
                Some(chosen) => (*field, chosen.clone()),
                None => return Err(WizardError::UnknownStep(format!("option {option}"))),
            },
            _ => return Err(WizardError::UnknownStep(format!("option {option}"))),
        };
        self.form.update_field(
            field.section,
            field.field,
            FieldValue::Text(chosen.value.to_string()),
        )?;
        self.mark_started();
        self.jump_to(chosen.target)
    }

    /// Land on `target`, refusing stages whose attempts are spent
    fn enter(&mut self, target: usize, remember: bool) -> Result<StepId, WizardError> {
        let definition = Arc::clone(&self.definition);
        let step = &definition.steps()[target];

        if let Some(stage) = step.stage() {
            let budget = self.budget(step.id);
            if budget.is_exhausted() {
                info!("{} has no attempts left", step.id);
                if let Some(fallback) = stage.on_exhausted {
                    let fallback = self.index_of(fallback)?;
                    if remember {
                        self.history.push(self.current);
                    }
                    self.current = fallback;
                }
                return Err(WizardError::RetryBudgetExhausted {
                    attempts: budget.used,
                });
            }
        }

        if remember {
            self.history.push(self.current);
        }
        info!(
            "{}: {} -> {}",
            definition.id,
            definition.steps()[self.current].id,
            step.id
        );
        self.current = target;
        self.mark_started();
        Ok(step.id)
    }

    /// Hand the application to `handler` and close the session.
    ///
    /// Only allowed once, from the final step, with its gate passing.
    pub fn submit(&mut self, handler: &mut dyn CompletionHandler) -> Result<String, WizardError> {
        self.ensure_editable()?;
        if !self.is_final_step() {
            return Err(WizardError::NotAtFinalStep);
        }
        let missing = self.unmet_requirements();
        if !missing.is_empty() {
            return Err(WizardError::IncompleteStep {
                step: self.current_step().id,
                missing,
            });
        }

        let submission = Submission::new(&self.definition, self.form.clone());
        let reference = submission.reference.clone();
        info!("{} submitted as {}", self.definition.id, reference);
        handler.on_complete(submission);
        self.status = SessionStatus::Submitted;
        Ok(reference)
    }

    /// Start the verification of the current stage step
    pub fn begin_stage(&mut self) -> Result<StageTicket, WizardError> {
        self.ensure_editable()?;
        let definition = Arc::clone(&self.definition);
        let step = &definition.steps()[self.current];
        let stage = step.stage().ok_or(WizardError::NotAStage)?;

        let budget = self.budget(step.id);
        if budget.is_exhausted() {
            if let Some(fallback) = stage.on_exhausted {
                self.current = self.index_of(fallback)?;
            }
            return Err(WizardError::RetryBudgetExhausted {
                attempts: budget.used,
            });
        }

        self.next_ticket += 1;
        let attempt = budget.used + 1;
        let ticket = StageTicket {
            id: self.next_ticket,
            step: step.id,
            attempt,
            request: VerificationRequest {
                kind: stage.kind,
                subject: self.form.text(stage.subject).to_string(),
                attempt,
            },
        };
        info!("{} attempt {} started", step.id, attempt);
        self.pending = Some(ticket.clone());
        self.last_result = Some(StageResult::pending(attempt));
        self.mark_started();
        Ok(ticket)
    }

    /// Route a finished verification to its success or failure step.
    ///
    /// A success on a stage that stores a reference counts as a failure when
    /// no reference came back. The session is unchanged if this returns an
    /// error.
    pub fn complete_stage(
        &mut self,
        ticket_id: u64,
        mut result: StageResult,
    ) -> Result<StepId, WizardError> {
        let ticket = match &self.pending {
            Some(ticket) if ticket.id == ticket_id => ticket.clone(),
            _ => {
                debug!("Ignoring result for ticket {ticket_id}");
                return Err(WizardError::StaleResult);
            }
        };

        let definition = Arc::clone(&self.definition);
        let step = definition
            .step_by_id(ticket.step)
            .ok_or_else(|| WizardError::UnknownStep(ticket.step.to_string()))?;
        let stage = step.stage().ok_or(WizardError::NotAStage)?;

        let reference = result
            .payload
            .as_deref()
            .filter(|payload| !payload.trim().is_empty());
        if result.is_success() && stage.payload_field.is_some() && reference.is_none() {
            warn!("{} attempt {} matched without a reference", ticket.step, ticket.attempt);
            result = StageResult::failure(ticket.attempt, "No reference number was issued");
        }
        result.attempts = ticket.attempt;

        let target = match result.status {
            StageStatus::Success => stage.on_success,
            StageStatus::Failure | StageStatus::Pending => stage.on_failure,
        };
        let target_index = self.index_of(target)?;

        if let (StageStatus::Success, Some(path), Some(payload)) =
            (result.status, stage.payload_field, &result.payload)
        {
            self.form.update_field(
                path.section,
                path.field,
                FieldValue::Text(payload.clone()),
            )?;
        }

        info!(
            "{} attempt {} finished: {:?}",
            ticket.step, ticket.attempt, result.status
        );
        self.pending = None;
        *self.attempts.entry(ticket.step).or_insert(0) += 1;
        self.current = target_index;
        self.last_result = Some(result);
        Ok(target)
    }

    /// Abort the running verification and go back to where it was launched
    pub fn cancel_stage(&mut self) -> Result<StepId, WizardError> {
        let ticket = self.pending.take().ok_or(WizardError::NothingPending)?;
        let definition = Arc::clone(&self.definition);
        let stage = definition
            .step_by_id(ticket.step)
            .and_then(StepDefinition::stage)
            .ok_or(WizardError::NotAStage)?;

        let target = self.index_of(stage.on_cancel)?;
        if let Some(pos) = self.history.iter().rposition(|&i| i == target) {
            self.history.truncate(pos);
        }
        info!("{} cancelled", ticket.step);
        self.current = target;
        self.last_result = None;
        Ok(stage.on_cancel)
    }

    /// Re-enter the stage the current outcome step offers to retry
    pub fn retry(&mut self) -> Result<StepId, WizardError> {
        self.ensure_editable()?;
        let stage = match &self.current_step().kind {
            StepKind::Outcome {
                retry: Some(stage), ..
            } => *stage,
            _ => return Err(WizardError::NothingToRetry),
        };
        let target = self.index_of(stage)?;
        self.enter(target, false)
    }
}
