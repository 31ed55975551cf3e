//! Application state and core logic

use crate::auth::Session;
use crate::config::PortalConfig;
use crate::platform::{ACTION_MODIFIER, SUBMIT_SHORTCUT};
use crate::services::{self, ServiceKind, PASS_NUMBER};
use crate::state::{AppState, HomeAction, LoginField, SidebarItem, SplashState, View, ViewParams};
use crate::ui::Palette;
use crate::wizard::{
    self, run_verification, BlockedExit, BlockedNotice, FieldKind, FieldPath, FieldValue,
    SimulatedVerifier, StageResult, StepDefinition, StepKind, Submission, Verifier,
    WizardController, WizardError,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Second Ctrl+C within this window quits
const QUIT_WINDOW: Duration = Duration::from_millis(1500);

/// A verification running in the background
struct StageTask {
    ticket: u64,
    started: Instant,
    handle: JoinHandle<()>,
    result: oneshot::Receiver<StageResult>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: PortalConfig,
    /// Where theme changes are written, if anywhere
    config_file: Option<PathBuf>,
    pub session: Session,
    verifier: Arc<dyn Verifier>,
    /// Mounted wizard session
    pub wizard: Option<WizardController>,
    /// Why the requested wizard did not mount
    pub blocked: Option<BlockedNotice>,
    stage_task: Option<StageTask>,
    /// Everything submitted this run, oldest first
    pub submissions: Vec<Submission>,
    /// Service to reopen once SEVIS Pass enrollment is done
    resume_service: Option<ServiceKind>,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create the app with the simulated verification services
    pub fn new(config: PortalConfig) -> Self {
        let verifier = SimulatedVerifier::new(
            config.simulated_delay(),
            config.record_match_rate(),
            config.face_match_rate(),
        );
        let mut app = Self::with_verifier(config, Arc::new(verifier), PortalConfig::config_path());
        app.state.current_view = View::Splash;
        app.splash_state = Some(SplashState::new());
        app
    }

    pub fn with_verifier(
        config: PortalConfig,
        verifier: Arc<dyn Verifier>,
        config_file: Option<PathBuf>,
    ) -> Self {
        Self {
            state: AppState::default(),
            config,
            config_file,
            session: Session::default(),
            verifier,
            wizard: None,
            blocked: None,
            stage_task: None,
            submissions: Vec::new(),
            resume_service: None,
            quit: false,
            status_message: None,
            splash_state: None,
            last_ctrl_c: None,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.config.theme())
    }

    /// Update splash animation state
    /// Returns true if animation is complete and we should transition
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::Home;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a verification is running
    pub fn is_verifying(&self) -> bool {
        self.stage_task.is_some()
    }

    /// Time since the running verification started
    pub fn stage_elapsed(&self) -> Option<Duration> {
        self.stage_task.as_ref().map(|task| task.started.elapsed())
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.submissions.last()
    }

    pub fn resume_service(&self) -> Option<ServiceKind> {
        self.resume_service
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }
        self.last_ctrl_c = None;

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.confirm_discard {
            self.handle_confirm_discard_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if self.handle_sidebar_key(key) {
            return Ok(());
        }

        match self.state.current_view {
            View::Splash => self.handle_splash_key(),
            View::Home => self.handle_home_key(key),
            View::SignIn => self.handle_sign_in_key(key),
            View::Services => self.handle_services_key(key),
            View::Wizard => self.handle_wizard_key(key),
            View::Blocked => self.handle_blocked_key(key),
            View::Confirmation => self.handle_confirmation_key(key),
            View::Settings => self.handle_settings_key(key),
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(previous) if now.duration_since(previous) <= QUIT_WINDOW => {
                info!("Quit requested");
                self.cancel_stage_task();
                self.quit = true;
            }
            _ => {
                self.last_ctrl_c = Some(now);
                self.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        if self.state.current_view != View::Splash {
            self.state
                .view_history
                .push((self.state.current_view, self.state.view_params));
        }
        info!("Navigate {:?} -> {view:?}", self.state.current_view);
        self.state.current_view = view;
        self.state.view_params = params;
        self.state.reset_selection();
    }

    /// Go back to the previous view, skipping wizard sessions
    pub fn go_back(&mut self) {
        while let Some((view, params)) = self.state.view_history.pop() {
            if view.is_session_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.view_params = params;
            self.state.reset_selection();
            return;
        }
        self.state.current_view = View::Home;
        self.state.view_params = ViewParams::default();
        self.state.reset_selection();
    }

    /// Sidebar shortcuts, in views without text input
    fn handle_sidebar_key(&mut self, key: KeyEvent) -> bool {
        let accepts_text = matches!(self.state.current_view, View::Wizard)
            || (self.state.current_view == View::SignIn && !self.session.is_authenticated());
        if accepts_text || self.in_splash() || !key.modifiers.is_empty() {
            return false;
        }
        let KeyCode::Char(c) = key.code else {
            return false;
        };
        let Some(item) = SidebarItem::ALL.iter().find(|item| item.key() == c) else {
            return false;
        };
        let view = item.view();
        if view != self.state.current_view {
            if view == View::SignIn {
                self.state.login.clear();
            }
            self.navigate(view, ViewParams::default());
        }
        true
    }

    fn handle_splash_key(&mut self) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(HomeAction::ALL.len())
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => match HomeAction::ALL.get(self.state.selected_index) {
                Some(HomeAction::BrowseServices) => {
                    self.navigate(View::Services, ViewParams::default())
                }
                Some(HomeAction::SignIn) => {
                    self.state.login.clear();
                    self.navigate(View::SignIn, ViewParams::default());
                }
                Some(HomeAction::GetPass) => self.open_service(ServiceKind::SevisPass),
                None => {}
            },
            _ => {}
        }
    }

    fn handle_sign_in_key(&mut self, key: KeyEvent) {
        if self.session.is_authenticated() {
            match key.code {
                KeyCode::Enter => {
                    self.session.sign_out();
                    self.state.login.clear();
                    self.status_message = Some("Signed out".to_string());
                }
                KeyCode::Esc => self.go_back(),
                _ => {}
            }
            return;
        }

        let login = &mut self.state.login;
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::Down => login.active = login.active.next(),
            KeyCode::BackTab | KeyCode::Up => login.active = login.active.prev(),
            KeyCode::Backspace => login.backspace(),
            KeyCode::Enter => match login.active {
                LoginField::Identifier => login.active = LoginField::Password,
                LoginField::Password | LoginField::Submit => self.sign_in(),
                LoginField::UsePass => self.open_service(ServiceKind::SevisPass),
            },
            KeyCode::Char(c) if login.active.is_text() => login.input_char(c),
            _ => {}
        }
    }

    fn sign_in(&mut self) {
        let login = &self.state.login;
        match self.session.sign_in(&login.identifier, &login.password) {
            Ok(()) => {
                self.state.login.clear();
                self.status_message = Some("Signed in".to_string());
                self.go_back();
            }
            Err(err) => self.status_message = Some(capitalize(&err.to_string())),
        }
    }

    fn handle_services_key(&mut self, key: KeyEvent) {
        let listed = services::filtered(self.state.category_filter);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(listed.len()),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('f') => self.state.cycle_category_filter(),
            KeyCode::Enter => {
                if let Some(service) = listed.get(self.state.selected_index) {
                    self.open_service(service.kind);
                }
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Mount the wizard behind a service, or show why it cannot open
    pub fn open_service(&mut self, kind: ServiceKind) {
        self.close_wizard();
        let definition = match kind.definition() {
            Ok(definition) => definition,
            Err(err) => {
                self.push_error(format!("{} is unavailable: {err}", kind.title()));
                return;
            }
        };

        match wizard::mount(
            definition,
            kind.requires_elevation(),
            self.session.credentials(),
        ) {
            Ok(controller) => {
                self.wizard = Some(controller);
                self.navigate(View::Wizard, ViewParams::service(kind));
                self.after_transition();
            }
            Err(notice) => {
                self.blocked = Some(notice);
                self.navigate(View::Blocked, ViewParams::service(kind));
            }
        }
    }

    /// Drop the wizard session and anything running for it
    fn close_wizard(&mut self) {
        self.cancel_stage_task();
        self.wizard = None;
        self.blocked = None;
        self.state.wizard_screen.reset();
        self.state.confirm_discard = false;
    }

    fn leave_wizard(&mut self) {
        self.close_wizard();
        self.go_back();
    }

    fn handle_confirm_discard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Tab => {
                self.state.confirm_discard_index = 1 - self.state.confirm_discard_index.min(1);
            }
            KeyCode::Enter if self.state.confirm_discard_index == 1 => {
                info!("Application discarded");
                self.leave_wizard();
            }
            KeyCode::Enter | KeyCode::Esc => self.state.confirm_discard = false,
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(wizard) = self.wizard.as_ref() else {
            self.go_back();
            return;
        };

        if wizard.is_stage_pending() {
            if key.code == KeyCode::Esc {
                self.cancel_verification();
            }
            return;
        }

        let is_submit = key.code == KeyCode::Char('s')
            && (key.modifiers.contains(ACTION_MODIFIER)
                || key.modifiers.contains(KeyModifiers::CONTROL));
        if is_submit {
            self.submit_wizard();
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if wizard.form().filled_count() > 0 {
                    self.state.confirm_discard = true;
                    self.state.confirm_discard_index = 0;
                } else {
                    self.leave_wizard();
                }
                return;
            }
            KeyCode::PageUp => {
                if let Some(wizard) = self.wizard.as_mut() {
                    if !wizard.retreat() {
                        self.status_message = Some("This is the first step".to_string());
                    }
                }
                self.after_transition();
                return;
            }
            KeyCode::PageDown => {
                self.advance_wizard();
                return;
            }
            _ => {}
        }

        let step = wizard.current_step().clone();
        match &step.kind {
            StepKind::Form { .. } | StepKind::Review => self.handle_form_key(key, &step),
            StepKind::Menu { .. } => match key.code {
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                    self.state.wizard_screen.next(&step)
                }
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                    self.state.wizard_screen.prev(&step)
                }
                KeyCode::Enter => {
                    let option = self.state.wizard_screen.menu_index;
                    let result = self.with_wizard(|w| w.choose(option));
                    self.report(result);
                }
                _ => {}
            },
            StepKind::Outcome { .. } => match key.code {
                KeyCode::Char('r') => {
                    let result = self.with_wizard(WizardController::retry);
                    self.report(result);
                }
                KeyCode::Enter => self.advance_wizard(),
                _ => {}
            },
            StepKind::Verification(_) => {
                if key.code == KeyCode::Enter {
                    self.after_transition();
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, step: &StepDefinition) {
        let focused = self.state.wizard_screen.focused_field(step);
        let kind = focused
            .and_then(|path| self.wizard.as_ref()?.definition().field_spec(path))
            .map(|spec| spec.kind);

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.wizard_screen.next(step),
            KeyCode::BackTab | KeyCode::Up => self.state.wizard_screen.prev(step),
            KeyCode::Enter if kind == Some(FieldKind::Multiline) => {
                self.edit_focused(focused, |value| value.pushed('\n'));
            }
            KeyCode::Enter => {
                let on_final = self.wizard.as_ref().is_some_and(WizardController::is_final_step);
                if on_final {
                    self.submit_wizard();
                } else {
                    self.advance_wizard();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(FieldKind::Choice(options)) = kind {
                    let forward = key.code == KeyCode::Right;
                    self.edit_focused(focused, |value| value.cycled(options, forward));
                }
            }
            KeyCode::Backspace => self.edit_focused(focused, |value| value.popped()),
            KeyCode::Char(' ') if matches!(kind, Some(FieldKind::Choice(_))) => {
                if let Some(FieldKind::Choice(options)) = kind {
                    self.edit_focused(focused, |value| value.cycled(options, true));
                }
            }
            KeyCode::Char(c) if !matches!(kind, Some(FieldKind::Choice(_))) => {
                if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    return;
                }
                self.edit_focused(focused, |value| value.pushed(c));
            }
            _ => {}
        }
    }

    /// Replace the focused field's value with `edit(current)`
    fn edit_focused(
        &mut self,
        focused: Option<FieldPath>,
        edit: impl FnOnce(&FieldValue) -> FieldValue,
    ) {
        let (Some(path), Some(wizard)) = (focused, self.wizard.as_mut()) else {
            return;
        };
        let Some(current) = wizard.form().get(path) else {
            return;
        };
        let next = edit(current);
        if let Err(err) = wizard.update_field(path.section, path.field, next) {
            self.push_error(err.to_string());
        }
    }

    fn with_wizard<T>(
        &mut self,
        op: impl FnOnce(&mut WizardController) -> Result<T, WizardError>,
    ) -> Result<T, WizardError> {
        match self.wizard.as_mut() {
            Some(wizard) => op(wizard),
            None => Err(WizardError::NothingPending),
        }
    }

    fn advance_wizard(&mut self) {
        let result = self.with_wizard(WizardController::advance);
        self.report(result);
    }

    /// Show a transition error and pick up wherever the wizard landed
    fn report<T>(&mut self, result: Result<T, WizardError>) {
        match result {
            Ok(_) => {}
            Err(WizardError::IncompleteStep { missing, .. }) => {
                self.status_message = Some(format!("Still needed: {}", missing.join(", ")));
            }
            Err(WizardError::RetryBudgetExhausted { attempts }) => {
                self.status_message = Some(format!(
                    "No attempts left after {attempts}. Continue another way."
                ));
            }
            Err(WizardError::AtFinalStep) => {
                self.status_message = Some(format!(
                    "Last step: press {} to submit",
                    SUBMIT_SHORTCUT
                ));
            }
            Err(err) => self.push_error(capitalize(&err.to_string())),
        }
        self.after_transition();
    }

    /// Keep the screen in step with the controller and start verifications
    fn after_transition(&mut self) {
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };
        self.state.wizard_screen.sync(wizard.current_step().id);

        if !wizard.current_step().is_stage() || wizard.is_stage_pending() {
            return;
        }
        match wizard.begin_stage() {
            Ok(ticket) => {
                let (tx, rx) = oneshot::channel();
                let verifier = Arc::clone(&self.verifier);
                let timeout = self.config.verification_timeout();
                let request = ticket.request.clone();
                let handle = tokio::spawn(async move {
                    let result = run_verification(verifier.as_ref(), request, timeout).await;
                    // Receiver is gone when the stage was cancelled
                    let _ = tx.send(result);
                });
                self.stage_task = Some(StageTask {
                    ticket: ticket.id,
                    started: Instant::now(),
                    handle,
                    result: rx,
                });
            }
            Err(WizardError::RetryBudgetExhausted { attempts }) => {
                self.status_message =
                    Some(format!("No attempts left after {attempts}. Continue another way."));
                let step = wizard.current_step().id;
                self.state.wizard_screen.sync(step);
            }
            Err(err) => self.push_error(capitalize(&err.to_string())),
        }
    }

    /// Deliver a finished verification to the wizard.
    ///
    /// Called every tick; returns true when a result was applied.
    pub fn poll_stage(&mut self) -> bool {
        let Some(task) = self.stage_task.as_mut() else {
            return false;
        };
        let result = match task.result.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("Verification task ended without a result");
                let attempt = self
                    .wizard
                    .as_ref()
                    .and_then(|w| w.pending_ticket())
                    .map_or(0, |t| t.attempt);
                StageResult::failure(attempt, "The verification service stopped responding")
            }
        };
        let ticket = task.ticket;
        self.stage_task = None;

        let outcome = self.with_wizard(|w| w.complete_stage(ticket, result));
        match outcome {
            Ok(step) => debug!("Verification routed to {step}"),
            Err(WizardError::StaleResult) => debug!("Dropped stale verification result"),
            Err(err) => self.push_error(capitalize(&err.to_string())),
        }
        self.after_transition();
        true
    }

    fn cancel_stage_task(&mut self) {
        if let Some(task) = self.stage_task.take() {
            task.handle.abort();
        }
    }

    fn cancel_verification(&mut self) {
        self.cancel_stage_task();
        let result = self.with_wizard(WizardController::cancel_stage);
        if result.is_ok() {
            self.status_message = Some("Verification cancelled".to_string());
        }
        self.report(result);
    }

    fn submit_wizard(&mut self) {
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };
        let reference = match wizard.submit(&mut self.submissions) {
            Ok(reference) => reference,
            Err(err) => {
                self.report::<()>(Err(err));
                return;
            }
        };

        let service = self.state.view_params.service;
        if service == Some(ServiceKind::SevisPass) {
            let pass_number = wizard.form().text(PASS_NUMBER).to_string();
            let holder = wizard
                .form()
                .value("identity", "full_name")
                .map(|v| v.as_text().to_string())
                .unwrap_or_default();
            if pass_number.is_empty() {
                self.resume_service = None;
                self.status_message =
                    Some("Visit the office to finish enrollment".to_string());
            } else {
                self.session.grant_pass(&holder, &pass_number);
            }
        }

        info!("Submitted {reference}");
        self.close_wizard();
        self.navigate(View::Confirmation, ViewParams { service });
    }

    fn handle_blocked_key(&mut self, key: KeyEvent) {
        let exits = self
            .blocked
            .as_ref()
            .map(BlockedNotice::exits)
            .unwrap_or(&BlockedExit::ALL);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.state.move_selection_down(exits.len())
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.state.move_selection_up(),
            KeyCode::Esc => self.leave_wizard(),
            KeyCode::Enter => match exits.get(self.state.selected_index) {
                Some(BlockedExit::GoBack) => self.leave_wizard(),
                Some(BlockedExit::AcquireCredential) => {
                    self.resume_service = self.state.view_params.service;
                    self.open_service(ServiceKind::SevisPass);
                }
                None => {}
            },
            _ => {}
        }
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') => {
                if let Some(reference) = self.last_submission().map(|s| s.reference.clone()) {
                    match copy_to_clipboard(&reference) {
                        Ok(()) => self.status_message = Some(format!("Copied {reference}")),
                        Err(err) => self.push_error(format!("Could not copy: {err}")),
                    }
                }
            }
            KeyCode::Char('n') => {
                if let Some(service) = self.state.view_params.service {
                    self.open_service(service);
                }
            }
            KeyCode::Enter => match self.resume_service.take() {
                Some(service) => self.open_service(service),
                None => self.navigate(View::Services, ViewParams::default()),
            },
            KeyCode::Esc => self.navigate(View::Services, ViewParams::default()),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('t') => {
                let theme = self.config.theme().next();
                self.config.theme = Some(theme);
                if let Some(path) = &self.config_file {
                    if let Err(err) = self.config.save_to(path) {
                        self.push_error(format!("Could not save settings: {err}"));
                        return;
                    }
                }
                self.status_message = Some(format!("Theme: {}", theme.label()));
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Error messages start lowercase; the status bar wants a sentence
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
