//! Application state definitions

use super::login::LoginForm;
use super::wizard_screen::WizardScreen;
use crate::services::{Category, ServiceKind};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with logo animation
    Splash,
    #[default]
    Home,
    SignIn,
    Services,
    /// A mounted application wizard
    Wizard,
    /// A wizard the current credentials may not open
    Blocked,
    Confirmation,
    Settings,
}

impl View {
    /// Views that only make sense while a wizard session is alive.
    ///
    /// Going back never lands on these.
    pub fn is_session_view(&self) -> bool {
        matches!(self, View::Wizard | View::Blocked | View::Splash)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Splash => "",
            View::Home => "Home",
            View::SignIn => "Sign in",
            View::Services => "Services",
            View::Wizard => "Application",
            View::Blocked => "Verification required",
            View::Confirmation => "Submitted",
            View::Settings => "Settings",
        }
    }
}

/// View parameters for navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewParams {
    /// Service the wizard, blocked or confirmation view is about
    pub service: Option<ServiceKind>,
}

impl ViewParams {
    pub fn service(kind: ServiceKind) -> Self {
        Self {
            service: Some(kind),
        }
    }
}

/// Entries of the sidebar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Home,
    Services,
    SignIn,
    Settings,
}

impl SidebarItem {
    pub const ALL: [SidebarItem; 4] = [
        SidebarItem::Home,
        SidebarItem::Services,
        SidebarItem::SignIn,
        SidebarItem::Settings,
    ];

    pub fn view(&self) -> View {
        match self {
            Self::Home => View::Home,
            Self::Services => View::Services,
            Self::SignIn => View::SignIn,
            Self::Settings => View::Settings,
        }
    }

    pub fn key(&self) -> char {
        match self {
            Self::Home => 'h',
            Self::Services => 's',
            Self::SignIn => 'l',
            Self::Settings => ',',
        }
    }

    /// Sidebar entry highlighted for a view
    pub fn for_view(view: View) -> Option<SidebarItem> {
        match view {
            View::Home => Some(Self::Home),
            View::Services | View::Wizard | View::Blocked | View::Confirmation => {
                Some(Self::Services)
            }
            View::SignIn => Some(Self::SignIn),
            View::Settings => Some(Self::Settings),
            View::Splash => None,
        }
    }
}

/// Shortcuts offered on the home view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    BrowseServices,
    SignIn,
    GetPass,
}

impl HomeAction {
    pub const ALL: [HomeAction; 3] = [
        HomeAction::BrowseServices,
        HomeAction::SignIn,
        HomeAction::GetPass,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BrowseServices => "Browse services",
            Self::SignIn => "Sign in",
            Self::GetPass => "Get your SEVIS Pass",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BrowseServices => "Apply for licenses, certificates and records",
            Self::SignIn => "Use your email or NID number and password",
            Self::GetPass => "Verify your identity once to unlock protected services",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Selection
    pub selected_index: usize,
    pub category_filter: Option<Category>,

    // UI state
    errors: VecDeque<String>,
    /// Esc was pressed in a wizard that holds answers
    pub confirm_discard: bool,
    /// 0 = Cancel, 1 = Discard
    pub confirm_discard_index: usize,

    // Screens
    pub login: LoginForm,
    pub wizard_screen: WizardScreen,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Advance the services filter and keep the selection in range
    pub fn cycle_category_filter(&mut self) {
        self.category_filter = Category::next_filter(self.category_filter);
        self.reset_selection();
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Errors waiting behind the one shown
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
