//! UI module for rendering the TUI

mod blocked;
mod components;
mod confirmation;
mod forms;
mod home;
mod layout;
mod login;
mod services;
mod settings;
mod splash;
mod theme;
mod wizard;

pub use theme::Palette;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = app.palette();

    if let (View::Splash, Some(splash_state)) = (app.state.current_view, &app.splash_state) {
        splash::draw(frame, frame.area(), splash_state, &palette);
        return;
    }

    let areas = layout::create_layout(frame.area());
    layout::draw_header(frame, areas.header, app);
    layout::draw_sidebar(frame, areas.sidebar, app);

    let main_area = areas.main.inner(ratatui::layout::Margin {
        horizontal: 2,
        vertical: 1,
    });
    match app.state.current_view {
        View::Splash | View::Home => home::draw(frame, main_area, app),
        View::SignIn => login::draw(frame, main_area, app),
        View::Services => services::draw(frame, main_area, app),
        View::Wizard => wizard::draw(frame, main_area, app),
        View::Blocked => blocked::draw(frame, main_area, app),
        View::Confirmation => confirmation::draw(frame, main_area, app),
        View::Settings => settings::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, areas.status, app);

    // Modals on top
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.queued_errors(), &palette);
    } else if app.state.confirm_discard {
        let title = app
            .wizard
            .as_ref()
            .map(|w| w.definition().title)
            .unwrap_or("this application");
        render_confirm_dialog(frame, title, app.state.confirm_discard_index, &palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::services::ServiceKind;
    use crate::state::ViewParams;
    use crate::wizard::MockVerifier;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::with_verifier(PortalConfig::default(), Arc::new(MockVerifier::new()), None)
    }

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn renders_home_with_sidebar_and_status() {
        let output = render(&app());
        assert!(output.contains("Welcome to the SEVIS Portal"));
        assert!(output.contains("Browse services"));
        assert!(output.contains("Settings"), "sidebar entry");
        assert!(output.contains("^C^C:quit"), "quit hint");
    }

    #[test]
    fn renders_service_catalog() {
        let mut app = app();
        app.navigate(View::Services, ViewParams::default());
        let output = render(&app);
        assert!(output.contains("Medical record number"));
        assert!(output.contains("City pass"));
    }

    #[test]
    fn renders_blocked_notice_with_exits() {
        let mut app = app();
        app.open_service(ServiceKind::DriversLicense);
        let output = render(&app);
        assert!(output.contains("Verification required"));
        assert!(output.contains("Go back"));
        assert!(output.contains("Get SEVIS Pass"));
    }

    #[test]
    fn renders_first_wizard_step() {
        let mut app = app();
        app.open_service(ServiceKind::CityPass);
        let output = render(&app);
        assert!(output.contains("City pass"));
        assert!(output.contains("Full name"));
        assert!(output.contains("(empty)"), "placeholder for unanswered fields");
    }

    #[test]
    fn error_dialog_covers_the_view() {
        let mut app = app();
        app.push_error("Something broke");
        let output = render(&app);
        assert!(output.contains("Something broke"));
        assert!(output.contains("to dismiss"));
    }
}
