//! Sign-in view

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_field_with_value;
use crate::app::App;
use crate::auth::MIN_PASSWORD_LEN;
use crate::state::LoginField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FORM_WIDTH: u16 = 56;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_column(area, FORM_WIDTH);
    if app.session.is_authenticated() {
        draw_account(frame, area, app);
    } else {
        draw_sign_in(frame, area, app);
    }
}

fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn draw_sign_in(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let form = &app.state.login;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Sign in",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Passwords have at least {MIN_PASSWORD_LEN} characters"),
            Style::default().fg(palette.muted),
        )),
    ]);
    frame.render_widget(heading, chunks[0]);

    draw_field_with_value(
        frame,
        chunks[1],
        "Email or NID number",
        &form.identifier,
        form.active == LoginField::Identifier,
        false,
        &palette,
    );
    draw_field_with_value(
        frame,
        chunks[2],
        "Password",
        &form.masked_password(),
        form.active == LoginField::Password,
        false,
        &palette,
    );
    render_button(
        frame,
        chunks[4],
        "Sign in",
        form.active == LoginField::Submit,
        !form.identifier.trim().is_empty() && !form.password.is_empty(),
        &palette,
    );
    render_button(
        frame,
        chunks[6],
        "🛡 Sign in with SEVIS Pass",
        form.active == LoginField::UsePass,
        true,
        &palette,
    );
}

fn draw_account(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let user = app.session.user().unwrap_or_default();
    let credential = match app.session.pass_number() {
        Some(pass) => Span::styled(
            format!("SEVIS Pass {pass}"),
            Style::default().fg(palette.success),
        ),
        None => Span::styled(
            "Password only: protected services need a SEVIS Pass",
            Style::default().fg(palette.muted),
        ),
    };
    let details = Paragraph::new(vec![
        Line::from(Span::styled(
            "Account",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Signed in as {user}")),
        Line::from(credential),
    ]);
    frame.render_widget(details, chunks[0]);
    render_button(frame, chunks[1], "Sign out", true, true, &palette);
}
