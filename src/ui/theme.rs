//! Colors for the light and dark themes

use crate::config::ThemePreference;
use ratatui::style::Color;

/// Resolved colors used by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub failure: Color,
    pub info: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub dialog_bg: Color,
}

impl Palette {
    const DARK: Palette = Palette {
        text: Color::White,
        muted: Color::DarkGray,
        accent: Color::Cyan,
        success: Color::Green,
        failure: Color::Red,
        info: Color::Yellow,
        bar_bg: Color::DarkGray,
        bar_fg: Color::Gray,
        dialog_bg: Color::Black,
    };

    const LIGHT: Palette = Palette {
        text: Color::Black,
        muted: Color::Gray,
        accent: Color::Blue,
        success: Color::Green,
        failure: Color::Red,
        info: Color::Magenta,
        bar_bg: Color::Gray,
        bar_fg: Color::Black,
        dialog_bg: Color::White,
    };

    /// Terminal default foreground and background, dark accents
    const SYSTEM: Palette = Palette {
        text: Color::Reset,
        dialog_bg: Color::Reset,
        ..Self::DARK
    };

    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => Self::LIGHT,
            ThemePreference::Dark => Self::DARK,
            ThemePreference::System => Self::SYSTEM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        let light = Palette::for_theme(ThemePreference::Light);
        let dark = Palette::for_theme(ThemePreference::Dark);
        assert_ne!(light.text, dark.text);
        assert_ne!(light.dialog_bg, dark.dialog_bg);
    }

    #[test]
    fn test_system_follows_terminal_colors() {
        let system = Palette::for_theme(ThemePreference::System);
        assert_eq!(system.text, Color::Reset);
        assert_eq!(system.accent, Palette::DARK.accent);
    }
}
