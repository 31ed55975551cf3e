//! Sign-in form state

/// Focusable elements of the sign-in view, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Identifier,
    Password,
    /// "Sign in" button
    Submit,
    /// "Sign in with SEVIS Pass" button
    UsePass,
}

impl LoginField {
    const ORDER: [LoginField; 4] = [
        LoginField::Identifier,
        LoginField::Password,
        LoginField::Submit,
        LoginField::UsePass,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn is_text(&self) -> bool {
        matches!(self, LoginField::Identifier | LoginField::Password)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
    pub active: LoginField,
}

impl LoginForm {
    pub fn input_char(&mut self, c: char) {
        match self.active {
            LoginField::Identifier => self.identifier.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Submit | LoginField::UsePass => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active {
            LoginField::Identifier => {
                self.identifier.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Submit | LoginField::UsePass => {}
        }
    }

    /// Password as shown on screen
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order_wraps() {
        let mut field = LoginField::default();
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, LoginField::Identifier);
        assert_eq!(LoginField::Identifier.prev(), LoginField::UsePass);
    }

    #[test]
    fn test_typing_goes_to_active_field() {
        let mut form = LoginForm::default();
        form.input_char('k');
        form.active = LoginField::Password;
        form.input_char('p');
        form.input_char('w');
        form.backspace();
        assert_eq!(form.identifier, "k");
        assert_eq!(form.password, "p");
        assert_eq!(form.masked_password(), "•");
    }

    #[test]
    fn test_buttons_ignore_typing() {
        let mut form = LoginForm {
            active: LoginField::Submit,
            ..Default::default()
        };
        form.input_char('x');
        form.backspace();
        assert!(form.identifier.is_empty());
        assert!(form.password.is_empty());
    }
}
