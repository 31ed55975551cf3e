//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a field inside a [`FormState`](super::FormState)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldPath {
    pub section: &'static str,
    pub field: &'static str,
}

impl FieldPath {
    pub const fn new(section: &'static str, field: &'static str) -> Self {
        Self { section, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.field)
    }
}

/// A reference to a document the applicant attached.
///
/// Uploads are simulated: only the file name the user typed is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(Option<u32>),
    File(Option<FileRef>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Whether the value counts as "not filled in"
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::Number(n) => n.is_none(),
            FieldValue::File(f) => f.as_ref().map_or(true, |f| f.name.trim().is_empty()),
        }
    }

    /// Whether two values hold the same variant
    pub fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::File(Some(f)) => &f.name,
            _ => "",
        }
    }

    /// Get the flag value (returns false for non-flag fields)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Value with a character appended
    pub fn pushed(&self, c: char) -> FieldValue {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.push(c);
                FieldValue::Text(s)
            }
            FieldValue::Flag(_) if c == ' ' => self.toggled(),
            FieldValue::Flag(_) => self.clone(),
            FieldValue::Number(n) => match c.to_digit(10) {
                Some(d) => {
                    let next = n.unwrap_or(0).saturating_mul(10).saturating_add(d);
                    FieldValue::Number(Some(next))
                }
                None => FieldValue::Number(*n),
            },
            FieldValue::File(f) => {
                let mut name = f.as_ref().map(|f| f.name.clone()).unwrap_or_default();
                name.push(c);
                FieldValue::File(Some(FileRef { name }))
            }
        }
    }

    /// Value with the last character removed
    pub fn popped(&self) -> FieldValue {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.pop();
                FieldValue::Text(s)
            }
            FieldValue::Flag(b) => FieldValue::Flag(*b),
            FieldValue::Number(n) => FieldValue::Number(n.and_then(|v| {
                let rest = v / 10;
                (rest > 0).then_some(rest)
            })),
            FieldValue::File(f) => {
                let mut name = f.as_ref().map(|f| f.name.clone()).unwrap_or_default();
                name.pop();
                if name.is_empty() {
                    FieldValue::File(None)
                } else {
                    FieldValue::File(Some(FileRef { name }))
                }
            }
        }
    }

    /// Flag value inverted (other kinds unchanged)
    pub fn toggled(&self) -> FieldValue {
        match self {
            FieldValue::Flag(b) => FieldValue::Flag(!b),
            other => other.clone(),
        }
    }

    /// Text value moved to the next/previous entry of `options`.
    ///
    /// An empty value selects the first (or last) option.
    pub fn cycled(&self, options: &[&str], forward: bool) -> FieldValue {
        if options.is_empty() {
            return self.clone();
        }
        let current = options.iter().position(|o| *o == self.as_text());
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        FieldValue::Text(options[next].to_string())
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(true) => "[x] Yes".to_string(),
            FieldValue::Flag(false) => "[ ] No".to_string(),
            FieldValue::Number(Some(n)) => n.to_string(),
            FieldValue::Number(None) => String::new(),
            FieldValue::File(Some(f)) => format!("📎 {}", f.name),
            FieldValue::File(None) => String::new(),
        }
    }
}

/// What kind of input a field takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Choice(&'static [&'static str]),
    Flag,
    Number,
    File,
}

impl FieldKind {
    /// Initial value for a freshly mounted wizard
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Text | FieldKind::Multiline | FieldKind::Choice(_) => {
                FieldValue::Text(String::new())
            }
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Number => FieldValue::Number(None),
            FieldKind::File => FieldValue::File(None),
        }
    }
}

/// Static description of a single field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    /// Create a required text field
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: true,
        }
    }

    /// Create a required multiline field
    pub const fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Multiline,
            required: true,
        }
    }

    /// Create a required choice field
    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice(options),
            required: true,
        }
    }

    /// Create a checkbox that must be ticked
    pub const fn consent(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Flag,
            required: true,
        }
    }

    /// Create a required number field
    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            required: true,
        }
    }

    /// Create a required document upload
    pub const fn file(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::File,
            required: true,
        }
    }

    /// Same field, but not needed to proceed
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Same field, but an optional checkbox
    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::consent(name, label).optional()
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }
}

/// Group of fields stored under one section key
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl SectionSpec {
    pub fn new(name: &'static str, title: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name,
            title,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod editing {
        use super::*;

        #[test]
        fn test_text_push_and_pop() {
            let value = FieldValue::Text("ab".to_string());
            assert_eq!(value.pushed('c').as_text(), "abc");
            assert_eq!(value.popped().as_text(), "a");
        }

        #[test]
        fn test_number_accepts_digits_only() {
            let value = FieldValue::Number(None).pushed('4').pushed('x').pushed('2');
            assert_eq!(value, FieldValue::Number(Some(42)));
            assert_eq!(value.popped(), FieldValue::Number(Some(4)));
            assert_eq!(value.popped().popped(), FieldValue::Number(None));
        }

        #[test]
        fn test_space_toggles_flag() {
            let value = FieldValue::Flag(false);
            assert!(value.pushed(' ').as_flag());
            assert!(!value.pushed('a').as_flag());
            assert!(value.toggled().as_flag());
        }

        #[test]
        fn test_file_name_is_built_from_typed_text() {
            let value = FieldValue::File(None).pushed('a').pushed('.');
            assert_eq!(value.as_text(), "a.");
            assert_eq!(value.popped().popped(), FieldValue::File(None));
        }

        #[test]
        fn test_cycle_choice_wraps_both_ways() {
            let options = ["visiting", "work", "studying"];
            let empty = FieldValue::Text(String::new());
            assert_eq!(empty.cycled(&options, true).as_text(), "visiting");
            assert_eq!(empty.cycled(&options, false).as_text(), "studying");

            let last = FieldValue::Text("studying".to_string());
            assert_eq!(last.cycled(&options, true).as_text(), "visiting");
            let first = FieldValue::Text("visiting".to_string());
            assert_eq!(first.cycled(&options, false).as_text(), "studying");
        }
    }

    mod emptiness {
        use super::*;

        #[test]
        fn test_whitespace_text_is_empty() {
            assert!(FieldValue::Text("   ".to_string()).is_empty());
            assert!(!FieldValue::Text(" x ".to_string()).is_empty());
        }

        #[test]
        fn test_unchecked_flag_is_empty() {
            assert!(FieldValue::Flag(false).is_empty());
            assert!(!FieldValue::Flag(true).is_empty());
        }

        #[test]
        fn test_missing_file_is_empty() {
            assert!(FieldValue::File(None).is_empty());
            assert!(!FieldValue::File(Some(FileRef {
                name: "photo.jpg".to_string()
            }))
            .is_empty());
        }
    }

    #[test]
    fn test_default_values_follow_kind() {
        assert_eq!(FieldKind::Flag.default_value(), FieldValue::Flag(false));
        assert_eq!(FieldKind::Number.default_value(), FieldValue::Number(None));
        assert_eq!(
            FieldKind::Choice(&["a"]).default_value(),
            FieldValue::Text(String::new())
        );
    }

    #[test]
    fn test_display_value_for_flag() {
        assert_eq!(FieldValue::Flag(true).display_value(), "[x] Yes");
        assert_eq!(FieldValue::Flag(false).display_value(), "[ ] No");
    }

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::new("applicant", "name").to_string(), "applicant.name");
    }
}
