//! Controlled text inputs: one [`Field`] per editable input on the page.
//!
//! A field owns its current value. The only way to change it is a [`ChangeEvent`],
//! which replaces the value wholesale. Nothing is trimmed or validated.

use std::fmt;
use std::str::FromStr;

/// Category of an input, rendered as the input's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Date,
    Number,
    Email,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Date => "date",
            Self::Number => "number",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "password" => Ok(Self::Password),
            "date" => Ok(Self::Date),
            "number" => Ok(Self::Number),
            "email" => Ok(Self::Email),
            other => Err(UnknownFieldKind(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown field kind: {0}")]
pub struct UnknownFieldKind(pub String);

/// An input change: carries the input's new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    value: String,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The value the input holds after the change.
    pub fn target_value(&self) -> &str {
        &self.value
    }
}

/// A form submission. Handlers call [`SubmitEvent::prevent_default`] to keep the
/// runtime from running its default submit behavior (a full page reload in a browser).
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// State behind one editable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    value: String,
}

impl Field {
    /// New field of the given kind with an empty value.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            value: String::new(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Change handler: replaces the value with the event's value, unconditionally.
    pub fn on_change(&mut self, event: &ChangeEvent) {
        self.value.clear();
        self.value.push_str(event.target_value());
    }

    /// Descriptor to spread onto an input: its type and current value.
    /// Changes flow back through [`Field::on_change`].
    pub fn binding(&self) -> InputBinding<'_> {
        InputBinding {
            kind: self.kind,
            value: &self.value,
        }
    }
}

/// Borrowed view of a field, used when rendering an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding<'a> {
    pub kind: FieldKind,
    pub value: &'a str,
}
