//! Rendered page: a plain tree of sections, forms and lines.
//!
//! The tree carries no behavior. `Display` prints it as text for terminals.

use std::fmt;

use crate::field::{FieldKind, InputBinding};
use crate::models::{Resource, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    /// Last failure reported by the shell, shown above the sections.
    pub notice: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub form: Form,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub inputs: Vec<Input>,
    pub button: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub label: Option<String>,
    pub kind: FieldKind,
    pub value: String,
}

impl Input {
    pub fn bound(label: Option<&str>, binding: InputBinding<'_>) -> Self {
        Self {
            label: label.map(str::to_string),
            kind: binding.kind,
            value: binding.value.to_string(),
        }
    }
}

/// One list entry, keyed by the resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub key: ResourceId,
    pub text: String,
}

impl Line {
    pub fn of<T: Resource>(item: &T) -> Self {
        Self {
            key: item.id().clone(),
            text: item.display_line(),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
            writeln!(f)?;
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{section}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.heading)?;
        for input in &self.form.inputs {
            match &input.label {
                Some(label) => writeln!(f, "{label} [{}: {}]", input.kind, input.value)?,
                None => writeln!(f, "[{}: {}]", input.kind, input.value)?,
            }
        }
        writeln!(f, "<{}>", self.form.button)?;
        for line in &self.lines {
            writeln!(f, "{}", line.text)?;
        }
        Ok(())
    }
}
