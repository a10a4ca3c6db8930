//! The application shell: three input fields, a notes client and a persons client,
//! two submit handlers and a render function.
//!
//! Submitting a form does not clear its fields. Failures are returned to the caller
//! and also kept as a notice that the next render shows; the next successful
//! operation clears it.

use std::fmt;
use std::str::FromStr;

use crate::config::{Config, ConfigError, Endpoints};
use crate::field::{ChangeEvent, Field, FieldKind, SubmitEvent};
use crate::http::{HttpClient, HttpError};
use crate::models::{NewNote, NewPerson, Note, Person};
use crate::resource::{ResourceClient, ResourceError};
use crate::view::{Form, Input, Line, Section, View};

/// The inputs on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Content,
    Name,
    Number,
}

impl FieldName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Name => "name",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(Self::Content),
            "name" => Ok(Self::Name),
            "number" => Ok(Self::Number),
            other => Err(ShellError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct App {
    content: Field,
    name: Field,
    number: Field,
    notes: ResourceClient<Note>,
    persons: ResourceClient<Person>,
    notice: Option<String>,
}

impl App {
    pub fn new(http: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            content: Field::new(FieldKind::Text),
            name: Field::new(FieldKind::Text),
            number: Field::new(FieldKind::Text),
            notes: ResourceClient::new(http.clone(), endpoints.notes),
            persons: ResourceClient::new(http, endpoints.persons),
            notice: None,
        }
    }

    /// Build from config: endpoints plus the optional request timeout.
    pub fn from_config(config: &Config) -> Result<Self, ShellError> {
        Ok(Self::new(config.http_client()?, config.endpoints()?))
    }

    pub fn field(&self, name: FieldName) -> &Field {
        match name {
            FieldName::Content => &self.content,
            FieldName::Name => &self.name,
            FieldName::Number => &self.number,
        }
    }

    /// Route an input change to its field.
    pub fn on_change(&mut self, name: FieldName, event: &ChangeEvent) {
        let field = match name {
            FieldName::Content => &mut self.content,
            FieldName::Name => &mut self.name,
            FieldName::Number => &mut self.number,
        };
        field.on_change(event);
    }

    pub fn notes(&self) -> &ResourceClient<Note> {
        &self.notes
    }

    pub fn persons(&self) -> &ResourceClient<Person> {
        &self.persons
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Initial load of both lists, run concurrently. Each endpoint is fetched once;
    /// calling this again after a successful mount does nothing.
    pub async fn mount(&mut self) -> Result<(), ResourceError> {
        let (notes, persons) =
            tokio::join!(self.notes.ensure_loaded(), self.persons.ensure_loaded());
        let result = notes.and(persons).map(|_| ());
        self.record(&result);
        result
    }

    /// Fetch both lists again, replacing what is held.
    pub async fn reload(&mut self) -> Result<(), ResourceError> {
        let (notes, persons) = tokio::join!(self.notes.load(), self.persons.load());
        let result = notes.map(|_| ()).and(persons.map(|_| ()));
        self.record(&result);
        result
    }

    pub async fn handle_note_submit(&mut self, event: &mut SubmitEvent) -> Result<(), ResourceError> {
        event.prevent_default();
        let draft = NewNote {
            content: self.content.value().to_string(),
        };
        let result = self.notes.create(&draft).await.map(|_| ());
        self.record(&result);
        result
    }

    pub async fn handle_person_submit(
        &mut self,
        event: &mut SubmitEvent,
    ) -> Result<(), ResourceError> {
        event.prevent_default();
        let draft = NewPerson {
            name: self.name.value().to_string(),
            number: self.number.value().to_string(),
        };
        let result = self.persons.create(&draft).await.map(|_| ());
        self.record(&result);
        result
    }

    fn record(&mut self, result: &Result<(), ResourceError>) {
        self.notice = result.as_ref().err().map(ToString::to_string);
    }

    pub fn render(&self) -> View {
        View {
            notice: self.notice.clone(),
            sections: vec![
                Section {
                    heading: "notes".into(),
                    form: Form {
                        inputs: vec![Input::bound(None, self.content.binding())],
                        button: "create".into(),
                    },
                    lines: self.notes.list().iter().map(Line::of).collect(),
                },
                Section {
                    heading: "persons".into(),
                    form: Form {
                        inputs: vec![
                            Input::bound(Some("name"), self.name.binding()),
                            Input::bound(Some("number"), self.number.binding()),
                        ],
                        button: "create".into(),
                    },
                    lines: self.persons.list().iter().map(Line::of).collect(),
                },
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unknown field: {0} (expected content, name or number)")]
    UnknownField(String),
}
