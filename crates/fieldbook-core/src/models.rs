//! Resource types served by the backend: notes and persons.
//!
//! Ids are assigned by the server; the client never makes one up. Fields we don't
//! know about are kept in `extra` so items round-trip unchanged.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned identity. json-server style backends hand out numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Loose backends send `null` for blank text; treat it like a missing field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A server-managed item with an id, plus the payload used to create one.
pub trait Resource: DeserializeOwned + Serialize + Clone + fmt::Debug {
    /// Body sent with the create request.
    type Draft: Serialize + fmt::Debug;

    fn id(&self) -> &ResourceId;

    /// One line of text for the list under the form.
    fn display_line(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
}

impl Resource for Note {
    type Draft = NewNote;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn display_line(&self) -> String {
        self.content.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub number: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub number: String,
}

impl Resource for Person {
    type Draft = NewPerson;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn display_line(&self) -> String {
        format!("{} {}", self.name, self.number)
    }
}
