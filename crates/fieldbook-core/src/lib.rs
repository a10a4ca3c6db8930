//! All client logic independent of how the app is driven (one-shot CLI or interactive shell).
//!
//! Notes and persons live on a REST backend. Fieldbook keeps them in memory for the
//! session and stores only its config in its own app data directory (see [app_data]).

pub mod app_data;
pub mod config;
pub mod field;
pub mod http;
pub mod models;
pub mod resource;
pub mod shell;
pub mod store;
pub mod view;

pub use app_data::app_data_dir;
pub use config::{
    load_config, parse_url, save_config, set_endpoint, Config, ConfigError, Endpoints, ResourceKind,
    DEFAULT_NOTES_URL, DEFAULT_PERSONS_URL,
};
pub use field::{ChangeEvent, Field, FieldKind, InputBinding, SubmitEvent};
pub use http::{HttpClient, HttpError};
pub use models::{NewNote, NewPerson, Note, Person, Resource, ResourceId};
pub use resource::{ResourceClient, ResourceError};
pub use shell::{App, FieldName, ShellError};
pub use store::ResourceList;
pub use url::Url;
pub use view::View;

/// Returns a short status string. Used to verify the core is wired up.
pub fn status() -> &'static str {
    "fieldbook-core ready"
}
