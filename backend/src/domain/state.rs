//! State records.

use super::resource::{FieldUpdate, Resource, ResourceKind, unknown_field};
use super::validation::{NAME, require_text};
use super::Error;

/// Top-level geographic region keyed by its abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    abbrev: String,
    name: String,
}

impl State {
    pub fn new(abbrev: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbrev: abbrev.into(),
            name: name.into(),
        }
    }

    pub fn abbrev(&self) -> &str {
        self.abbrev.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Validated state insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewState {
    pub abbrev: String,
    pub name: String,
}

/// Mutable state columns. The abbreviation is the key and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Name(String),
}

impl Resource for State {
    type Key = String;
    type Draft = NewState;
    type Change = StateChange;

    const KIND: ResourceKind = ResourceKind::State;
    const MUTABLE_FIELDS: &'static [&'static str] = &["name"];

    fn key(&self) -> String {
        self.abbrev.clone()
    }

    fn parse_change(update: &FieldUpdate) -> Result<StateChange, Error> {
        match update.column() {
            "name" => require_text(Some(update.change()), NAME).map(StateChange::Name),
            other => Err(unknown_field::<Self>(other)),
        }
    }
}
