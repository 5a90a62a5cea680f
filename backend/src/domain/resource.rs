//! Per-entity schema contract shared by states, cities, and temperatures.
//!
//! A [`Resource`] names its key, the validated draft accepted by create, and
//! a closed change type for partial updates. The change type is the update
//! allow-list: [`Resource::parse_change`] is the only way to turn a caller's
//! `{column, change}` pair into something a repository can apply, so an
//! arbitrary column name never reaches a storage statement.

use std::fmt;

use serde_json::{Value, json};

use super::Error;

/// Which entity a resource operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    State,
    City,
    Temperature,
}

impl ResourceKind {
    /// Lower-case label used in messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::City => "city",
            Self::Temperature => "temperature",
        }
    }

    /// Error returned when a lookup by key finds nothing.
    pub fn not_found(self) -> Error {
        Error::not_found(format!("The {} could not be found", self.label()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Untyped single-field update as received from a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    column: String,
    change: Value,
}

impl FieldUpdate {
    /// Pair a column name with its new, not yet coerced, value.
    pub fn new(column: impl Into<String>, change: Value) -> Self {
        Self {
            column: column.into(),
            change,
        }
    }

    /// Column the caller wants to change.
    pub fn column(&self) -> &str {
        self.column.as_str()
    }

    /// Raw replacement value.
    pub fn change(&self) -> &Value {
        &self.change
    }
}

/// Schema of one entity type as seen by the generic resource service.
pub trait Resource: Clone + fmt::Debug + Send + Sync + 'static {
    /// Primary key.
    type Key: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync + 'static;
    /// Validated insert payload.
    type Draft: fmt::Debug + Send + Sync + 'static;
    /// Typed single-column change drawn from the allow-list.
    type Change: fmt::Debug + Send + Sync + 'static;

    /// Entity discriminator.
    const KIND: ResourceKind;
    /// Column names accepted by [`Resource::parse_change`].
    const MUTABLE_FIELDS: &'static [&'static str];

    /// Key of this record.
    fn key(&self) -> Self::Key;

    /// Resolve an untyped update against the allow-list and coerce its value.
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::UnknownField`] when the column is not
    /// mutable, [`crate::domain::ErrorCode::InvalidRequest`] when the value
    /// fails the column's field rule.
    fn parse_change(update: &FieldUpdate) -> Result<Self::Change, Error>;
}

/// Build the rejection for a column outside `R`'s allow-list.
pub(crate) fn unknown_field<R: Resource>(column: &str) -> Error {
    Error::unknown_field(format!(
        "Unknown {} field: '{column}'",
        R::KIND.label()
    ))
    .with_details(json!({
        "field": column,
        "allowed": R::MUTABLE_FIELDS,
    }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, State};

    #[rstest]
    #[case(ResourceKind::State, "The state could not be found")]
    #[case(ResourceKind::City, "The city could not be found")]
    #[case(ResourceKind::Temperature, "The temperature could not be found")]
    fn not_found_messages_name_the_entity(#[case] kind: ResourceKind, #[case] expected: &str) {
        let error = kind.not_found();
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), expected);
    }

    #[rstest]
    fn unknown_field_lists_the_allow_list() {
        let error = unknown_field::<State>("abbrev");

        assert_eq!(error.code(), ErrorCode::UnknownField);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "abbrev");
        assert_eq!(details["allowed"], json!(["name"]));
    }
}
