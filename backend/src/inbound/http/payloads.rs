//! Request payloads shared by the resource handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::FieldUpdate;

/// Single-field update: the column to change and its new value.
///
/// Both members are optional on the wire so a missing `column` reaches the
/// allow-list check and a missing `change` reaches the field rule. Handlers
/// accept any JSON value and read it with [`UpdateFieldRequestBody::from_value`]
/// so the record lookup runs before the body shape is judged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateFieldRequestBody {
    #[schema(example = "climate")]
    pub column: Option<String>,
    #[schema(value_type = Object, example = "arid")]
    pub change: Option<Value>,
}

impl UpdateFieldRequestBody {
    /// Read `column` and `change` from an arbitrary JSON value.
    ///
    /// A non-string `column` is kept in its JSON rendering so the allow-list
    /// rejection names what was sent.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut members) = value else {
            return Self::default();
        };
        let column = members.remove("column").and_then(|column| match column {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        });
        Self {
            column,
            change: members.remove("change"),
        }
    }

    pub fn into_field_update(self) -> FieldUpdate {
        FieldUpdate::new(
            self.column.unwrap_or_default(),
            self.change.unwrap_or(Value::Null),
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn missing_members_become_empty_column_and_null() {
        let update = UpdateFieldRequestBody::default().into_field_update();
        assert_eq!(update.column(), "");
        assert_eq!(update.change(), &Value::Null);
    }

    #[rstest]
    fn members_pass_through() {
        let body: UpdateFieldRequestBody =
            serde_json::from_value(json!({ "column": "name", "change": "Austin" }))
                .expect("body parses");
        assert_eq!(
            body.into_field_update(),
            FieldUpdate::new("name", json!("Austin"))
        );
    }

    #[rstest]
    #[case(json!([1, 2]), "")]
    #[case(json!("climate"), "")]
    #[case(json!({"column": 5, "change": "x"}), "5")]
    #[case(json!({"column": null}), "")]
    fn from_value_tolerates_any_shape(#[case] input: Value, #[case] column: &str) {
        let update = UpdateFieldRequestBody::from_value(input).into_field_update();
        assert_eq!(update.column(), column);
    }

    #[rstest]
    fn from_value_keeps_object_members() {
        let update =
            UpdateFieldRequestBody::from_value(json!({"column": "climate", "change": "arid"}))
                .into_field_update();
        assert_eq!(update, FieldUpdate::new("climate", json!("arid")));
    }
}
