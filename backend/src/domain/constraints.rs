//! Translation of storage failures into domain errors.
//!
//! Only the constraints listed in [`KnownConstraint`] reach callers as
//! actionable errors. Any other violation, and every connectivity or query
//! fault, is logged here and surfaced as an internal error.

use serde_json::json;
use tracing::{debug, error};

use super::ports::ResourceRepositoryError;
use super::{Error, ResourceKind};

/// Constraints whose violations callers can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownConstraint {
    /// Duplicate state abbreviation.
    StatePrimaryKey,
    /// Duplicate city name within a state.
    CityStateName,
    /// Second reading for a city on one date.
    CityDate,
    /// City refers to a state that does not exist.
    CityStateReference,
    /// Reading refers to a city that does not exist.
    TemperatureCityReference,
}

impl KnownConstraint {
    pub const ALL: [Self; 5] = [
        Self::StatePrimaryKey,
        Self::CityStateName,
        Self::CityDate,
        Self::CityStateReference,
        Self::TemperatureCityReference,
    ];

    /// Constraint name as declared in the schema.
    pub fn name(self) -> &'static str {
        match self {
            Self::StatePrimaryKey => "states_pkey",
            Self::CityStateName => "cities_state_name",
            Self::CityDate => "city_date",
            Self::CityStateReference => "cities_state_abbrev_fkey",
            Self::TemperatureCityReference => "temperatures_city_id_fkey",
        }
    }

    /// Look a constraint up by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.name() == name)
    }

    fn to_error(self) -> Error {
        let error = match self {
            Self::StatePrimaryKey => Error::conflict("This state already exists"),
            Self::CityStateName => Error::conflict("This city already exists"),
            Self::CityDate => Error::conflict("That city already has an entry for that date"),
            Self::CityStateReference => Error::invalid_request("That state does not exist"),
            Self::TemperatureCityReference => Error::invalid_request("That city does not exist"),
        };
        error.with_details(json!({ "constraint": self.name() }))
    }
}

/// Map a repository failure raised while operating on `kind` to a domain
/// error.
pub fn translate_repository_error(kind: ResourceKind, failure: ResourceRepositoryError) -> Error {
    match failure {
        ResourceRepositoryError::ConstraintViolation { constraint } => {
            match KnownConstraint::from_name(&constraint) {
                Some(known) => known.to_error(),
                None => {
                    error!(
                        resource = kind.label(),
                        constraint = constraint.as_str(),
                        "unrecognised constraint violation"
                    );
                    Error::internal(format!("unrecognised constraint violation: {constraint}"))
                }
            }
        }
        other => {
            debug!(resource = kind.label(), error = %other, "resource storage failure");
            Error::internal(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("states_pkey", ErrorCode::Conflict, "This state already exists")]
    #[case("cities_state_name", ErrorCode::Conflict, "This city already exists")]
    #[case(
        "city_date",
        ErrorCode::Conflict,
        "That city already has an entry for that date"
    )]
    #[case(
        "cities_state_abbrev_fkey",
        ErrorCode::InvalidRequest,
        "That state does not exist"
    )]
    #[case(
        "temperatures_city_id_fkey",
        ErrorCode::InvalidRequest,
        "That city does not exist"
    )]
    fn known_constraints_map_to_caller_errors(
        #[case] constraint: &str,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let error = translate_repository_error(
            ResourceKind::City,
            ResourceRepositoryError::constraint_violation(constraint),
        );

        assert_eq!(error.code(), code);
        assert_eq!(error.message(), message);
        assert_eq!(error.details().expect("details")["constraint"], constraint);
    }

    #[rstest]
    #[case("cities_population_check")]
    #[case("")]
    fn unrecognised_constraints_are_internal(#[case] constraint: &str) {
        let error = translate_repository_error(
            ResourceKind::State,
            ResourceRepositoryError::constraint_violation(constraint),
        );
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case(ResourceRepositoryError::connection("pool timed out"))]
    #[case(ResourceRepositoryError::query("syntax error"))]
    fn storage_faults_are_internal(#[case] failure: ResourceRepositoryError) {
        let error = translate_repository_error(ResourceKind::Temperature, failure);
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn names_round_trip() {
        for known in KnownConstraint::ALL {
            assert_eq!(KnownConstraint::from_name(known.name()), Some(known));
        }
    }
}
