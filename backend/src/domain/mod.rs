//! Domain primitives, services, and ports.
//!
//! Purpose: define the state, city, and temperature records, the rules that
//! validate untyped request data into them, the generic resource service that
//! implements create/read/update/delete over a repository port, and the
//! translation of storage constraint failures into domain errors.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - State / City / Temperature: records and their drafts and changes.
//! - Resource / ResourceKind / FieldUpdate: the per-entity schema contract.
//! - ResourceService: list, lookup, create, partial update, delete.
//! - validation: the field validator.
//! - constraints: the constraint error translator.

pub mod city;
pub mod constraints;
pub mod error;
pub mod ports;
pub mod resource;
pub mod resource_service;
pub mod state;
pub mod temperature;
pub mod trace_id;
pub mod validation;

pub use self::city::{City, CityChange, CityId, NewCity};
pub use self::constraints::{KnownConstraint, translate_repository_error};
pub use self::error::{Error, ErrorCode};
pub use self::resource::{FieldUpdate, Resource, ResourceKind};
pub use self::resource_service::ResourceService;
pub use self::state::{NewState, State, StateChange};
pub use self::temperature::{NewTemperature, Temperature, TemperatureChange, TemperatureId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
