//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects storage to behave. Each
//! exposes a strongly typed error so adapters map their failures into
//! predictable variants instead of leaking driver types.

mod macros;
pub(crate) use macros::define_port_error;

mod aggregate_query;
mod resource_repository;

pub use aggregate_query::{AggregateQuery, CityAverage, CityListing, ClimateAverage};
pub use resource_repository::{ResourceRepository, ResourceRepositoryError};
