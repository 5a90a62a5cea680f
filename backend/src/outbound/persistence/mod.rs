//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the storage ports backed by PostgreSQL via
//! `diesel-async` and a `bb8` pool. Adapters translate between Diesel row
//! structs and domain records and map driver failures into port errors; no
//! business rules live here.
//!
//! ```ignore
//! use weather::outbound::persistence::{DbPool, DieselStateRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/weather")).await?;
//! let states = DieselStateRepository::new(pool);
//! ```

mod diesel_aggregate_query;
mod diesel_city_repository;
mod diesel_error_mapping;
mod diesel_state_repository;
mod diesel_temperature_repository;
mod models;
mod pool;
mod schema;

pub use diesel_aggregate_query::DieselAggregateQuery;
pub use diesel_city_repository::DieselCityRepository;
pub use diesel_state_repository::DieselStateRepository;
pub use diesel_temperature_repository::DieselTemperatureRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
