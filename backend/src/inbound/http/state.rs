//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AggregateQuery, ResourceRepository};
use crate::domain::{City, ResourceService, State, Temperature};

/// Parameter object bundling the port implementations behind the handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub states: Arc<dyn ResourceRepository<State>>,
    pub cities: Arc<dyn ResourceRepository<City>>,
    pub temperatures: Arc<dyn ResourceRepository<Temperature>>,
    pub aggregates: Arc<dyn AggregateQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub states: ResourceService<State>,
    pub cities: ResourceService<City>,
    pub temperatures: ResourceService<Temperature>,
    pub aggregates: Arc<dyn AggregateQuery>,
}

impl HttpState {
    /// Wrap each repository in its resource service.
    pub fn new(ports: HttpStatePorts) -> Self {
        Self {
            states: ResourceService::new(ports.states),
            cities: ResourceService::new(ports.cities),
            temperatures: ResourceService::new(ports.temperatures),
            aggregates: ports.aggregates,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
