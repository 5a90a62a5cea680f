//! Test helpers for inbound HTTP components.

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::middleware::Trace;
use crate::test_support::InMemoryWeatherStore;

use super::configure_resources;

/// App serving every resource endpoint from `store`.
pub fn test_app(
    store: &InMemoryWeatherStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(store.http_state()))
        .wrap(Trace)
        .configure(configure_resources)
}
