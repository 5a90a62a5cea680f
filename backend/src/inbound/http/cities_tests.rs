//! Tests for city HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::test_app;
use crate::test_support::InMemoryWeatherStore;

#[fixture]
fn store() -> InMemoryWeatherStore {
    let store = InMemoryWeatherStore::new();
    store.seed_state("TX", "Texas");
    store.seed_city("TX", "Austin", "humid");
    store.seed_city("TX", "El Paso", "arid");
    store
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

#[rstest]
#[actix_web::test]
async fn listing_joins_state_names(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::get().uri("/cities").to_request();

    let body: Vec<CityListingBody> = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.len(), 2);
    assert_eq!(
        body[0],
        CityListingBody {
            state: "Texas".to_owned(),
            city: "Austin".to_owned(),
            id: 1
        }
    );
}

#[rstest]
#[actix_web::test]
async fn average_is_null_without_readings(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::get().uri("/cities/1").to_request();

    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn average_covers_every_reading(store: InMemoryWeatherStore) {
    store.seed_temperature(CityId::new(1), 70, date(1));
    store.seed_temperature(CityId::new(1), 75, date(2));
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::get().uri("/cities/1").to_request();

    let body: CityAverageBody = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.name, "Austin");
    assert!((body.average - 72.5).abs() < f64::EPSILON);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_is_a_bad_request(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::get().uri("/cities/abc").to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body["details"]["code"], "invalid_path");
}

#[rstest]
#[case(json!({ "name": "Houston", "climate": "humid" }), "Invalid abbreviation")]
#[case(json!({ "state_abbrev": "TX", "climate": "humid" }), "Invalid name")]
#[case(json!({ "state_abbrev": "TX", "name": "Houston" }), "Invalid climate")]
#[case(json!({ "state_abbrev": "ZZ", "name": "Houston", "climate": "humid" }), "That state does not exist")]
#[case(json!({ "state_abbrev": "TX", "name": "Austin", "climate": "humid" }), "This city already exists")]
#[actix_web::test]
async fn create_rejections(
    store: InMemoryWeatherStore,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::post()
        .uri("/cities")
        .set_json(payload)
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body["message"], message);
    assert_eq!(store.cities().len(), 2);
}

#[rstest]
#[actix_web::test]
async fn update_changes_only_climate(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::put()
        .uri("/cities/1")
        .set_json(json!({ "column": "climate", "change": "arid" }))
        .to_request();

    let body: CityBody = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        CityBody {
            id: 1,
            state_abbrev: "TX".to_owned(),
            name: "Austin".to_owned(),
            climate: "arid".to_owned(),
        }
    );
}

#[rstest]
#[case(json!({ "column": "id", "change": 9 }), StatusCode::BAD_REQUEST, "unknown_field")]
#[case(json!({ "change": "arid" }), StatusCode::BAD_REQUEST, "unknown_field")]
#[case(json!({ "column": "climate" }), StatusCode::BAD_REQUEST, "invalid_request")]
#[actix_web::test]
async fn update_rejections_leave_the_record(
    store: InMemoryWeatherStore,
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::put()
        .uri("/cities/1")
        .set_json(payload)
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), status);
    let body: Value = actix_test::read_body_json(res).await;

    assert_eq!(body["code"], code);
    assert_eq!(store.cities()[0].climate(), "humid");
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_city_is_not_found(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::put()
        .uri("/cities/404")
        .set_json(json!({ "column": "climate", "change": "arid" }))
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!([1, 2, 3]))]
#[case(json!({"column": 5}))]
#[case(json!("climate"))]
#[actix_web::test]
async fn absent_city_update_is_not_found_whatever_the_body(
    store: InMemoryWeatherStore,
    #[case] body: Value,
) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::put()
        .uri("/cities/999")
        .set_json(body)
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn non_string_column_is_an_unknown_field(store: InMemoryWeatherStore) {
    let app = actix_test::init_service(test_app(&store)).await;
    let req = actix_test::TestRequest::put()
        .uri("/cities/1")
        .set_json(json!({"column": 5, "change": "arid"}))
        .to_request();

    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unknown_field");
    assert_eq!(body["details"]["field"], "5");
}
