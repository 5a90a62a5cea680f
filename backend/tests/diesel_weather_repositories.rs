//! Integration tests for the Diesel adapters against embedded PostgreSQL.
//!
//! Opt-in: run with `RUN_PG_EMBEDDED=1 cargo test -- --ignored`. Each test
//! provisions its own migrated database and keeps a dedicated Tokio runtime so
//! the synchronous cluster bootstrap never runs inside an async context.

use chrono::NaiveDate;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use weather::domain::ports::{AggregateQuery, ResourceRepository, ResourceRepositoryError};
use weather::domain::{
    City, CityChange, CityId, ErrorCode, NewCity, NewState, NewTemperature, ResourceKind, State,
    StateChange, Temperature, TemperatureChange, TemperatureId, translate_repository_error,
};
use weather::outbound::persistence::{
    DbPool, DieselAggregateQuery, DieselCityRepository, DieselStateRepository,
    DieselTemperatureRepository, PoolConfig,
};

mod support;

use support::cluster_skip::embedded_postgres_enabled;
use support::{drop_table, handle_cluster_setup_failure, provision_database};

struct Adapters {
    runtime: Runtime,
    states: DieselStateRepository,
    cities: DieselCityRepository,
    temperatures: DieselTemperatureRepository,
    aggregates: DieselAggregateQuery,
    database_url: String,
    _database: TemporaryDatabase,
}

impl Adapters {
    fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    fn seed_state(&self, abbrev: &str, name: &str) {
        self.block_on(ResourceRepository::<State>::insert(
            &self.states,
            &NewState {
                abbrev: abbrev.to_owned(),
                name: name.to_owned(),
            },
        ))
        .expect("state inserted");
    }

    fn seed_city(&self, state_abbrev: &str, name: &str, climate: &str) -> CityId {
        self.block_on(ResourceRepository::<City>::insert(
            &self.cities,
            &NewCity {
                state_abbrev: state_abbrev.to_owned(),
                name: name.to_owned(),
                climate: climate.to_owned(),
            },
        ))
        .expect("city inserted")
    }

    fn insert_reading(
        &self,
        city_id: CityId,
        temperature: i32,
        day: u32,
    ) -> Result<TemperatureId, ResourceRepositoryError> {
        self.block_on(ResourceRepository::<Temperature>::insert(
            &self.temperatures,
            &NewTemperature {
                city_id,
                temperature,
                date: date(day),
            },
        ))
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

fn setup_adapters() -> Result<Adapters, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database()?;
    let database_url = database.url().to_owned();
    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(Adapters {
        runtime,
        states: DieselStateRepository::new(pool.clone()),
        cities: DieselCityRepository::new(pool.clone()),
        temperatures: DieselTemperatureRepository::new(pool.clone()),
        aggregates: DieselAggregateQuery::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn adapters() -> Option<Adapters> {
    if !embedded_postgres_enabled() {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match setup_adapters() {
        Ok(adapters) => Some(adapters),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn state_round_trip_and_rename(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("CA", "California");

    let found = db
        .block_on(db.states.find_by_key(&"CA".to_owned()))
        .expect("lookup succeeds");
    assert_eq!(found, Some(State::new("CA", "California")));

    let renamed = db
        .block_on(
            db.states
                .update_field(&"CA".to_owned(), &StateChange::Name("Alta California".into())),
        )
        .expect("update succeeds");
    assert_eq!(renamed, Some("CA".to_owned()));

    let missing = db
        .block_on(
            db.states
                .update_field(&"ZZ".to_owned(), &StateChange::Name("Nowhere".into())),
        )
        .expect("update succeeds");
    assert_eq!(missing, None);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn duplicate_state_reports_primary_key(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("CA", "California");

    let err = db
        .block_on(ResourceRepository::<State>::insert(
            &db.states,
            &NewState {
                abbrev: "CA".to_owned(),
                name: "Again".to_owned(),
            },
        ))
        .expect_err("duplicate rejected");

    assert_eq!(err, ResourceRepositoryError::constraint_violation("states_pkey"));
    let translated = translate_repository_error(ResourceKind::State, err);
    assert_eq!(translated.message(), "This state already exists");
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn city_constraints_are_named(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    db.seed_city("TX", "Austin", "humid");

    let duplicate = db
        .block_on(ResourceRepository::<City>::insert(
            &db.cities,
            &NewCity {
                state_abbrev: "TX".to_owned(),
                name: "Austin".to_owned(),
                climate: "arid".to_owned(),
            },
        ))
        .expect_err("duplicate rejected");
    assert_eq!(
        duplicate,
        ResourceRepositoryError::constraint_violation("cities_state_name")
    );

    let orphan = db
        .block_on(ResourceRepository::<City>::insert(
            &db.cities,
            &NewCity {
                state_abbrev: "ZZ".to_owned(),
                name: "Nowhere".to_owned(),
                climate: "arid".to_owned(),
            },
        ))
        .expect_err("unknown state rejected");
    assert_eq!(
        orphan,
        ResourceRepositoryError::constraint_violation("cities_state_abbrev_fkey")
    );
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn city_change_touches_one_column(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    let id = db.seed_city("TX", "Houston", "humid");

    db.block_on(
        db.cities
            .update_field(&id, &CityChange::Climate("arid".to_owned())),
    )
    .expect("update succeeds");

    let city = db
        .block_on(db.cities.find_by_key(&id))
        .expect("lookup succeeds")
        .expect("city present");
    assert_eq!(city, City::new(id, "TX", "Houston", "arid"));
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn readings_round_trip_and_reject_duplicate_dates(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    let city = db.seed_city("TX", "Austin", "humid");

    let id = db.insert_reading(city, 72, 1).expect("reading inserted");
    let stored = db
        .block_on(db.temperatures.find_by_key(&id))
        .expect("lookup succeeds")
        .expect("reading present");
    assert_eq!(stored, Temperature::new(id, city, 72, date(1)));

    let duplicate = db.insert_reading(city, 80, 1).expect_err("duplicate date");
    assert_eq!(duplicate, ResourceRepositoryError::constraint_violation("city_date"));

    let orphan = db
        .insert_reading(CityId::new(9999), 80, 2)
        .expect_err("unknown city");
    assert_eq!(
        orphan,
        ResourceRepositoryError::constraint_violation("temperatures_city_id_fkey")
    );

    db.block_on(
        db.temperatures
            .update_field(&id, &TemperatureChange::Temperature(75)),
    )
    .expect("update succeeds");
    let updated = db
        .block_on(db.temperatures.find_by_key(&id))
        .expect("lookup succeeds")
        .expect("reading present");
    assert_eq!(updated.temperature(), 75);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn aggregates_average_and_list(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    let austin = db.seed_city("TX", "Austin", "humid");
    let el_paso = db.seed_city("TX", "El Paso", "arid");
    db.insert_reading(austin, 70, 1).expect("reading inserted");
    db.insert_reading(austin, 75, 2).expect("reading inserted");
    db.insert_reading(el_paso, 90, 1).expect("reading inserted");

    let city = db
        .block_on(db.aggregates.average_temperature_for_city(austin))
        .expect("average succeeds")
        .expect("readings exist");
    assert_eq!(city.name, "Austin");
    assert!((city.average - 72.5).abs() < f64::EPSILON);

    let arid = db
        .block_on(db.aggregates.average_temperature_for_climate("arid"))
        .expect("average succeeds")
        .expect("readings exist");
    assert!((arid.average - 90.0).abs() < f64::EPSILON);

    let polar = db
        .block_on(db.aggregates.average_temperature_for_climate("polar"))
        .expect("average succeeds");
    assert_eq!(polar, None);

    let listing = db
        .block_on(db.aggregates.list_cities())
        .expect("listing succeeds");
    assert_eq!(listing.len(), 2);
    assert!(listing.iter().all(|row| row.state == "Texas"));
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn city_without_readings_has_no_average(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    let id = db.seed_city("TX", "Austin", "humid");

    let average = db
        .block_on(db.aggregates.average_temperature_for_city(id))
        .expect("average succeeds");

    assert_eq!(average, None);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn deleting_a_state_cascades(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    db.seed_state("TX", "Texas");
    let city = db.seed_city("TX", "Austin", "humid");
    db.insert_reading(city, 70, 1).expect("reading inserted");

    db.block_on(ResourceRepository::<State>::delete(&db.states, &"TX".to_owned()))
        .expect("delete succeeds");

    let cities = db
        .block_on(ResourceRepository::<City>::list(&db.cities))
        .expect("list succeeds");
    let readings = db
        .block_on(ResourceRepository::<Temperature>::list(&db.temperatures))
        .expect("list succeeds");
    assert!(cities.is_empty());
    assert!(readings.is_empty());
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn missing_table_is_a_query_failure(adapters: Option<Adapters>) {
    let Some(db) = adapters else { return };
    drop_table(&db.database_url, "temperatures").expect("drop succeeds");

    let err = db
        .block_on(ResourceRepository::<Temperature>::list(&db.temperatures))
        .expect_err("table is gone");
    assert!(matches!(err, ResourceRepositoryError::Query { .. }));

    let aggregate = db
        .block_on(db.aggregates.average_temperature_for_climate("arid"))
        .expect_err("table is gone");
    assert_eq!(aggregate.code(), ErrorCode::InternalError);
}
