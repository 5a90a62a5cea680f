//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// States keyed by abbreviation.
    states (abbrev) {
        abbrev -> Text,
        name -> Text,
    }
}

diesel::table! {
    /// Cities; unique per state by name (`cities_state_name`).
    cities (id) {
        id -> Int4,
        state_abbrev -> Text,
        name -> Text,
        climate -> Text,
    }
}

diesel::table! {
    /// Temperature readings; one per city per date (`city_date`).
    temperatures (id) {
        id -> Int4,
        city_id -> Int4,
        temperature -> Int4,
        date -> Date,
    }
}

diesel::joinable!(cities -> states (state_abbrev));
diesel::joinable!(temperatures -> cities (city_id));

diesel::allow_tables_to_appear_in_same_query!(states, cities, temperatures);
