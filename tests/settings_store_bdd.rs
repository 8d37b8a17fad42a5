//! Behavioural tests for the `SQLite`-backed configuration store.

mod support;

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tempfile::TempDir;
use tokio::runtime::{Builder, Runtime};
use txlinks::persistence::{KeyValueStore, SqliteKeyValueStore, migrate_database};
use txlinks::settings::CONFIG_KEY;
use txlinks::telemetry::NoopTelemetrySink;
use txlinks::{ConfigStore, Configuration, SettingsError};

use support::create_temp_dir;

#[derive(ScenarioState, Default)]
struct StoreState {
    temp_dir: Slot<TempDir>,
    database_url: Slot<String>,
    reads: Slot<Vec<Configuration>>,
    error: Slot<SettingsError>,
}

#[fixture]
fn store_state() -> StoreState {
    StoreState::default()
}

fn runtime() -> Runtime {
    Builder::new_current_thread()
        .build()
        .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"))
}

fn database_url(store_state: &StoreState) -> String {
    store_state
        .database_url
        .get()
        .unwrap_or_else(|| panic!("database URL not initialised"))
}

fn open_store(store_state: &StoreState) -> Arc<dyn KeyValueStore> {
    let store = SqliteKeyValueStore::new(database_url(store_state))
        .unwrap_or_else(|error| panic!("store should open: {error}"));
    Arc::new(store)
}

fn record_reads(store_state: &StoreState, result: Result<Vec<Configuration>, SettingsError>) {
    match result {
        Ok(reads) => store_state.reads.set(reads),
        Err(error) => store_state.error.set(error),
    }
}

// --- Given steps ---

fn temporary_database(store_state: &StoreState, migrate: bool) {
    let temp_dir = create_temp_dir();
    let database_url = temp_dir
        .path()
        .join("txlinks.sqlite")
        .to_string_lossy()
        .into_owned();

    if migrate {
        migrate_database(&database_url, &NoopTelemetrySink)
            .unwrap_or_else(|error| panic!("migrations should run: {error}"));
    }

    store_state.temp_dir.set(temp_dir);
    store_state.database_url.set(database_url);
}

#[given("a temporary database file with migrations applied")]
fn migrated_database(store_state: &StoreState) {
    temporary_database(store_state, true);
}

#[given("a temporary database file without migrations")]
fn unmigrated_database(store_state: &StoreState) {
    temporary_database(store_state, false);
}

// --- When steps ---

#[when("the configuration is read twice")]
fn read_twice(store_state: &StoreState) {
    let settings = ConfigStore::new(open_store(store_state));

    let result = runtime().block_on(async {
        let first = settings.get().await?;
        let second = settings.get().await?;
        Ok::<_, SettingsError>(vec![first, second])
    });
    record_reads(store_state, result);
}

#[when("the configuration is saved with token {token}")]
fn save_with_token(store_state: &StoreState, token: String) {
    let settings = ConfigStore::new(open_store(store_state));
    let config = Configuration {
        credential_token: Some(token.trim_matches('"').to_owned()),
        ..Configuration::default()
    };

    runtime()
        .block_on(settings.set(&config))
        .unwrap_or_else(|error| panic!("configuration should save: {error}"));
}

#[when("the database is reopened and the configuration is read")]
fn reopen_and_read(store_state: &StoreState) {
    let settings = ConfigStore::new(open_store(store_state));

    let result = runtime().block_on(settings.get()).map(|config| vec![config]);
    record_reads(store_state, result);
}

// --- Then steps ---

fn reads(store_state: &StoreState) -> Vec<Configuration> {
    store_state.reads.get().unwrap_or_else(|| {
        let error = store_state.error.get();
        panic!("no configuration was read; last error: {error:?}")
    })
}

#[then("both reads return the default configuration")]
fn both_reads_default(store_state: &StoreState) {
    assert_eq!(
        reads(store_state),
        vec![Configuration::default(), Configuration::default()]
    );
}

#[then("the database holds the configuration document")]
fn database_holds_document(store_state: &StoreState) {
    let store = open_store(store_state);

    let stored = runtime()
        .block_on(store.get(CONFIG_KEY))
        .unwrap_or_else(|error| panic!("stored document should load: {error}"));

    let document: serde_json::Value = serde_json::from_str(
        stored
            .as_deref()
            .unwrap_or_else(|| panic!("no configuration document stored")),
    )
    .unwrap_or_else(|error| panic!("stored document should be JSON: {error}"));
    assert!(document.get("linkRegexes").is_some(), "unexpected document: {document}");
}

#[then("the configuration token is {expected}")]
fn token_is(store_state: &StoreState, expected: String) {
    let configs = reads(store_state);

    assert_eq!(
        configs.first().and_then(Configuration::credential_token),
        Some(expected.trim_matches('"'))
    );
}

#[then("a settings error {expected} is reported")]
fn settings_error_is(store_state: &StoreState, expected: String) {
    let error = store_state
        .error
        .get()
        .unwrap_or_else(|| panic!("expected a settings error"));

    assert_eq!(error.to_string(), expected.trim_matches('"'));
}

// --- Scenarios ---

#[scenario(path = "tests/features/settings_store.feature", index = 0)]
fn fresh_database_defaults(store_state: StoreState) {
    let _ = store_state;
}

#[scenario(path = "tests/features/settings_store.feature", index = 1)]
fn saved_configuration_survives(store_state: StoreState) {
    let _ = store_state;
}

#[scenario(path = "tests/features/settings_store.feature", index = 2)]
fn unmigrated_database_reports_schema(store_state: StoreState) {
    let _ = store_state;
}
