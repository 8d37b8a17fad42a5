//! Given steps for tab refresh behavioural tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use rstest_bdd_macros::given;
use serde_json::json;
use txlinks::github::models::test_support::pull_request_json;
use txlinks::telemetry::NoopTelemetrySink;
use txlinks::{Configuration, HostConfig, OctocrabGateway, build_router};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::link_cycle_bdd_state::{CycleState, PULLS_PATH, ensure_runtime_and_server, unquote};

fn mount(cycle_state: &CycleState, mock: Mock) {
    let runtime = ensure_runtime_and_server(&cycle_state.runtime, &cycle_state.server)
        .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));

    cycle_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

#[given("a mock GitHub API listing pull request {number:u64} for head {head} with body {body}")]
fn listing_one_pull_request(cycle_state: &CycleState, number: u64, head: String, body: String) {
    let label = unquote(&head);
    let html_url = format!("https://github.com/acme/acme-app/pull/{number}");
    let listing = json!([pull_request_json(number, &html_url, unquote(&body), label)]);

    let mock = Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("head", label))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .named("pull request listing");
    mount(cycle_state, mock);
}

#[given("a mock GitHub API listing no pull requests for head {head}")]
fn listing_no_pull_requests(cycle_state: &CycleState, head: String) {
    let mock = Mock::given(method("GET"))
        .and(path(PULLS_PATH))
        .and(query_param("head", unquote(&head)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .named("empty pull request listing");
    mount(cycle_state, mock);
}

#[given("a mock GitHub API that must not be called")]
fn listing_never_called(cycle_state: &CycleState) {
    let mock = Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .named("unexpected GitHub request");
    mount(cycle_state, mock);
}

fn configure_host(cycle_state: &CycleState, config: &Configuration) {
    let runtime = ensure_runtime_and_server(&cycle_state.runtime, &cycle_state.server)
        .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
    let api_base = cycle_state
        .server
        .with_ref(|server: &MockServer| format!("{}/api/v3", server.uri()))
        .unwrap_or_else(|| panic!("mock server not initialised"));

    let host_config = HostConfig {
        github_api_base: api_base,
        ..HostConfig::default()
    };
    let router = build_router(
        &host_config,
        Arc::new(OctocrabGateway::new()),
        Arc::new(NoopTelemetrySink),
    )
    .unwrap_or_else(|error| panic!("router should build: {error}"));

    runtime
        .block_on(router.settings().set(config))
        .unwrap_or_else(|error| panic!("configuration should store: {error}"));
    cycle_state.router.set(Arc::new(router));
}

#[given("a host configured with token {token} and project alias {project} to {repository}")]
fn host_with_token(cycle_state: &CycleState, token: String, project: String, repository: String) {
    let config = Configuration {
        credential_token: Some(unquote(&token).to_owned()),
        project_aliases: BTreeMap::from([(
            unquote(&project).to_owned(),
            unquote(&repository).to_owned(),
        )]),
        ..Configuration::default()
    };
    configure_host(cycle_state, &config);
}

#[given("a host configured without a token")]
fn host_without_token(cycle_state: &CycleState) {
    configure_host(cycle_state, &Configuration::default());
}
