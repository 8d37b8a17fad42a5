//! Scenario state for tab refresh behavioural tests.

use std::sync::Arc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use txlinks::{MessageRouter, OutboundMessage};
use wiremock::MockServer;

pub(crate) use crate::support::runtime::{SharedRuntime, ensure_runtime_and_server};

/// Path of the pull request listing for `acme/acme-app` on the mock API.
pub(crate) const PULLS_PATH: &str = "/api/v3/repos/acme/acme-app/pulls";

#[derive(ScenarioState, Default)]
pub(crate) struct CycleState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) router: Slot<Arc<MessageRouter>>,
    pub(crate) messages: Slot<Vec<OutboundMessage>>,
}

/// Strips the quotes a feature file puts around string arguments.
pub(crate) fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}
