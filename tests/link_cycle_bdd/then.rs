//! Then steps for tab refresh behavioural tests.

use rstest_bdd_macros::then;
use txlinks::OutboundMessage;
use wiremock::MockServer;

use crate::link_cycle_bdd_state::{CycleState, unquote};

fn messages(cycle_state: &CycleState) -> Vec<OutboundMessage> {
    cycle_state
        .messages
        .get()
        .unwrap_or_else(|| panic!("no refresh was run"))
}

fn posted_links(cycle_state: &CycleState) -> Vec<String> {
    messages(cycle_state)
        .into_iter()
        .find_map(|message| match message {
            OutboundMessage::UpdateLinks { links, .. } => Some(links),
            _ => None,
        })
        .unwrap_or_else(|| panic!("the tab received no updateLinks message"))
}

#[then("the tab is asked for its resource")]
fn asked_for_resource(cycle_state: &CycleState) {
    assert!(
        messages(cycle_state)
            .iter()
            .any(|message| matches!(message, OutboundMessage::GetResource { .. })),
        "expected a getResource request"
    );
}

#[then("the tab receives links {first} and {second}")]
fn receives_links(cycle_state: &CycleState, first: String, second: String) {
    assert_eq!(
        posted_links(cycle_state),
        vec![unquote(&first).to_owned(), unquote(&second).to_owned()]
    );
}

#[then("the tab receives no links")]
fn receives_no_links(cycle_state: &CycleState) {
    assert!(posted_links(cycle_state).is_empty(), "expected an empty link list");
}

#[then("the tab receives no messages")]
fn receives_nothing(cycle_state: &CycleState) {
    assert!(messages(cycle_state).is_empty(), "expected no replies");
}

#[then("the GitHub API mocks are satisfied")]
fn verify_mocks(cycle_state: &CycleState) {
    let runtime = cycle_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised"));

    cycle_state
        .server
        .with_ref(|server: &MockServer| runtime.block_on(server.verify()))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}
