//! When steps for tab refresh behavioural tests.

use rstest_bdd_macros::when;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use txlinks::router::OutboundFrame;
use txlinks::{InboundMessage, OutboundMessage, Port, PortId, Tab, TabId};

use crate::link_cycle_bdd_state::{CycleState, unquote};

fn drain(receiver: &mut UnboundedReceiver<OutboundFrame>, into: &mut Vec<OutboundMessage>) {
    while let Ok(frame) = receiver.try_recv() {
        into.push(frame.message);
    }
}

#[when("tab {tab:i64} at {url} refreshes with resource {resource}")]
fn refresh_tab(cycle_state: &CycleState, tab: i64, url: String, resource: String) {
    let runtime = cycle_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised"));
    let router = cycle_state
        .router
        .get()
        .unwrap_or_else(|| panic!("host not configured"));
    let tab_id = TabId::new(tab);

    let messages = runtime.block_on(async {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let port = Port::new(
            PortId::new(1),
            Some(Tab {
                id: tab_id,
                url: unquote(&url).to_owned(),
            }),
            sender,
        );
        let mut messages = Vec::new();

        router.dispatch(&port, InboundMessage::UpdateTab).await;
        drain(&mut receiver, &mut messages);

        if messages.contains(&OutboundMessage::GetResource { tab_id }) {
            let response = InboundMessage::GetResourceResponse {
                tab_id,
                resource: unquote(&resource).to_owned(),
            };
            router.dispatch(&port, response).await;
            drain(&mut receiver, &mut messages);
        }
        messages
    });

    cycle_state.messages.set(messages);
}
