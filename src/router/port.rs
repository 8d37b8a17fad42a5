//! Long-lived channels to the content script and settings popup.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use super::RouterError;
use super::messages::{OutboundMessage, Tab};

/// Identifies one connected port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(u64);

impl PortId {
    /// Wraps a raw port id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw port id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// An outbound message addressed to a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundFrame {
    /// Destination port.
    pub port: PortId,
    /// Message to deliver.
    pub message: OutboundMessage,
}

/// Sending half of a connected port.
///
/// Content-script ports carry the tab they were opened from; the settings
/// popup's port has none.
#[derive(Debug, Clone)]
pub struct Port {
    id: PortId,
    tab: Option<Tab>,
    outbound: UnboundedSender<OutboundFrame>,
}

impl Port {
    /// Creates a port whose messages are queued on `outbound`.
    #[must_use]
    pub const fn new(
        id: PortId,
        tab: Option<Tab>,
        outbound: UnboundedSender<OutboundFrame>,
    ) -> Self {
        Self { id, tab, outbound }
    }

    /// Port identifier.
    #[must_use]
    pub const fn id(&self) -> PortId {
        self.id
    }

    /// The tab that opened the port, if any.
    #[must_use]
    pub const fn tab(&self) -> Option<&Tab> {
        self.tab.as_ref()
    }

    /// Queues `message` for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PortClosed`] when the receiving side is gone.
    pub fn post(&self, message: OutboundMessage) -> Result<(), RouterError> {
        self.outbound
            .send(OutboundFrame {
                port: self.id,
                message,
            })
            .map_err(|_| RouterError::PortClosed { port: self.id })
    }
}
