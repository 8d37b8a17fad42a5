//! Message routing between the content script, the settings popup, and the
//! resolution pipeline.
//!
//! A refresh cycle is two round trips. `updateTab` checks the configuration
//! and the tab location, then asks the content script for the resource name
//! it shows. The matching `getResourceResponse` resolves the branch to a pull
//! request and posts the links back. Responses for another tab are dropped,
//! so cycles for different tabs can interleave freely.

mod messages;
mod port;

pub use messages::{InboundMessage, OutboundMessage, Tab, TabId};
pub use port::{OutboundFrame, Port, PortId};

use thiserror::Error;

use crate::github::{GitHubError, PullRequestResolver};
use crate::links::{LinkSet, extend_with_matches};
use crate::settings::{ConfigStore, SettingsError};
use crate::transifex::{branch_from_resource, route};

/// Failures that abort a single routing cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    /// Reading or writing the configuration failed.
    #[error("configuration unavailable: {0}")]
    Settings(#[from] SettingsError),

    /// Pull request resolution failed.
    #[error("pull request lookup failed: {0}")]
    GitHub(#[from] GitHubError),

    /// The port disconnected before the reply was posted.
    #[error("port {} is closed", .port.get())]
    PortClosed {
        /// Port the reply was addressed to.
        port: PortId,
    },
}

/// Dispatches inbound port messages.
pub struct MessageRouter {
    settings: ConfigStore,
    resolver: PullRequestResolver,
}

impl MessageRouter {
    /// Creates a router reading configuration from `settings` and resolving
    /// pull requests with `resolver`.
    #[must_use]
    pub const fn new(settings: ConfigStore, resolver: PullRequestResolver) -> Self {
        Self { settings, resolver }
    }

    /// Borrow the configuration store.
    #[must_use]
    pub const fn settings(&self) -> &ConfigStore {
        &self.settings
    }

    /// Handles `message` and logs any failure instead of returning it.
    ///
    /// A failed cycle posts nothing; the tab keeps whatever links it had.
    pub async fn dispatch(&self, port: &Port, message: InboundMessage) {
        if let Err(error) = self.handle(port, message).await {
            tracing::warn!(port = port.id().get(), %error, "message handling failed");
        }
    }

    /// Handles `message` received on `port`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when configuration, resolution, or posting the
    /// reply fails.
    pub async fn handle(&self, port: &Port, message: InboundMessage) -> Result<(), RouterError> {
        match message {
            InboundMessage::UpdateTab => self.update_tab(port).await,
            InboundMessage::GetResourceResponse { tab_id, resource } => {
                self.resource_response(port, tab_id, &resource).await
            }
            InboundMessage::GetConfig => {
                let config = self.settings.get().await?;
                port.post(OutboundMessage::GetConfigResponse { config })
            }
            InboundMessage::SetConfig { config } => {
                self.settings.set(&config).await?;
                tracing::info!("configuration replaced");
                Ok(())
            }
        }
    }

    async fn update_tab(&self, port: &Port) -> Result<(), RouterError> {
        let Some(tab) = port.tab() else {
            tracing::debug!(port = port.id().get(), "updateTab on a port without a tab");
            return Ok(());
        };

        let config = self.settings.get().await?;
        if config.credential_token().is_none() {
            tracing::info!(
                tab = tab.id.get(),
                "no GitHub token configured; set githubToken in the extension settings"
            );
            return Ok(());
        }

        if route(&tab.url, &config).is_none() {
            tracing::debug!(tab = tab.id.get(), url = %tab.url, "not a Transifex editor location");
            return Ok(());
        }

        port.post(OutboundMessage::GetResource { tab_id: tab.id })
    }

    async fn resource_response(
        &self,
        port: &Port,
        tab_id: TabId,
        resource: &str,
    ) -> Result<(), RouterError> {
        let Some(tab) = port.tab().filter(|tab| tab.id == tab_id) else {
            tracing::debug!(tab = tab_id.get(), "discarding response for another tab");
            return Ok(());
        };

        let config = self.settings.get().await?;
        let Some(descriptor) = route(&tab.url, &config) else {
            tracing::debug!(tab = tab_id.get(), url = %tab.url, "tab left the editor");
            return Ok(());
        };

        let mut links = LinkSet::new();
        if let Some(branch) = branch_from_resource(resource) {
            if let Some(pull_request) = self.resolver.resolve(&descriptor, &branch, &config).await? {
                links.push(pull_request.display_url());
                extend_with_matches(&mut links, pull_request.body_text(), &config.link_patterns);
            }
        } else {
            tracing::debug!(tab = tab_id.get(), resource, "resource name carries no branch");
        }

        tracing::info!(tab = tab_id.get(), links = links.len(), "updating links");
        port.post(OutboundMessage::UpdateLinks {
            tab_id,
            links: links.into_vec(),
        })
    }
}
