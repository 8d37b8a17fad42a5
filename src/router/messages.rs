//! Messages exchanged with the content script and the settings popup.
//!
//! Every message is a JSON object tagged by its `method` field.

use serde::{Deserialize, Serialize};

use crate::settings::Configuration;

/// Browser tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(i64);

impl TabId {
    /// Wraps a raw tab id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw tab id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// The tab a port was opened from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Tab identifier.
    pub id: TabId,
    /// Current location of the tab.
    pub url: String,
}

/// Requests received from a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Start a refresh cycle for the port's tab.
    UpdateTab,
    /// The scraped resource name for an in-flight cycle.
    #[serde(rename_all = "camelCase")]
    GetResourceResponse {
        /// Tab the scrape was requested for.
        tab_id: TabId,
        /// Resource display name found on the page.
        resource: String,
    },
    /// Request the current configuration.
    GetConfig,
    /// Replace the configuration.
    SetConfig {
        /// The new configuration document.
        config: Configuration,
    },
}

/// Messages posted back to a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Ask the content script for the resource name shown on the page.
    #[serde(rename_all = "camelCase")]
    GetResource {
        /// Tab to scrape.
        tab_id: TabId,
    },
    /// Links to render in the tab.
    #[serde(rename_all = "camelCase")]
    UpdateLinks {
        /// Tab to render into.
        tab_id: TabId,
        /// Pull request URL followed by links found in its description.
        links: Vec<String>,
    },
    /// The current configuration.
    GetConfigResponse {
        /// Stored configuration.
        config: Configuration,
    },
    /// A `setConfig` request could not be decoded; the edit was discarded.
    ConfigRejected {
        /// Message to show in the settings popup.
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{InboundMessage, OutboundMessage, TabId};
    use crate::settings::Configuration;

    #[test]
    fn inbound_messages_decode_from_method_tags() {
        let update: InboundMessage =
            serde_json::from_value(json!({"method": "updateTab"})).expect("updateTab decodes");
        let response: InboundMessage = serde_json::from_value(json!({
            "method": "getResourceResponse",
            "tabId": 17,
            "resource": "src (heads/main)"
        }))
        .expect("getResourceResponse decodes");

        assert_eq!(update, InboundMessage::UpdateTab);
        assert_eq!(
            response,
            InboundMessage::GetResourceResponse {
                tab_id: TabId::new(17),
                resource: "src (heads/main)".to_owned(),
            }
        );
    }

    #[test]
    fn set_config_accepts_partial_documents() {
        let message: InboundMessage = serde_json::from_value(json!({
            "method": "setConfig",
            "config": { "githubToken": "abc" }
        }))
        .expect("setConfig decodes");

        let InboundMessage::SetConfig { config } = message else {
            panic!("expected SetConfig, got {message:?}");
        };
        assert_eq!(config.credential_token(), Some("abc"));
        assert_eq!(config.link_patterns, Configuration::default().link_patterns);
    }

    #[test]
    fn unknown_methods_are_rejected() {
        let decoded = serde_json::from_value::<InboundMessage>(json!({"method": "reload"}));

        assert!(decoded.is_err());
    }

    #[test]
    fn outbound_links_use_camel_case_fields() {
        let message = OutboundMessage::UpdateLinks {
            tab_id: TabId::new(3),
            links: vec!["https://github.com/acme/app/pull/1".to_owned()],
        };

        assert_eq!(
            serde_json::to_value(&message).expect("should serialise"),
            json!({
                "method": "updateLinks",
                "tabId": 3,
                "links": ["https://github.com/acme/app/pull/1"]
            })
        );
    }
}
