//! Native host linking Transifex editor pages to their GitHub pull requests.
//!
//! A browser extension forwards port messages to this host over stdio. For a
//! Transifex editor tab the host decodes the branch from the resource name,
//! finds the pull request whose head is that branch, and replies with the
//! pull request URL plus any issue-tracker links found in its description.

pub mod config;
pub mod github;
pub mod host;
pub mod links;
pub mod persistence;
pub mod router;
pub mod settings;
pub mod telemetry;
pub mod transifex;

pub use config::HostConfig;
pub use github::{
    GitHubError, NoMatchPolicy, OctocrabGateway, PullRequestCache, PullRequestGateway,
    PullRequestRecord, PullRequestResolver,
};
pub use host::{HostError, build_router, serve};
pub use links::{LinkSet, extract_links};
pub use persistence::{KeyValueStore, MemoryKeyValueStore, PersistenceError, SqliteKeyValueStore};
pub use router::{InboundMessage, MessageRouter, OutboundMessage, Port, PortId, Tab, TabId};
pub use settings::{ConfigStore, Configuration, SettingsError};
pub use transifex::{BranchIdentifier, RouteDescriptor, branch_from_resource, route};
