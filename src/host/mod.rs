//! Native messaging host speaking line-delimited JSON over stdio.
//!
//! Each inbound line names the port it arrived on, the tab that port belongs
//! to, and one router message. Every line is dispatched on its own task so
//! refresh cycles for different tabs interleave. Replies are written by a
//! single writer in the order they are posted.

mod error;
mod frame;

pub use error::HostError;

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

use crate::config::HostConfig;
use crate::github::{PullRequestCache, PullRequestGateway, PullRequestResolver};
use crate::persistence::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, is_in_memory_url, migrate_database,
};
use crate::router::{MessageRouter, OutboundFrame, Port};
use crate::settings::ConfigStore;
use crate::telemetry::TelemetrySink;

use frame::{Decoded, decode_line, encode_frame};

/// Builds a router from host configuration.
///
/// With a `database_url` the database is migrated and both the configuration
/// document and the pull request cache live there. Without one, or with
/// `:memory:`, they live in process memory.
///
/// # Errors
///
/// Returns [`HostError`] when the API base is invalid or the database cannot
/// be migrated.
pub fn build_router(
    config: &HostConfig,
    gateway: Arc<dyn PullRequestGateway>,
    telemetry: Arc<dyn TelemetrySink>,
) -> Result<MessageRouter, HostError> {
    let api_base = config.api_base()?;
    let store: Arc<dyn KeyValueStore> = match config.require_database_url() {
        Ok(database_url) if is_in_memory_url(database_url) => {
            tracing::info!("in-memory database requested; settings will not persist");
            Arc::new(MemoryKeyValueStore::default())
        }
        Ok(database_url) => {
            migrate_database(database_url, telemetry.as_ref())?;
            Arc::new(SqliteKeyValueStore::new(database_url)?)
        }
        Err(_) => {
            tracing::info!("no database configured; settings will not persist");
            Arc::new(MemoryKeyValueStore::default())
        }
    };

    let resolver =
        PullRequestResolver::new(gateway, PullRequestCache::new(Arc::clone(&store)), api_base)
            .with_no_match_policy(config.no_match_policy())
            .with_telemetry(telemetry);
    Ok(MessageRouter::new(ConfigStore::new(store), resolver))
}

/// Serves frames from `input` until EOF, writing replies to `output`.
///
/// Returns once every in-flight message has been handled and its replies
/// written.
///
/// # Errors
///
/// Returns [`HostError::Io`] when reading or writing fails.
pub async fn serve<R, W>(input: R, output: W, router: Arc<MessageRouter>) -> Result<(), HostError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let (read_result, write_result) = tokio::join!(
        read_frames(input, sender, router),
        write_frames(output, receiver)
    );
    read_result?;
    write_result
}

async fn read_frames<R>(
    input: R,
    sender: UnboundedSender<OutboundFrame>,
    router: Arc<MessageRouter>,
) -> Result<(), HostError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    let outcome = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(error) => break Err(HostError::from(error)),
        };
        if line.trim().is_empty() {
            continue;
        }

        match decode_line(&line) {
            Decoded::Message {
                port: port_id,
                tab,
                message,
            } => {
                let port = Port::new(port_id, tab, sender.clone());
                let task_router = Arc::clone(&router);
                in_flight.spawn(async move { task_router.dispatch(&port, message).await });
            }
            Decoded::Reply(frame) => {
                tracing::warn!(port = frame.port.get(), "rejected undecodable configuration");
                if sender.send(frame).is_err() {
                    tracing::warn!("reply writer stopped");
                }
            }
            Decoded::Skip { reason } => {
                tracing::warn!(%reason, "skipping malformed frame");
            }
        }
    };

    drop(sender);
    while let Some(joined) = in_flight.join_next().await {
        if let Err(error) = joined {
            tracing::warn!(%error, "message task failed");
        }
    }
    outcome
}

async fn write_frames<W>(
    mut output: W,
    mut receiver: UnboundedReceiver<OutboundFrame>,
) -> Result<(), HostError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = receiver.recv().await {
        let line = match encode_frame(&frame) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "dropping unencodable reply");
                continue;
            }
        };
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}
