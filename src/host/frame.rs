//! Line-delimited JSON framing for the stdio transport.

use serde::Deserialize;
use serde_json::Value;

use crate::router::{InboundMessage, OutboundFrame, OutboundMessage, PortId, Tab};
use crate::settings::Configuration;

/// An inbound line before its message is decoded.
#[derive(Debug, Deserialize)]
struct RawFrame {
    port: PortId,
    #[serde(default)]
    tab: Option<Tab>,
    message: Value,
}

/// Result of decoding one inbound line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Decoded {
    /// A message for the router.
    Message {
        port: PortId,
        tab: Option<Tab>,
        message: InboundMessage,
    },
    /// A reply the host sends without involving the router.
    Reply(OutboundFrame),
    /// The line is unusable.
    Skip { reason: String },
}

/// Decodes one line of input.
///
/// A `setConfig` payload goes through [`Configuration`]'s parsers so editor
/// mistakes are answered with `configRejected` carrying the same message the
/// settings popup shows for them.
#[must_use]
pub(crate) fn decode_line(line: &str) -> Decoded {
    let RawFrame {
        port,
        tab,
        mut message,
    } = match serde_json::from_str::<RawFrame>(line) {
        Ok(raw) => raw,
        Err(error) => {
            return Decoded::Skip {
                reason: error.to_string(),
            };
        }
    };

    if message.get("method").and_then(Value::as_str) == Some("setConfig") {
        return decode_set_config(port, tab, &mut message);
    }

    match serde_json::from_value::<InboundMessage>(message) {
        Ok(inbound) => Decoded::Message {
            port,
            tab,
            message: inbound,
        },
        Err(error) => Decoded::Skip {
            reason: error.to_string(),
        },
    }
}

/// The editor may post its document either parsed or as the raw text.
fn decode_set_config(port: PortId, tab: Option<Tab>, message: &mut Value) -> Decoded {
    let payload = message.get_mut("config").map_or(Value::Null, Value::take);
    let parsed = match payload {
        Value::String(text) => Configuration::from_json_text(&text),
        other => Configuration::from_json_value(other),
    };

    match parsed {
        Ok(config) => Decoded::Message {
            port,
            tab,
            message: InboundMessage::SetConfig { config },
        },
        Err(error) => {
            tracing::debug!(%error, "rejecting configuration edit");
            Decoded::Reply(OutboundFrame {
                port,
                message: OutboundMessage::ConfigRejected {
                    error: error.to_string(),
                },
            })
        }
    }
}

/// Renders an outbound frame as one line, newline included.
pub(crate) fn encode_frame(frame: &OutboundFrame) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(frame)?;
    line.push('\n');
    Ok(line)
}
