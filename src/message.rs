use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver as Receiver};

use crate::constants::{HOST_SOURCE, SETTINGS_UPDATE_TYPE};
use crate::settings::SettingsUpdate;

/// Messages the host sends to the widget, f.e.:
/// `{ "type": "SETTINGS_UPDATE", "source": "MyWallpaperHost", "settings": { "city": "Lyon" } }`
#[derive(Debug, PartialEq)]
pub enum HostMessage {
    /// Some or all settings have changed.
    SettingsUpdate(SettingsUpdate),
}

/// Possible reasons a host message is not handled.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("not a valid host message")]
    ParseError(#[from] serde_json::Error),

    #[error("ignoring message of type '{0}'")]
    UnknownType(String),

    #[error("ignoring message from source '{0}'")]
    UnknownSource(String),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    msg_type: String,

    #[serde(default)]
    source: Option<String>,

    #[serde(default)]
    settings: Value,
}

impl HostMessage {
    /// Parse a host message from its JSON representation.
    pub fn from_json(json_str: &str) -> Result<HostMessage, MessageError> {
        let envelope: Envelope = serde_json::from_str(json_str)?;

        let source = envelope.source.unwrap_or_default();
        if source != HOST_SOURCE {
            return Err(MessageError::UnknownSource(source));
        }

        match envelope.msg_type.as_str() {
            SETTINGS_UPDATE_TYPE => Ok(HostMessage::SettingsUpdate(SettingsUpdate::from_json(
                &envelope.settings,
            ))),
            _ => Err(MessageError::UnknownType(envelope.msg_type)),
        }
    }
}

/// Spawns a task that reads host messages from the given reader, one JSON
/// object per line, and forwards every non-empty line.
///
/// The receiver is closed once the reader reaches EOF or fails.
pub fn forward_lines<R>(reader: R) -> Receiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (msg_out, msg_in) = unbounded_channel();
    let _ = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if msg_out.send(line).is_err() {
                        log::debug!("msg receiver dropped");
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    log::error!("failed to read host message: {}", e);
                    return;
                }
            }
        }
    });
    msg_in
}
