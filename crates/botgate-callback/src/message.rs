//! Typed payloads for the bot callback channel.
//!
//! Only the pair this bot actually exchanges: the user request the
//! platform delivers, and the streamed reply we send back. Anything else
//! stays `serde_json::Value` territory for the caller.

use serde::{Deserialize, Serialize};

/// Decrypted user request.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub msgid: String,
    #[serde(default)]
    pub aibotid: String,
    #[serde(default)]
    pub chattype: String,
    #[serde(default)]
    pub from: Sender,
    #[serde(default)]
    pub msgtype: String,
    #[serde(default)]
    pub text: TextContent,
    #[serde(default)]
    pub stream: StreamCursor,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub userid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

/// Stream handle echoed by the platform when it polls for the next chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamCursor {
    #[serde(default)]
    pub id: String,
}

/// Streamed reply payload: one content increment, or the closing chunk
/// when `finish` is set.
#[derive(Debug, Clone, Serialize)]
pub struct StreamReply {
    pub msgtype: String,
    pub stream: Stream,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stream {
    pub id: String,
    pub finish: bool,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_item: Option<Vec<MsgItem>>,
}

/// Rich attachment inside a closing stream chunk.
#[derive(Debug, Clone, Serialize)]
pub struct MsgItem {
    pub msgtype: String,
    pub image: Image,
}

#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub base64: String,
    pub md5: String,
}

impl StreamReply {
    pub fn new(id: impl Into<String>, content: impl Into<String>, finish: bool) -> Self {
        Self {
            msgtype: "stream".into(),
            stream: Stream {
                id: id.into(),
                finish,
                content: content.into(),
                msg_item: None,
            },
        }
    }
}
