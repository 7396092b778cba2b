//! Raw message envelopes as delivered by the mailbox API

use serde::{Deserialize, Serialize};

/// A mailbox message in `full` or `raw` format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    pub id: Option<String>,
    pub thread_id: Option<String>,
    pub payload: Option<MessagePart>,

    /// Whole RFC 822 message, base64url encoded (`raw` format only)
    pub raw: Option<String>,
}

/// One node of the MIME tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub headers: Vec<RawHeader>,

    pub body: Option<PartBody>,

    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

impl MessagePart {
    /// Encoded body data, if this part carries any
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.data.as_deref())
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartBody {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHeader {
    pub name: String,
    #[serde(default)]
    pub value: String,
}
