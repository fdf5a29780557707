use serde::Deserialize;
use std::fmt;

pub type MessageId = String;

/// Delivery state reported for a sent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageState {
    Sent,
    Bounced,
    Rejected,
    SoftBounced,
    Deferred,
    Queued,
    Spam,
    Unsub,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageState::Sent => "sent",
            MessageState::Bounced => "bounced",
            MessageState::Rejected => "rejected",
            MessageState::SoftBounced => "soft-bounced",
            MessageState::Deferred => "deferred",
            MessageState::Queued => "queued",
            MessageState::Spam => "spam",
            MessageState::Unsub => "unsub",
            MessageState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One item of a `messages/search.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSummary {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub ts: i64,
    #[serde(default)]
    pub subject: Option<String>,
    pub email: String,
    pub state: MessageState,
    #[serde(default)]
    pub opens: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recipient {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Rendered message as returned by `messages/content.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub ts: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub from_name: Option<String>,
    pub to: Recipient,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpEvent {
    pub ts: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub diag: Option<String>,
}

/// Delivery detail as returned by `messages/info.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageInfo {
    #[serde(rename = "_id")]
    pub id: MessageId,
    pub ts: i64,
    pub state: MessageState,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub opens: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub smtp_events: Vec<SmtpEvent>,
}

/// Content and delivery info for one message; only built once both lookups succeeded.
#[derive(Debug, Clone)]
pub struct MessageDetail {
    pub content: MessageContent,
    pub info: MessageInfo,
}
