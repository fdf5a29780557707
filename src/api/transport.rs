use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::api::error::{ApiError, Result};

/// Fixed endpoint paths, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    MessagesSearch,
    MessagesContent,
    MessagesInfo,
    RejectsAdd,
    RejectsDelete,
    RejectsList,
    WhitelistAdd,
    WhitelistDelete,
    WhitelistList,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::MessagesSearch => "messages/search.json",
            Endpoint::MessagesContent => "messages/content.json",
            Endpoint::MessagesInfo => "messages/info.json",
            Endpoint::RejectsAdd => "rejects/add.json",
            Endpoint::RejectsDelete => "rejects/delete.json",
            Endpoint::RejectsList => "rejects/list.json",
            Endpoint::WhitelistAdd => "whitelist/add.json",
            Endpoint::WhitelistDelete => "whitelist/delete.json",
            Endpoint::WhitelistList => "whitelist/list.json",
        }
    }
}

/// Status code plus decoded body of one exchange.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

pub trait Transport {
    /// Send one JSON POST. Exactly one attempt; non-200 statuses are not errors here.
    fn post(&self, endpoint: Endpoint, payload: &Value) -> Result<Reply>;
}

pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mandrill-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: Endpoint, payload: &Value) -> Result<Reply> {
        let path = endpoint.path();
        let transport_err = |e: Box<dyn std::error::Error + Send + Sync>| ApiError::Transport {
            path,
            source: e,
        };

        let url = self
            .base_url
            .join(path)
            .map_err(|e| transport_err(e.into()))?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(payload)
            .send()
            .map_err(|e| transport_err(e.into()))?;

        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| transport_err(e.into()))?;
        // error pages are not always JSON
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(Reply { status, body })
    }
}
