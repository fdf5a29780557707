use chrono::{Days, NaiveDate};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::error::{ApiError, RemoteError, Result};
use crate::api::transport::{Endpoint, HttpTransport, Transport};
use crate::config::SEARCH_LIMIT;
use crate::domain::lists::{ListMutation, PermitEntry, RejectEntry};
use crate::domain::message::{MessageContent, MessageDetail, MessageInfo, MessageSummary};

/// Inclusive date range searched by `messages/search.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SearchWindow {
    pub fn ending_on(today: NaiveDate, days: u32) -> Self {
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    key: &'a str,
    query: &'a str,
    date_from: String,
    date_to: String,
    limit: u32,
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    key: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct ListRequest<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subaccount: Option<&'a str>,
}

pub struct MandrillClient<T = HttpTransport> {
    transport: T,
    key: String,
}

impl<T: Transport> MandrillClient<T> {
    pub fn new(transport: T, key: impl Into<String>) -> Self {
        Self {
            transport,
            key: key.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call<P, R>(&self, endpoint: Endpoint, payload: &P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let path = endpoint.path();
        let body =
            serde_json::to_value(payload).map_err(|source| ApiError::Encode { path, source })?;

        let reply = self.transport.post(endpoint, &body)?;
        debug!("{path} -> HTTP {}", reply.status);

        if reply.status != 200 {
            return Err(ApiError::Remote(RemoteError {
                status: reply.status,
                body: reply.body,
            }));
        }

        serde_json::from_value(reply.body).map_err(|source| ApiError::Decode { path, source })
    }

    fn list_request<'a>(
        &'a self,
        email: Option<&'a str>,
        subaccount: Option<&'a str>,
    ) -> ListRequest<'a> {
        ListRequest {
            key: &self.key,
            email,
            subaccount,
        }
    }

    pub fn search(&self, query: &str, window: SearchWindow) -> Result<Vec<MessageSummary>> {
        let req = SearchRequest {
            key: &self.key,
            query,
            date_from: window.from.format("%Y-%m-%d").to_string(),
            date_to: window.to.format("%Y-%m-%d").to_string(),
            limit: SEARCH_LIMIT,
        };
        self.call(Endpoint::MessagesSearch, &req)
    }

    pub fn message_content(&self, id: &str) -> Result<MessageContent> {
        let req = MessageRequest { key: &self.key, id };
        self.call(Endpoint::MessagesContent, &req)
    }

    pub fn message_info(&self, id: &str) -> Result<MessageInfo> {
        let req = MessageRequest { key: &self.key, id };
        self.call(Endpoint::MessagesInfo, &req)
    }

    /// Content lookup followed by info lookup; the second call is skipped if the first fails.
    pub fn message_detail(&self, id: &str) -> Result<MessageDetail> {
        let content = self.message_content(id)?;
        let info = self.message_info(id)?;
        Ok(MessageDetail { content, info })
    }

    pub fn reject_add(&self, email: &str, subaccount: Option<&str>) -> Result<ListMutation> {
        let req = self.list_request(Some(email), subaccount);
        self.call(Endpoint::RejectsAdd, &req)
    }

    pub fn reject_remove(&self, email: &str, subaccount: Option<&str>) -> Result<ListMutation> {
        let req = self.list_request(Some(email), subaccount);
        self.call(Endpoint::RejectsDelete, &req)
    }

    pub fn reject_list(&self, subaccount: Option<&str>) -> Result<Vec<RejectEntry>> {
        let req = self.list_request(None, subaccount);
        self.call(Endpoint::RejectsList, &req)
    }

    pub fn permit_add(&self, email: &str) -> Result<ListMutation> {
        let req = self.list_request(Some(email), None);
        self.call(Endpoint::WhitelistAdd, &req)
    }

    pub fn permit_remove(&self, email: &str) -> Result<ListMutation> {
        let req = self.list_request(Some(email), None);
        self.call(Endpoint::WhitelistDelete, &req)
    }

    pub fn permit_list(&self, subaccount: Option<&str>) -> Result<Vec<PermitEntry>> {
        let req = self.list_request(None, subaccount);
        self.call(Endpoint::WhitelistList, &req)
    }
}
