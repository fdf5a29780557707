use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::io::Write;

use crate::api::client::SearchWindow;
use crate::api::{MandrillClient, Transport};
use crate::domain::lists::ListMutation;
use crate::render::views::{detail_table, permit_table, reject_table, search_table};

/// Everything the command line can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search {
        query: String,
        days: u32,
    },
    Info {
        id: String,
    },
    RejectAdd {
        emails: Vec<String>,
        subaccount: Option<String>,
    },
    RejectRemove {
        emails: Vec<String>,
        subaccount: Option<String>,
    },
    RejectList {
        subaccount: Option<String>,
    },
    PermitAdd {
        emails: Vec<String>,
    },
    PermitRemove {
        emails: Vec<String>,
    },
    PermitList {
        subaccount: Option<String>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Search { .. } => "search",
            Action::Info { .. } => "info",
            Action::RejectAdd { .. } => "reject_add",
            Action::RejectRemove { .. } => "reject_remove",
            Action::RejectList { .. } => "reject_list",
            Action::PermitAdd { .. } => "permit_add",
            Action::PermitRemove { .. } => "permit_remove",
            Action::PermitList { .. } => "permit_list",
        }
    }
}

/// Invocation-wide inputs that are not part of the action itself.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    pub table_width: usize,
    pub today: NaiveDate,
}

impl RunContext {
    pub fn now(table_width: usize) -> Self {
        Self {
            table_width,
            today: Local::now().date_naive(),
        }
    }
}

pub fn run<T: Transport>(
    action: &Action,
    client: &MandrillClient<T>,
    ctx: RunContext,
    out: &mut impl Write,
) -> Result<()> {
    info!("running {}", action.name());

    match action {
        Action::Search { query, days } => {
            let window = SearchWindow::ending_on(ctx.today, *days);
            let messages = client
                .search(query, window)
                .with_context(|| format!("Search for '{query}' failed"))?;
            writeln!(out, "{}", search_table(&messages))?;
        }
        Action::Info { id } => {
            let detail = client
                .message_detail(id)
                .with_context(|| format!("Could not load message '{id}'"))?;
            writeln!(out, "{}", detail_table(&detail, ctx.table_width))?;
        }
        Action::RejectAdd { emails, subaccount } => {
            for_each_address(emails, &ADD_REJECT, out, |e| {
                client.reject_add(e, subaccount.as_deref())
            })?;
        }
        Action::RejectRemove { emails, subaccount } => {
            for_each_address(emails, &REMOVE_REJECT, out, |e| {
                client.reject_remove(e, subaccount.as_deref())
            })?;
        }
        Action::RejectList { subaccount } => {
            let entries = client
                .reject_list(subaccount.as_deref())
                .context("Could not list the rejection list")?;
            writeln!(out, "{}", reject_table(&entries))?;
        }
        Action::PermitAdd { emails } => {
            for_each_address(emails, &ADD_PERMIT, out, |e| client.permit_add(e))?;
        }
        Action::PermitRemove { emails } => {
            for_each_address(emails, &REMOVE_PERMIT, out, |e| client.permit_remove(e))?;
        }
        Action::PermitList { subaccount } => {
            let entries = client
                .permit_list(subaccount.as_deref())
                .context("Could not list the permission list")?;
            writeln!(out, "{}", permit_table(&entries))?;
        }
    }

    Ok(())
}

/// Wording of the per-address messages of a batch.
struct BatchWording {
    verb: &'static str,
    past: &'static str,
    preposition: &'static str,
    list: &'static str,
}

const ADD_REJECT: BatchWording = BatchWording {
    verb: "add",
    past: "added",
    preposition: "to",
    list: "rejection list",
};
const REMOVE_REJECT: BatchWording = BatchWording {
    verb: "delete",
    past: "deleted",
    preposition: "from",
    list: "rejection list",
};
const ADD_PERMIT: BatchWording = BatchWording {
    verb: "add",
    past: "added",
    preposition: "to",
    list: "permission list",
};
const REMOVE_PERMIT: BatchWording = BatchWording {
    verb: "delete",
    past: "deleted",
    preposition: "from",
    list: "permission list",
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

/// One request per address, in order. A failed address is reported and skipped.
fn for_each_address<F>(
    emails: &[String],
    wording: &BatchWording,
    out: &mut impl Write,
    mut op: F,
) -> Result<BatchOutcome>
where
    F: FnMut(&str) -> crate::api::error::Result<ListMutation>,
{
    let BatchWording {
        verb,
        past,
        preposition,
        list,
    } = wording;
    let mut outcome = BatchOutcome::default();

    for email in emails {
        match op(email) {
            Ok(_) => {
                writeln!(out, "Email '{email}' {past} {preposition} {list}")?;
                outcome.succeeded += 1;
            }
            Err(e) => {
                warn!("{verb} {email} on {list} failed: {e}");
                writeln!(out, "Failed to {verb} email '{email}' {preposition} {list}")?;
                writeln!(out, "{e}")?;
                outcome.failed += 1;
            }
        }
    }

    info!(
        "{list}: {} succeeded, {} failed",
        outcome.succeeded, outcome.failed
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::api::transport::fake::ScriptedTransport;
    use serde_json::json;

    fn ctx() -> RunContext {
        RunContext {
            table_width: 100,
            today: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        }
    }

    fn run_to_string(
        action: &Action,
        client: &MandrillClient<ScriptedTransport>,
    ) -> (Result<()>, String) {
        let mut out = Vec::new();
        let res = run(action, client, ctx(), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn search_sends_window_and_limit() {
        let t = ScriptedTransport::new().reply(
            200,
            json!([{"_id": "abc", "ts": 1718000000, "subject": "Invoice 7", "email": "a@x.io",
                    "state": "sent", "opens": 0, "clicks": 0}]),
        );
        let client = MandrillClient::new(t, "k");
        let action = Action::Search {
            query: "invoice".into(),
            days: 3,
        };

        let (res, out) = run_to_string(&action, &client);
        res.unwrap();
        assert!(out.contains("Invoice 7"));

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        let payload = &calls[0].1;
        assert_eq!(payload["date_from"], "2024-06-07");
        assert_eq!(payload["date_to"], "2024-06-10");
        assert_eq!(payload["limit"], 100);
    }

    #[test]
    fn info_content_404_skips_info_lookup() {
        let t = ScriptedTransport::new().reply(
            404,
            json!({"status": "error", "code": 11, "name": "Unknown_Message",
                   "message": "No message exists with the id 'zzz'"}),
        );
        let client = MandrillClient::new(t, "k");
        let action = Action::Info { id: "zzz".into() };

        let (res, out) = run_to_string(&action, &client);
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("No message exists with the id 'zzz'"));
        assert!(out.is_empty());

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Endpoint::MessagesContent);
    }

    #[test]
    fn info_second_failure_renders_nothing() {
        let t = ScriptedTransport::new()
            .reply(
                200,
                json!({"_id": "m1", "ts": 0, "to": {"email": "a@x.io"}, "text": "t", "html": "h"}),
            )
            .reply(500, json!({"status": "error", "name": "GeneralError", "message": "boom"}));
        let client = MandrillClient::new(t, "k");

        let (res, out) = run_to_string(&Action::Info { id: "m1".into() }, &client);
        assert!(res.is_err());
        assert!(out.is_empty());
        assert_eq!(client.transport().calls().len(), 2);
    }

    #[test]
    fn batch_continues_after_failure() {
        let t = ScriptedTransport::new()
            .reply(200, json!({"email": "a@x.io", "added": true}))
            .reply(
                500,
                json!({"status": "error", "name": "ValidationError", "message": "bad address"}),
            )
            .reply(200, json!({"email": "c@x.io", "added": true}));
        let client = MandrillClient::new(t, "k");
        let action = Action::RejectAdd {
            emails: vec!["a@x.io".into(), "nope".into(), "c@x.io".into()],
            subaccount: Some("acme".into()),
        };

        let (res, out) = run_to_string(&action, &client);
        res.unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 3);
        for (call, email) in calls.iter().zip(["a@x.io", "nope", "c@x.io"]) {
            assert_eq!(call.0, Endpoint::RejectsAdd);
            assert_eq!(call.1, json!({"key": "k", "email": email, "subaccount": "acme"}));
        }

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Email 'a@x.io' added to rejection list");
        assert_eq!(lines[1], "Failed to add email 'nope' to rejection list");
        assert!(lines[2].contains("bad address"));
        assert_eq!(lines[3], "Email 'c@x.io' added to rejection list");
    }

    #[test]
    fn transport_failure_in_batch_is_reported() {
        // second address has no scripted reply, which the fake reports as a transport error
        let t = ScriptedTransport::new().reply(200, json!({"email": "a@x.io", "deleted": true}));
        let client = MandrillClient::new(t, "k");
        let action = Action::PermitRemove {
            emails: vec!["a@x.io".into(), "b@x.io".into()],
        };

        let (res, out) = run_to_string(&action, &client);
        res.unwrap();
        assert!(out.contains("Email 'a@x.io' deleted from permission list"));
        assert!(out.contains("Failed to delete email 'b@x.io' from permission list"));
        assert_eq!(client.transport().calls()[1].0, Endpoint::WhitelistDelete);
    }

    #[test]
    fn reject_list_renders_table() {
        let t = ScriptedTransport::new().reply(
            200,
            json!([{"email": "bad@x.io", "reason": "spam", "created_at": "2024-06-01 10:00:00",
                    "last_event_at": "2024-06-01 10:00:00", "expires_at": null,
                    "expired": false, "subaccount": null}]),
        );
        let client = MandrillClient::new(t, "k");

        let (res, out) = run_to_string(&Action::RejectList { subaccount: None }, &client);
        res.unwrap();
        assert!(out.contains("bad@x.io"));
        assert!(out.contains("LastEventOn"));
        assert_eq!(client.transport().calls()[0].1, json!({"key": "k"}));
    }

    #[test]
    fn permit_list_failure_aborts() {
        let t = ScriptedTransport::new().reply(
            500,
            json!({"status": "error", "code": -1, "name": "Invalid_Key", "message": "Invalid API key"}),
        );
        let client = MandrillClient::new(t, "k");

        let action = Action::PermitList {
            subaccount: Some("acme".into()),
        };
        let (res, out) = run_to_string(&action, &client);
        let err = format!("{:#}", res.unwrap_err());
        assert!(err.contains("Invalid_Key (code -1): Invalid API key [HTTP 500]"));
        assert!(out.is_empty());
    }

    #[test]
    fn batch_outcome_counts() {
        let mut out = Vec::new();
        let emails = vec!["a".to_string(), "b".to_string()];
        let outcome = for_each_address(&emails, &ADD_PERMIT, &mut out, |e| {
            if e == "a" {
                Ok(ListMutation {
                    email: e.into(),
                    changed: true,
                })
            } else {
                Err(crate::api::ApiError::Transport {
                    path: "whitelist/add.json",
                    source: "connection refused".into(),
                })
            }
        })
        .unwrap();
        assert_eq!(
            outcome,
            BatchOutcome {
                succeeded: 1,
                failed: 1
            }
        );
    }
}
