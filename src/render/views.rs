//! Tables shown by each action.

use crate::domain::lists::{PermitEntry, RejectEntry};
use crate::domain::message::{MessageDetail, MessageSummary, SmtpEvent};
use crate::render::{Cell, Justify, Table, format_timestamp, reason_color, wrap};

const TEXT_ROW: usize = 5;
const HTML_ROW: usize = 6;

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub fn search_table(messages: &[MessageSummary]) -> Table {
    let mut rows: Vec<Vec<Cell>> = vec![
        ["ID", "Subject", "To", "State", "Opens/Clicks", "Timestamp"]
            .into_iter()
            .map(Cell::from)
            .collect(),
    ];
    for m in messages {
        rows.push(vec![
            m.id.as_str().into(),
            or_empty(&m.subject).into(),
            m.email.as_str().into(),
            m.state.to_string().into(),
            format!("{}/{}", m.opens, m.clicks).into(),
            format_timestamp(m.ts).into(),
        ]);
    }

    let mut table = Table::new(rows);
    table.inner_row_border = true;
    table
        .justify(0, Justify::Right)
        .justify(3, Justify::Center)
        .justify(4, Justify::Right)
        .justify(5, Justify::Right);
    table
}

fn smtp_events_table(events: &[SmtpEvent]) -> Table {
    let mut rows: Vec<Vec<Cell>> = vec![vec!["TS".into(), "Type".into(), "diag".into()]];
    for e in events {
        rows.push(vec![
            format_timestamp(e.ts).into(),
            e.kind.as_str().into(),
            or_empty(&e.diag).into(),
        ]);
    }

    let mut table = Table::new(rows);
    table.outer_border = false;
    table.inner_row_border = true;
    table
}

/// Two-column detail view; the bodies are wrapped to what is left of `total_width`.
pub fn detail_table(detail: &MessageDetail, total_width: usize) -> Table {
    let content = &detail.content;
    let info = &detail.info;

    let rows: Vec<Vec<Cell>> = vec![
        vec!["Subject".into(), or_empty(&content.subject).into()],
        vec!["To".into(), content.to.email.as_str().into()],
        vec!["Timestamp".into(), format_timestamp(content.ts).into()],
        vec!["State".into(), info.state.to_string().into()],
        vec![
            "SMTP events".into(),
            smtp_events_table(&info.smtp_events).render().into(),
        ],
        vec!["Text".into(), "".into()],
        vec!["HTML".into(), "".into()],
    ];

    let mut table = Table::new(rows);
    table.inner_row_border = true;
    table.inner_heading_row_border = false;

    let budget = table.column_max_width(1, total_width);
    let text = wrap(content.text.as_deref().unwrap_or(""), budget).join("\n");
    let html = wrap(content.html.as_deref().unwrap_or(""), budget).join("\n");
    table.set_cell(TEXT_ROW, 1, text.into());
    table.set_cell(HTML_ROW, 1, html.into());
    table
}

pub fn reject_table(entries: &[RejectEntry]) -> Table {
    let mut rows: Vec<Vec<Cell>> = vec![
        [
            "Email",
            "Reason",
            "CreatedAt",
            "LastEventOn",
            "ExpiresAt",
            "SubAccount",
        ]
        .into_iter()
        .map(Cell::from)
        .collect(),
    ];
    for e in entries {
        rows.push(vec![
            e.email.as_str().into(),
            Cell::colored(e.reason.as_str(), reason_color(&e.reason)),
            or_empty(&e.created_at).into(),
            or_empty(&e.last_event_at).into(),
            or_empty(&e.expires_at).into(),
            or_empty(&e.subaccount).into(),
        ]);
    }

    let mut table = Table::new(rows);
    table.inner_row_border = true;
    table
        .justify(2, Justify::Right)
        .justify(3, Justify::Right)
        .justify(4, Justify::Right);
    table
}

/// The SubAccount column only appears when the service actually returned one.
pub fn permit_table(entries: &[PermitEntry]) -> Table {
    let with_subaccount = entries.iter().any(|e| e.subaccount.is_some());

    let mut heading: Vec<Cell> = vec!["Email".into(), "Detail".into(), "CreatedAt".into()];
    if with_subaccount {
        heading.push("SubAccount".into());
    }

    let mut rows = vec![heading];
    for e in entries {
        let mut row: Vec<Cell> = vec![
            e.email.as_str().into(),
            or_empty(&e.detail).into(),
            or_empty(&e.created_at).into(),
        ];
        if with_subaccount {
            row.push(or_empty(&e.subaccount).into());
        }
        rows.push(row);
    }

    let mut table = Table::new(rows);
    table.inner_row_border = true;
    table.justify(2, Justify::Right);
    table
}
