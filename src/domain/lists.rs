use serde::Deserialize;

/// Entry on the rejection list (`rejects/list.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct RejectEntry {
    pub email: String,
    pub reason: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_event_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub subaccount: Option<String>,
}

/// Entry on the permission list (`whitelist/list.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct PermitEntry {
    pub email: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    // not part of the documented response; kept optional
    #[serde(default)]
    pub subaccount: Option<String>,
}

/// Response of the add/delete endpoints of either list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListMutation {
    pub email: String,
    #[serde(default, alias = "added", alias = "deleted")]
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reject_entry_with_nulls() {
        let v = json!({
            "email": "bad@example.com",
            "reason": "hard-bounce",
            "detail": null,
            "created_at": "2024-06-01 10:00:00",
            "last_event_at": "2024-06-02 10:00:00",
            "expires_at": null,
            "expired": false,
            "subaccount": null
        });
        let e: RejectEntry = serde_json::from_value(v).unwrap();
        assert_eq!(e.reason, "hard-bounce");
        assert!(e.expires_at.is_none());
        assert!(e.subaccount.is_none());
    }

    #[test]
    fn permit_entry_without_subaccount() {
        let v = json!({
            "email": "ok@example.com",
            "detail": "whitelisted",
            "created_at": "2024-06-01 10:00:00"
        });
        let e: PermitEntry = serde_json::from_value(v).unwrap();
        assert!(e.subaccount.is_none());
    }

    #[test]
    fn mutation_accepts_deleted_flag() {
        let m: ListMutation =
            serde_json::from_value(json!({"email": "a@example.com", "deleted": true})).unwrap();
        assert!(m.changed);
    }
}
