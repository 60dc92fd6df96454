//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `persistence_notice`.
//! Role: Shared contract helper for CLI diagnostics such as failed loads and saves.
//! Invariants: Notices are non-fatal and never alter stdout payloads or exit codes.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

use crate::core::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub file: String,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("file".to_string(), json!(notice.file));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Builds a notice for a backing-file failure the caller chose not to treat as fatal.
pub fn persistence_notice(kind: &str, cmd: &str, file: &str, time: String, err: &Error) -> Notice {
    let mut details = Map::new();
    details.insert("error_kind".to_string(), json!(format!("{:?}", err.kind())));
    if let Some(message) = err.message() {
        details.insert("reason".to_string(), json!(message));
    }
    if let Some(source) = std::error::Error::source(err) {
        details.insert("cause".to_string(), json!(source.to_string()));
    }
    let message = match kind {
        "load_failed" => "could not load saved students; starting with an empty roster",
        "save_failed" => "change applied but could not be saved",
        _ => "roster file problem",
    };
    Notice {
        kind: kind.to_string(),
        time,
        cmd: cmd.to_string(),
        file: file.to_string(),
        message: message.to_string(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, notice_json, persistence_notice};
    use crate::core::error::{Error, ErrorKind};
    use serde_json::{Map, Value};

    #[test]
    fn notice_json_has_required_fields() {
        let mut details = Map::new();
        details.insert("error_kind".to_string(), Value::from("Io"));

        let notice = Notice {
            kind: "save_failed".to_string(),
            time: "2026-02-01T00:00:00Z".to_string(),
            cmd: "add".to_string(),
            file: "/tmp/students.json".to_string(),
            message: "change applied but could not be saved".to_string(),
            details,
        };

        let value = notice_json(&notice);
        let obj = value
            .get("notice")
            .and_then(|v| v.as_object())
            .expect("notice object");

        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("save_failed"));
        assert_eq!(
            obj.get("time").and_then(|v| v.as_str()),
            Some("2026-02-01T00:00:00Z")
        );
        assert_eq!(obj.get("cmd").and_then(|v| v.as_str()), Some("add"));
        assert_eq!(
            obj.get("file").and_then(|v| v.as_str()),
            Some("/tmp/students.json")
        );
        assert!(obj.get("details").and_then(|v| v.as_object()).is_some());
    }

    #[test]
    fn persistence_notice_carries_error_details() {
        let err = Error::new(ErrorKind::Corrupt)
            .with_message("roster file is not valid")
            .with_source(std::io::Error::other("bad bytes"));
        let notice = persistence_notice(
            "load_failed",
            "list",
            "students.json",
            "2026-02-01T00:00:00Z".to_string(),
            &err,
        );
        assert_eq!(notice.kind, "load_failed");
        assert!(notice.message.contains("empty roster"));
        assert_eq!(notice.details["error_kind"], "Corrupt");
        assert_eq!(notice.details["reason"], "roster file is not valid");
        assert_eq!(notice.details["cause"], "bad bytes");
    }
}
