//! The remote task-status snapshot.
//!
//! The remote job system reports status as a JSON document of the form:
//!
//! ```text
//! {
//!   "uuid": "a17d795b-2829-4e67-ad82-1143e4262dfa",
//!   "processingTime": 109162,
//!   "status": { "code": 20 }
//! }
//! ```
//!
//! A job is complete once its status code exceeds [`COMPLETION_THRESHOLD`].
//! The snapshot is never persisted; it lives only in the memory of the watch
//! task that fetched it, and the completed snapshot is re-serialized verbatim
//! as the webhook payload.

use serde::{Deserialize, Serialize};

/// Status codes above this value mean the job has finished processing
/// (successfully or not - the downstream consumer decides what to do).
pub const COMPLETION_THRESHOLD: i64 = 20;

/// The nested status object carrying the numeric status code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusCode {
    #[serde(default)]
    pub code: i64,
}

/// A snapshot of one job's remote state.
///
/// Fields absent from the wire default to their zero values, matching how
/// the remote endpoint omits fields for jobs it knows nothing about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub status: TaskStatusCode,

    #[serde(default)]
    pub uuid: String,

    #[serde(default)]
    pub processing_time: i64,
}

impl TaskInfo {
    /// Returns true once the job has finished processing.
    pub fn is_complete(&self) -> bool {
        self.status.code > COMPLETION_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_status_document() {
        let info: TaskInfo = serde_json::from_value(json!({
            "uuid": "a17d795b-2829-4e67-ad82-1143e4262dfa",
            "name": "Task of 2021-03-20T17:00:59.435Z",
            "dateCreated": 1616259659435u64,
            "processingTime": 109162,
            "status": { "code": 20 },
            "options": [],
            "imagesCount": 3,
            "progress": 54
        }))
        .unwrap();

        assert_eq!(info.status.code, 20);
        assert_eq!(info.uuid, "a17d795b-2829-4e67-ad82-1143e4262dfa");
        assert_eq!(info.processing_time, 109162);
        assert!(!info.is_complete());
    }

    #[test]
    fn missing_fields_default_to_zero_values() {
        let info: TaskInfo = serde_json::from_value(json!({
            "status": { "code": 10 }
        }))
        .unwrap();

        assert_eq!(info.status.code, 10);
        assert_eq!(info.uuid, "");
        assert_eq!(info.processing_time, 0);
    }

    #[test]
    fn empty_document_parses_as_incomplete() {
        let info: TaskInfo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(info.status.code, 0);
        assert!(!info.is_complete());
    }

    #[test]
    fn completion_threshold_is_exclusive() {
        let at = TaskInfo {
            status: TaskStatusCode { code: 20 },
            ..TaskInfo::default()
        };
        let above = TaskInfo {
            status: TaskStatusCode { code: 21 },
            ..TaskInfo::default()
        };

        assert!(!at.is_complete());
        assert!(above.is_complete());
    }

    #[test]
    fn reserializes_with_wire_field_names() {
        let info = TaskInfo {
            status: TaskStatusCode { code: 25 },
            uuid: "abc".to_string(),
            processing_time: 500,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({"status": {"code": 25}, "uuid": "abc", "processingTime": 500})
        );
    }
}
