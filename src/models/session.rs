use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used on the wire, seconds precision, no zone designator.
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One focus session as written to sessions.jsonl, one JSON object per line.
///
/// Field order matters for the generator: `ts` is emitted first, then the
/// session fields, matching what the LockedIn app writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// When the record was generated. Written by the generator, ignored by
    /// the dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    #[serde(default)]
    pub session_start: Option<String>,
    #[serde(default)]
    pub session_end: Option<String>,
    pub total_duration_sec: i64,
    pub total_unfocused_sec: i64,
    pub focus_ratio: f64,
    pub longest_unfocused_streak_sec: i64,
    #[serde(
        default,
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub most_common_distraction: Option<DistractionSummary>,
    #[serde(
        default,
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub most_used_app_activity: Option<AppActivitySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistractionSummary {
    pub activity: String,
    pub occurrences: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppActivitySummary {
    pub app: String,
    pub activity: String,
    pub occurrences: i64,
}

/// A loaded record plus its derived timestamps. The derived fields stay
/// `None` when the raw strings are absent or unparseable; the record itself
/// is always kept.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub record: SessionRecord,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl SessionRow {
    pub fn from_record(record: SessionRecord) -> Self {
        let start = record.session_start.as_deref().and_then(parse_timestamp);
        let end = record.session_end.as_deref().and_then(parse_timestamp);
        Self { record, start, end }
    }

    pub fn from_records(records: Vec<SessionRecord>) -> Vec<SessionRow> {
        records.into_iter().map(Self::from_record).collect()
    }
}

/// Parses a wire timestamp as a local naive datetime. A trailing `Z` is
/// stripped rather than honored; the recorder writes local times either way.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    trimmed.parse::<NaiveDateTime>().ok()
}

/// Accepts the expected object shape, turns anything else (bare strings,
/// numbers, null) into `None` instead of failing the whole line.
fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<T>(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_strips_trailing_z() {
        let with_z = parse_timestamp("2025-08-20T14:03:11Z");
        let without_z = parse_timestamp("2025-08-20T14:03:11");
        assert!(with_z.is_some(), "timestamp with Z should parse");
        assert_eq!(with_z, without_z, "Z suffix must not change the result");
        println!("✓ Trailing Z stripped before parsing");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-40T99:99:99"), None);
        println!("✓ Unparseable timestamps yield None");
    }

    #[test]
    fn test_record_parses_camel_case_line() {
        let line = r#"{"ts":"2025-08-21T09:00:00","sessionStart":"2025-08-20T14:03:11","sessionEnd":"2025-08-20T14:48:11","totalDurationSec":2700,"totalUnfocusedSec":540,"focusRatio":0.8,"longestUnfocusedStreakSec":120,"mostCommonDistraction":{"activity":"chat","occurrences":3},"mostUsedAppActivity":{"app":"VS Code","activity":"edit code","occurrences":7}}"#;
        let record: SessionRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record.total_duration_sec, 2700);
        assert_eq!(record.total_unfocused_sec, 540);
        assert_eq!(record.longest_unfocused_streak_sec, 120);
        let distraction = record.most_common_distraction.unwrap();
        assert_eq!(distraction.activity, "chat");
        assert_eq!(distraction.occurrences, 3);
        let app = record.most_used_app_activity.unwrap();
        assert_eq!(app.app, "VS Code");
        assert_eq!(app.activity, "edit code");
        println!("✓ camelCase line parsed into SessionRecord");
    }

    #[test]
    fn test_non_object_summary_fields_become_none() {
        // A recorder bug once wrote bare strings here; the line must survive.
        let line = r#"{"sessionStart":"2025-08-20T14:03:11","sessionEnd":"2025-08-20T14:48:11","totalDurationSec":2700,"totalUnfocusedSec":540,"focusRatio":0.8,"longestUnfocusedStreakSec":120,"mostCommonDistraction":"music","mostUsedAppActivity":42}"#;
        let record: SessionRecord = serde_json::from_str(line).unwrap();
        assert!(record.most_common_distraction.is_none());
        assert!(record.most_used_app_activity.is_none());
        assert_eq!(record.total_duration_sec, 2700);
        println!("✓ Non-object summary fields tolerated as None");
    }

    #[test]
    fn test_missing_required_numeric_field_fails() {
        let line = r#"{"sessionStart":"2025-08-20T14:03:11","focusRatio":0.8}"#;
        let result = serde_json::from_str::<SessionRecord>(line);
        assert!(result.is_err(), "line without duration fields must not parse");
        println!("✓ Line missing required numeric fields rejected");
    }

    #[test]
    fn test_record_serializes_with_ts_first() {
        let record = SessionRecord {
            ts: Some("2025-08-21T09:00:00".to_string()),
            session_start: Some("2025-08-20T14:03:11".to_string()),
            session_end: Some("2025-08-20T14:48:11".to_string()),
            total_duration_sec: 2700,
            total_unfocused_sec: 540,
            focus_ratio: 0.8,
            longest_unfocused_streak_sec: 120,
            most_common_distraction: Some(DistractionSummary {
                activity: "chat".to_string(),
                occurrences: 3,
            }),
            most_used_app_activity: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"ts":"#), "ts must be the first key: {}", json);
        assert!(json.contains(r#""totalDurationSec":2700"#));
        assert!(json.contains(r#""longestUnfocusedStreakSec":120"#));
        assert!(
            !json.contains("mostUsedAppActivity"),
            "absent summary must be omitted, not null"
        );
        println!("✓ Record serializes with ts first and camelCase keys");
    }

    #[test]
    fn test_row_derives_timestamps_and_keeps_bad_ones() {
        let good = SessionRecord {
            ts: None,
            session_start: Some("2025-08-20T14:03:11".to_string()),
            session_end: Some("2025-08-20T14:48:11Z".to_string()),
            total_duration_sec: 2700,
            total_unfocused_sec: 540,
            focus_ratio: 0.8,
            longest_unfocused_streak_sec: 120,
            most_common_distraction: None,
            most_used_app_activity: None,
        };
        let mut bad = good.clone();
        bad.session_end = Some("garbage".to_string());

        let rows = SessionRow::from_records(vec![good, bad]);
        assert_eq!(rows.len(), 2, "records with bad timestamps are kept");
        assert!(rows[0].start.is_some());
        assert!(rows[0].end.is_some());
        assert!(rows[1].start.is_some());
        assert!(rows[1].end.is_none(), "bad end nulls only the derived field");
        println!("✓ Rows keep records while nulling unparseable timestamps");
    }
}
