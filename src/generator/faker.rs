use chrono::{Duration, Local};
use rand::Rng;

use crate::models::session::{
    AppActivitySummary, DistractionSummary, SessionRecord, WIRE_TIME_FORMAT,
};

// Catalogs mirror what the LockedIn recorder actually labels.
pub const DISTRACTIONS: &[&str] = &[
    "eyes closed",
    "look away",
    "watch phone",
    "chat",
    "music",
    "stretch",
];

pub const APPS: &[(&str, &[&str])] = &[
    ("VS Code", &["edit code", "read file", "debug"]),
    ("Chrome", &["YouTube", "Docs", "Search"]),
    ("Terminal", &["run build", "git status", "install deps"]),
    ("Slack", &["reply", "read thread"]),
    ("Figma", &["browse designs", "inspect"]),
];

/// Produces `count` synthetic session records with the same fields the
/// recorder writes.
pub fn generate_sessions(count: usize) -> Vec<SessionRecord> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| generate_session(&mut rng)).collect()
}

fn generate_session<R: Rng>(rng: &mut R) -> SessionRecord {
    let now = Local::now().naive_local();
    let start = now
        - Duration::days(rng.gen_range(0..=9))
        - Duration::hours(rng.gen_range(0..=10))
        - Duration::minutes(rng.gen_range(0..=59));

    let duration_min: i64 = rng.gen_range(15..=60);
    let total_sec = duration_min * 60;

    // Unfocused between 5% and 45%
    let unfocused_ratio: f64 = rng.gen_range(0.05..=0.45);
    let total_unfocused_sec = (total_sec as f64 * unfocused_ratio) as i64;

    // Longest streak up to 1/3 of unfocused
    let longest_streak = if total_unfocused_sec > 0 {
        let cap = (total_unfocused_sec / 3).max(30).min(600);
        rng.gen_range(15..=cap)
    } else {
        0
    };

    let (app, activities) = APPS[rng.gen_range(0..APPS.len())];
    let activity = activities[rng.gen_range(0..activities.len())];
    let distraction = DISTRACTIONS[rng.gen_range(0..DISTRACTIONS.len())];

    let end = start + Duration::seconds(total_sec);

    SessionRecord {
        ts: Some(now.format(WIRE_TIME_FORMAT).to_string()),
        session_start: Some(start.format(WIRE_TIME_FORMAT).to_string()),
        session_end: Some(end.format(WIRE_TIME_FORMAT).to_string()),
        total_duration_sec: total_sec,
        total_unfocused_sec,
        focus_ratio: round3((total_sec - total_unfocused_sec) as f64 / total_sec as f64),
        longest_unfocused_streak_sec: longest_streak,
        most_common_distraction: Some(DistractionSummary {
            activity: distraction.to_string(),
            occurrences: rng.gen_range(1..=8),
        }),
        most_used_app_activity: Some(AppActivitySummary {
            app: app.to_string(),
            activity: activity.to_string(),
            occurrences: rng.gen_range(2..=12),
        }),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::parse_timestamp;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate_sessions(7).len(), 7);
        assert!(generate_sessions(0).is_empty());
        println!("✓ Generator honors the requested count");
    }

    #[test]
    fn test_generated_records_satisfy_invariants() {
        for record in generate_sessions(200) {
            let duration = record.total_duration_sec;
            let unfocused = record.total_unfocused_sec;
            let streak = record.longest_unfocused_streak_sec;

            assert!(
                (900..=3600).contains(&duration),
                "duration {} outside 15..60 minutes",
                duration
            );
            assert_eq!(duration % 60, 0, "duration is whole minutes");
            assert!(streak >= 0, "streak never negative");
            assert!(streak <= unfocused, "streak {} > unfocused {}", streak, unfocused);
            assert!(unfocused <= duration, "unfocused {} > duration {}", unfocused, duration);
            assert!(
                record.focus_ratio >= 0.0 && record.focus_ratio <= 1.0,
                "focus ratio {} out of range",
                record.focus_ratio
            );
        }
        println!("✓ 200 records satisfy 0 <= streak <= unfocused <= duration");
    }

    #[test]
    fn test_focus_ratio_rounded_to_three_places() {
        for record in generate_sessions(100) {
            let expected = round3(
                (record.total_duration_sec - record.total_unfocused_sec) as f64
                    / record.total_duration_sec as f64,
            );
            assert!(
                (record.focus_ratio - expected).abs() < 1e-12,
                "focus ratio {} does not match rounded {}",
                record.focus_ratio,
                expected
            );
            let scaled = record.focus_ratio * 1000.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "focus ratio {} carries more than 3 decimals",
                record.focus_ratio
            );
        }
        println!("✓ focusRatio always rounded to 3 decimal places");
    }

    #[test]
    fn test_timestamps_parse_and_span_duration() {
        for record in generate_sessions(50) {
            let start = parse_timestamp(record.session_start.as_deref().unwrap())
                .expect("generated start must parse");
            let end = parse_timestamp(record.session_end.as_deref().unwrap())
                .expect("generated end must parse");
            assert_eq!(
                (end - start).num_seconds(),
                record.total_duration_sec,
                "end minus start must equal the duration"
            );
            assert!(parse_timestamp(record.ts.as_deref().unwrap()).is_some());
        }
        println!("✓ Generated timestamps parse and span the duration");
    }

    #[test]
    fn test_written_records_load_back_with_parsed_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json-logs").join("sessions.jsonl");

        let records = generate_sessions(10);
        crate::store::session_log::write_sessions(&path, &records).unwrap();
        let loaded = crate::store::session_log::load_sessions(&path).unwrap();
        assert_eq!(loaded.len(), 10);

        let rows = crate::models::session::SessionRow::from_records(loaded);
        for row in &rows {
            assert!(row.start.is_some(), "written start must normalize");
            assert!(row.end.is_some(), "written end must normalize");
        }
        println!("✓ Generator output survives write, load, and normalization");
    }

    #[test]
    fn test_summaries_come_from_the_catalogs() {
        for record in generate_sessions(100) {
            let distraction = record.most_common_distraction.unwrap();
            assert!(
                DISTRACTIONS.contains(&distraction.activity.as_str()),
                "unknown distraction {}",
                distraction.activity
            );
            assert!((1..=8).contains(&distraction.occurrences));

            let usage = record.most_used_app_activity.unwrap();
            let (_, activities) = APPS
                .iter()
                .find(|(app, _)| *app == usage.app)
                .unwrap_or_else(|| panic!("unknown app {}", usage.app));
            assert!(
                activities.contains(&usage.activity.as_str()),
                "activity {} does not belong to {}",
                usage.activity,
                usage.app
            );
            assert!((2..=12).contains(&usage.occurrences));
        }
        println!("✓ Distractions and app activities drawn from the catalogs");
    }
}
