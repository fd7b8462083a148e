use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::models::session::{SessionRecord, SessionRow};

/// The four summary cards, computed over every loaded row.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_sessions: usize,
    pub total_hours: f64,
    pub avg_focus_ratio: f64,
    pub longest_unfocused_streak_sec: i64,
}

pub fn summary_stats(rows: &[SessionRow]) -> SummaryStats {
    let total_duration: i64 = rows.iter().map(|r| r.record.total_duration_sec).sum();
    let total_unfocused: i64 = rows.iter().map(|r| r.record.total_unfocused_sec).sum();
    // Zero total time reports a perfect ratio rather than dividing by zero.
    let avg_focus_ratio = if total_duration > 0 {
        1.0 - total_unfocused as f64 / total_duration as f64
    } else {
        1.0
    };
    SummaryStats {
        total_sessions: rows.len(),
        total_hours: total_duration as f64 / 3600.0,
        avg_focus_ratio,
        longest_unfocused_streak_sec: rows
            .iter()
            .map(|r| r.record.longest_unfocused_streak_sec)
            .max()
            .unwrap_or(0),
    }
}

/// Per-session focus percentage. A zero or negative duration reports 100%,
/// the same convention the summary average uses for a zero denominator.
pub fn focus_percent(record: &SessionRecord) -> f64 {
    if record.total_duration_sec <= 0 {
        return 100.0;
    }
    (1.0 - record.total_unfocused_sec as f64 / record.total_duration_sec as f64) * 100.0
}

/// Points for the focus-over-time line: rows with a parsed session end,
/// sorted ascending by that end. Rows with unparseable ends are excluded
/// from this view only.
pub fn focus_timeseries(rows: &[SessionRow]) -> Vec<(NaiveDateTime, f64)> {
    let mut points: Vec<(NaiveDateTime, f64)> = rows
        .iter()
        .filter_map(|row| row.end.map(|end| (end, focus_percent(&row.record))))
        .collect();
    points.sort_by_key(|(end, _)| *end);
    points
}

/// How often each distraction shows up as a session's most common one,
/// sorted by count descending. Sessions without the field are skipped.
pub fn distraction_breakdown(rows: &[SessionRow]) -> Vec<(String, i64)> {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        if let Some(distraction) = &row.record.most_common_distraction {
            *counts.entry(distraction.activity.clone()).or_insert(0) += 1;
        }
    }
    let mut breakdown: Vec<(String, i64)> = counts.into_iter().collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1));
    breakdown
}

/// Same tally over the composite "app — activity" label.
pub fn app_activity_breakdown(rows: &[SessionRow]) -> Vec<(String, i64)> {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        if let Some(usage) = &row.record.most_used_app_activity {
            let label = format!("{} — {}", usage.app, usage.activity);
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    let mut breakdown: Vec<(String, i64)> = counts.into_iter().collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1));
    breakdown
}
