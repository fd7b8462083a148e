use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::models::session::SessionRow;
use crate::stats::aggregate::SummaryStats;
use crate::ui::theme::PageConfig;

/// Bar charts show at most this many categories.
pub const TOP_BREAKDOWN: usize = 8;

const SERIES_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Chart payload embedded into the page as one JSON constant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardData {
    focus_series: SeriesData,
    distractions: BreakdownData,
    app_activities: BreakdownData,
}

#[derive(Debug, Serialize)]
struct SeriesData {
    labels: Vec<String>,
    values: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct BreakdownData {
    labels: Vec<String>,
    values: Vec<i64>,
}

/// Assembles the full dashboard page: summary cards, the three charts, and
/// the sessions table, all inline.
pub fn dashboard_page(
    page: &PageConfig,
    stats: &SummaryStats,
    series: &[(NaiveDateTime, f64)],
    distractions: &[(String, i64)],
    app_activities: &[(String, i64)],
    rows: &[SessionRow],
) -> Result<String> {
    let data = DashboardData {
        focus_series: SeriesData {
            labels: series
                .iter()
                .map(|(end, _)| end.format(SERIES_LABEL_FORMAT).to_string())
                .collect(),
            values: series.iter().map(|(_, pct)| *pct).collect(),
        },
        distractions: breakdown_data(distractions),
        app_activities: breakdown_data(app_activities),
    };
    // Keeps a literal </script> inside a label from terminating the inline block.
    let data_json = serde_json::to_string(&data)?.replace('<', "\\u003c");

    let total_sessions = stats.total_sessions.to_string();
    let total_hours = format!("{:.1} h", stats.total_hours);
    let avg_focus = format!("{}%", (stats.avg_focus_ratio * 100.0).round() as i64);
    let longest_streak = format!("{} s", stats.longest_unfocused_streak_sec);
    let rows_html = table_rows(rows);

    let content = fill(
        DASHBOARD_TEMPLATE,
        &[
            ("{{total_sessions}}", total_sessions.as_str()),
            ("{{total_hours}}", total_hours.as_str()),
            ("{{avg_focus}}", avg_focus.as_str()),
            ("{{longest_streak}}", longest_streak.as_str()),
            ("{{data_json}}", data_json.as_str()),
            ("{{table_rows}}", rows_html.as_str()),
        ],
    );
    Ok(shell(page, &content))
}

/// Warning page shown when no candidate path exists. Lists every searched
/// path so the fix is obvious.
pub fn missing_log_page(page: &PageConfig, candidates: &[PathBuf]) -> String {
    let mut paths = String::new();
    for candidate in candidates {
        paths.push_str("      <li>");
        paths.push_str(&escape_html(&candidate.display().to_string()));
        paths.push_str("</li>\n");
    }
    shell(page, &fill(MISSING_LOG_TEMPLATE, &[("{{paths}}", paths.as_str())]))
}

/// Warning page shown when the log exists but holds no valid records.
pub fn no_records_page(page: &PageConfig, path: &Path) -> String {
    let checked = escape_html(&path.display().to_string());
    shell(
        page,
        &fill(NO_RECORDS_TEMPLATE, &[("{{path}}", checked.as_str())]),
    )
}

fn breakdown_data(breakdown: &[(String, i64)]) -> BreakdownData {
    BreakdownData {
        labels: breakdown
            .iter()
            .take(TOP_BREAKDOWN)
            .map(|(label, _)| label.clone())
            .collect(),
        values: breakdown
            .iter()
            .take(TOP_BREAKDOWN)
            .map(|(_, count)| *count)
            .collect(),
    }
}

fn table_rows(rows: &[SessionRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let record = &row.record;
        out.push_str("<tr>");
        push_cell(&mut out, record.session_start.as_deref().unwrap_or(""));
        push_cell(&mut out, record.session_end.as_deref().unwrap_or(""));
        push_cell(&mut out, &record.total_duration_sec.to_string());
        push_cell(&mut out, &record.total_unfocused_sec.to_string());
        push_cell(&mut out, &record.focus_ratio.to_string());
        push_cell(&mut out, &record.longest_unfocused_streak_sec.to_string());
        push_cell(&mut out, &compact_object(&record.most_common_distraction));
        push_cell(&mut out, &compact_object(&record.most_used_app_activity));
        push_cell(&mut out, &format!("{:.1}", record.focus_ratio * 100.0));
        out.push_str("</tr>\n");
    }
    out
}

fn push_cell(out: &mut String, text: &str) {
    out.push_str("<td>");
    out.push_str(&escape_html(text));
    out.push_str("</td>");
}

fn compact_object<T: Serialize>(value: &Option<T>) -> String {
    match value {
        Some(inner) => serde_json::to_string(inner).unwrap_or_default(),
        None => String::new(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn shell(page: &PageConfig, content: &str) -> String {
    let title = escape_html(&page.title);
    let heading = escape_html(&page.heading);
    fill(
        SHELL_TEMPLATE,
        &[
            ("{{css}}", page.css),
            ("{{title}}", title.as_str()),
            ("{{icon}}", page.icon.as_str()),
            ("{{heading}}", heading.as_str()),
            ("{{content}}", content),
        ],
    )
}

// Marker positions are located in the pristine template, so an inserted
// payload is never rescanned for later markers. Each marker occurs at most
// once per template.
fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut found: Vec<(usize, usize, &str)> = substitutions
        .iter()
        .filter_map(|(marker, payload)| {
            template.find(marker).map(|pos| (pos, marker.len(), *payload))
        })
        .collect();
    found.sort_by_key(|(pos, _, _)| *pos);

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for (pos, len, payload) in found {
        out.push_str(&template[cursor..pos]);
        out.push_str(payload);
        cursor = pos + len;
    }
    out.push_str(&template[cursor..]);
    out
}

const SHELL_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{title}}</title>
  <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>{{icon}}</text></svg>" />
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <style>{{css}}</style>
</head>
<body>
  <header>
    <h2>{{heading}}</h2>
    <div class="controls">
      <span class="subtle">Controls</span>
      <button class="refresh" onclick="location.reload()">Refresh data</button>
    </div>
  </header>
  <main>
{{content}}
  </main>
</body>
</html>
"#;

const DASHBOARD_TEMPLATE: &str = r#"    <div class="cards">
      <div class="glass"><div class="subtle">Total sessions</div><div class="metric ok">{{total_sessions}}</div></div>
      <div class="glass"><div class="subtle">Total time</div><div class="metric cool">{{total_hours}}</div></div>
      <div class="glass"><div class="subtle">Avg focus ratio</div><div class="metric ok">{{avg_focus}}</div></div>
      <div class="glass"><div class="subtle">Longest unfocused streak</div><div class="metric warn">{{longest_streak}}</div></div>
    </div>
    <div class="glass">
      <div class="subtle">Focus ratio over time (%)</div>
      <div class="chart-box"><canvas id="chart-focus"></canvas></div>
    </div>
    <div class="panel-row">
      <div class="glass">
        <div class="subtle">Top distractions</div>
        <div class="chart-box"><canvas id="chart-distractions"></canvas></div>
      </div>
      <div class="glass">
        <div class="subtle">Most used app/activity</div>
        <div class="chart-box"><canvas id="chart-apps"></canvas></div>
      </div>
    </div>
    <div class="glass">
      <div class="subtle">All sessions</div>
      <table>
        <thead>
          <tr>
            <th>sessionStart</th><th>sessionEnd</th><th>totalDurationSec</th>
            <th>totalUnfocusedSec</th><th>focusRatio</th><th>longestUnfocusedStreakSec</th>
            <th>mostCommonDistraction</th><th>mostUsedAppActivity</th><th>focusPct</th>
          </tr>
        </thead>
        <tbody>
{{table_rows}}
        </tbody>
      </table>
    </div>
    <script>
      const DASHBOARD = {{data_json}};

      Chart.defaults.color = '#9aa0a6';
      Chart.defaults.borderColor = 'rgba(255,255,255,0.10)';

      function barConfig(breakdown, color) {
        return {
          type: 'bar',
          data: {
            labels: breakdown.labels,
            datasets: [{ data: breakdown.values, backgroundColor: color, borderRadius: 4 }]
          },
          options: {
            responsive: true,
            maintainAspectRatio: false,
            plugins: { legend: { display: false } },
            scales: { y: { beginAtZero: true, ticks: { precision: 0 } } }
          }
        };
      }

      new Chart(document.getElementById('chart-focus'), {
        type: 'line',
        data: {
          labels: DASHBOARD.focusSeries.labels,
          datasets: [{
            data: DASHBOARD.focusSeries.values,
            borderColor: '#69e688',
            backgroundColor: 'rgba(105,230,136,0.15)',
            borderWidth: 2,
            tension: 0.25,
            fill: true,
            pointRadius: 3
          }]
        },
        options: {
          responsive: true,
          maintainAspectRatio: false,
          plugins: { legend: { display: false } },
          scales: { y: { suggestedMin: 0, suggestedMax: 100 } }
        }
      });
      new Chart(document.getElementById('chart-distractions'), barConfig(DASHBOARD.distractions, 'rgba(238,134,134,0.75)'));
      new Chart(document.getElementById('chart-apps'), barConfig(DASHBOARD.appActivities, 'rgba(199,212,255,0.75)'));
    </script>
"#;

const MISSING_LOG_TEMPLATE: &str = r#"    <div class="glass">
      <div class="metric warn">No sessions.jsonl found</div>
      <p>Expected at one of:</p>
      <ul class="paths">
{{paths}}      </ul>
      <p>Generate with <code>lockedin_generator</code> or run the LockedIn app to create sessions.</p>
    </div>
"#;

const NO_RECORDS_TEMPLATE: &str = r#"    <div class="glass">
      <div class="metric warn">No valid session records in sessions.jsonl</div>
      <p class="subtle">Checked {{path}}</p>
    </div>
"#;
