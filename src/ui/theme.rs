/// Page chrome for the dashboard, built once at startup and passed into
/// every render. Nothing here is process-global.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    pub icon: String,
    pub css: &'static str,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "LockedIn Sessions".to_string(),
            heading: "🔒 LockedIn - Session Dashboard".to_string(),
            icon: "🔒".to_string(),
            css: GLASS_CSS,
        }
    }
}

// Glassmorphism styles
pub const GLASS_CSS: &str = r#"
:root {
  --text: #f5f5f5;
  --subtle: #9aa0a6;
  --ok: #69e688;
  --warn: #ee8686;
  --cool: #c7d4ff;
  --border: rgba(255,255,255,0.10);
}
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: "Inter", system-ui, sans-serif;
  color: var(--text);
  background: radial-gradient(1100px 600px at 12% 0%, #232334 0%, #121217 55%), #121217;
  min-height: 100vh;
}
header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 20px 28px 8px;
}
header h2 { margin: 0; margin-bottom: 8px; font-size: 22px; }
.controls { display: flex; align-items: center; gap: 10px; }
button.refresh {
  background: rgba(255,255,255,0.08);
  border: 1px solid var(--border);
  color: var(--text);
  padding: 8px 16px;
  border-radius: 10px;
  cursor: pointer;
  font-size: 13px;
}
button.refresh:hover { background: rgba(255,255,255,0.14); }
main {
  padding: 8px 28px 28px;
  display: flex;
  flex-direction: column;
  gap: 16px;
}
.glass {
  background: linear-gradient(135deg, rgba(34,34,34,0.55), rgba(34,34,34,0.30));
  border: 1px solid rgba(255,255,255,0.10);
  box-shadow: 0 10px 30px rgba(0,0,0,0.35), inset 0 1px 0 rgba(255,255,255,0.06);
  backdrop-filter: blur(18px) saturate(120%);
  -webkit-backdrop-filter: blur(18px) saturate(120%);
  border-radius: 14px;
  padding: 16px;
  color: #f5f5f5;
}
.metric { font-weight: 700; font-size: 22px; }
.subtle { color: #9aa0a6; font-size: 12px; }
.ok { color: #69e688; }
.warn { color: #ee8686; }
.cool { color: #c7d4ff; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.panel-row { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.chart-box { position: relative; height: 280px; }
.panel-row .chart-box { height: 300px; }
table { width: 100%; border-collapse: collapse; font-size: 13px; margin-top: 8px; }
th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid var(--border); }
th { color: var(--subtle); font-weight: 500; }
tr:last-child td { border-bottom: none; }
ul.paths { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 13px; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
"#;
