use crate::config::DashboardConfig;
use crate::models::{ChartTheme, Metric};

const PAGE_TITLE: &str = "Live Environmental Dashboard";
const HEADING: &str = "Live Environmental Data Dashboard";
const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<script src="{{plotly}}"></script>
</head>
<body style="margin: 0; background-color: {{background}};">
<div style="background-color: {{background}}; padding: 20px;">
<h1 style="text-align: center; color: {{font_color}};">{{heading}}</h1>
<div style="display: grid; grid-template-columns: 1fr; gap: 20px;">
{{panels}}
</div>
</div>
<script>
const REFRESH_MS = {{interval_ms}};
let nIntervals = 0;

async function tick() {
  const n = nIntervals++;
  try {
    const res = await fetch(`/api/tick?n_intervals=${n}`);
    const body = await res.json();
    for (const chart of body.charts) {
      Plotly.react(chart.id, chart.figure.data, chart.figure.layout);
    }
  } catch (err) {
    console.error("tick failed", err);
  }
}

tick();
setInterval(tick, REFRESH_MS);
</script>
</body>
</html>
"#;

/// Render the dashboard shell: six stacked panels refreshed on a timer
pub fn render_dashboard_page(config: &DashboardConfig) -> String {
    let theme = ChartTheme::DARK;
    let panels = Metric::ALL
        .iter()
        .map(|m| format!(r#"<div id="{}" style="min-height: {}px;"></div>"#, m.dom_id(), theme.height))
        .collect::<Vec<_>>()
        .join("\n");

    TEMPLATE
        .replace("{{title}}", PAGE_TITLE)
        .replace("{{plotly}}", PLOTLY_SRC)
        .replace("{{background}}", theme.background)
        .replace("{{font_color}}", theme.font_color)
        .replace("{{heading}}", HEADING)
        .replace("{{panels}}", &panels)
        .replace("{{interval_ms}}", &(config.interval_seconds * 1000).to_string())
}
