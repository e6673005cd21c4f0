//! Chart generation models

use serde::Serialize;
use serde_json::{json, Value};

use super::metric::Metric;

/// Fixed dark styling shared by every chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub background: &'static str,
    pub background_rgb: (u8, u8, u8),
    pub font_color: &'static str,
    pub accent: &'static str,
    pub accent_rgb: (u8, u8, u8),
    pub height: u32,
    pub x_tick_angle: i32,
    pub margin_bottom: u32,
    pub mode: &'static str,
}

impl ChartTheme {
    pub const DARK: ChartTheme = ChartTheme {
        background: "#121212",
        background_rgb: (0x12, 0x12, 0x12),
        font_color: "white",
        accent: "rgb(0, 204, 255)",
        accent_rgb: (0, 204, 255),
        height: 400,
        x_tick_angle: -45,
        margin_bottom: 50,
        mode: "lines+markers",
    };
}

/// Declarative description of one metric's line chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub metric: Metric,
    pub title: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub theme: ChartTheme,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    /// Plotly figure (`{data, layout}`) consumed by the dashboard page
    pub fn to_figure(&self) -> Value {
        let name = self.metric.name();
        json!({
            "data": [{
                "type": "scatter",
                "x": self.x,
                "y": self.y,
                "mode": self.theme.mode,
                "name": name,
                "marker": { "color": self.theme.accent },
            }],
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": "Time" }, "tickangle": self.theme.x_tick_angle },
                "yaxis": { "title": { "text": name } },
                "height": self.theme.height,
                "paper_bgcolor": self.theme.background,
                "plot_bgcolor": self.theme.background,
                "font": { "color": self.theme.font_color },
                "margin": { "b": self.theme.margin_bottom },
            }
        })
    }
}

/// One chart bound to its dashboard panel
#[derive(Debug, Clone, Serialize)]
pub struct ChartPanel {
    pub id: String,
    pub figure: Value,
}

impl From<&ChartSpec> for ChartPanel {
    fn from(spec: &ChartSpec) -> Self {
        Self {
            id: spec.metric.dom_id(),
            figure: spec.to_figure(),
        }
    }
}

/// Payload returned to the page on every refresh tick
#[derive(Debug, Clone, Serialize)]
pub struct TickResponse {
    pub n_intervals: u64,
    pub generated_at: String,
    pub record_count: usize,
    pub charts: Vec<ChartPanel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_carries_dark_theme() {
        let spec = ChartSpec {
            metric: Metric::Humidity,
            title: "Humidity Over Time".to_string(),
            x: vec!["t0".to_string()],
            y: vec![41.5],
            theme: ChartTheme::DARK,
        };

        let figure = spec.to_figure();
        let layout = &figure["layout"];
        assert_eq!(layout["height"], 400);
        assert_eq!(layout["xaxis"]["tickangle"], -45);
        assert_eq!(layout["paper_bgcolor"], "#121212");
        assert_eq!(layout["plot_bgcolor"], "#121212");
        assert_eq!(layout["font"]["color"], "white");
        assert_eq!(layout["yaxis"]["title"]["text"], "Humidity");

        let trace = &figure["data"][0];
        assert_eq!(trace["mode"], "lines+markers");
        assert_eq!(trace["marker"]["color"], "rgb(0, 204, 255)");
        assert_eq!(trace["x"][0], "t0");
        assert_eq!(trace["y"][0], 41.5);
    }
}
