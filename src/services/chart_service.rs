use plotters::prelude::*;
use tracing::warn;

use crate::models::{ChartSpec, ChartTheme, Metric, Snapshot};

/// Width of the server-rendered SVG charts
pub const SVG_WIDTH: u32 = 900;

/// Build the chart spec for one metric.
///
/// A series that is not aligned with the timestamps yields an empty chart
/// for that metric only.
pub fn build_chart_spec(snapshot: &Snapshot, metric: Metric) -> ChartSpec {
    let series = snapshot.series(metric);

    let (x, y) = if series.len() == snapshot.timestamps.len() {
        (snapshot.timestamps.clone(), series.to_vec())
    } else {
        warn!(
            "{} series has {} values for {} timestamps, rendering empty chart",
            metric,
            series.len(),
            snapshot.timestamps.len()
        );
        (Vec::new(), Vec::new())
    };

    ChartSpec {
        metric,
        title: format!("{} Over Time", metric.name()),
        x,
        y,
        theme: ChartTheme::DARK,
    }
}

/// Six chart specs in dashboard order: PM2.5, PM10, Ozone, Humidity, Temperature, CO
pub fn build_chart_specs(snapshot: &Snapshot) -> Vec<ChartSpec> {
    Metric::ALL
        .iter()
        .map(|metric| build_chart_spec(snapshot, *metric))
        .collect()
}

/// Largest magnitude plotted on the SVG y axis
const MAX_AXIS_VALUE: f64 = 1e300;

/// Y range with 10% padding; flat or empty series get a unit window.
///
/// Values beyond `MAX_AXIS_VALUE` are rejected so the padded range stays finite.
fn value_range(values: &[f64]) -> Result<(f64, f64), String> {
    if values.is_empty() {
        return Ok((0.0, 1.0));
    }

    if let Some(v) = values.iter().find(|v| !v.is_finite() || v.abs() > MAX_AXIS_VALUE) {
        return Err(format!("Value {} is outside the plottable range", v));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let range = max - min;
    let padding = if range < 1e-8 { 1.0 } else { range * 0.1 };
    Ok((min - padding, max + padding))
}

/// Shorten ISO-8601 timestamps to their time part for axis labels
fn compact_timestamp(label: &str) -> String {
    match label.split_once('T') {
        Some((_, time)) => time.trim_end_matches('Z').to_string(),
        None => label.to_string(),
    }
}

/// Axis label for an x coordinate; only whole indices carry a label
fn label_at(labels: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }

    labels
        .get(index as usize)
        .map(|l| compact_timestamp(l))
        .unwrap_or_default()
}

/// Render a chart spec as an SVG document.
///
/// Timestamps are plotted by position, so labels are shown verbatim rather
/// than parsed. An empty spec renders axes only.
pub fn render_chart_svg(spec: &ChartSpec) -> Result<String, String> {
    let theme = spec.theme;
    let (r, g, b) = theme.background_rgb;
    let background = RGBColor(r, g, b);
    let (r, g, b) = theme.accent_rgb;
    let accent = RGBColor(r, g, b);
    let grid = RGBColor(0x33, 0x33, 0x33);

    let points: Vec<(f64, f64)> = spec
        .y
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    let (y_min, y_max) = value_range(&spec.y)?;
    let mut svg = String::new();

    {
        let backend = SVGBackend::with_string(&mut svg, (SVG_WIDTH, theme.height));
        let root = backend.into_drawing_area();
        root.fill(&background)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let x_max = points.len().max(1) as f64 - 0.5;

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 22.0).into_font().color(&WHITE))
            .margin(15)
            .x_label_area_size(theme.margin_bottom)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        let text_style = ("sans-serif", 13.0).into_font().color(&WHITE);
        let format_x = |x: &f64| label_at(&spec.x, *x);

        chart
            .configure_mesh()
            .x_labels(points.len().clamp(1, 10))
            .x_label_formatter(&format_x)
            .x_desc("Time")
            .y_desc(spec.metric.name())
            .axis_style(&WHITE)
            .label_style(text_style.clone())
            .axis_desc_style(text_style)
            .bold_line_style(&grid)
            .light_line_style(&TRANSPARENT)
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        if points.len() > 1 {
            chart
                .draw_series(std::iter::once(PathElement::new(points.clone(), &accent)))
                .map_err(|e| format!("Failed to draw line: {}", e))?;
        }

        chart
            .draw_series(points.iter().map(|p| Circle::new(*p, 3, accent.filled())))
            .map_err(|e| format!("Failed to draw points: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::with_capacity(2);
        snapshot.push_row("2024-01-01T00:00:00Z".to_string(), [12.5, 20.0, 30.0, 40.0, 21.0, 0.3]);
        snapshot.push_row("2024-01-01T00:00:20Z".to_string(), [13.0, 22.0, 31.0, 42.0, 21.5, 0.4]);
        snapshot
    }

    #[test]
    fn test_specs_follow_fixed_order() {
        let specs = build_chart_specs(&sample_snapshot());
        let order: Vec<Metric> = specs.iter().map(|s| s.metric).collect();
        assert_eq!(order, Metric::ALL.to_vec());

        let titles: Vec<&str> = specs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "PM2.5 Over Time",
                "PM10 Over Time",
                "Ozone Over Time",
                "Humidity Over Time",
                "Temperature Over Time",
                "CO Over Time",
            ]
        );
    }

    #[test]
    fn test_spec_uses_snapshot_series_verbatim() {
        let snapshot = sample_snapshot();
        let spec = build_chart_spec(&snapshot, Metric::Temperature);
        assert_eq!(spec.x, snapshot.timestamps);
        assert_eq!(spec.y, vec![21.0, 21.5]);
        assert_eq!(spec.theme, ChartTheme::DARK);
    }

    #[test]
    fn test_empty_snapshot_gives_six_empty_specs() {
        let specs = build_chart_specs(&Snapshot::empty());
        assert_eq!(specs.len(), 6);
        assert!(specs.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_misaligned_series_only_blanks_that_metric() {
        let mut snapshot = sample_snapshot();
        snapshot.pm10.pop();

        let specs = build_chart_specs(&snapshot);
        assert!(specs[1].is_empty());
        assert_eq!(specs[0].y.len(), 2);
        assert_eq!(specs[5].y.len(), 2);
    }

    #[test]
    fn test_value_range_padding() {
        assert_eq!(value_range(&[]), Ok((0.0, 1.0)));
        assert_eq!(value_range(&[5.0, 5.0]), Ok((4.0, 6.0)));

        let (lo, hi) = value_range(&[-10.0, 10.0]).unwrap();
        assert!((lo + 12.0).abs() < 1e-9);
        assert!((hi - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_rejects_overflowing_series() {
        assert!(value_range(&[-1.0e308, 1.0e308]).is_err());
        assert!(value_range(&[0.0, 1.7e308]).is_err());

        let (lo, hi) = value_range(&[-1.0e300, 1.0e300]).unwrap();
        assert!(lo.is_finite() && hi.is_finite());
    }

    #[test]
    fn test_render_svg_with_huge_values_fails_cleanly() {
        let mut snapshot = Snapshot::with_capacity(2);
        snapshot.push_row("t0".to_string(), [-1.0e308, 0.0, 0.0, 0.0, 0.0, 0.0]);
        snapshot.push_row("t1".to_string(), [1.0e308, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let spec = build_chart_spec(&snapshot, Metric::Pm25);
        assert!(render_chart_svg(&spec).is_err());

        let other = build_chart_spec(&snapshot, Metric::Pm10);
        assert!(render_chart_svg(&other).is_ok());
    }

    #[test]
    fn test_axis_labels() {
        let labels = vec!["2024-01-01T00:00:00Z".to_string(), "N/A".to_string()];
        assert_eq!(label_at(&labels, 0.0), "00:00:00");
        assert_eq!(label_at(&labels, 1.0), "N/A");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
    }

    #[test]
    fn test_render_svg_with_data() {
        let spec = build_chart_spec(&sample_snapshot(), Metric::Pm25);
        let svg = render_chart_svg(&spec).expect("render failed");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("PM2.5 Over Time"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_svg_for_empty_spec() {
        let spec = build_chart_spec(&Snapshot::empty(), Metric::Co);
        let svg = render_chart_svg(&spec).expect("render failed");
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<circle"));
    }
}
