use std::fs;
use std::path::Path;

use askama::Template;

use super::error::ReportError;
use super::stats::Summary;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;
const X_TICKS: usize = 5;

struct Marker {
    x: String,
    y: String,
}

struct Tick {
    pos: String,
    label: String,
}

struct ReferenceLine {
    y: String,
    color: &'static str,
    dash: &'static str,
    label: &'static str,
}

#[derive(Template)]
#[template(path = "cdf.html")]
struct CdfChart<'a> {
    title: &'a str,
    summary: &'a Summary,
    width: f64,
    height: f64,
    plot_left: String,
    plot_right: String,
    plot_top: String,
    plot_bottom: String,
    polyline: String,
    markers: Vec<Marker>,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    reference_lines: Vec<ReferenceLine>,
    mean: String,
    median: String,
    ci50: String,
    ci95: String,
}

struct Scale {
    x_max: f64,
}

impl Scale {
    fn x(&self, error_m: f64) -> f64 {
        MARGIN_LEFT + error_m / self.x_max * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn y(&self, probability: f64) -> f64 {
        HEIGHT - MARGIN_BOTTOM - probability * (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
    }
}

/// Renders the empirical CDF as a standalone HTML page with an inline SVG,
/// marking the 50% and 95% interval bounds on the probability axis.
fn render_chart(title: &str, summary: &Summary) -> Result<String, ReportError> {
    let scale = Scale {
        x_max: if summary.max > 0.0 { summary.max } else { 1.0 },
    };

    let markers: Vec<Marker> = summary
        .cdf
        .iter()
        .map(|p| Marker {
            x: coord(scale.x(p.error_m)),
            y: coord(scale.y(p.probability)),
        })
        .collect();
    let polyline = markers
        .iter()
        .map(|m| format!("{},{}", m.x, m.y))
        .collect::<Vec<_>>()
        .join(" ");

    let x_ticks = (0..=X_TICKS)
        .map(|i| {
            let value = scale.x_max * i as f64 / X_TICKS as f64;
            Tick {
                pos: coord(scale.x(value)),
                label: format!("{:.2}", value),
            }
        })
        .collect();
    let y_ticks = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|&p| Tick {
            pos: coord(scale.y(p)),
            label: format!("{:.2}", p),
        })
        .collect();

    let reference_lines = [
        (0.25, "green", "6 4", "50% CI Lower Bound"),
        (0.75, "green", "6 4", "50% CI Upper Bound"),
        (0.025, "red", "2 3", "95% CI Lower Bound"),
        (0.975, "red", "2 3", "95% CI Upper Bound"),
    ]
    .into_iter()
    .map(|(p, color, dash, label)| ReferenceLine {
        y: coord(scale.y(p)),
        color,
        dash,
        label,
    })
    .collect();

    let chart = CdfChart {
        title,
        summary,
        width: WIDTH,
        height: HEIGHT,
        plot_left: coord(MARGIN_LEFT),
        plot_right: coord(WIDTH - MARGIN_RIGHT),
        plot_top: coord(MARGIN_TOP),
        plot_bottom: coord(HEIGHT - MARGIN_BOTTOM),
        polyline,
        markers,
        x_ticks,
        y_ticks,
        reference_lines,
        mean: format!("{:.2}", summary.mean),
        median: format!("{:.2}", summary.median),
        ci50: format!("[{:.2}, {:.2}]", summary.ci50.low, summary.ci50.high),
        ci95: format!("[{:.2}, {:.2}]", summary.ci95.low, summary.ci95.high),
    };

    Ok(chart.render()?)
}

pub fn write_chart(path: &Path, title: &str, summary: &Summary) -> Result<(), ReportError> {
    let html = render_chart(title, summary)?;
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, html).map_err(io_err)?;
    log::info!("Wrote CDF chart to {}", path.display());
    Ok(())
}

fn coord(value: f64) -> String {
    format!("{:.1}", value)
}
