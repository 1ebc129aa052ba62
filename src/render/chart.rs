use chrono::{NaiveTime, Timelike};
use plotters::prelude::*;

use super::series::Series;
use crate::core::TraceError;

pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 480;

const TITLE: &str = "Your Plot Title";
const X_LABEL: &str = "Date & Time";
const Y_LABEL: &str = "Torque";

/// Draws the series as a line chart on a fresh caller-owned bitmap and
/// returns encoded PNG bytes. The drawing context is local to this call;
/// nothing chart-related outlives it or is shared between requests.
pub fn render_png(series: &Series) -> Result<Vec<u8>, TraceError> {
    if series.is_empty() {
        return Err(TraceError::ChartError("no plottable points".to_string()));
    }

    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .map(|(t, v)| (seconds_of_day(t), *v))
        .collect();
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1));

    let mut pixels = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| TraceError::ChartError(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(42)
            .y_label_area_size(52)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| TraceError::ChartError(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .x_label_formatter(&|s: &f64| format_seconds(*s))
            .draw()
            .map_err(|e| TraceError::ChartError(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(|e| TraceError::ChartError(e.to_string()))?;

        root.present()
            .map_err(|e| TraceError::ChartError(e.to_string()))?;
    }

    encode_png(pixels)
}

fn encode_png(pixels: Vec<u8>) -> Result<Vec<u8>, TraceError> {
    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, pixels)
        .ok_or_else(|| TraceError::ChartError("pixel buffer size mismatch".to_string()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| TraceError::ChartError(e.to_string()))?;
    Ok(bytes)
}

fn seconds_of_day(t: &NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 + t.nanosecond() as f64 / 1e9
}

/// Axis tick text, back in the `minutes:seconds.fraction` shape the
/// source data uses.
fn format_seconds(s: f64) -> String {
    let minutes = (s / 60.0).floor();
    let seconds = s - minutes * 60.0;
    format!("{:02}:{:06.3}", minutes as u32, seconds)
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if max > min {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    } else {
        // a single distinct value still needs a non-degenerate axis
        (min - 0.5, max + 0.5)
    }
}
