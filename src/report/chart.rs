use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

use crate::models::{PriceSeries, BENCHMARK_CODE};

/// Number of ranked tickers drawn next to the benchmark
pub const CHART_TOP_N: usize = 5;

const CHART_SIZE: (u32, u32) = (1500, 1000);

/// One plotted series of normalized closes
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// The top ranked codes followed by the benchmark, without repeats
pub fn chart_codes(top_codes: &[&str]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::with_capacity(top_codes.len() + 1);
    for code in top_codes.iter().copied().chain(std::iter::once(BENCHMARK_CODE)) {
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Closes from `start` onward divided by the first close in that window.
///
/// `None` when the window is empty or starts at a zero/invalid close.
pub fn normalized_line(series: &PriceSeries, start: NaiveDate) -> Option<ChartLine> {
    let window = series.since(start);
    let first = window.first()?.close;
    if first == 0.0 || !first.is_finite() {
        return None;
    }

    Some(ChartLine {
        label: series.symbol.clone(),
        points: window.iter().map(|bar| (bar.date, bar.close / first)).collect(),
    })
}

/// Draw the lines to a PNG at `path`
pub fn render_chart(lines: &[ChartLine], title: &str, path: &Path) -> Result<()> {
    let points = lines.iter().flat_map(|line| line.points.iter());
    let (mut x_min, mut x_max) = (NaiveDate::MAX, NaiveDate::MIN);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(date, value) in points {
        x_min = x_min.min(date);
        x_max = x_max.max(date);
        y_min = y_min.min(value);
        y_max = y_max.max(value);
    }
    if x_min > x_max {
        return Err(anyhow!("no data to plot"));
    }
    if x_min == x_max {
        x_max = x_max + Duration::days(1);
    }
    let padding = ((y_max - y_min).abs() * 0.05).max(0.01);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, (y_min - padding)..(y_max + padding))?;

    chart.configure_mesh().x_labels(10).y_labels(10).draw()?;

    for (idx, line) in lines.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(1)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present().context("write chart")?;
    Ok(())
}
