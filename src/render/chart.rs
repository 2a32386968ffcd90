// src/render/chart.rs

//! SVG charts for evaluated curves and grids.
//!
//! Charts are rendered into an in-memory SVG string so callers decide where the
//! output goes; [`write_svg`] is a thin convenience for the file case.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::grid::types::{CurveSeries, GridField, GridMatrix, ProfitCurve};

/// Pixel size of line charts.
pub const CURVE_CHART_SIZE: (u32, u32) = (1280, 768);
/// Pixel size of heatmaps.
pub const HEATMAP_SIZE: (u32, u32) = (1100, 900);

const CALL_COLOR: RGBColor = RGBColor(31, 119, 180);
const PUT_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Line chart of adjusted call and put values against spot.
pub fn curve_svg(series: &CurveSeries) -> Result<String> {
    let spots = series.spots();
    line_chart_svg(
        &format!(
            "Call and put option prices vs underlying price (K={})",
            series.strike
        ),
        "Option price",
        &[
            ("Call", CALL_COLOR, zip_xy(&spots, &series.calls())),
            ("Put", PUT_COLOR, zip_xy(&spots, &series.puts())),
        ],
    )
}

/// Line chart of long call and long put profit at expiry against spot.
pub fn profit_curve_svg(curve: &ProfitCurve) -> Result<String> {
    let calls: Vec<(f64, f64)> = curve
        .points
        .iter()
        .map(|p| (p.spot, p.call_profit))
        .collect();
    let puts: Vec<(f64, f64)> = curve
        .points
        .iter()
        .map(|p| (p.spot, p.put_profit))
        .collect();
    line_chart_svg(
        &format!(
            "Call and put holder profit vs underlying price (K={}, premiums {:.2} / {:.2})",
            curve.strike, curve.call_premium, curve.put_premium
        ),
        "Profit",
        &[("Call profit", CALL_COLOR, calls), ("Put profit", PUT_COLOR, puts)],
    )
}

/// Default heatmap title for a grid field.
pub fn heatmap_title(field: GridField) -> &'static str {
    match field {
        GridField::Nd2 => "N(d2): probability the call expires in the money",
        GridField::CallValue => "Call option value (moneyness adjusted)",
        GridField::PutValue => "Put option value (moneyness adjusted)",
        GridField::TheoreticalCall => "Call option price",
        GridField::TheoreticalPut => "Put option price",
    }
}

/// Annotated heatmap with strikes along x and spots along y.
///
/// Cells are coloured on a Jet scale spanning the matrix's value range and labelled
/// with their value to two decimals.
pub fn heatmap_svg(matrix: &GridMatrix, title: &str) -> Result<String> {
    let (rows, cols) = matrix.dims();
    let (lo, hi) = matrix
        .value_range()
        .ok_or_else(|| anyhow!("cannot render an empty {} grid", matrix.field.label()))?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, HEATMAP_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        // Cell (row i, col j) is centred on (j, i).
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(title, ("sans-serif", 26))
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5..cols as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

        let strikes = matrix.strikes();
        let spots = matrix.spots();
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols)
            .y_labels(rows)
            .x_label_formatter(&|x| axis_label(strikes, *x))
            .y_label_formatter(&|y| axis_label(spots, *y))
            .x_desc("Strike price (K)")
            .y_desc("Underlying price (S)")
            .draw()?;

        let cells: Vec<(f64, f64, f64)> = matrix
            .rows()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(j, &v)| (i as f64, j as f64, v))
            })
            .collect();

        chart.draw_series(cells.iter().map(|&(i, j, v)| {
            Rectangle::new(
                [(j - 0.5, i - 0.5), (j + 0.5, i + 0.5)],
                jet_color(normalize(v, lo, hi)).filled(),
            )
        }))?;

        let label_style = ("sans-serif", 11)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(
            cells
                .iter()
                .map(|&(i, j, v)| Text::new(format!("{:.2}", v), (j, i), label_style.clone())),
        )?;

        root.present()?;
    }
    Ok(svg)
}

/// Write a rendered SVG document to `path`.
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "chart written");
    Ok(())
}

/// Jet colour map: blue → cyan → yellow → red for `t` in `[0, 1]`.
pub fn jet_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}

fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (v - lo) / (hi - lo)
    } else {
        0.5
    }
}

/// Label for a tick placed on a cell centre; other tick positions stay blank.
fn axis_label(values: &[f64], position: f64) -> String {
    let idx = position.round();
    if (position - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    values
        .get(idx as usize)
        .map(|v| format!("{}", v))
        .unwrap_or_default()
}

fn zip_xy(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

fn line_chart_svg(
    title: &str,
    y_desc: &str,
    series: &[(&str, RGBColor, Vec<(f64, f64)>)],
) -> Result<String> {
    let points = series.iter().flat_map(|(_, _, pts)| pts.iter());
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() || !y_min.is_finite() {
        return Err(anyhow!("cannot render an empty curve"));
    }
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    // 5% headroom so the extremes do not sit on the frame
    let padding = ((y_max - y_min) * 0.05).max(1e-3);
    let (y_lo, y_hi) = (y_min - padding, y_max + padding);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CURVE_CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(title, ("sans-serif", 26))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Underlying price S(t)")
            .y_desc(y_desc)
            .draw()?;

        for (name, color, pts) in series {
            let color = *color;
            chart
                .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))?
                .label(*name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}
