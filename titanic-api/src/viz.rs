//! Chart rendering for dataset columns.
//!
//! Every renderer produces a self-contained SVG fragment (800x500) that the
//! chat UI embeds directly. Rendering is pure with respect to the dataset
//! snapshot: the same column over the same data yields the same markup.

use plotters::element::Pie;
use plotters::prelude::*;

use crate::dataset::{Dataset, Value};
use titanic_common::{Error, Result};

/// Chart dimensions used by every renderer.
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;

/// Default bin count for the age histogram.
const AGE_BINS: usize = 30;

/// Categorical color palette (plotly's default cycle).
const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

/// Histogram of passenger ages, missing values dropped, 30 bins.
pub fn age_histogram(dataset: &Dataset) -> Result<String> {
    histogram(
        dataset,
        "Age",
        AGE_BINS,
        "Distribution of Passenger Ages",
        RGBColor(44, 160, 44),
    )
}

/// Histogram of a numeric column with continuous binning.
pub fn histogram(
    dataset: &Dataset,
    column: &str,
    bins: usize,
    title: &str,
    color: RGBColor,
) -> Result<String> {
    let values = dataset.numeric_values(column)?;
    if values.is_empty() {
        return Err(Error::Chart(format!("no values in column {}", column)));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Degenerate span (single distinct value) still needs a drawable axis.
    let max = if max > min { max } else { min + 1.0 };
    let bin_width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &values {
        let mut idx = ((v - min) / bin_width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1) as f64 * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(min..max, 0f64..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(column)
            .y_desc("Count")
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                let x0 = min + i as f64 * bin_width;
                Rectangle::new([(x0, 0.0), (x0 + bin_width, count as f64)], color.filled())
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

/// Bar chart of a categorical column: one bar per distinct value, count on
/// the y axis.
pub fn bar_chart(dataset: &Dataset, column: &str) -> Result<String> {
    let counts = dataset.value_counts(column)?;
    if counts.is_empty() {
        return Err(Error::Chart(format!("no values in column {}", column)));
    }

    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let y_max = counts.iter().map(|(_, n)| *n).max().unwrap_or(1) as f64 * 1.1;
    let title = format!("Bar Chart of {}", column);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..counts.len() as i32, 0f64..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(column)
            .y_desc("Count")
            .x_label_formatter(&|x| {
                labels
                    .get(*x as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new(
                    [(i as i32, 0.0), (i as i32 + 1, *count as f64)],
                    RGBColor(255, 127, 14).filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

/// Pie chart of a categorical column: share of each distinct value.
pub fn pie_chart(dataset: &Dataset, column: &str) -> Result<String> {
    let counts = dataset.value_counts(column)?;
    if counts.is_empty() {
        return Err(Error::Chart(format!("no values in column {}", column)));
    }

    let sizes: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let colors: Vec<RGBColor> = (0..counts.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();
    let title = format!("Pie Chart of {}", column);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let root = root
            .titled(&title, ("sans-serif", 30))
            .map_err(chart_err)?;

        let center = (CHART_WIDTH as i32 / 2, CHART_HEIGHT as i32 / 2);
        let radius = 170.0;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        root.draw(&pie).map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

/// Survival rate by category: for each distinct value of the grouping
/// column, the percentage of passengers in that group with `Survived == 1`.
pub fn survival_rate_chart(dataset: &Dataset, column: &str) -> Result<String> {
    let rates = dataset.percentage_within_groups(column, "Survived", &Value::Int(1))?;
    if rates.is_empty() {
        return Err(Error::Chart(format!("no values in column {}", column)));
    }

    let labels: Vec<String> = rates.iter().map(|(v, _)| v.to_string()).collect();
    let title = format!("Survival Rate by {}", column);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..rates.len() as i32, 0f64..100f64)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(column)
            .y_desc("Survival Rate (%)")
            .x_label_formatter(&|x| {
                labels
                    .get(*x as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(rates.iter().enumerate().map(|(i, (_, rate))| {
                Rectangle::new(
                    [(i as i32, 0.0), (i as i32 + 1, *rate)],
                    RGBColor(214, 39, 40).filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

// ============================================================================
// Tests
// ============================================================================
