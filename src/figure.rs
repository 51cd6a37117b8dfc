//! SVG bar chart of games released per year.

use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::error::AppError;

const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 480;

// Exact attribute tokens as the SVG backend serializes them at the fixed
// chart size. prepare_figure substitutes on these literally.
const HEIGHT_TOKEN: &str = "height=\"480\"";
const WIDTH_TOKEN: &str = "width=\"640\"";

/// Renders the year-to-count statistics as an SVG string.
pub fn render_chart(stats: &BTreeMap<i32, u64>) -> Result<String, AppError> {
    let min_year = stats.keys().next().copied().unwrap_or(0);
    let max_year = stats.keys().next_back().copied().unwrap_or(1);
    let max_count = stats.values().copied().max().unwrap_or(1);
    let y_max = max_count + max_count / 10 + 1;

    let mut buffer = String::new();
    {
        // No background fill: a filled rect would carry the same fixed
        // width/height tokens prepare_figure substitutes on.
        let root = SVGBackend::with_string(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();

        let mut chart = ChartBuilder::on(&root)
            .caption("Number of Games per Year", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((min_year..max_year + 1).into_segmented(), 0u64..y_max)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Games Released")
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.8).filled())
                    .margin(1)
                    .data(stats.iter().map(|(&year, &count)| (year, count))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }

    Ok(buffer)
}

fn chart_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Chart(e.to_string())
}

/// Removes the fixed height of the rendered chart and widens it to 100% so it
/// scales to its container. Literal substring substitution on the backend's
/// exact attribute serialization, no SVG parsing.
pub fn prepare_figure(input_figure: &str) -> String {
    input_figure
        .replace(HEIGHT_TOKEN, "")
        .replace(WIDTH_TOKEN, "width=\"100%\"")
}
