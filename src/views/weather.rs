//! Weather page renderer
//!
//! Headline figures, a per-day summary table, and an inline SVG line chart of
//! Fahrenheit over the returned horizon. An empty series degrades every
//! figure to "N/A" and gives the chart a descriptive no-data title.

use super::page;
use crate::weather::{DailySummary, HourlySample, daily_summaries, headline_figures};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_MARGIN: f64 = 40.0;

/// Map the series onto chart coordinates and emit the polyline points
fn polyline_points(samples: &[HourlySample]) -> String {
    let min = samples.iter().map(|s| s.fahrenheit).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.fahrenheit)
        .fold(f64::NEG_INFINITY, f64::max);
    // flat series still needs a non-zero vertical span
    let span = if max > min { max - min } else { 1.0 };
    let step = if samples.len() > 1 {
        (CHART_WIDTH - 2.0 * CHART_MARGIN) / (samples.len() - 1) as f64
    } else {
        0.0
    };

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = CHART_MARGIN + step * i as f64;
            let y = CHART_HEIGHT
                - CHART_MARGIN
                - (sample.fahrenheit - min) / span * (CHART_HEIGHT - 2.0 * CHART_MARGIN);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the temperature chart as standalone SVG markup
#[must_use]
pub fn temperature_chart(samples: &[HourlySample]) -> String {
    if samples.is_empty() {
        return format!(
            "<svg class=\"temp-chart\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" \
             role=\"img\">\n\
             <text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" class=\"chart-title\">\
             No weather data available</text>\n\
             </svg>",
            x = CHART_WIDTH / 2.0,
            y = CHART_HEIGHT / 2.0,
        );
    }

    let min = samples.iter().map(|s| s.fahrenheit).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.fahrenheit)
        .fold(f64::NEG_INFINITY, f64::max);

    format!(
        "<svg class=\"temp-chart\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" role=\"img\">\n\
         <text x=\"{title_x}\" y=\"20\" text-anchor=\"middle\" class=\"chart-title\">\
         Hourly Temperature Forecast (°F)</text>\n\
         <text x=\"10\" y=\"{top_y}\" class=\"chart-label\">{max:.1}</text>\n\
         <text x=\"10\" y=\"{bottom_y}\" class=\"chart-label\">{min:.1}</text>\n\
         <text x=\"{first_x}\" y=\"{axis_y}\" class=\"chart-label\">{first}</text>\n\
         <text x=\"{last_x}\" y=\"{axis_y}\" text-anchor=\"end\" class=\"chart-label\">{last}</text>\n\
         <polyline fill=\"none\" stroke=\"#8B4513\" stroke-width=\"2\" points=\"{points}\"/>\n\
         </svg>",
        title_x = CHART_WIDTH / 2.0,
        top_y = CHART_MARGIN,
        bottom_y = CHART_HEIGHT - CHART_MARGIN,
        first_x = CHART_MARGIN,
        last_x = CHART_WIDTH - CHART_MARGIN,
        axis_y = CHART_HEIGHT - CHART_MARGIN / 4.0,
        first = samples[0].time.format("%m-%d %H:%M"),
        last = samples[samples.len() - 1].time.format("%m-%d %H:%M"),
        points = polyline_points(samples),
    )
}

fn summary_table(summaries: &[DailySummary]) -> String {
    if summaries.is_empty() {
        return "<div class=\"weather-no-data\">No weather data available</div>".to_string();
    }

    let mut table = String::from(
        "<table class=\"weather-table\">\n\
         <thead><tr><th>Date</th><th>Min °F</th><th>Max °F</th><th>Avg °F</th></tr></thead>\n\
         <tbody>\n",
    );
    for row in summaries {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            row.date, row.min_f, row.max_f, row.mean_f
        ));
    }
    table.push_str("</tbody>\n</table>");
    table
}

fn kpi(id: &str, label: &str, value: Option<f64>) -> String {
    let display = value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"));
    format!(
        "<div class=\"weather-kpi\">\
         <span class=\"kpi-label\">{label}</span>\
         <span id=\"{id}\" class=\"kpi-value\">{display}</span>\
         </div>"
    )
}

/// Render the weather page for one refresh
#[must_use]
pub fn weather_page(location_name: &str, samples: &[HourlySample]) -> String {
    let figures = headline_figures(samples);
    let (current, min, max) = match figures {
        Some((current, min, max)) => (Some(current), Some(min), Some(max)),
        None => (None, None, None),
    };

    let body = format!(
        "<h1 class=\"hero-title\">Weather Forecast</h1>\n\
         <p class=\"hero-subtitle\">{location}</p>\n\
         <a class=\"action-button\" href=\"/weather\">Refresh Weather</a>\n\
         <div class=\"weather-kpis\">\n{now}\n{min}\n{max}\n</div>\n\
         {chart}\n\
         <h3>Summary Stats</h3>\n\
         {table}",
        location = super::escape(location_name),
        now = kpi("kpi-now", "Current Temperature (°F)", current),
        min = kpi("kpi-min", "Min", min),
        max = kpi("kpi-max", "Max", max),
        chart = temperature_chart(samples),
        table = summary_table(&daily_summaries(samples)),
    );

    page("Weather", "/weather", &body)
}
