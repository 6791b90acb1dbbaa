//! Weather dashboard pipeline
//!
//! Fetches a two-day hourly temperature forecast from Open-Meteo for the
//! configured coordinates and reshapes it into a chronological Fahrenheit
//! series plus per-day summaries. A failed fetch yields an empty series; the
//! renderer degrades every figure to "N/A" in that case.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::{LocationConfig, WeatherConfig};

/// One hourly forecast sample
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    /// Local forecast hour (the API is queried with timezone=auto)
    pub time: NaiveDateTime,
    pub celsius: f64,
    pub fahrenheit: f64,
}

/// Min/max/mean Fahrenheit for one local calendar date, rounded to one decimal
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min_f: f64,
    pub max_f: f64,
    pub mean_f: f64,
}

/// `F = C * 9/5 + 32`
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Open-Meteo forecast response structures
mod open_meteo {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub hourly: Option<HourlyData>,
    }

    /// Parallel `time` / `temperature_2m` arrays
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Vec<f64>,
    }
}

/// Fetch the hourly temperature series, collapsing any failure to an empty
/// series. One request, one bounded timeout, no retries.
pub async fn fetch_hourly_temperatures(
    client: &Client,
    location: &LocationConfig,
    config: &WeatherConfig,
) -> Vec<HourlySample> {
    match fetch_hourly_call(client, location, config).await {
        Ok(samples) => {
            debug!("Open-Meteo returned {} hourly samples", samples.len());
            samples
        }
        Err(e) => {
            warn!("Weather fetch failed, returning empty series: {e:#}");
            Vec::new()
        }
    }
}

async fn fetch_hourly_call(
    client: &Client,
    location: &LocationConfig,
    config: &WeatherConfig,
) -> Result<Vec<HourlySample>> {
    let url = format!(
        "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m&forecast_days={}&timezone=auto",
        config.base_url, location.latitude, location.longitude, config.forecast_days
    );

    let response = client
        .get(url)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?
        .error_for_status()?;

    let forecast: open_meteo::ForecastResponse = response
        .json()
        .await
        .with_context(|| "Failed to parse Open-Meteo forecast response")?;

    let hourly = forecast
        .hourly
        .with_context(|| "Open-Meteo response has no hourly block")?;

    Ok(build_series(&hourly.time, &hourly.temperature))
}

/// Zip the parallel arrays into samples, skipping entries whose timestamp
/// does not parse
fn build_series(times: &[String], temperatures: &[f64]) -> Vec<HourlySample> {
    times
        .iter()
        .zip(temperatures.iter())
        .filter_map(|(time, &celsius)| {
            let time = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()?;
            Some(HourlySample {
                time,
                celsius,
                fahrenheit: celsius_to_fahrenheit(celsius),
            })
        })
        .collect()
}

/// Group the series by local calendar date and summarize each day.
///
/// Rows come out in chronological order; the series itself is already
/// chronological as returned by the API.
#[must_use]
pub fn daily_summaries(samples: &[HourlySample]) -> Vec<DailySummary> {
    let mut summaries: Vec<DailySummary> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    for sample in samples {
        let date = sample.time.date();
        match summaries.iter().position(|s| s.date == date) {
            Some(i) => {
                let summary = &mut summaries[i];
                summary.min_f = summary.min_f.min(sample.fahrenheit);
                summary.max_f = summary.max_f.max(sample.fahrenheit);
                // mean_f accumulates the sum until the final pass below
                summary.mean_f += sample.fahrenheit;
                counts[i] += 1;
            }
            None => {
                summaries.push(DailySummary {
                    date,
                    min_f: sample.fahrenheit,
                    max_f: sample.fahrenheit,
                    mean_f: sample.fahrenheit,
                });
                counts.push(1);
            }
        }
    }

    for (summary, count) in summaries.iter_mut().zip(counts) {
        summary.mean_f = round1(summary.mean_f / count as f64);
        summary.min_f = round1(summary.min_f);
        summary.max_f = round1(summary.max_f);
    }

    summaries
}

/// Headline figures: current is the first (nearest) forecast hour, min and
/// max span the whole returned horizon
#[must_use]
pub fn headline_figures(samples: &[HourlySample]) -> Option<(f64, f64, f64)> {
    let current = samples.first()?.fahrenheit;
    let min = samples.iter().map(|s| s.fahrenheit).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.fahrenheit)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((current, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn series_over_two_days() -> Vec<HourlySample> {
        let mut times = Vec::new();
        let mut temps = Vec::new();
        for day in 14..16 {
            for hour in 0..24 {
                times.push(format!("2025-11-{day}T{hour:02}:00"));
                // varies within each day so min < mean < max
                temps.push(f64::from(hour) - 5.0);
            }
        }
        build_series(&times, &temps)
    }

    #[rstest]
    #[case(0.0, 32.0)]
    #[case(100.0, 212.0)]
    #[case(-40.0, -40.0)]
    fn test_celsius_to_fahrenheit_exact(#[case] celsius: f64, #[case] fahrenheit: f64) {
        assert_eq!(celsius_to_fahrenheit(celsius), fahrenheit);
    }

    #[test]
    fn test_celsius_to_fahrenheit_near_zero_f() {
        assert!((celsius_to_fahrenheit(-17.78) - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_build_series_zips_and_converts() {
        let times = vec!["2025-11-14T00:00".to_string(), "2025-11-14T01:00".to_string()];
        let temps = vec![0.0, 10.0];
        let series = build_series(&times, &temps);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].fahrenheit, 32.0);
        assert_eq!(series[1].fahrenheit, 50.0);
        assert!(series[0].time < series[1].time);
    }

    #[test]
    fn test_build_series_skips_unparseable_timestamps() {
        let times = vec!["not-a-time".to_string(), "2025-11-14T01:00".to_string()];
        let temps = vec![0.0, 10.0];
        let series = build_series(&times, &temps);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].celsius, 10.0);
    }

    #[test]
    fn test_daily_summaries_one_row_per_date() {
        let series = series_over_two_days();
        assert_eq!(series.len(), 48);

        let summaries = daily_summaries(&series);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].date.to_string(), "2025-11-14");
        assert_eq!(summaries[1].date.to_string(), "2025-11-15");

        for summary in &summaries {
            assert!(summary.min_f <= summary.mean_f);
            assert!(summary.mean_f <= summary.max_f);
        }
    }

    #[test]
    fn test_daily_summary_values_are_rounded() {
        // Three samples on one day: 0C, 1C, 1C -> 32.0, 33.8, 33.8 F
        let times = vec![
            "2025-11-14T00:00".to_string(),
            "2025-11-14T01:00".to_string(),
            "2025-11-14T02:00".to_string(),
        ];
        let series = build_series(&times, &[0.0, 1.0, 1.0]);
        let summaries = daily_summaries(&series);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].min_f, 32.0);
        assert_eq!(summaries[0].max_f, 33.8);
        // mean of 32.0, 33.8, 33.8 is 33.2
        assert_eq!(summaries[0].mean_f, 33.2);
    }

    #[test]
    fn test_daily_summaries_empty_series() {
        assert!(daily_summaries(&[]).is_empty());
    }

    #[test]
    fn test_headline_figures_current_is_first_sample() {
        let series = series_over_two_days();
        let (current, min, max) = headline_figures(&series).unwrap();
        assert_eq!(current, series[0].fahrenheit);
        assert_eq!(min, celsius_to_fahrenheit(-5.0));
        assert_eq!(max, celsius_to_fahrenheit(18.0));
    }

    #[test]
    fn test_headline_figures_empty_series() {
        assert!(headline_figures(&[]).is_none());
    }

    #[test]
    fn test_parse_forecast_response_shape() {
        let json = r#"{
            "latitude": 37.2707,
            "longitude": -76.7075,
            "hourly": {
                "time": ["2025-11-14T00:00"],
                "temperature_2m": [6.4]
            }
        }"#;
        let parsed: open_meteo::ForecastResponse = serde_json::from_str(json).unwrap();
        let hourly = parsed.hourly.unwrap();
        assert_eq!(hourly.time.len(), 1);
        assert_eq!(hourly.temperature, vec![6.4]);
    }
}
