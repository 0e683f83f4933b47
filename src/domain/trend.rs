// Snowpack trend analysis over normalized measurement records
use super::measurement::{MeasurementRecord, SNOW_DEPTH, SNOW_WATER_EQUIVALENT};
use serde::Serialize;

const UNIT_INCHES: &str = "inches";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakReading {
    pub value: f64,
    pub date: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnowDepthAnalysis {
    pub peak_depth: PeakReading,
    pub average_depth: f64,
    pub days_with_snow: usize,
    pub total_observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweAnalysis {
    pub peak_swe: PeakReading,
    pub average_swe: f64,
    pub total_observations: usize,
}

/// A positive depth increase between two consecutive depth observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnowfallEvent {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiggestDay {
    pub amount: f64,
    pub date: String,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnowfallAnalysis {
    pub total_new_snow: f64,
    pub snow_days: usize,
    pub biggest_day: BiggestDay,
    pub average_per_snow_day: f64,
    pub snowfall_events: Vec<SnowfallEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub station_triplet: String,
    pub period: Period,
    pub total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow_depth_analysis: Option<SnowDepthAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swe_analysis: Option<SweAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snowfall_analysis: Option<SnowfallAnalysis>,
    pub skipped_entries: usize,
    pub measurements: Vec<MeasurementRecord>,
}

/// Result of one analysis call. Missing data is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendOutcome {
    Complete(TrendSummary),
    NoData {
        station_triplet: String,
        message: String,
    },
}

/// Round to `decimals` places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Readings of one element, in record (ascending date) order.
fn element_series<'a>(records: &'a [MeasurementRecord], element_code: &str) -> Vec<(&'a str, f64)> {
    records
        .iter()
        .filter_map(|r| r.get(element_code).map(|v| (r.date.as_str(), v)))
        .collect()
}

/// First reading holding the maximum value.
fn peak(series: &[(&str, f64)]) -> Option<(String, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for &(date, value) in series {
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((date, value)),
        }
    }
    best.map(|(date, value)| (date.to_string(), value))
}

fn mean(series: &[(&str, f64)]) -> f64 {
    series.iter().map(|(_, v)| v).sum::<f64>() / series.len() as f64
}

pub fn analyze_snow_depth(records: &[MeasurementRecord]) -> Option<SnowDepthAnalysis> {
    let depths = element_series(records, SNOW_DEPTH);
    let (date, value) = peak(&depths)?;

    Some(SnowDepthAnalysis {
        peak_depth: PeakReading {
            value: round_to(value, 1),
            date,
            unit: UNIT_INCHES,
        },
        average_depth: round_to(mean(&depths), 1),
        days_with_snow: depths.iter().filter(|(_, d)| *d > 0.0).count(),
        total_observations: depths.len(),
    })
}

pub fn analyze_swe(records: &[MeasurementRecord]) -> Option<SweAnalysis> {
    let swes = element_series(records, SNOW_WATER_EQUIVALENT);
    let (date, value) = peak(&swes)?;

    Some(SweAnalysis {
        peak_swe: PeakReading {
            value: round_to(value, 2),
            date,
            unit: UNIT_INCHES,
        },
        average_swe: round_to(mean(&swes), 2),
        total_observations: swes.len(),
    })
}

/// Depth gains between consecutive depth observations, regardless of calendar gaps.
/// Flat or falling depth never produces an event.
pub fn snowfall_events(records: &[MeasurementRecord]) -> Vec<SnowfallEvent> {
    element_series(records, SNOW_DEPTH)
        .windows(2)
        .filter_map(|pair| {
            let (_, previous) = pair[0];
            let (date, current) = pair[1];
            (current > previous).then(|| SnowfallEvent {
                date: date.to_string(),
                amount: round_to(current - previous, 1),
            })
        })
        .collect()
}

pub fn analyze_snowfall(records: &[MeasurementRecord]) -> Option<SnowfallAnalysis> {
    let events = snowfall_events(records);

    let mut biggest: Option<&SnowfallEvent> = None;
    for event in &events {
        if biggest.is_none_or(|b| event.amount > b.amount) {
            biggest = Some(event);
        }
    }
    let biggest_day = biggest.map(|b| BiggestDay {
        amount: round_to(b.amount, 1),
        date: b.date.clone(),
        unit: UNIT_INCHES,
    })?;

    let total: f64 = events.iter().map(|e| e.amount).sum();

    Some(SnowfallAnalysis {
        total_new_snow: round_to(total, 1),
        snow_days: events.len(),
        biggest_day,
        average_per_snow_day: round_to(total / events.len() as f64, 1),
        snowfall_events: events,
    })
}

/// Build the full summary for one station and period. Pure in its inputs.
pub fn summarize(
    station_triplet: &str,
    period: Period,
    records: Vec<MeasurementRecord>,
    skipped_entries: usize,
) -> TrendSummary {
    TrendSummary {
        station_triplet: station_triplet.to_string(),
        period,
        total_records: records.len(),
        snow_depth_analysis: analyze_snow_depth(&records),
        swe_analysis: analyze_swe(&records),
        snowfall_analysis: analyze_snowfall(&records),
        skipped_entries,
        measurements: records,
    }
}
