// Human-readable renderings of tool results
use crate::application::snow_data_repository::StationQuery;
use crate::domain::measurement::{
    AIR_TEMPERATURE, MeasurementRecord, PRECIPITATION, SNOW_DEPTH, SNOW_WATER_EQUIVALENT,
};
use crate::domain::station::Station;
use std::fmt::Write;

const MAX_LISTED_STATIONS: usize = 20;

/// Whole number with comma thousands separators: `11080.4` -> `11,080`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

pub fn format_station_list(stations: &[Station], query: &StationQuery) -> String {
    if stations.is_empty() {
        return "No SNOTEL stations found with the given criteria.".to_string();
    }

    let mut out = format!("Found {} SNOTEL stations", stations.len());
    match query {
        StationQuery::ByState { state, .. } => {
            let _ = write!(out, " in {}", state);
        }
        StationQuery::Nearby {
            latitude,
            longitude,
            radius_miles,
            ..
        } => {
            let _ = write!(out, " within {} miles of ({}, {})", radius_miles, latitude, longitude);
        }
        StationQuery::Network { .. } => {}
    }
    out.push_str(":\n\n");

    for station in stations.iter().take(MAX_LISTED_STATIONS) {
        let _ = writeln!(out, "• **{}** ({})", station.display_name(), station.station_triplet);
        let _ = writeln!(
            out,
            "  Location: {:.4}, {:.4}",
            station.latitude.unwrap_or(0.0),
            station.longitude.unwrap_or(0.0)
        );
        let elevation = format_thousands(station.elevation.unwrap_or(0.0));
        let _ = writeln!(out, "  Elevation: {} ft", elevation);
        if let Some(county) = station.county_name.as_deref().filter(|c| !c.is_empty()) {
            let _ = writeln!(out, "  County: {}", county);
        }
        out.push('\n');
    }

    if stations.len() > MAX_LISTED_STATIONS {
        let _ = writeln!(out, "... and {} more stations", stations.len() - MAX_LISTED_STATIONS);
    }
    out
}

pub fn format_station_info(station: &Station) -> String {
    let mut out = format!("**{}** ({})\n\n", station.display_name(), station.station_triplet);
    let _ = writeln!(
        out,
        "• **Location**: {:.4}, {:.4}",
        station.latitude.unwrap_or(0.0),
        station.longitude.unwrap_or(0.0)
    );
    let elevation = format_thousands(station.elevation.unwrap_or(0.0));
    let _ = writeln!(out, "• **Elevation**: {} feet", elevation);
    let _ = writeln!(out, "• **State**: {}", station.state.as_deref().unwrap_or(""));
    let _ = writeln!(out, "• **Network**: {}", station.network_code.as_deref().unwrap_or(""));
    if let Some(county) = station.county_name.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "• **County**: {}", county);
    }
    out
}

/// `records` must be non-empty and in ascending date order.
pub fn format_recent_conditions(
    station_triplet: &str,
    days: u32,
    records: &[MeasurementRecord],
) -> String {
    let mut out = format!("**Recent Conditions: {}**\n", station_triplet);
    let _ = writeln!(out, "Last {} days ({} records)\n", days, records.len());

    if let Some(latest) = records.last() {
        let _ = writeln!(out, "**Latest Reading ({})**:", latest.date);
        if let Some(depth) = latest.get(SNOW_DEPTH) {
            let _ = writeln!(out, "• Snow Depth: {:.1}\"", depth);
        }
        if let Some(swe) = latest.get(SNOW_WATER_EQUIVALENT) {
            let _ = writeln!(out, "• Snow Water Equivalent: {:.1}\"", swe);
        }
        if let Some(temp) = latest.get(AIR_TEMPERATURE) {
            let _ = writeln!(out, "• Temperature: {:.1}°F", temp);
        }
        if let Some(precip) = latest.get(PRECIPITATION) {
            let _ = writeln!(out, "• Recent Precipitation: {:.2}\"", precip);
        }
    }

    let depths: Vec<f64> = records.iter().filter_map(|r| r.get(SNOW_DEPTH)).collect();
    if !depths.is_empty() {
        let max = depths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = depths.iter().copied().fold(f64::INFINITY, f64::min);
        let avg = depths.iter().sum::<f64>() / depths.len() as f64;

        let _ = writeln!(out, "\n**{}-Day Snow Depth Summary**:", days);
        let _ = writeln!(out, "• Maximum: {:.1}\"", max);
        let _ = writeln!(out, "• Minimum: {:.1}\"", min);
        let _ = writeln!(out, "• Average: {:.1}\"", avg);
    }
    out
}
