// Measurement domain model and normalization of AWDB per-element series
use serde::Serialize;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

pub const SNOW_DEPTH: &str = "SNWD";
pub const SNOW_WATER_EQUIVALENT: &str = "WTEQ";
pub const AIR_TEMPERATURE: &str = "TOBS";
pub const PRECIPITATION: &str = "PREC";

/// Elements requested when the caller does not name any.
pub const DEFAULT_ELEMENTS: [&str; 4] = [
    SNOW_DEPTH,
    SNOW_WATER_EQUIVALENT,
    AIR_TEMPERATURE,
    PRECIPITATION,
];

/// One point of one element's series. `value` is `None` for an explicit upstream null.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementSeries {
    pub element_code: String,
    pub observations: Vec<RawObservation>,
}

/// All element values observed on one date. Elements without a value are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl MeasurementRecord {
    pub fn get(&self, element_code: &str) -> Option<f64> {
        self.values.get(element_code).copied()
    }
}

/// Element series for one station, plus the number of upstream entries dropped while reading them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSeries {
    pub series: Vec<ElementSeries>,
    pub skipped: usize,
    pub found: bool,
}

/// Pull the element series for `triplet` out of an AWDB `data` response.
///
/// Station entries for other triplets are ignored. Element groups without an
/// element code, and values without a date or with a non-numeric value, are
/// skipped and counted in [`StationSeries::skipped`].
pub fn extract_station_series(stations: &[Value], triplet: &str) -> StationSeries {
    let mut out = StationSeries::default();

    for station in stations {
        if station.get("stationTriplet").and_then(Value::as_str) != Some(triplet) {
            continue;
        }
        out.found = true;

        let Some(groups) = station.get("data").and_then(Value::as_array) else {
            continue;
        };

        for group in groups {
            let code = group
                .get("stationElement")
                .and_then(|e| e.get("elementCode"))
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty());

            let Some(code) = code else {
                out.skipped += 1;
                continue;
            };

            let mut observations = Vec::new();
            for raw in group.get("values").and_then(Value::as_array).into_iter().flatten() {
                match parse_observation(raw) {
                    Some(obs) => observations.push(obs),
                    None => out.skipped += 1,
                }
            }

            out.series.push(ElementSeries {
                element_code: code.to_string(),
                observations,
            });
        }
    }

    out
}

fn parse_observation(raw: &Value) -> Option<RawObservation> {
    let date = raw.get("date").and_then(Value::as_str)?;
    let value = match raw.get("value") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.as_f64()?),
        Some(_) => return None,
    };
    Some(RawObservation {
        date: date.to_string(),
        value,
    })
}

/// Align per-element series into one record per distinct date, ascending.
///
/// Dates compare lexically, so they must be fixed-width and zero-padded
/// (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM`). When a date repeats for an element,
/// the first value encountered wins, even if it is null.
pub fn normalize(series: &[ElementSeries]) -> Vec<MeasurementRecord> {
    let mut by_element: BTreeMap<&str, BTreeMap<&str, Option<f64>>> = BTreeMap::new();
    let mut dates: BTreeSet<&str> = BTreeSet::new();

    for element in series {
        let values = by_element.entry(element.element_code.as_str()).or_default();
        for obs in &element.observations {
            dates.insert(obs.date.as_str());
            if let Entry::Vacant(slot) = values.entry(obs.date.as_str()) {
                slot.insert(obs.value);
            }
        }
    }

    dates
        .into_iter()
        .map(|date| {
            let values = by_element
                .iter()
                .filter_map(|(code, values)| {
                    values
                        .get(date)
                        .copied()
                        .flatten()
                        .map(|v| (code.to_string(), v))
                })
                .collect();
            MeasurementRecord {
                date: date.to_string(),
                values,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(code: &str, points: &[(&str, Option<f64>)]) -> ElementSeries {
        ElementSeries {
            element_code: code.to_string(),
            observations: points
                .iter()
                .map(|(date, value)| RawObservation {
                    date: date.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_aligns_dates_across_elements() {
        let input = vec![
            series(SNOW_DEPTH, &[("2024-01-02", Some(14.0)), ("2024-01-01", Some(10.0))]),
            series(SNOW_WATER_EQUIVALENT, &[("2024-01-01", Some(2.5)), ("2024-01-03", Some(2.7))]),
        ];

        let records = normalize(&input);
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);

        assert_eq!(records[0].get(SNOW_DEPTH), Some(10.0));
        assert_eq!(records[0].get(SNOW_WATER_EQUIVALENT), Some(2.5));
        assert_eq!(records[1].get(SNOW_WATER_EQUIVALENT), None);
        assert_eq!(records[2].get(SNOW_DEPTH), None);
    }

    #[test]
    fn test_normalize_first_match_wins_on_duplicate_dates() {
        let input = vec![series(
            SNOW_DEPTH,
            &[("2024-01-01", Some(10.0)), ("2024-01-01", Some(99.0))],
        )];

        let records = normalize(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(SNOW_DEPTH), Some(10.0));
    }

    #[test]
    fn test_normalize_leading_null_still_wins() {
        let input = vec![series(SNOW_DEPTH, &[("2024-01-01", None), ("2024-01-01", Some(5.0))])];

        let records = normalize(&input);
        assert_eq!(records.len(), 1);
        assert!(records[0].values.is_empty());
    }

    #[test]
    fn test_normalize_null_is_absent() {
        let input = vec![
            series(SNOW_DEPTH, &[("2024-01-01", None)]),
            series(AIR_TEMPERATURE, &[("2024-01-01", Some(28.4))]),
        ];

        let records = normalize(&input);
        assert!(!records[0].values.contains_key(SNOW_DEPTH));
        assert_eq!(records[0].get(AIR_TEMPERATURE), Some(28.4));

        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json, json!({"date": "2024-01-01", "TOBS": 28.4}));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = vec![
            series(SNOW_DEPTH, &[("2024-01-03", Some(3.0)), ("2024-01-01", Some(1.0))]),
            series(PRECIPITATION, &[("2024-01-02", Some(0.4))]),
        ];
        assert_eq!(normalize(&input), normalize(&input));
    }

    #[test]
    fn test_extract_station_series_filters_by_triplet_and_skips_malformed() {
        let response = vec![
            json!({
                "stationTriplet": "713:CO:SNTL",
                "data": [
                    {
                        "stationElement": {"elementCode": "SNWD"},
                        "values": [
                            {"date": "2024-01-01", "value": 45},
                            {"value": 12},
                            {"date": "2024-01-02", "value": "n/a"},
                            {"date": "2024-01-03", "value": null}
                        ]
                    },
                    {"stationElement": {}, "values": [{"date": "2024-01-01", "value": 1}]},
                    {"values": []}
                ]
            }),
            json!({
                "stationTriplet": "380:CO:SNTL",
                "data": [{"stationElement": {"elementCode": "WTEQ"}, "values": []}]
            }),
        ];

        let extracted = extract_station_series(&response, "713:CO:SNTL");
        assert!(extracted.found);
        assert_eq!(extracted.skipped, 4);
        assert_eq!(extracted.series.len(), 1);
        assert_eq!(
            extracted.series[0].observations,
            vec![
                RawObservation {
                    date: "2024-01-01".into(),
                    value: Some(45.0),
                },
                RawObservation {
                    date: "2024-01-03".into(),
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn test_extract_station_series_unknown_station_is_empty() {
        let response = vec![json!({"stationTriplet": "380:CO:SNTL", "data": []})];

        let extracted = extract_station_series(&response, "713:CO:SNTL");
        assert!(!extracted.found);
        assert!(extracted.series.is_empty());
        assert!(normalize(&extracted.series).is_empty());
    }
}
