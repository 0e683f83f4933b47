// Tool catalog, argument decoding and dispatch
use crate::application::error::ToolError;
use crate::application::measurement_service::RecentConditions;
use crate::application::snow_data_repository::{Duration, StationQuery};
use crate::domain::station::DEFAULT_NETWORK;
use crate::presentation::app_state::AppState;
use crate::presentation::formatting::{
    format_recent_conditions, format_station_info, format_station_list,
};
use crate::presentation::tool_result::{ToolDescriptor, ToolResult};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

const DEFAULT_RADIUS_MILES: f64 = 50.0;
const DEFAULT_RECENT_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    FindStations,
    StationInfo,
    StationData,
    RecentConditions,
    SnowpackTrends,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::FindStations,
        ToolName::StationInfo,
        ToolName::StationData,
        ToolName::RecentConditions,
        ToolName::SnowpackTrends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::FindStations => "find_snotel_stations",
            ToolName::StationInfo => "get_station_info",
            ToolName::StationData => "get_station_data",
            ToolName::RecentConditions => "get_recent_conditions",
            ToolName::SnowpackTrends => "analyze_snowpack_trends",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ToolName::FindStations => "Find SNOTEL stations by state or by location and radius.",
            ToolName::StationInfo => "Get detailed information about a specific SNOTEL station.",
            ToolName::StationData => "Get raw snow and weather data from a SNOTEL station as JSON.",
            ToolName::RecentConditions => "Get recent snow conditions from a station.",
            ToolName::SnowpackTrends => {
                "Analyze snowpack trends: peak and average depth and SWE, snowfall events, \
                 and daily measurements, as JSON."
            }
        }
    }

    fn input_schema(&self) -> Value {
        let triplet = json!({
            "type": "string",
            "description": "Station identifier, e.g. '713:CO:SNTL'"
        });
        let date = json!({"type": "string", "description": "Date as YYYY-MM-DD"});
        match self {
            ToolName::FindStations => json!({
                "type": "object",
                "properties": {
                    "state": {"type": "string", "description": "State abbreviation, e.g. 'CO'"},
                    "latitude": {"type": "number"},
                    "longitude": {"type": "number"},
                    "radius_miles": {"type": "number", "default": DEFAULT_RADIUS_MILES},
                    "network": {"type": "string", "default": DEFAULT_NETWORK}
                }
            }),
            ToolName::StationInfo => json!({
                "type": "object",
                "properties": {"station_triplet": triplet},
                "required": ["station_triplet"]
            }),
            ToolName::StationData => json!({
                "type": "object",
                "properties": {
                    "station_triplet": triplet,
                    "start_date": date,
                    "end_date": date,
                    "elements": {"type": "array", "items": {"type": "string"}},
                    "duration": {"type": "string", "enum": ["DAILY", "HOURLY", "MONTHLY"]}
                },
                "required": ["station_triplet", "start_date", "end_date"]
            }),
            ToolName::RecentConditions => json!({
                "type": "object",
                "properties": {
                    "station_triplet": triplet,
                    "days": {"type": "integer", "minimum": 1, "default": DEFAULT_RECENT_DAYS}
                },
                "required": ["station_triplet"]
            }),
            ToolName::SnowpackTrends => json!({
                "type": "object",
                "properties": {"station_triplet": triplet, "start_date": date, "end_date": date},
                "required": ["station_triplet", "start_date", "end_date"]
            }),
        }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.as_str(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("Unknown tool: {}", s))
    }
}

pub fn catalog() -> Vec<ToolDescriptor> {
    ToolName::ALL.iter().map(ToolName::descriptor).collect()
}

#[derive(Debug, Deserialize)]
struct FindStationsArgs {
    state: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius_miles: Option<f64>,
    network: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StationInfoArgs {
    station_triplet: String,
}

#[derive(Debug, Deserialize)]
struct StationDataArgs {
    station_triplet: String,
    start_date: String,
    end_date: String,
    elements: Option<Vec<String>>,
    duration: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct RecentConditionsArgs {
    station_triplet: String,
    days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TrendArgs {
    station_triplet: String,
    start_date: String,
    end_date: String,
}

fn decode<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_argument(format!("Invalid arguments for {}: {}", tool, e)))
}

fn text_error(action: &str, err: ToolError) -> ToolResult {
    ToolResult::text(format!("Error {}: {}", action, err.message)).mark_as_error()
}

fn json_error(action: &str, err: ToolError) -> ToolResult {
    ToolResult::json(json!({
        "error": format!("Error {}: {}", action, err.message),
        "kind": err.kind,
    }))
    .mark_as_error()
}

/// Run one tool. Every failure comes back as an error-flagged result.
pub async fn call_tool(
    state: &AppState,
    tool: ToolName,
    arguments: Value,
    today: NaiveDate,
) -> ToolResult {
    tracing::info!("Tool call: {}", tool);
    match tool {
        ToolName::FindStations => find_stations(state, arguments)
            .await
            .unwrap_or_else(|e| text_error("finding stations", e)),
        ToolName::StationInfo => station_info(state, arguments)
            .await
            .unwrap_or_else(|e| text_error("getting station info", e)),
        ToolName::StationData => station_data(state, arguments)
            .await
            .unwrap_or_else(|e| text_error("getting station data", e)),
        ToolName::RecentConditions => recent_conditions(state, arguments, today)
            .await
            .unwrap_or_else(|e| text_error("getting recent conditions", e)),
        ToolName::SnowpackTrends => snowpack_trends(state, arguments)
            .await
            .unwrap_or_else(|e| json_error("analyzing snowpack trends", e)),
    }
}

async fn find_stations(state: &AppState, arguments: Value) -> Result<ToolResult, ToolError> {
    let args: FindStationsArgs = decode(ToolName::FindStations, arguments)?;
    let network = args.network.as_deref().unwrap_or(DEFAULT_NETWORK);
    let query = StationQuery::select(
        args.state.as_deref(),
        args.latitude,
        args.longitude,
        Some(args.radius_miles.unwrap_or(DEFAULT_RADIUS_MILES)),
        network,
    );

    let stations = state.station_service.find_stations(&query).await?;
    Ok(ToolResult::text(format_station_list(&stations, &query)))
}

async fn station_info(state: &AppState, arguments: Value) -> Result<ToolResult, ToolError> {
    let args: StationInfoArgs = decode(ToolName::StationInfo, arguments)?;

    let text = match state.station_service.station_info(&args.station_triplet).await? {
        Some(station) => format_station_info(&station),
        None => format!("Station {} not found", args.station_triplet),
    };
    Ok(ToolResult::text(text))
}

async fn station_data(state: &AppState, arguments: Value) -> Result<ToolResult, ToolError> {
    let args: StationDataArgs = decode(ToolName::StationData, arguments)?;

    let data = state
        .measurement_service
        .station_data(
            &args.station_triplet,
            &args.start_date,
            &args.end_date,
            args.elements,
            args.duration,
        )
        .await?;

    if data.is_empty() {
        return Ok(ToolResult::text(format!(
            "No data found for {} from {} to {}",
            args.station_triplet, args.start_date, args.end_date
        )));
    }
    Ok(ToolResult::json(Value::Array(data)))
}

async fn recent_conditions(
    state: &AppState,
    arguments: Value,
    today: NaiveDate,
) -> Result<ToolResult, ToolError> {
    let args: RecentConditionsArgs = decode(ToolName::RecentConditions, arguments)?;
    let days = args.days.unwrap_or(DEFAULT_RECENT_DAYS);

    let triplet = args.station_triplet.as_str();
    let text = match state
        .measurement_service
        .recent_conditions(triplet, days, today)
        .await?
    {
        RecentConditions::NoData => format!("No recent data available for {}", triplet),
        RecentConditions::NoMeasurements => format!("No measurements found for {}", triplet),
        RecentConditions::Available(records) => format_recent_conditions(triplet, days, &records),
    };
    Ok(ToolResult::text(text))
}

async fn snowpack_trends(state: &AppState, arguments: Value) -> Result<ToolResult, ToolError> {
    let args: TrendArgs = decode(ToolName::SnowpackTrends, arguments)?;

    let outcome = state
        .trend_service
        .analyze(&args.station_triplet, &args.start_date, &args.end_date)
        .await?;
    let value = serde_json::to_value(&outcome)
        .map_err(|e| ToolError::internal(format!("Failed to encode trend summary: {}", e)))?;
    Ok(ToolResult::json(value))
}
