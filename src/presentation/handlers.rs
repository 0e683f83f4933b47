// HTTP request handlers
use crate::presentation::app_state::AppState;
use crate::presentation::tool_result::{ListToolsResponse, ToolResult};
use crate::presentation::tools::{ToolName, call_tool, catalog};
use axum::{Json, body::Bytes, extract::{Path, State}, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the available tools
pub async fn list_tools() -> Json<ListToolsResponse> {
    Json(ListToolsResponse { tools: catalog() })
}

/// Invoke a tool with a JSON arguments object. An empty body means no arguments.
pub async fn invoke_tool(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<ToolResult>) {
    let tool = match name.parse::<ToolName>() {
        Ok(tool) => tool,
        Err(message) => {
            tracing::warn!("{}", message);
            return (StatusCode::NOT_FOUND, Json(ToolResult::text(message).mark_as_error()));
        }
    };

    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(e) => {
                let message = format!("Invalid arguments for {}: {}", tool, e);
                return (StatusCode::OK, Json(ToolResult::text(message).mark_as_error()));
            }
        }
    };

    let today = chrono::Local::now().date_naive();
    let result = call_tool(&state, tool, arguments, today).await;
    if result.is_error() {
        tracing::warn!("Tool {} failed: {}", tool, result.first_text().unwrap_or_default());
    }
    (StatusCode::OK, Json(result))
}
