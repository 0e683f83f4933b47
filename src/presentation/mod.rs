// Presentation layer - Tool surface over HTTP
pub mod app_state;
pub mod formatting;
pub mod handlers;
pub mod tool_result;
pub mod tools;
