//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes text statistics over the MCP protocol, making them
//! available to AI assistants via stdio transport.
//!
//! The server is a presentation layer. Each `#[tool]` method delegates to
//! `textostats_core` and only handles parameter plumbing and serialization.

use std::borrow::Cow;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use textostats_core::{DEFAULT_MAX_INPUT_BYTES, ErrorResponse, RequestParams, analyze};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `text_stats` tool.
///
/// Kept as raw JSON so type mismatches produce the same validation messages
/// as out-of-range values. The advertised schema is [`RequestParams`].
#[derive(Debug, serde::Deserialize)]
#[serde(transparent)]
pub struct TextStatsParams(pub serde_json::Value);

impl schemars::JsonSchema for TextStatsParams {
    fn schema_name() -> Cow<'static, str> {
        <RequestParams as schemars::JsonSchema>::schema_name()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        <RequestParams as schemars::JsonSchema>::json_schema(generator)
    }
}

/// MCP server exposing text statistics to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    defaults: RequestParams,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with built-in request defaults and
    /// the default input limit.
    pub fn new() -> Self {
        Self::with_defaults(RequestParams::default(), Some(DEFAULT_MAX_INPUT_BYTES))
    }

    /// Create a server whose `text_stats` calls fall back to `defaults` and
    /// reject `text` longer than `max_input_bytes` (`None` disables the check).
    pub fn with_defaults(defaults: RequestParams, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            defaults,
            max_input_bytes,
        }
    }

    fn oversized(&self, params: &RequestParams) -> Option<ErrorResponse> {
        let size = params.text.as_ref().map_or(0, String::len);
        self.max_input_bytes
            .filter(|&limit| size > limit)
            .map(|limit| ErrorResponse::input_too_large(size, limit))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute descriptive statistics for a text.
    #[tool(
        description = "Compute text statistics: word and sentence counts, sentence length spread, longest words, most frequent words, and average word length. Parameters: text (required), omitWords, maxDispWords (1-50), skipFirst (1-50)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn text_stats(
        &self,
        Parameters(params): Parameters<TextStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "text_stats", "executing MCP tool");

        let params = match RequestParams::from_value(&params.0) {
            Ok(params) => params.or_defaults(&self.defaults),
            Err(err) => return self.rejected(&err),
        };
        if let Some(response) = self.oversized(&params) {
            tracing::info!(tool = "text_stats", message = %response.message, "rejected input");
            return Ok(CallToolResult::error(vec![Content::text(to_json(&response)?)]));
        }

        let request = match params.validate() {
            Ok(request) => request,
            Err(err) => return self.rejected(&err),
        };

        let report = analyze(&request);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "text_stats",
            word_count = report.word_count,
            sentence_count = report.sentence_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl ProjectServer {
    fn rejected(&self, err: &textostats_core::ParamError) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = "text_stats", error = %err, "rejected parameters");
        let response = ErrorResponse::bad_parameters(err);
        Ok(CallToolResult::error(vec![Content::text(to_json(&response)?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use text_stats to compute statistics for a text.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
