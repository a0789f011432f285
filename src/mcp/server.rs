//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{McpError, Result};
use crate::logging::LogContext;
use crate::mcp::tools::ToolRegistry;
use crate::mcp::types::*;

/// MCP Server info
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Ranger
pub struct McpServer {
    /// Name reported to clients
    name: String,

    /// Tool registry
    registry: ToolRegistry,

    /// Logging handle passed to every tool call
    log: LogContext,

    /// Whether initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(config: &Config, registry: ToolRegistry, log: LogContext) -> Self {
        Self {
            name: config.server_name.clone(),
            registry,
            log,
            initialized: false,
        }
    }

    /// Whether the client has sent `notifications/initialized`
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server on stdio
    pub async fn run_stdio(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        self.run(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC until the reader reaches EOF.
    ///
    /// Lines are read as raw bytes so that invalid UTF-8 gets a parse error
    /// reply instead of ending the session.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(line),
                Err(e) => {
                    warn!(name = %self.log.name(), error = %e, "message is not UTF-8");
                    Some(JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(e.to_string()),
                    ))
                }
            };

            if let Some(response) = response {
                let mut response_str = serde_json::to_string(&response)?;
                response_str.push('\n');
                writer.write_all(response_str.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        debug!(name = %self.log.name(), "input closed");
        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    pub fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!(name = %self.log.name(), error = %e, "unreadable message");
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(req) => req,
            Err(e) => {
                warn!(name = %self.log.name(), error = %e, "invalid request");
                let id = value
                    .get("id")
                    .and_then(|id| serde_json::from_value(id.clone()).ok());
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(e.to_string()),
                ));
            }
        };

        if request.is_notification() {
            if request.method == methods::INITIALIZED {
                self.initialized = true;
            }
            debug!(name = %self.log.name(), method = %request.method, "notification");
            return None;
        }

        let id = request.response_id();
        let result = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(&request),
            methods::PING => Ok(serde_json::json!({})),
            methods::LIST_TOOLS => self.handle_list_tools(),
            methods::CALL_TOOL => self.handle_call_tool(&request),
            _ => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(&request.method),
                ))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params: InitializeParams = request
            .params
            .clone()
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let client = params.client_info.as_ref().map(|c| c.name.as_str());
        info!(
            name = %self.log.name(),
            client = client,
            protocol_version = params.negotiated_version(),
            "client connected"
        );

        let result = InitializeResult {
            protocol_version: params.negotiated_version().to_string(),
            server_info: ServerInfo {
                name: self.name.clone(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.registry.list(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request. Bad params become an error result, not a
    /// JSON-RPC error.
    fn handle_call_tool(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params: std::result::Result<CallToolParams, McpError> = match request.params.as_ref()
        {
            Some(p) => serde_json::from_value(p.clone()).map_err(|e| McpError::InvalidArguments {
                message: e.to_string(),
            }),
            None => Err(McpError::InvalidArguments {
                message: "missing tool parameters".to_string(),
            }),
        };

        let result = match params {
            Ok(params) => self.registry.call(&self.log, &params.name, params.arguments),
            Err(e) => CallToolResult::error(e.to_string()),
        };

        Ok(serde_json::to_value(result)?)
    }
}
