//! Tool handlers
//!
//! Every handler logs exactly one INFO record and answers with some form of
//! [`RANGER`]. Only `option_type` ever influences the reply.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::logging::LogContext;
use crate::mcp::types::CallToolResult;
use crate::ranger::args::{self, AnyRequestArgs, ArgValue, InputArgs, OptionsArgs, ParamsArgs};

/// The reply text. The exclamation mark is U+FF01 (full-width).
pub const RANGER: &str = "Ranger！";

/// Body of the JSON-flavoured reply
#[derive(Debug, Clone, Serialize)]
pub struct JsonReply {
    pub response: &'static str,
    pub timestamp: DateTime<Local>,
}

impl JsonReply {
    pub fn now() -> Self {
        Self {
            response: RANGER,
            timestamp: Local::now(),
        }
    }

    fn render(&self) -> String {
        // A struct of a str and a timestamp cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| RANGER.to_string())
    }
}

/// Reply variants selectable through `ranger_with_options`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStyle {
    Simple,
    Json,
    Extended,
}

impl ReplyStyle {
    /// Map an option string to a style; unknown values mean `Simple`
    pub fn from_option(option: &str) -> Self {
        match option {
            "json" => ReplyStyle::Json,
            "extended" => ReplyStyle::Extended,
            _ => ReplyStyle::Simple,
        }
    }

    /// Render the reply text for this style
    pub fn render(self) -> String {
        match self {
            ReplyStyle::Simple => RANGER.to_string(),
            ReplyStyle::Json => JsonReply::now().render(),
            ReplyStyle::Extended => [RANGER; 3].join(" "),
        }
    }
}

/// `ranger`: replies with the plain text
pub fn ranger(log: &LogContext, _args: Value) -> CallToolResult {
    info!(name = %log.name(), "ranger function was called");
    CallToolResult::text(RANGER)
}

/// `ranger_with_input`: logs the input, ignores it otherwise
pub fn ranger_with_input(log: &LogContext, args: Value) -> CallToolResult {
    let args: InputArgs = args::decode(args);
    info!(
        name = %log.name(),
        input = args.input_text.as_deref(),
        "ranger_with_input function was called"
    );
    CallToolResult::text(RANGER)
}

/// `ranger_json`: replies with `{"response": ..., "timestamp": ...}`
pub fn ranger_json(log: &LogContext, _args: Value) -> CallToolResult {
    info!(name = %log.name(), "ranger_json function was called");
    CallToolResult::text(ReplyStyle::Json.render())
}

/// `ranger_with_options`: the only handler whose reply depends on its input
pub fn ranger_with_options(log: &LogContext, args: Value) -> CallToolResult {
    let args: OptionsArgs = args::decode(args);
    info!(
        name = %log.name(),
        option = args.option_type.as_deref(),
        "ranger_with_options function was called"
    );

    let style = args
        .option_type
        .as_deref()
        .map(ReplyStyle::from_option)
        .unwrap_or(ReplyStyle::Simple);
    CallToolResult::text(style.render())
}

/// `ranger_with_params`: logs all three parameters
pub fn ranger_with_params(log: &LogContext, args: Value) -> CallToolResult {
    let args: ParamsArgs = args::decode(args);
    let param3 = args.param3.map(ArgValue::Map).unwrap_or(ArgValue::Null);
    info!(
        name = %log.name(),
        param1 = args.param1.as_deref(),
        param2 = args.param2,
        param3 = %param3,
        "ranger_with_params was called"
    );
    CallToolResult::text(RANGER)
}

/// `any_request`: accepts a request string plus anything else
pub fn any_request(log: &LogContext, args: Value) -> CallToolResult {
    let args: AnyRequestArgs = args::decode(args);
    let extra = ArgValue::Map(args.extra);
    info!(
        name = %log.name(),
        request = args.request.as_deref(),
        args = %extra,
        "any_request was called"
    );
    CallToolResult::text(RANGER)
}
