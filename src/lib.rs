//! Ranger MCP Server Library
//!
//! A Model Context Protocol (MCP) server whose every tool answers "Ranger！".

pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod ranger;

pub use config::Config;
pub use error::{RangerError, Result};
