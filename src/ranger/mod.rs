//! Ranger tools
//!
//! Argument shapes and the handlers behind each registered tool.

pub mod args;
pub mod responder;
