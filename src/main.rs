//! Ranger MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server that responds "Ranger！" to any
//! request, served over stdio.

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ranger_mcp_server::config::Config;
use ranger_mcp_server::error::Result;
use ranger_mcp_server::logging;
use ranger_mcp_server::mcp::server::McpServer;
use ranger_mcp_server::mcp::tools::ToolRegistry;

/// Ranger MCP Server
#[derive(Parser)]
#[command(name = "ranger-mcp-server")]
#[command(author, version, about = "Ranger MCP Server - responds \"Ranger!\" to everything")]
struct Cli {
    /// Log filter directives (overrides RANGER_LOG)
    #[arg(long)]
    log_filter: Option<String>,

    /// Server name reported to clients (overrides RANGER_SERVER_NAME)
    #[arg(long)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tool definitions as JSON and exit
    Tools,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Some(Commands::Tools) => print_tools(),
        None => serve(config).await,
    };

    // stdin is read on a blocking thread that would otherwise hold the
    // runtime open after an interrupt.
    std::process::exit(code);
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::new()?;

    if let Some(filter) = &cli.log_filter {
        config = config.with_log_filter(filter);
    }
    if let Some(name) = &cli.name {
        config = config.with_server_name(name);
    }
    config.validate()?;

    Ok(config)
}

fn print_tools() -> i32 {
    match serde_json::to_string_pretty(&ToolRegistry::ranger().list()) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn serve(config: Config) -> i32 {
    let log = match logging::init(&config) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Failed to start server: {}", e);
            return 1;
        }
    };

    info!(name = %log.name(), "Starting Ranger MCP server");
    eprintln!("MCP server that responds 'Ranger!' to everything has started");

    let mut server = McpServer::new(&config, ToolRegistry::ranger(), log.clone());

    tokio::select! {
        result = server.run_stdio() => match result {
            Ok(()) => {
                info!(name = %log.name(), "Input closed, server exiting");
                0
            }
            Err(e) => {
                error!(name = %log.name(), "Failed to start server: {}", e);
                1
            }
        },
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => {
                info!(name = %log.name(), "Server stopped by user");
                eprintln!("Shutting down Ranger MCP server");
                0
            }
            Err(e) => {
                error!(name = %log.name(), "Failed to start server: {}", e);
                1
            }
        },
    }
}
