use std::process;

mod cli;
mod doctor;
mod exit_codes;

use clap::CommandFactory;
use cli::{Cli, Commands};
use exit_codes::{EXIT_SUCCESS, EXIT_WARNING};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help - avoid expensive initialization
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        process::exit(EXIT_SUCCESS);
    }

    use tracing::Level;

    // In MCP mode stdout belongs to the protocol, so logs must go elsewhere
    use is_terminal::IsTerminal;
    let is_mcp_mode =
        matches!(cli.command, Some(Commands::Serve)) && !std::io::stdin().is_terminal();

    let log_level = if is_mcp_mode {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    if is_mcp_mode {
        // In MCP mode, write logs to .wikiwarden/log for debugging
        use std::fs;
        use std::path::PathBuf;

        let log_dir = if let Some(home) = dirs::home_dir() {
            home.join(".wikiwarden")
        } else {
            PathBuf::from(".wikiwarden")
        };

        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create log directory: {e}");
        }

        let log_filename =
            std::env::var("WIKIWARDEN_LOG_FILE").unwrap_or_else(|_| "mcp.log".to_string());
        let log_file = log_dir.join(log_filename);

        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_writer(file)
                    .with_max_level(log_level)
                    .with_ansi(false)
                    .init();
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_max_level(log_level)
                    .init();
                tracing::warn!("Failed to open log file, using stderr: {}", e);
            }
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();
    }

    let exit_code = match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Starting MCP server");
            run_server().await
        }
        Some(Commands::Doctor) => {
            tracing::info!("Running diagnostics");
            doctor::run_diagnostics().await
        }
        None => {
            // This case is handled early above for performance
            unreachable!()
        }
    };

    process::exit(exit_code);
}

async fn run_server() -> i32 {
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use tokio_util::sync::CancellationToken;
    use wikiwarden::{WardenServer, WikiConfig};

    let config = WikiConfig::from_env();
    let server = match WardenServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to create MCP server: {}", e);
            return EXIT_WARNING;
        }
    };

    tracing::info!("MCP server initialized for {}", config.api_url);

    // Set up cancellation token
    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");

        tracing::info!("Shutdown signal received");
        ct_clone.cancel();
    });

    // Start the rmcp SDK server with stdio transport
    match serve_server(server, stdio()).await {
        Ok(_running_service) => {
            tracing::info!("MCP server started successfully");

            ct.cancelled().await;

            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_WARNING
        }
    }
}
