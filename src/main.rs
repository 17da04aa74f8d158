//! CLI for display-board
//!
//! Subcommands:
//! - `serve`: run the HTTP and WebSocket servers
//! - `watch`: show the board in the terminal as a live viewer

use clap::Parser;
use display_board::board::Board;
use display_board::client::run_watch;
use display_board::config::load_config;
use display_board::hub::Hub;
use display_board::transport::http::start_http_server;
use display_board::transport::websocket::start_websocket_server;
use display_board::utils::error::BoardError;
use display_board::utils::logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "display-board")]
enum Command {
    /// Start the HTTP and WebSocket servers
    Serve,
    /// Show the board in this terminal
    Watch {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8081")]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.logging.level);

    let result = match cmd {
        Command::Serve => run_server(config).await,
        Command::Watch { url } => run_watch(&url, &config.board).await,
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_server(config: display_board::config::Settings) -> Result<(), BoardError> {
    let board = Board::with_json(Hub::spawn());

    let http = start_http_server(config.server.http_addr(), board.clone(), config.clone());
    let ws = start_websocket_server(config.server.ws_addr(), board, config.clone());

    tokio::select! {
        res = http => {
            res?;
            error!("HTTP server exited unexpectedly.");
        }
        res = ws => {
            res?;
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
