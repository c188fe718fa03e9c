//! CLI for chathub
//!
//! Subcommands:
//! - `server`: run the WebSocket server
//! - `client`: join the chat, send one message and print what comes back

use std::sync::Arc;

use chathub::config::{Settings, load_config};
use chathub::hub::{ConnectionStats, Hub, MessageType};
use chathub::transport::{Dispatcher, ServerFrame, start_websocket_server};
use chathub::utils::error::ServerError;
use chathub::utils::logging;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "chathub")]
enum Command {
    /// Start the WebSocket server
    Server,
    /// Run the example client (connects, joins, sends one message)
    Client {
        /// WebSocket server URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080")]
        url: String,
        /// Display name to join with
        #[arg(long, default_value = "Nova")]
        name: String,
        /// Chat message to send after joining
        #[arg(long, default_value = "Hallo zusammen!")]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cmd = Command::parse();

    let result = match cmd {
        Command::Server => match load_config() {
            Ok(config) => {
                logging::init(&config.logging.level);
                run_server(config).await
            }
            Err(e) => {
                logging::init("info");
                Err(e.into())
            }
        },
        Command::Client { url, name, message } => {
            logging::init("info");
            run_client(&url, &name, &message).await
        }
    };

    if let Err(e) = result {
        error!("chathub failed: {e}");
        std::process::exit(1);
    }
}

async fn run_server(config: Settings) -> Result<(), ServerError> {
    let stats = Arc::new(ConnectionStats::new());
    let hub = Arc::new(Hub::new(&config.hub.topic, stats.clone()));
    let dispatcher = Arc::new(Dispatcher::new(hub, config.hub.max_connections));

    let result = tokio::select! {
        result = start_websocket_server(config.bind_addr(), dispatcher) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
            Ok(())
        }
    };

    info!(
        active = stats.active(),
        total_joined = stats.total_joined(),
        messages = stats.messages_accepted(),
        "final statistics"
    );
    result
}

async fn run_client(url: &str, name: &str, message: &str) -> Result<(), ServerError> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let (mut ws_stream, _response) = connect_async(url).await?;

    let join = json!({ "destination": "chat.join", "sender": name });
    ws_stream
        .send(WsMessage::Text(join.to_string().into()))
        .await?;

    let send = json!({ "destination": "chat.send", "content": message });
    ws_stream
        .send(WsMessage::Text(send.to_string().into()))
        .await?;

    // print everything until our own message comes back
    while let Some(frame) = ws_stream.next().await {
        let WsMessage::Text(text) = frame? else {
            continue;
        };
        println!("{text}");
        match serde_json::from_str::<ServerFrame>(text.as_str())? {
            ServerFrame::Message { message: echoed, .. }
                if echoed.kind == MessageType::Chat
                    && echoed.sender == name
                    && echoed.content == message =>
            {
                break;
            }
            ServerFrame::Error { .. } => break,
            _ => {}
        }
    }

    let _ = ws_stream.close(None).await;
    Ok(())
}
