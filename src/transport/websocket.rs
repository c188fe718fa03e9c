//! WebSocket transport
//!
//! This file implements the WebSocket server around a `Dispatcher`.
//! Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Register each socket with the hub and spawn a write loop fed by the
//!   socket's channel
//! - Forward every text frame to the dispatcher, in arrival order
//! - Disconnect the socket from the hub when it closes, for any reason

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::transport::dispatch::Dispatcher;
use crate::transport::message::ServerFrame;
use crate::utils::error::ServerError;

pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}

pub async fn start_websocket_server(
    addr: String,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), ServerError> {
    let listener = bind(&addr).await?;
    serve(listener, dispatcher).await
}

/// Accept connections on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> Result<(), ServerError> {
    if let Ok(local) = listener.local_addr() {
        info!("WebSocket server listening on ws://{local}");
    }

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, peer, dispatcher).await {
                        warn!(peer = %peer, error = %e, "connection closed with error");
                    }
                });
            }
            Err(e) => warn!(error = %e, "failed to accept connection"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), ServerError> {
    let mut ws_stream = accept_async(stream).await?;
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    let Some(client_id) = dispatcher.open(tx) else {
        ws_stream
            .send(ServerFrame::error("server is full").to_ws()?)
            .await?;
        ws_stream.close(None).await?;
        return Ok(());
    };
    debug!(connection = %client_id, peer = %peer, "websocket handshake complete");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // hub -> client; ends once the dispatcher drops this socket's sender
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = ws_sender.send(msg).await {
                debug!(connection = %client_id, error = %e, "send loop failed");
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(WsMessage::Text(text)) => dispatcher.handle_text(&client_id, text.as_str()),
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(connection = %client_id, error = %e, "read loop failed");
                break;
            }
        }
    }

    dispatcher.close(&client_id);
    let _ = writer.await;
    Ok(())
}
