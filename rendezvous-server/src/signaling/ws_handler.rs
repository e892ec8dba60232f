use crate::error::ClientRequestError;
use crate::signaling::SignalingService;
use crate::transport::TransportEvent;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use rendezvous_core::{ClientMessage, ConnectionId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

/// Decodes one text frame into a relay event.
pub fn decode_frame(text: &str) -> Result<TransportEvent, ClientRequestError> {
    let msg: ClientMessage = serde_json::from_str(text)?;
    Ok(msg.into())
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let connection = ConnectionId::new();
    info!("New WebSocket connection: {}", connection);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection, tx);
    service.dispatch(connection, TransportEvent::Connected).await;

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    // Frames are dispatched inline: every event read from this socket has
    // been applied before `Disconnected` is.
    loop {
        let frame = tokio::select! {
            _ = &mut send_task => break,
            frame = receiver.next() => frame,
        };

        let Some(Ok(msg)) = frame else {
            break;
        };
        match msg {
            Message::Text(text) => match decode_frame(text.as_str()) {
                Ok(event) => service.dispatch(connection, event).await,
                Err(e) => {
                    warn!("Invalid frame from {}: {}", connection, e);
                    service.reject(connection, &e);
                }
            },
            Message::Binary(_) => debug!("Binary frame from {} ignored", connection),
            Message::Close(_) => break,
            _ => {}
        }
    }
    send_task.abort();

    service.dispatch(connection, TransportEvent::Disconnected).await;
    service.remove_connection(&connection);
    info!("WebSocket disconnected: {}", connection);
}
