use crate::game::room::{Room, ViewerIo};
use crate::protocol::{decode_client_message, ClientMessage};
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

/// Pumps frames out and viewer input in until the socket closes, then frees the viewer slot.
pub async fn handle_socket(socket: WebSocket, room: Arc<Room>, io: ViewerIo) {
    let (mut sender, mut receiver) = socket.split();
    let ViewerIo { inbound, frames } = io;

    let send_task = tokio::spawn(async move {
        loop {
            frames.wait_for_update().await;
            let Some(payload) = frames.take_latest() else {
                continue;
            };
            if sender.send(Message::Text(payload)).await.is_err() {
                tracing::debug!("viewer socket closed while sending frame");
                return;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => match decode_client_message(&text) {
                Some(ClientMessage::Input { x, y, boost }) => inbound.update_input(x, y, boost),
                Some(ClientMessage::Viewport { width, height }) => {
                    inbound.update_viewport(width, height)
                }
                Some(ClientMessage::Name { name }) => inbound.update_name(name),
                None => tracing::debug!(len = text.len(), "dropping malformed viewer message"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    room.detach_viewer();
}
