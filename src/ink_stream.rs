use axum::{
    Router,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    routing::get,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::surface::{DrawingSurface, Point};

/// One pointer event in surface-local logical coordinates. Clients unify
/// mouse and touch input into this shape and track only the primary contact
/// point; the server never sees raw device events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ink", rename_all = "lowercase")]
pub enum InkEvent {
    Start { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    End,
    Reset,
    Export,
}

/// WebSocket endpoint for freehand drawing.
///
/// Each connection owns a private [`DrawingSurface`]. Incoming text frames
/// carry [`InkEvent`]s; when a stroke ends with content on the surface the
/// server replies with a `captured` frame holding the PNG data URI, the
/// same moment the page would hand the bitmap to the acquisition layer.
pub struct InkStream {
    width: u32,
    height: u32,
}

impl InkStream {
    /// Create an endpoint whose surfaces have the given logical size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build a router exposing the ink WebSocket endpoint.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new().route(
            "/ink",
            get(move |ws: WebSocketUpgrade| {
                let stream = self.clone();
                async move { ws.on_upgrade(move |sock| stream.clone().session(sock)) }
            }),
        )
    }

    async fn session(self: Arc<Self>, mut socket: WebSocket) {
        let mut surface = DrawingSurface::new(self.width, self.height);
        while let Some(Ok(msg)) = socket.next().await {
            let Message::Text(text) = msg else { continue };
            let event = match serde_json::from_str::<InkEvent>(&text) {
                Ok(event) => event,
                Err(e) => {
                    warn!(%text, error = %e, "unrecognized ink frame");
                    continue;
                }
            };
            if let Some(reply) = apply(&mut surface, event) {
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Advance the stroke state machine by one event.
///
/// Side effects happen only on transitions: `Move` commits a segment,
/// `Reset` repaints. Returns the frame to send back, if any.
pub fn apply(surface: &mut DrawingSurface, event: InkEvent) -> Option<String> {
    match event {
        InkEvent::Start { x, y } => {
            surface.start(Point { x, y });
            None
        }
        InkEvent::Move { x, y } => {
            surface.extend(Point { x, y });
            None
        }
        InkEvent::End => {
            surface.end();
            surface.has_content().then(|| captured_frame(surface))
        }
        InkEvent::Reset => {
            surface.reset();
            None
        }
        InkEvent::Export => Some(if surface.has_content() {
            captured_frame(surface)
        } else {
            json!({"event": "empty"}).to_string()
        }),
    }
}

fn captured_frame(surface: &DrawingSurface) -> String {
    json!({"event": "captured", "image": surface.export_bitmap().to_uri()}).to_string()
}
