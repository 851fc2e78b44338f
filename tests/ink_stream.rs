use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use futures::{SinkExt, StreamExt};
use scrawled::ink_stream::InkStream;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

async fn start_server(stream: Arc<InkStream>) -> std::net::SocketAddr {
    let app = stream.router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

#[tokio::test]
async fn a_finished_stroke_comes_back_as_a_png_capture() {
    let stream = Arc::new(InkStream::new(80, 40));
    let addr = start_server(stream).await;
    let url = format!("ws://{addr}/ink");
    let (mut ws, _) = connect_async(url).await.unwrap();

    for frame in [
        r#"{"ink":"start","x":10.0,"y":20.0}"#,
        r#"{"ink":"move","x":40.0,"y":20.0}"#,
        r#"{"ink":"end"}"#,
    ] {
        ws.send(WsMessage::Text(frame.into())).await.unwrap();
    }

    let msg = ws.next().await.unwrap().unwrap();
    let WsMessage::Text(text) = msg else {
        panic!("expected text frame")
    };
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["event"], "captured");
    let uri = value["image"].as_str().unwrap();
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = B64.decode(payload).unwrap();
    let raster = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!((raster.width(), raster.height()), (160, 80));
}

#[tokio::test]
async fn export_after_reset_reports_empty() {
    let stream = Arc::new(InkStream::new(80, 40));
    let addr = start_server(stream).await;
    let url = format!("ws://{addr}/ink");
    let (mut ws, _) = connect_async(url).await.unwrap();

    for frame in [
        r#"{"ink":"start","x":10.0,"y":20.0}"#,
        r#"{"ink":"move","x":40.0,"y":20.0}"#,
        r#"{"ink":"end"}"#,
    ] {
        ws.send(WsMessage::Text(frame.into())).await.unwrap();
    }
    // Drain the capture from the stroke end.
    let _ = ws.next().await.unwrap().unwrap();

    ws.send(WsMessage::Text(r#"{"ink":"reset"}"#.into()))
        .await
        .unwrap();
    ws.send(WsMessage::Text(r#"{"ink":"export"}"#.into()))
        .await
        .unwrap();

    let msg = ws.next().await.unwrap().unwrap();
    let WsMessage::Text(text) = msg else {
        panic!("expected text frame")
    };
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["event"], "empty");
}

#[tokio::test]
async fn unknown_frames_are_ignored() {
    let stream = Arc::new(InkStream::new(80, 40));
    let addr = start_server(stream).await;
    let url = format!("ws://{addr}/ink");
    let (mut ws, _) = connect_async(url).await.unwrap();

    ws.send(WsMessage::Text("not json".into())).await.unwrap();
    ws.send(WsMessage::Text(r#"{"ink":"wiggle"}"#.into()))
        .await
        .unwrap();
    // The session is still alive and drawing still works.
    for frame in [
        r#"{"ink":"start","x":10.0,"y":20.0}"#,
        r#"{"ink":"move","x":40.0,"y":20.0}"#,
        r#"{"ink":"export"}"#,
    ] {
        ws.send(WsMessage::Text(frame.into())).await.unwrap();
    }
    let msg = ws.next().await.unwrap().unwrap();
    let WsMessage::Text(text) = msg else {
        panic!("expected text frame")
    };
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["event"], "captured");
}
