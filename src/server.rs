use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::analyzer::Analyzer;
use crate::checkout::CheckoutClient;
use crate::ink_stream::InkStream;
use crate::report::AnalysisError;
use crate::session::Session;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// HTTP service wrapping the analysis pipeline and the session it reports
/// into.
///
/// Input problems come back as 400 with the specific reason; upstream
/// problems as 500 with a generic message, the detailed cause going to the
/// log only.
pub struct AnalysisService {
    analyzer: Analyzer,
    session: Arc<Mutex<Session>>,
}

impl AnalysisService {
    pub fn new(analyzer: Analyzer, session: Arc<Mutex<Session>>) -> Self {
        Self { analyzer, session }
    }

    /// Build a router exposing `/analyze` and `/report.json`.
    pub fn router(self: Arc<Self>) -> Router {
        let analyze = self.clone();
        Router::new()
            .route(
                "/analyze",
                post(move |Json(req): Json<AnalyzeRequest>| {
                    let this = analyze.clone();
                    async move { this.handle_analyze(req).await }
                }),
            )
            .route(
                "/report.json",
                get(move || {
                    let this = self.clone();
                    async move { this.current_report().await }
                }),
            )
    }

    async fn handle_analyze(&self, req: AnalyzeRequest) -> Response {
        {
            let mut session = self.session.lock().await;
            if !session.begin_analysis() {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": "Analysis already in progress"})),
                )
                    .into_response();
            }
        }
        let outcome = self.analyzer.analyze(req.image.as_deref()).await;
        let mut session = self.session.lock().await;
        match outcome {
            Ok(report) => {
                let response = (StatusCode::OK, Json(report.clone())).into_response();
                session.finish_analysis(Some(report));
                response
            }
            Err(err) => {
                session.finish_analysis(None);
                let (status, message) = match &err {
                    AnalysisError::MissingImage => {
                        (StatusCode::BAD_REQUEST, "Image is required")
                    }
                    AnalysisError::InvalidImageFormat => {
                        (StatusCode::BAD_REQUEST, "Invalid image format")
                    }
                    AnalysisError::UpstreamCall(detail) => {
                        warn!(%detail, "model call failed");
                        (StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
                    }
                    AnalysisError::UpstreamParse(detail) => {
                        warn!(%detail, "model response rejected");
                        (StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
                    }
                };
                (status, Json(json!({"error": message}))).into_response()
            }
        }
    }

    async fn current_report(&self) -> Response {
        let session = self.session.lock().await;
        match session.report() {
            Some(report) => Json(report.clone()).into_response(),
            None => Json(json!({})).into_response(),
        }
    }
}

/// Run the HTTP server exposing analysis, ink and checkout routes.
pub async fn run_server(
    analysis: Arc<AnalysisService>,
    ink: Arc<InkStream>,
    checkout: Arc<CheckoutClient>,
    host: &str,
    port: u16,
) -> JoinHandle<()> {
    let app = analysis
        .router()
        .merge(ink.router())
        .merge(checkout.router());
    let addr: SocketAddr = format!("{host}:{port}").parse().expect("invalid addr");
    tokio::spawn(async move {
        tracing::info!(%addr, "serving handwriting analysis");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind TcpListener");
        axum::serve(listener, app).await.expect("axum serve failed");
    })
}
