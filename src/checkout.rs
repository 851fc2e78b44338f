use axum::{Json, Router, http::StatusCode, routing::post};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Default unlock price in minor units.
pub const DEFAULT_AMOUNT_MINOR: u64 = 499;
const CURRENCY: &str = "eur";
const PRODUCT_NAME: &str = "Scrawled Full Analysis";
const PRODUCT_DESCRIPTION: &str = "Complete personality profile with hidden secrets and PDF";

/// Client for the hosted payment provider's checkout API.
///
/// One request carries the amount and currency; the response is a redirect
/// URL for the provider's hosted page. Payment outcome never feeds back
/// into the analysis pipeline — the success and cancel targets are plain
/// query-string markers on the return URL.
pub struct CheckoutClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
    return_url: String,
}

impl CheckoutClient {
    pub fn new(
        api_url: impl Into<String>,
        secret_key: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            secret_key: secret_key.into(),
            return_url: return_url.into(),
        }
    }

    /// Create a hosted checkout session and return its redirect URL.
    pub async fn create_session(&self, amount_minor: u64) -> anyhow::Result<String> {
        let params = [
            ("payment_method_types[0]", "card".to_string()),
            ("mode", "payment".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", CURRENCY.to_string()),
            (
                "line_items[0][price_data][unit_amount]",
                amount_minor.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                PRODUCT_NAME.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                PRODUCT_DESCRIPTION.to_string(),
            ),
            ("success_url", format!("{}?premium=success", self.return_url)),
            ("cancel_url", format!("{}?premium=cancel", self.return_url)),
        ];
        let resp = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;
        if !resp.status().is_success() {
            anyhow::bail!("checkout session creation failed with {}", resp.status());
        }
        #[derive(Deserialize)]
        struct CheckoutSession {
            url: String,
        }
        let session: CheckoutSession = resp.json().await?;
        Ok(session.url)
    }

    /// Build a router exposing `/checkout`.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new().route(
            "/checkout",
            post(move |Json(req): Json<CheckoutRequest>| {
                let this = self.clone();
                async move {
                    let amount = req.amount.unwrap_or(DEFAULT_AMOUNT_MINOR);
                    match this.create_session(amount).await {
                        Ok(url) => (StatusCode::OK, Json(json!({"url": url}))),
                        Err(e) => {
                            warn!(error = %e, "checkout failed");
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(json!({"error": "Checkout failed"})),
                            )
                        }
                    }
                }
            }),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub amount: Option<u64>,
}
