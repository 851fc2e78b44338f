use clap::Parser;

/// Command line arguments for the scrawled binary.
#[derive(Parser, Clone)]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
    /// Base URL of the multimodal model backend.
    #[arg(long = "llm-url", default_value = "http://localhost:11434")]
    pub llm_url: String,
    #[arg(long, default_value = "llava")]
    pub model: String,
    /// Upper bound on the model's response length, in tokens.
    #[arg(long = "max-tokens", default_value_t = 1024)]
    pub max_tokens: i32,
    /// Wall-clock limit for one model call, in seconds.
    #[arg(long = "llm-timeout-secs", default_value_t = 60)]
    pub llm_timeout_secs: u64,
    /// Locale used to pick the UI language at startup, e.g. "fr-FR".
    #[arg(long, default_value = "en")]
    pub locale: String,
    /// Logical drawing surface size; exports are twice this resolution.
    #[arg(long = "surface-width", default_value_t = 640)]
    pub surface_width: u32,
    #[arg(long = "surface-height", default_value_t = 192)]
    pub surface_height: u32,
    /// Base URL of the payment provider's API.
    #[arg(long = "checkout-url", default_value = "https://api.stripe.com")]
    pub checkout_url: String,
    /// Secret key for the payment provider.
    #[arg(long = "checkout-key", default_value = "")]
    pub checkout_key: String,
    /// Public URL visitors return to after the hosted checkout page.
    #[arg(long = "return-url", default_value = "http://localhost:3000")]
    pub return_url: String,
}
