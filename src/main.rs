use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Mutex;

use scrawled::{
    AnalysisService, Analyzer, CheckoutClient, InkStream, Language, OllamaVision, Session,
    args::Args, logger, run_server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let llm = Arc::new(
        OllamaVision::new(&args.llm_url, &args.model)?
            .with_limits(args.max_tokens, Duration::from_secs(args.llm_timeout_secs)),
    );
    let session = Arc::new(Mutex::new(Session::new(Language::from_locale(&args.locale))));
    let analysis = Arc::new(AnalysisService::new(Analyzer::new(llm), session));
    let ink = Arc::new(InkStream::new(args.surface_width, args.surface_height));
    let checkout = Arc::new(CheckoutClient::new(
        args.checkout_url.clone(),
        args.checkout_key.clone(),
        args.return_url.clone(),
    ));

    let server = run_server(analysis, ink, checkout, &args.host, args.port).await;
    server.await?;
    Ok(())
}
