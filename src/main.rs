use anyhow::Result;
use catalog_browser::args::Args;
use catalog_browser::run;
use clap::Parser;
use std::fs;
use std::sync::Arc;

#[tokio::main]
pub async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Arc::new(Args::parse());
    fs::create_dir_all(&args.output_dir)?;

    run(args).await
}
