use clap::Parser;
use dotenvy::dotenv;
use lambda_runtime::{LambdaEvent, service_fn};
use s3_image_resizer::infrastructure::storage;
use s3_image_resizer::{ResizeConfig, ResizeService};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Invoke the handler once with the S3 event in this JSON file instead
    /// of serving the Lambda runtime API
    #[arg(short, long)]
    event: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3_image_resizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();

    let config = ResizeConfig::from_env();
    config.validate()?;
    info!(
        "🖼️  Resize Config: Destination={}, Size={}x{}, Quality={}, Filter={:?}",
        config.destination_bucket,
        config.target_width,
        config.target_height,
        config.jpeg_quality,
        config.filter
    );

    // One client per process, shared by every invocation
    let storage_service = storage::setup_storage().await;
    let service = ResizeService::new(storage_service, config);

    if let Some(path) = args.event {
        info!("📄 Invoking once with event file {}", path.display());
        let raw = tokio::fs::read_to_string(&path).await?;
        let payload: serde_json::Value = serde_json::from_str(&raw)?;
        let response = service.handle_value(payload).await?;
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    info!("🚀 Starting Lambda runtime...");
    lambda_runtime::run(service_fn(|event: LambdaEvent<serde_json::Value>| {
        service.handle_value(event.payload)
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
