use bonotel_feed::{FeedPipeline, PipelineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = PipelineConfig::default();
    info!(
        endpoint = %config.endpoint,
        data_dir = %config.data_dir.display(),
        json_dir = %config.json_dir.display(),
        "starting import"
    );

    let pipeline = FeedPipeline::with_http(config)?;
    let report = pipeline.run().await.map_err(|e| {
        let stage = e.stage();
        error!(%stage, error = %e, "import failed");
        anyhow::Error::new(e).context(format!("import failed during {} stage", stage))
    })?;

    println!("Import terminé ({} hotels)", report.written);
    Ok(())
}
