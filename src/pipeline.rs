// Top-level import: cached feed -> hotel entries -> one JSON file per hotel

use crate::config::PipelineConfig;
use crate::error::{FeedError, Result};
use crate::feed::{self, ParsedFeed};
use crate::feed_cache::FeedCache;
use crate::image_meta::ImageMetadataFetcher;
use crate::record::{CanonicalHotelRecord, RecordTransformer};
use crate::transport::{HttpTransport, Transport};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub written: usize,
    pub skipped: usize,
    pub media_degraded: usize,
}

pub struct FeedPipeline {
    config: PipelineConfig,
    cache: FeedCache,
    transformer: RecordTransformer,
}

impl FeedPipeline {
    pub fn new(config: PipelineConfig, transport: Arc<dyn Transport>) -> Self {
        let cache = FeedCache::new(transport.clone(), &config);
        let images = ImageMetadataFetcher::new(transport, config.data_dir.clone());
        let transformer = RecordTransformer::new(images, config.supplier_tag.clone());
        Self {
            config,
            cache,
            transformer,
        }
    }

    pub fn with_http(config: PipelineConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::new(config, transport))
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    // The feed is fully resolved before the first record is processed
    pub async fn run(&self) -> Result<RunReport> {
        let feed_path = self.cache.ensure().await?;
        let parsed = self.load(&feed_path).await?;

        tokio::fs::create_dir_all(&self.config.json_dir)
            .await
            .map_err(|e| FeedError::write(&self.config.json_dir, e))?;

        let mut report = RunReport {
            skipped: parsed.skipped,
            ..RunReport::default()
        };

        for entry in &parsed.entries {
            let transformed = self.transformer.transform(entry).await;
            if transformed.media_degraded {
                report.media_degraded += 1;
            }
            let path = self.write_record(&transformed.record).await?;
            debug!(hotel_code = %entry.hotel_code, path = %path.display(), "record written");
            report.written += 1;
        }

        info!(
            written = report.written,
            skipped = report.skipped,
            media_degraded = report.media_degraded,
            "import finished"
        );
        Ok(report)
    }

    async fn load(&self, feed_path: &std::path::Path) -> Result<ParsedFeed> {
        let bytes = tokio::fs::read(feed_path)
            .await
            .map_err(|e| FeedError::cache_io(feed_path, e))?;
        feed::parse_feed(&String::from_utf8_lossy(&bytes))
    }

    // Full overwrite: any previous file for this hotel is removed first
    async fn write_record(&self, record: &CanonicalHotelRecord) -> Result<PathBuf> {
        let path = self.config.output_path(&record.hotel_code);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(FeedError::write(&path, e)),
        }

        let json = to_pretty_json(record)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| FeedError::write(&path, e))?;
        Ok(path)
    }
}

// Four-space indentation, as the downstream consumers expect
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
