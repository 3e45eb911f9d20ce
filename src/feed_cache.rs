// Local copy of the supplier feed, refreshed once it is older than the TTL.
// The file's mtime is the only validity signal. No locking: one run at a time.

use crate::config::PipelineConfig;
use crate::error::{FeedError, Result};
use crate::transport::Transport;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
    pub expired_count: AtomicUsize,
    pub fetch_count: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatsReport {
    pub hit_count: usize,
    pub miss_count: usize,
    pub expired_count: usize,
    pub fetch_count: usize,
}

pub struct FeedCache {
    transport: Arc<dyn Transport>,
    endpoint: String,
    path: PathBuf,
    ttl: Duration,
    stats: CacheStats,
}

impl FeedCache {
    pub fn new(transport: Arc<dyn Transport>, config: &PipelineConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.clone(),
            path: config.feed_path(),
            ttl: config.cache_ttl(),
            stats: CacheStats::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Returns the path of a feed file no older than the TTL
    pub async fn ensure(&self) -> Result<PathBuf> {
        match self.cached_age().await? {
            None => {
                self.stats.miss_count.fetch_add(1, Ordering::SeqCst);
                info!(path = %self.path.display(), "no cached feed, fetching");
                self.refresh().await?;
            }
            // whole seconds, like the mtime comparison of the legacy importer
            Some(age) if age.as_secs() > self.ttl.as_secs() => {
                self.stats.expired_count.fetch_add(1, Ordering::SeqCst);
                info!(
                    age_secs = age.as_secs(),
                    ttl_secs = self.ttl.as_secs(),
                    "cached feed expired, fetching again"
                );
                tokio::fs::remove_file(&self.path)
                    .await
                    .map_err(|e| FeedError::cache_io(&self.path, e))?;
                self.refresh().await?;
            }
            Some(age) => {
                self.stats.hit_count.fetch_add(1, Ordering::SeqCst);
                debug!(age_secs = age.as_secs(), "reusing cached feed");
            }
        }

        Ok(self.path.clone())
    }

    pub fn stats(&self) -> CacheStatsReport {
        CacheStatsReport {
            hit_count: self.stats.hit_count.load(Ordering::SeqCst),
            miss_count: self.stats.miss_count.load(Ordering::SeqCst),
            expired_count: self.stats.expired_count.load(Ordering::SeqCst),
            fetch_count: self.stats.fetch_count.load(Ordering::SeqCst),
        }
    }

    // None when there is no cached file. An mtime in the future counts as age zero.
    async fn cached_age(&self) -> Result<Option<Duration>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FeedError::cache_io(&self.path, e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| FeedError::cache_io(&self.path, e))?;

        let last_fetch: DateTime<Utc> = modified.into();
        debug!(last_fetch = %last_fetch.to_rfc3339(), "found cached feed");

        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        Ok(Some(age))
    }

    async fn refresh(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| FeedError::cache_io(dir, e))?;
        }

        let body = self.transport.fetch(&self.endpoint).await?;
        self.stats.fetch_count.fetch_add(1, Ordering::SeqCst);

        tokio::fs::write(&self.path, &body)
            .await
            .map_err(|e| FeedError::cache_io(&self.path, e))?;
        info!(bytes = body.len(), path = %self.path.display(), "feed cached");
        Ok(())
    }
}
