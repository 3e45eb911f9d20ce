// Bonotel hotel feed import: XML inventory feed -> one canonical JSON file per hotel

pub mod classifier;
pub mod config;
pub mod error;
pub mod feed;
pub mod feed_cache;
pub mod image_meta;
pub mod locale;
pub mod pipeline;
pub mod record;
pub mod transport;

// Re-export key types for convenience
pub use classifier::HotelFlags;
pub use config::PipelineConfig;
pub use error::{FeedError, Result, Stage};
pub use feed::{parse_feed, ParsedFeed, RawHotelEntry};
pub use feed_cache::{CacheStatsReport, FeedCache};
pub use image_meta::{ImageMetadata, ImageMetadataFetcher};
pub use pipeline::{FeedPipeline, RunReport};
pub use record::{CanonicalHotelRecord, RecordTransformer};
pub use transport::{HttpTransport, Transport};
