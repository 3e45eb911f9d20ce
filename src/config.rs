// Pipeline configuration
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://api.bonotel.com/index.cfm/user/voyagrs_xml/action/hotel";
pub const FEED_FILE_NAME: &str = "data.xml";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub endpoint: String,
    // Holds the cached feed and the transient image downloads
    pub data_dir: PathBuf,
    pub json_dir: PathBuf,
    pub cache_ttl_seconds: u64,
    pub output_prefix: String,
    pub supplier_tag: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: PathBuf::from("data"),
            json_dir: PathBuf::from("json"),
            cache_ttl_seconds: 900,
            output_prefix: "HS_BNO_H_".to_string(),
            supplier_tag: "BONOTEL".to_string(),
            request_timeout_secs: 30,
            user_agent: concat!("bonotel-feed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PipelineConfig {
    // Same defaults, rooted under `base` (used by tests and ad-hoc runs)
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            data_dir: base.join("data"),
            json_dir: base.join("json"),
            ..Self::default()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn feed_path(&self) -> PathBuf {
        self.data_dir.join(FEED_FILE_NAME)
    }

    pub fn output_path(&self, hotel_code: &str) -> PathBuf {
        self.json_dir
            .join(format!("{}{}.json", self.output_prefix, hotel_code))
    }
}
