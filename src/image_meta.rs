// Image metadata for the introduction media of a hotel.
// The image is downloaded into the scratch directory under its URL's last
// path segment, measured, and removed again. Dimensions come from the image
// header only; pixels are never decoded.

use crate::config::FEED_FILE_NAME;
use crate::error::{FeedError, Result};
use crate::transport::Transport;
use image::ImageReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const FALLBACK_FILE_NAME: &str = "image";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
}

pub struct ImageMetadataFetcher {
    transport: Arc<dyn Transport>,
    scratch_dir: PathBuf,
}

impl ImageMetadataFetcher {
    pub fn new(transport: Arc<dyn Transport>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<ImageMetadata> {
        let body = self.transport.fetch(url).await?;

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| FeedError::cache_io(&self.scratch_dir, e))?;

        let mut file_name = local_file_name(url);
        // The scratch directory also holds the cached feed
        if file_name == FEED_FILE_NAME {
            file_name = format!("{}-{}", FALLBACK_FILE_NAME, file_name);
        }
        let path = self.scratch_dir.join(file_name);
        // Armed before the write so a partial file is removed too
        let _guard = TempFile::new(path.clone());

        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| FeedError::cache_io(&path, e))?;

        let byte_size = tokio::fs::metadata(&path)
            .await
            .map_err(|e| FeedError::cache_io(&path, e))?
            .len();
        let (width, height) = probe_dimensions(&path)?;

        debug!(url, width, height, byte_size, "measured image");
        Ok(ImageMetadata {
            width,
            height,
            byte_size,
        })
    }
}

// Last path segment of the url, without query string or fragment.
// Falls back to "image" when the segment is empty or would escape the
// scratch directory.
pub fn local_file_name(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    let segment = without_query.rsplit('/').next().unwrap_or_default();

    match segment {
        "" | "." | ".." => FALLBACK_FILE_NAME.to_string(),
        name if name.contains('\\') => FALLBACK_FILE_NAME.to_string(),
        name => name.to_string(),
    }
}

fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    ImageReader::open(path)
        .map_err(|e| FeedError::cache_io(path, e))?
        .with_guessed_format()
        .map_err(|e| FeedError::cache_io(path, e))?
        .into_dimensions()
        .map_err(|e| FeedError::ImageFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

// Removes the downloaded file when dropped, whatever the outcome
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "could not remove temporary image"
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .expect("encode png fixture");
    buffer.into_inner()
}
