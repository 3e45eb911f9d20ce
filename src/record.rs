// Canonical hotel record and the transformation from a raw feed entry

use crate::classifier::HotelFlags;
use crate::feed::RawHotelEntry;
use crate::image_meta::{ImageMetadata, ImageMetadataFetcher};
use crate::locale;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

const DESCRIPTION_TYPE: &str = "Description";

// Field order is the JSON output order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalHotelRecord {
    #[serde(skip)]
    pub hotel_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub language: String,
    pub rating_level: f64,
    #[serde(flatten)]
    pub flags: HotelFlags,
    // Supplier tag -> supplier's own hotel code
    pub distribution: BTreeMap<String, String>,
    pub introduction_text: IntroductionText,
    pub introduction_media: IntroductionMedia,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroductionText {
    pub language: String,
    pub type_code: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroductionMedia {
    pub weight: MediaWeight,
    pub size: MediaSize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaWeight {
    pub value: u64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSize {
    pub width: u32,
    pub height: u32,
    pub unit: &'static str,
}

impl IntroductionMedia {
    pub fn new(url: impl Into<String>, meta: ImageMetadata) -> Self {
        Self {
            weight: MediaWeight {
                value: meta.byte_size,
                unit: "Byte",
            },
            size: MediaSize {
                width: meta.width,
                height: meta.height,
                unit: "px",
            },
            url: url.into(),
        }
    }
}

#[derive(Debug)]
pub struct Transformed {
    pub record: CanonicalHotelRecord,
    // The image could not be measured and the media fields are zeroed
    pub media_degraded: bool,
}

pub struct RecordTransformer {
    images: ImageMetadataFetcher,
    supplier_tag: String,
}

impl RecordTransformer {
    pub fn new(images: ImageMetadataFetcher, supplier_tag: impl Into<String>) -> Self {
        Self {
            images,
            supplier_tag: supplier_tag.into(),
        }
    }

    // Never fails: image problems degrade to empty media fields
    pub async fn transform(&self, entry: &RawHotelEntry) -> Transformed {
        let language = locale::primary_language(&entry.country_code);
        let flags = HotelFlags::classify(&entry.recreation, &entry.facilities, &entry.description);

        let (introduction_media, media_degraded) = match entry.first_image() {
            Some(url) => match self.images.fetch(url).await {
                Ok(meta) => (IntroductionMedia::new(url, meta), false),
                Err(e) => {
                    warn!(
                        hotel_code = %entry.hotel_code,
                        url,
                        stage = %e.stage(),
                        error = %e,
                        "image metadata unavailable, writing empty media"
                    );
                    (IntroductionMedia::new(url, ImageMetadata::default()), true)
                }
            },
            None => {
                warn!(hotel_code = %entry.hotel_code, "hotel has no image");
                (IntroductionMedia::new("", ImageMetadata::default()), true)
            }
        };

        let mut distribution = BTreeMap::new();
        distribution.insert(self.supplier_tag.clone(), entry.hotel_code.clone());

        let record = CanonicalHotelRecord {
            hotel_code: entry.hotel_code.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            language: language.clone(),
            rating_level: entry.star_rating,
            flags,
            distribution,
            introduction_text: IntroductionText {
                language,
                type_code: DESCRIPTION_TYPE.to_string(),
                title: DESCRIPTION_TYPE.to_string(),
                text: entry.description.clone(),
            },
            introduction_media,
        };

        Transformed {
            record,
            media_degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_meta::png_fixture;
    use crate::transport::mock_transport::MockTransport;
    use std::path::Path;
    use std::sync::Arc;

    fn entry(code: &str, country: &str, description: &str, images: &[&str]) -> RawHotelEntry {
        RawHotelEntry {
            hotel_code: code.to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
            country_code: country.to_string(),
            star_rating: 4.0,
            recreation: "swimming pool".to_string(),
            facilities: "parking".to_string(),
            description: description.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn transformer(transport: Arc<MockTransport>, dir: &Path) -> RecordTransformer {
        RecordTransformer::new(ImageMetadataFetcher::new(transport, dir), "BONOTEL")
    }

    #[tokio::test]
    async fn test_transform_maps_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new());
        let png = png_fixture(16, 8);
        transport.add_response("http://img.test/a.png", png.clone());

        let raw = entry(
            "H1",
            "CH",
            "A wedding venue, exceptional.",
            &["http://img.test/a.png", "http://img.test/b.png"],
        );
        let out = transformer(transport.clone(), dir.path())
            .transform(&raw)
            .await;
        let record = out.record;

        assert!(!out.media_degraded);
        assert_eq!(record.hotel_code, "H1");
        assert_eq!(record.language, "DE");
        assert_eq!(record.latitude, 48.8566);
        assert_eq!(record.rating_level, 4.0);
        assert!(record.flags.swimmingpool);
        assert!(record.flags.parking);
        assert!(record.flags.wedding);
        assert!(record.flags.exceptional);
        assert!(!record.flags.golf);
        assert_eq!(record.distribution.get("BONOTEL").map(String::as_str), Some("H1"));
        assert_eq!(record.introduction_text.language, "DE");
        assert_eq!(record.introduction_text.text, "A wedding venue, exceptional.");
        assert_eq!(record.introduction_media.url, "http://img.test/a.png");
        assert_eq!(record.introduction_media.size.width, 16);
        assert_eq!(record.introduction_media.size.height, 8);
        assert_eq!(record.introduction_media.weight.value, png.len() as u64);
        // only the first image is fetched
        assert_eq!(transport.requests_for("http://img.test/b.png"), 0);
    }

    #[tokio::test]
    async fn test_broken_image_degrades_to_empty_media() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new());

        let raw = entry("H2", "fr", "", &["http://img.test/missing.jpg"]);
        let out = transformer(transport, dir.path()).transform(&raw).await;

        assert!(out.media_degraded);
        let media = out.record.introduction_media;
        assert_eq!(media.url, "http://img.test/missing.jpg");
        assert_eq!(media.weight.value, 0);
        assert_eq!((media.size.width, media.size.height), (0, 0));
    }

    #[tokio::test]
    async fn test_hotel_without_images_does_not_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new());

        let raw = entry("H3", "us", "", &[]);
        let out = transformer(transport.clone(), dir.path()).transform(&raw).await;

        assert!(out.media_degraded);
        assert_eq!(out.record.introduction_media.url, "");
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_serialized_shape() {
        let mut distribution = BTreeMap::new();
        distribution.insert("BONOTEL".to_string(), "H1".to_string());
        let record = CanonicalHotelRecord {
            hotel_code: "H1".to_string(),
            latitude: 1.5,
            longitude: -2.0,
            language: "FR".to_string(),
            rating_level: 3.0,
            flags: HotelFlags {
                wedding: true,
                ..HotelFlags::default()
            },
            distribution,
            introduction_text: IntroductionText {
                language: "FR".to_string(),
                type_code: "Description".to_string(),
                title: "Description".to_string(),
                text: "Nice".to_string(),
            },
            introduction_media: IntroductionMedia::new(
                "http://img.test/x.jpg",
                ImageMetadata {
                    width: 10,
                    height: 20,
                    byte_size: 300,
                },
            ),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("hotel_code").is_none());
        assert_eq!(value["language"], "FR");
        assert_eq!(value["wedding"], true);
        assert_eq!(value["spa"], false);
        assert_eq!(value["distribution"]["BONOTEL"], "H1");
        assert_eq!(value["introduction_text"]["type_code"], "Description");
        assert_eq!(value["introduction_media"]["weight"]["unit"], "Byte");
        assert_eq!(value["introduction_media"]["size"]["unit"], "px");
        assert_eq!(value["introduction_media"]["size"]["height"], 20);

        // keys keep the declared order
        let json = serde_json::to_string(&record).unwrap();
        let order = [
            "latitude",
            "language",
            "swimmingpool",
            "wedding",
            "distribution",
            "introduction_media",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|k| json.find(&format!("\"{}\"", k)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }
}
