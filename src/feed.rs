// Supplier feed parsing
use crate::error::{FeedError, Result};
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;
use serde::Deserialize;
use tracing::{debug, warn};

const HOTEL_TAG: &[u8] = b"hotel";

// Structures for XML deserialization. Every field is read as text and
// coerced afterwards; each <hotel> is deserialized on its own so one bad
// element does not fail the whole document.

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct XmlHotel {
    pub hotel_code: String,
    pub latitude: String,
    pub longitude: String,
    pub country_code: String,
    pub star_rating: String,
    pub recreation: String,
    pub facilities: String,
    pub description: String,
    pub images: XmlImages,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone)]
#[serde(default)]
pub struct XmlImages {
    #[serde(rename = "image")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawHotelEntry {
    pub hotel_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub star_rating: f64,
    pub recreation: String,
    pub facilities: String,
    pub description: String,
    pub images: Vec<String>,
}

impl RawHotelEntry {
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub entries: Vec<RawHotelEntry>,
    pub skipped: usize,
}

impl XmlHotel {
    // None when the hotel cannot be keyed: no code, or one that is unsafe as a file name
    fn into_entry(self) -> Option<RawHotelEntry> {
        let hotel_code = self.hotel_code.trim().to_string();
        if !is_usable_code(&hotel_code) {
            return None;
        }

        Some(RawHotelEntry {
            latitude: coerce_float(&hotel_code, "latitude", &self.latitude),
            longitude: coerce_float(&hotel_code, "longitude", &self.longitude),
            star_rating: coerce_float(&hotel_code, "starRating", &self.star_rating),
            country_code: self.country_code.trim().to_string(),
            recreation: self.recreation.trim().to_string(),
            facilities: self.facilities.trim().to_string(),
            description: self.description.trim().to_string(),
            images: self
                .images
                .images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            hotel_code,
        })
    }
}

fn is_usable_code(code: &str) -> bool {
    !code.is_empty() && !code.contains(['/', '\\']) && !code.contains("..")
}

// Missing or unparseable numbers read as 0.0
fn coerce_float(hotel_code: &str, field: &str, raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or_else(|_| {
        debug!(hotel_code, field, raw, "non-numeric value, using 0");
        0.0
    })
}

impl ParsedFeed {
    fn push_hotel(&mut self, position: usize, fragment: &str) {
        let hotel: XmlHotel = match from_str(fragment) {
            Ok(hotel) => hotel,
            Err(e) => {
                warn!(position, error = %e, "skipping malformed hotel");
                self.skipped += 1;
                return;
            }
        };

        let raw_code = hotel.hotel_code.clone();
        match hotel.into_entry() {
            Some(entry) => self.entries.push(entry),
            None => {
                warn!(position, hotel_code = %raw_code, "skipping hotel without a usable code");
                self.skipped += 1;
            }
        }
    }
}

fn parse_error(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> FeedError {
    FeedError::Parse(format!("at byte {}: {}", reader.error_position(), e))
}

// Parses the feed document into hotel entries, in document order.
// A document that is not well-formed is fatal; a bad <hotel> is skipped.
pub fn parse_feed(xml: &str) -> Result<ParsedFeed> {
    let mut reader = Reader::from_str(xml);
    let mut parsed = ParsedFeed::default();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut position = 0usize;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event().map_err(|e| parse_error(&reader, e))? {
            // <hotel> children of the root element, taken as whole subtrees
            Event::Start(e) if depth == 1 && e.name().as_ref() == HOTEL_TAG => {
                let name = e.name().as_ref().to_vec();
                reader
                    .read_to_end(QName(&name))
                    .map_err(|e| parse_error(&reader, e))?;
                let end = reader.buffer_position() as usize;
                parsed.push_hotel(position, &xml[start..end]);
                position += 1;
            }
            Event::Empty(e) if depth == 1 && e.name().as_ref() == HOTEL_TAG => {
                let end = reader.buffer_position() as usize;
                parsed.push_hotel(position, &xml[start..end]);
                position += 1;
            }
            Event::Start(_) => {
                depth += 1;
                seen_root = true;
            }
            Event::Empty(_) if depth == 0 => seen_root = true,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(FeedError::Parse(
            "unexpected end of document inside an open element".to_string(),
        ));
    }
    if !seen_root {
        return Err(FeedError::Parse("document has no root element".to_string()));
    }

    debug!(
        hotels = parsed.entries.len(),
        skipped = parsed.skipped,
        "parsed feed"
    );
    Ok(parsed)
}

// A small sample for inline testing
#[cfg(test)]
pub const SMALL_SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hotels>
  <hotel>
    <hotelCode>1234</hotelCode>
    <name>Seaside Palace</name>
    <latitude>43.7009</latitude>
    <longitude>7.2683</longitude>
    <countryCode>FR</countryCode>
    <starRating>4.5</starRating>
    <recreation>swimming pool, golf</recreation>
    <facilities>free parking, spa</facilities>
    <description><![CDATA[An exceptional seaside hotel & wedding venue.]]></description>
    <images>
      <image>http://img.test/1234/front.jpg</image>
      <image>http://img.test/1234/lobby.jpg</image>
    </images>
  </hotel>
  <hotel>
    <hotelCode>5678</hotelCode>
    <latitude>n/a</latitude>
    <longitude>-73.98</longitude>
    <countryCode>US</countryCode>
    <starRating>3</starRating>
    <recreation/>
    <facilities>fitness</facilities>
    <description>Family friendly downtown stay.</description>
    <images/>
  </hotel>
</hotels>
"#;
