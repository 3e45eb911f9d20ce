// Facility and theme flags derived from the hotel's free-text fields.
// Matching is an exact, case-sensitive substring test.

use serde::Serialize;

pub fn contains(text: &str, needle: &str) -> bool {
    text.contains(needle)
}

pub fn has_tag(recreation: &str, facilities: &str, needle: &str) -> bool {
    contains(recreation, needle) || contains(facilities, needle)
}

// Serializes flat into the canonical record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HotelFlags {
    pub swimmingpool: bool,
    pub parking: bool,
    pub fitness: bool,
    pub golf: bool,
    pub seaside: bool,
    pub spa: bool,
    pub charm: bool,
    pub ecotourism: bool,
    pub exceptional: bool,
    pub family_friendly: bool,
    pub pmr: bool,
    pub preferred: bool,
    pub wedding: bool,
}

impl HotelFlags {
    pub fn classify(recreation: &str, facilities: &str, description: &str) -> Self {
        let tagged = |needle: &str| has_tag(recreation, facilities, needle);
        let described = |needle: &str| contains(description, needle);

        Self {
            swimmingpool: tagged("swimming pool"),
            parking: tagged("parking"),
            fitness: tagged("fitness"),
            golf: tagged("golf"),
            seaside: tagged("seaside"),
            spa: tagged("spa"),
            charm: tagged("charm"),
            ecotourism: tagged("eco tour"),
            exceptional: described("exceptional"),
            family_friendly: described("family friendly"),
            pmr: described("handicap") || tagged("handicap"),
            preferred: described("preferred") || tagged("preferred"),
            wedding: described("wedding") || tagged("wedding"),
        }
    }
}
