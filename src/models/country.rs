use serde::{Deserialize, Serialize};

/// One record as returned by the countries endpoint. The struct mirrors the
/// wire shape, including the nested `media` object. Records are never mutated
/// after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub continent: String,
}

/// Image references for a country. The endpoint leaves these empty on some
/// records, so both default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub emblem: String,
}
