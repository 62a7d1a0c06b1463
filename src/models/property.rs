use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_this_or_that::{as_f64, as_i64};

/// Number of image slots carried by every record.
pub const IMAGE_SLOT_COUNT: usize = 10;

/// One listing row from the hosted property collection.
///
/// Field names follow the store's column names. Records are created and
/// edited by administrative tooling elsewhere; this crate only ever reads
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    /// Public lookup key, unique and immutable. Distinct from `id`.
    pub slug: String,
    pub title: String,
    pub property_type: PropertyType,
    /// Smallest currency unit, never negative.
    #[serde(deserialize_with = "as_i64")]
    pub price: i64,
    pub city: String,
    pub locality: String,
    #[serde(default)]
    pub address: Option<String>,
    /// 0 means not applicable (plots, studios).
    #[serde(deserialize_with = "as_i64")]
    pub bedrooms: i64,
    #[serde(deserialize_with = "as_i64")]
    pub bathrooms: i64,
    #[serde(deserialize_with = "as_f64")]
    pub area_sqft: f64,
    pub furnishing_status: String,
    #[serde(default, deserialize_with = "amenity_set")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ListingStatus,
    /// Date the unit became available for sale.
    pub listed_on: NaiveDate,
    pub agent_name: String,
    pub agent_phone: String,
    pub agent_email: String,
    #[serde(default)]
    pub image1: Option<String>,
    #[serde(default)]
    pub image2: Option<String>,
    #[serde(default)]
    pub image3: Option<String>,
    #[serde(default)]
    pub image4: Option<String>,
    #[serde(default)]
    pub image5: Option<String>,
    #[serde(default)]
    pub image6: Option<String>,
    #[serde(default)]
    pub image7: Option<String>,
    #[serde(default)]
    pub image8: Option<String>,
    #[serde(default)]
    pub image9: Option<String>,
    #[serde(default)]
    pub image10: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PropertyRecord {
    /// Defined image urls in slot order.
    ///
    /// Gaps between slots are dropped and the relative order of the
    /// remaining urls is preserved, so display code can index the result
    /// directly.
    pub fn image_slots(&self) -> Vec<&str> {
        [
            &self.image1,
            &self.image2,
            &self.image3,
            &self.image4,
            &self.image5,
            &self.image6,
            &self.image7,
            &self.image8,
            &self.image9,
            &self.image10,
        ]
        .into_iter()
        .filter_map(|slot| slot.as_deref())
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Villa,
    Flat,
    Plot,
    Farmhouse,
    Commercial,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyType::Villa => "Villa",
            PropertyType::Flat => "Flat",
            PropertyType::Plot => "Plot",
            PropertyType::Farmhouse => "Farmhouse",
            PropertyType::Commercial => "Commercial",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Available,
    Sold,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingStatus::Available => "Available",
            ListingStatus::Sold => "Sold",
            ListingStatus::UnderConstruction => "Under Construction",
        };
        f.write_str(name)
    }
}

// Store rows occasionally repeat amenity labels. Collapse duplicates
// case-insensitively, keep first-seen order for display, drop empties.
fn amenity_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    let mut seen: Vec<String> = Vec::with_capacity(raw.len());
    let mut amenities = Vec::with_capacity(raw.len());
    for label in raw {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        amenities.push(trimmed.to_string());
    }
    Ok(amenities)
}

pub fn create_test_record(slug: &str) -> PropertyRecord {
    PropertyRecord {
        id: format!("id-{}", slug),
        slug: slug.to_string(),
        title: "Cedar Ridge Villa".to_string(),
        property_type: PropertyType::Villa,
        price: 12_500_000,
        city: "Nainital".to_string(),
        locality: "Ayarpatta".to_string(),
        address: None,
        bedrooms: 3,
        bathrooms: 2,
        area_sqft: 2400.0,
        furnishing_status: "Semi-Furnished".to_string(),
        amenities: vec!["Parking".to_string(), "Mountain View".to_string()],
        description: None,
        status: ListingStatus::Available,
        listed_on: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
        agent_name: "Asha Rawat".to_string(),
        agent_phone: "+91 98765-43210".to_string(),
        agent_email: "asha.rawat@example.com".to_string(),
        image1: Some("https://cdn.example.com/one.jpg".to_string()),
        image2: None,
        image3: None,
        image4: None,
        image5: None,
        image6: None,
        image7: None,
        image8: None,
        image9: None,
        image10: None,
        created_at: Utc.with_ymd_and_hms(2024, 11, 2, 10, 0, 0).unwrap(),
    }
}
