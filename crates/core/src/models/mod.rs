//! Shared domain models.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A listed item available for exchange, loan, or giveaway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Position-derived identifier, assigned on insertion.
    pub id: u64,
    /// Short item title.
    pub item_name: String,
    /// Category label (e.g. `Books`). Not checked against a closed set.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Availability label, usually `Available` or `Reserved`.
    pub availability: String,
    /// Asking price; `0` means the item is free.
    pub price: u32,
    /// Pickup location.
    pub location: String,
    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Date the listing was stored.
    pub date_posted: NaiveDate,
}

/// Caller-supplied fields for a new [`Resource`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub item_name: String,
    pub category: String,
    pub description: String,
    pub availability: String,
    pub price: u32,
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A carpool offer with route, schedule and per-seat cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    /// Position-derived identifier, assigned on insertion.
    pub id: u64,
    /// Route start.
    pub from: String,
    /// Route end.
    pub to: String,
    /// Departure date.
    pub date: NaiveDate,
    /// Departure time, serialised as `HH:MM`.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    /// Seats on offer.
    pub seats: u32,
    /// Cost charged to each passenger.
    pub cost_per_person: u32,
    /// Driver's display name.
    pub driver: String,
    /// Vehicle label (e.g. `Scooter`).
    pub vehicle: String,
    /// Date the listing was stored.
    pub date_posted: NaiveDate,
}

impl Ride {
    /// Total cost of the ride split across every seat.
    pub fn total_split(&self) -> u64 {
        u64::from(self.cost_per_person) * u64::from(self.seats)
    }
}

/// Caller-supplied fields for a new [`Ride`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRide {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub seats: u32,
    pub cost_per_person: u32,
    pub driver: String,
    pub vehicle: String,
}

/// A record type held by the append-only store.
pub trait Record: Clone + Send + Sync + 'static {
    /// Fields supplied by the caller when inserting.
    type Draft: Send;

    /// Build the stored record from a draft plus the store-assigned fields.
    fn assemble(id: u64, date_posted: NaiveDate, draft: Self::Draft) -> Self;
}

impl Record for Resource {
    type Draft = NewResource;

    fn assemble(id: u64, date_posted: NaiveDate, draft: NewResource) -> Self {
        Self {
            id,
            item_name: draft.item_name,
            category: draft.category,
            description: draft.description,
            availability: draft.availability,
            price: draft.price,
            location: draft.location,
            image: draft.image,
            date_posted,
        }
    }
}

impl Record for Ride {
    type Draft = NewRide;

    fn assemble(id: u64, date_posted: NaiveDate, draft: NewRide) -> Self {
        Self {
            id,
            from: draft.from,
            to: draft.to,
            date: draft.date,
            time: draft.time,
            seats: draft.seats,
            cost_per_person: draft.cost_per_person,
            driver: draft.driver,
            vehicle: draft.vehicle,
            date_posted,
        }
    }
}

/// Serde adapter for `HH:MM` times.
pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .map_err(|err| de::Error::custom(format!("invalid time '{raw}': {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_ride() -> Ride {
        Ride {
            id: 3,
            from: "Main Campus".to_string(),
            to: "Airport".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            seats: 2,
            cost_per_person: 50,
            driver: "Amit Kumar".to_string(),
            vehicle: "Motorcycle".to_string(),
            date_posted: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        }
    }

    #[test]
    fn ride_uses_camel_case_wire_names() {
        let value = serde_json::to_value(sample_ride()).unwrap();
        assert_eq!(value["costPerPerson"], json!(50));
        assert_eq!(value["datePosted"], json!("2026-02-14"));
        assert_eq!(value["date"], json!("2026-02-20"));
        assert_eq!(value["time"], json!("06:00"));
    }

    #[test]
    fn resource_without_image_deserializes() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 2,
            "itemName": "Electric Kettle",
            "category": "Kitchen",
            "description": "1.5L capacity electric kettle.",
            "availability": "Available",
            "price": 0,
            "location": "Hostel B, Room 112",
            "datePosted": "2026-02-12"
        }))
        .unwrap();
        assert_eq!(resource.item_name, "Electric Kettle");
        assert!(resource.image.is_none());
    }

    #[test]
    fn total_split_multiplies_seats() {
        assert_eq!(sample_ride().total_split(), 100);
    }
}
