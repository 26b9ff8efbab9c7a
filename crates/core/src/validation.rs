//! Form validation shared by every frontend before an insertion.
//!
//! Raw form input is kept as text so that frontends can bind it directly to
//! their widgets; [`ResourceForm::validate`] and [`RideForm::validate`] turn
//! it into a draft ready for the access layer.

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::ValidationError,
    models::{hh_mm, NewResource, NewRide},
};

/// Inclusive bounds on seats a single ride may offer.
pub const SEAT_RANGE: std::ops::RangeInclusive<i64> = 1..=2;

/// Raw input of the "add item" form.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceForm {
    pub item_name: String,
    pub category: String,
    pub description: String,
    pub availability: String,
    pub price: String,
    pub location: String,
}

impl ResourceForm {
    /// Check required fields and parse the price.
    ///
    /// The price is read like a leading integer: `"12.50"` is 12 and
    /// `"500rs"` is 500. Input with no leading digits is `0` (free).
    pub fn validate(&self) -> Result<NewResource, ValidationError> {
        let item_name = required(&self.item_name, "item name")?;
        let category = required(&self.category, "category")?;
        let description = required(&self.description, "description")?;
        let availability = required(&self.availability, "availability")?;
        let location = required(&self.location, "location")?;

        let price = leading_price(&self.price)?;

        Ok(NewResource {
            item_name,
            category,
            description,
            availability,
            price,
            location,
            image: None,
        })
    }
}

/// Raw input of the "post ride" form.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RideForm {
    pub from: String,
    pub to: String,
    pub date: String,
    pub time: String,
    pub seats: String,
    pub cost_per_person: String,
    pub driver: String,
    pub vehicle: String,
}

impl RideForm {
    /// Check required fields, the departure date against `today`, and seats.
    pub fn validate(&self, today: NaiveDate) -> Result<NewRide, ValidationError> {
        let from = required(&self.from, "from")?;
        let to = required(&self.to, "to")?;
        let date_raw = required(&self.date, "date")?;
        let time_raw = required(&self.time, "time")?;
        let seats_raw = required(&self.seats, "seats")?;
        let cost_raw = required(&self.cost_per_person, "cost per person")?;
        let driver = required(&self.driver, "driver")?;
        let vehicle = required(&self.vehicle, "vehicle")?;

        let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_raw.clone()))?;
        if date < today {
            return Err(ValidationError::DateInPast);
        }

        let time = NaiveTime::parse_from_str(&time_raw, hh_mm::FORMAT)
            .map_err(|_| ValidationError::InvalidTime(time_raw.clone()))?;

        let seats = whole_number(&seats_raw, "seats")?;
        if !SEAT_RANGE.contains(&seats) {
            return Err(ValidationError::SeatsOutOfRange(seats));
        }

        let cost = whole_number(&cost_raw, "cost per person")?;
        if cost < 0 {
            return Err(ValidationError::Negative("cost per person"));
        }
        let cost_per_person = u32::try_from(cost).map_err(|_| ValidationError::InvalidNumber {
            field: "cost per person",
            value: cost_raw.clone(),
        })?;

        Ok(NewRide {
            from,
            to,
            date,
            time,
            seats: seats as u32,
            cost_per_person,
            driver,
            vehicle,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Integer prefix of `raw`, with an optional sign.
fn leading_price(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return Ok(0);
    }
    let invalid = || ValidationError::InvalidNumber {
        field: "price",
        value: raw.to_string(),
    };
    let prefix = &raw[..raw.len() - unsigned.len() + digits];
    let value = prefix.parse::<i64>().map_err(|_| invalid())?;
    if value < 0 {
        return Err(ValidationError::Negative("price"));
    }
    u32::try_from(value).map_err(|_| invalid())
}

fn whole_number(value: &str, field: &'static str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
    }

    fn lamp_form() -> ResourceForm {
        ResourceForm {
            item_name: " Lamp ".to_string(),
            category: "Electronics".to_string(),
            description: "desk lamp".to_string(),
            availability: "Available".to_string(),
            price: String::new(),
            location: "A".to_string(),
        }
    }

    fn ride_form() -> RideForm {
        RideForm {
            from: "Hostel A".to_string(),
            to: "Airport".to_string(),
            date: "2026-02-16".to_string(),
            time: "07:45".to_string(),
            seats: "2".to_string(),
            cost_per_person: "40".to_string(),
            driver: "Kavya Nair".to_string(),
            vehicle: "Scooter".to_string(),
        }
    }

    #[test]
    fn resource_fields_are_trimmed_and_blank_price_is_free() {
        let draft = lamp_form().validate().unwrap();
        assert_eq!(draft.item_name, "Lamp");
        assert_eq!(draft.price, 0);
        assert!(draft.image.is_none());
    }

    #[test]
    fn unparseable_price_falls_back_to_free() {
        let mut form = lamp_form();
        form.price = "cheap".to_string();
        assert_eq!(form.validate().unwrap().price, 0);
    }

    #[test]
    fn price_keeps_its_leading_integer() {
        let cases = [
            ("12.50", 12),
            ("1,500", 1),
            ("500rs", 500),
            ("+40", 40),
            (" 7 ", 7),
        ];
        for (raw, expected) in cases {
            let mut form = lamp_form();
            form.price = raw.to_string();
            assert_eq!(form.validate().unwrap().price, expected, "price {raw:?}");
        }
    }

    #[test]
    fn oversized_price_is_an_invalid_number() {
        for raw in ["99999999999999999999", "5000000000"] {
            let mut form = lamp_form();
            form.price = raw.to_string();
            assert_eq!(
                form.validate(),
                Err(ValidationError::InvalidNumber {
                    field: "price",
                    value: raw.to_string(),
                })
            );
        }
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut form = lamp_form();
        form.price = "-5".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Negative("price")));
    }

    #[test]
    fn whitespace_only_field_is_missing() {
        let mut form = lamp_form();
        form.location = "   ".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("location"))
        );
    }

    #[test]
    fn ride_today_is_accepted() {
        let draft = ride_form().validate(today()).unwrap();
        assert_eq!(draft.seats, 2);
        assert_eq!(draft.time, NaiveTime::from_hms_opt(7, 45, 0).unwrap());
    }

    #[test]
    fn ride_in_the_past_is_rejected() {
        let mut form = ride_form();
        form.date = "2026-02-15".to_string();
        assert_eq!(form.validate(today()), Err(ValidationError::DateInPast));
    }

    #[test]
    fn seats_outside_range_are_rejected() {
        for seats in ["0", "3"] {
            let mut form = ride_form();
            form.seats = seats.to_string();
            assert!(matches!(
                form.validate(today()),
                Err(ValidationError::SeatsOutOfRange(_))
            ));
        }
    }

    #[test]
    fn malformed_time_is_rejected() {
        let mut form = ride_form();
        form.time = "7pm".to_string();
        assert_eq!(
            form.validate(today()),
            Err(ValidationError::InvalidTime("7pm".to_string()))
        );
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut form = ride_form();
        form.cost_per_person = "-1".to_string();
        assert_eq!(
            form.validate(today()),
            Err(ValidationError::Negative("cost per person"))
        );
    }
}
