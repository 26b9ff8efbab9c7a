//! Mapping from records to what a listing card shows.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::{Resource, Ride};

/// Currency prefix used for prices and costs.
pub const CURRENCY: &str = "₹";

/// Prompt shown before joining a ride.
pub const JOIN_CONFIRM_PROMPT: &str = "Do you want to join this ride? The driver will be notified.";

/// Acknowledgement shown after the join prompt is accepted.
pub const JOIN_ACKNOWLEDGEMENT: &str = "Ride joined successfully! The driver will contact you soon.";

/// Message shown when a listing has no cards.
pub const EMPTY_STATE: &str = "No listings match your search.";

/// Symbolic icon names drawn from the Font Awesome set the page used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// `fa-bicycle`
    Bicycle,
    /// `fa-book`
    Book,
    /// `fa-laptop`
    Laptop,
    /// `fa-utensils`
    Utensils,
    /// `fa-couch`
    Couch,
    /// `fa-dumbbell`
    Dumbbell,
    /// `fa-box`
    Box,
    /// `fa-motorcycle`
    Motorcycle,
}

impl Icon {
    /// Single-glyph stand-in for terminals.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Bicycle => "🚲",
            Self::Book => "📚",
            Self::Laptop => "💻",
            Self::Utensils => "🍴",
            Self::Couch => "🛋",
            Self::Dumbbell => "🏋",
            Self::Box => "📦",
            Self::Motorcycle => "🏍",
        }
    }
}

/// Known resource categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    #[allow(missing_docs)]
    Cycles,
    #[allow(missing_docs)]
    Books,
    #[allow(missing_docs)]
    Electronics,
    #[allow(missing_docs)]
    Kitchen,
    #[allow(missing_docs)]
    Furniture,
    #[allow(missing_docs)]
    Sports,
    #[allow(missing_docs)]
    Other,
}

impl Category {
    /// Every category, in the order the filter cycles through them.
    pub const ALL: [Category; 7] = [
        Self::Cycles,
        Self::Books,
        Self::Electronics,
        Self::Kitchen,
        Self::Furniture,
        Self::Sports,
        Self::Other,
    ];

    /// Display label, which is also the stored value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cycles => "Cycles",
            Self::Books => "Books",
            Self::Electronics => "Electronics",
            Self::Kitchen => "Kitchen",
            Self::Furniture => "Furniture",
            Self::Sports => "Sports",
            Self::Other => "Other",
        }
    }

    /// Exact-label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// Icon for this category.
    pub fn icon(self) -> Icon {
        match self {
            Self::Cycles => Icon::Bicycle,
            Self::Books => Icon::Book,
            Self::Electronics => Icon::Laptop,
            Self::Kitchen => Icon::Utensils,
            Self::Furniture => Icon::Couch,
            Self::Sports => Icon::Dumbbell,
            Self::Other => Icon::Box,
        }
    }
}

/// Known ride vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vehicle {
    #[allow(missing_docs)]
    Bicycle,
    #[allow(missing_docs)]
    ElectricCycle,
    #[allow(missing_docs)]
    Motorcycle,
    #[allow(missing_docs)]
    Scooter,
}

impl Vehicle {
    /// Every vehicle, in form order.
    pub const ALL: [Vehicle; 4] = [
        Self::Bicycle,
        Self::ElectricCycle,
        Self::Motorcycle,
        Self::Scooter,
    ];

    /// Display label, which is also the stored value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bicycle => "Bicycle",
            Self::ElectricCycle => "Electric Cycle",
            Self::Motorcycle => "Motorcycle",
            Self::Scooter => "Scooter",
        }
    }

    /// Exact-label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|vehicle| vehicle.label() == label)
    }

    /// Icon for this vehicle.
    pub fn icon(self) -> Icon {
        match self {
            Self::Bicycle | Self::ElectricCycle => Icon::Bicycle,
            Self::Motorcycle | Self::Scooter => Icon::Motorcycle,
        }
    }
}

/// Icon for a category label; unknown labels get [`Icon::Box`].
pub fn category_icon(category: &str) -> Icon {
    Category::from_label(category)
        .map(Category::icon)
        .unwrap_or(Icon::Box)
}

/// Icon for a vehicle label; unknown labels get [`Icon::Bicycle`].
pub fn vehicle_icon(vehicle: &str) -> Icon {
    Vehicle::from_label(vehicle)
        .map(Vehicle::icon)
        .unwrap_or(Icon::Bicycle)
}

/// Price as shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTag {
    /// Zero price, highlighted differently.
    Free,
    /// Positive price.
    Amount(u32),
}

impl PriceTag {
    /// Classify a stored price.
    pub fn from_price(price: u32) -> Self {
        if price == 0 {
            Self::Free
        } else {
            Self::Amount(price)
        }
    }

    /// Whether the free styling applies.
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for PriceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
            Self::Amount(value) => write!(f, "{CURRENCY}{value}"),
        }
    }
}

/// Render a time on the 12-hour clock, e.g. `6:00 PM`.
pub fn format_time_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{hour12}:{:02} {suffix}", time.minute())
}

/// Render a date as `Feb 18, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Two-letter avatar text for a driver name.
///
/// Multi-word names use the first letters of the first and last words;
/// otherwise the first two characters are used.
pub fn driver_initials(name: &str) -> String {
    let name = name.trim();
    let words: Vec<&str> = name.split(' ').filter(|word| !word.is_empty()).collect();
    let initials: String = if words.len() >= 2 {
        words[0]
            .chars()
            .take(1)
            .chain(words[words.len() - 1].chars().take(1))
            .collect()
    } else {
        name.chars().take(2).collect()
    };
    initials.to_uppercase()
}

/// Lowercase availability label with its first space hyphenated.
pub fn status_slug(availability: &str) -> String {
    availability.to_lowercase().replacen(' ', "-", 1)
}

/// Everything a resource card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    /// Record id.
    pub id: u64,
    /// Item title.
    pub title: String,
    /// Price tag.
    pub price: PriceTag,
    /// Category label.
    pub category: String,
    /// Icon used when there is no image.
    pub icon: Icon,
    /// Image URL, if any.
    pub image: Option<String>,
    /// Description text.
    pub description: String,
    /// Pickup location.
    pub location: String,
    /// Availability label.
    pub availability: String,
    /// Slug used to style the availability badge.
    pub status: String,
    /// Formatted posting date.
    pub posted: String,
}

impl From<&Resource> for ResourceCard {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.item_name.clone(),
            price: PriceTag::from_price(resource.price),
            category: resource.category.clone(),
            icon: category_icon(&resource.category),
            image: resource.image.clone(),
            description: resource.description.clone(),
            location: resource.location.clone(),
            availability: resource.availability.clone(),
            status: status_slug(&resource.availability),
            posted: format_date(resource.date_posted),
        }
    }
}

/// Everything a ride card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideCard {
    /// Record id.
    pub id: u64,
    /// `from → to` line.
    pub route: String,
    /// Formatted departure date.
    pub date: String,
    /// Formatted departure time.
    pub time: String,
    /// Per-person cost with currency.
    pub cost: String,
    /// Seat summary.
    pub seats: String,
    /// Vehicle label.
    pub vehicle: String,
    /// Vehicle icon.
    pub icon: Icon,
    /// Cost of every seat combined, with currency.
    pub total_split: String,
    /// Driver name.
    pub driver: String,
    /// Driver avatar initials.
    pub initials: String,
    /// Whether the join action is offered.
    pub joinable: bool,
    /// Join button caption.
    pub join_label: &'static str,
}

impl From<&Ride> for RideCard {
    fn from(ride: &Ride) -> Self {
        let joinable = ride.seats > 0;
        Self {
            id: ride.id,
            route: format!("{} → {}", ride.from, ride.to),
            date: format_date(ride.date),
            time: format_time_12h(ride.time),
            cost: format!("{CURRENCY}{}", ride.cost_per_person),
            seats: format!("{} available", ride.seats),
            vehicle: ride.vehicle.clone(),
            icon: vehicle_icon(&ride.vehicle),
            total_split: format!("{CURRENCY}{}", ride.total_split()),
            driver: ride.driver.clone(),
            initials: driver_initials(&ride.driver),
            joinable,
            join_label: if joinable { "Join Ride" } else { "Fully Booked" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn twelve_hour_clock_edges() {
        assert_eq!(format_time_12h(time(0, 5)), "12:05 AM");
        assert_eq!(format_time_12h(time(12, 0)), "12:00 PM");
        assert_eq!(format_time_12h(time(18, 30)), "6:30 PM");
        assert_eq!(format_time_12h(time(9, 0)), "9:00 AM");
    }

    #[test]
    fn initials_from_first_and_last_word() {
        assert_eq!(driver_initials("Rahul Sharma"), "RS");
        assert_eq!(driver_initials("anjali k verma"), "AV");
        assert_eq!(driver_initials("priya"), "PR");
        assert_eq!(driver_initials("X"), "X");
    }

    #[test]
    fn icon_tables_fall_back() {
        assert_eq!(category_icon("Kitchen"), Icon::Utensils);
        assert_eq!(category_icon("kitchen"), Icon::Box);
        assert_eq!(category_icon("Garden"), Icon::Box);
        assert_eq!(vehicle_icon("Scooter"), Icon::Motorcycle);
        assert_eq!(vehicle_icon("Electric Cycle"), Icon::Bicycle);
        assert_eq!(vehicle_icon("Car"), Icon::Bicycle);
    }

    #[test]
    fn price_tags() {
        assert_eq!(PriceTag::from_price(0).to_string(), "Free");
        assert!(PriceTag::from_price(0).is_free());
        assert_eq!(PriceTag::from_price(3000).to_string(), "₹3000");
    }

    #[test]
    fn ride_card_summarises_ride() {
        let rides = seed::rides();
        let card = RideCard::from(&rides[1]);
        assert_eq!(card.route, "Hostel Complex → City Mall");
        assert_eq!(card.date, "Feb 17, 2026");
        assert_eq!(card.time, "6:30 PM");
        assert_eq!(card.initials, "PP");
        assert_eq!(card.icon, Icon::Motorcycle);
        assert_eq!(card.total_split, "₹15");
        assert_eq!(card.join_label, "Join Ride");
    }

    #[test]
    fn ride_without_seats_is_fully_booked() {
        let mut ride = seed::rides().remove(0);
        ride.seats = 0;
        let card = RideCard::from(&ride);
        assert!(!card.joinable);
        assert_eq!(card.join_label, "Fully Booked");
    }

    #[test]
    fn resource_card_status_slug() {
        let mut lamp = seed::resources().remove(3);
        lamp.availability = "On Hold".to_string();
        let card = ResourceCard::from(&lamp);
        assert_eq!(card.status, "on-hold");

        lamp.availability = "Not Yet Available".to_string();
        assert_eq!(ResourceCard::from(&lamp).status, "not-yet available");
        assert_eq!(card.icon, Icon::Laptop);
        assert_eq!(card.price.to_string(), "₹200");
    }
}
