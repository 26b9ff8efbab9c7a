//! Search and filter predicates shared by the access layer and the boards.

use std::fmt;

use crate::models::{Resource, Ride};

/// Category restriction applied to resource searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only records whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Interpret a select-box value; empty and `all` both mean no restriction.
    ///
    /// Any other value is kept verbatim and compared exactly.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Whether a record with `category` passes this filter.
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Normalise a user query into the lowercase needle used for matching.
pub fn needle(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Category and case-insensitive text match over name, description and category.
pub fn resource_matches(resource: &Resource, needle: &str, category: &CategoryFilter) -> bool {
    if !category.admits(&resource.category) {
        return false;
    }
    if needle.is_empty() {
        return true;
    }
    [
        &resource.item_name,
        &resource.description,
        &resource.category,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Case-insensitive text match over origin, destination and driver.
pub fn ride_matches(ride: &Ride, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&ride.from, &ride.to, &ride.driver]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Stable ascending sort by departure date, then time.
pub fn sort_by_departure(rides: &mut [Ride]) {
    rides.sort_by_key(|ride| (ride.date, ride.time));
}
