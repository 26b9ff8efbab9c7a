//! Demo listings loaded into a fresh store.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Resource, Ride};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: u64,
    item_name: &str,
    category: &str,
    description: &str,
    availability: &str,
    price: u32,
    location: &str,
    image: &str,
    posted: NaiveDate,
) -> Resource {
    Resource {
        id,
        item_name: item_name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        availability: availability.to_string(),
        price,
        location: location.to_string(),
        image: Some(format!(
            "https://images.unsplash.com/{image}?w=400&h=300&fit=crop"
        )),
        date_posted: posted,
    }
}

#[allow(clippy::too_many_arguments)]
fn ride(
    id: u64,
    from: &str,
    to: &str,
    departs: (NaiveDate, NaiveTime),
    cost_per_person: u32,
    driver: &str,
    vehicle: &str,
    posted: NaiveDate,
) -> Ride {
    Ride {
        id,
        from: from.to_string(),
        to: to.to_string(),
        date: departs.0,
        time: departs.1,
        seats: 1,
        cost_per_person,
        driver: driver.to_string(),
        vehicle: vehicle.to_string(),
        date_posted: posted,
    }
}

/// The eight starter resources.
pub fn resources() -> Vec<Resource> {
    vec![
        resource(
            1,
            "Mountain Bicycle",
            "Cycles",
            "21-gear mountain bike in excellent condition. Perfect for campus commute and weekend trails.",
            "Available",
            3000,
            "Hostel A, Room 205",
            "photo-1576435728678-68d0fbf94e91",
            date(2026, 2, 10),
        ),
        resource(
            2,
            "Electric Kettle",
            "Kitchen",
            "1.5L capacity electric kettle. Barely used, moving out soon.",
            "Available",
            0,
            "Hostel B, Room 112",
            "photo-1563636619-e9143da7973b",
            date(2026, 2, 12),
        ),
        resource(
            3,
            "Data Structures Textbook",
            "Books",
            "Classic CS textbook in great condition. No marks or highlights.",
            "Available",
            500,
            "Central Library Area",
            "photo-1544947950-fa07a98d237f",
            date(2026, 2, 14),
        ),
        resource(
            4,
            "LED Study Lamp",
            "Electronics",
            "Adjustable brightness LED desk lamp. Works perfectly.",
            "Reserved",
            200,
            "Hostel C, Room 304",
            "photo-1507473885765-e6ed057f782c",
            date(2026, 2, 13),
        ),
        resource(
            5,
            "Badminton Racket Set",
            "Sports",
            "Two rackets with shuttlecocks. Good condition, great for beginners.",
            "Available",
            800,
            "Sports Complex",
            "photo-1626224583764-f87db24ac4ea",
            date(2026, 2, 11),
        ),
        resource(
            6,
            "Mini Refrigerator",
            "Electronics",
            "Compact fridge perfect for dorm room. 2 years old, excellent condition.",
            "Available",
            2500,
            "Hostel D, Room 108",
            "photo-1571175443880-49e1d25b2bc5",
            date(2026, 2, 9),
        ),
        resource(
            7,
            "Study Table",
            "Furniture",
            "Wooden study table with drawer. Sturdy and spacious.",
            "Available",
            1500,
            "Hostel A, Room 101",
            "photo-1518455027359-f3f8164ba6bd",
            date(2026, 2, 8),
        ),
        resource(
            8,
            "Laptop Stand",
            "Electronics",
            "Ergonomic aluminum laptop stand. Adjustable height.",
            "Available",
            600,
            "Hostel B, Room 215",
            "photo-1527864550417-7fd91fc51a46",
            date(2026, 2, 15),
        ),
    ]
}

/// The six starter rides.
pub fn rides() -> Vec<Ride> {
    vec![
        ride(
            1,
            "Campus Main Gate",
            "City Railway Station",
            (date(2026, 2, 18), time(14, 0)),
            20,
            "Rahul Sharma",
            "Motorcycle",
            date(2026, 2, 15),
        ),
        ride(
            2,
            "Hostel Complex",
            "City Mall",
            (date(2026, 2, 17), time(18, 30)),
            15,
            "Priya Patel",
            "Scooter",
            date(2026, 2, 15),
        ),
        ride(
            3,
            "Main Campus",
            "Airport",
            (date(2026, 2, 20), time(6, 0)),
            50,
            "Amit Kumar",
            "Motorcycle",
            date(2026, 2, 14),
        ),
        ride(
            4,
            "Library Block",
            "Bus Stand",
            (date(2026, 2, 16), time(16, 0)),
            10,
            "Sneha Reddy",
            "Bicycle",
            date(2026, 2, 15),
        ),
        ride(
            5,
            "Engineering Block",
            "City Center",
            (date(2026, 2, 19), time(10, 0)),
            25,
            "Vikram Singh",
            "Electric Cycle",
            date(2026, 2, 13),
        ),
        ride(
            6,
            "Hostel A",
            "Hospital",
            (date(2026, 2, 17), time(9, 0)),
            30,
            "Anjali Verma",
            "Scooter",
            date(2026, 2, 16),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_follow_position() {
        for (idx, item) in resources().iter().enumerate() {
            assert_eq!(item.id, idx as u64 + 1);
        }
        for (idx, ride) in rides().iter().enumerate() {
            assert_eq!(ride.id, idx as u64 + 1);
        }
    }

    #[test]
    fn seed_has_one_free_item() {
        let free: Vec<_> = resources().into_iter().filter(|r| r.price == 0).collect();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].item_name, "Electric Kettle");
    }
}
