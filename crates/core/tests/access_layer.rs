use std::time::Duration;

use campus_hub_core::{
    api::DEFAULT_LATENCY,
    display::{PriceTag, ResourceCard},
    mock_backend, seed,
    validation::{ResourceForm, RideForm},
    AppConfig, CategoryFilter, FixedClock, MockResourceApi, MockRideApi, NewResource, NewRide,
    ResourceApi, RideApi, Store,
};
use chrono::{NaiveDate, NaiveTime};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
}

fn seeded_resources() -> MockResourceApi {
    MockResourceApi::new(
        Store::seeded(seed::resources(), FixedClock(today())),
        DEFAULT_LATENCY,
    )
}

fn seeded_rides() -> MockRideApi {
    MockRideApi::new(
        Store::seeded(seed::rides(), FixedClock(today())),
        DEFAULT_LATENCY,
    )
}

fn lamp() -> NewResource {
    NewResource {
        item_name: "Lamp".to_string(),
        category: "Electronics".to_string(),
        description: "desk lamp".to_string(),
        availability: "Available".to_string(),
        price: 0,
        location: "A".to_string(),
        image: None,
    }
}

fn airport_ride() -> NewRide {
    NewRide {
        from: "Hostel B".to_string(),
        to: "Airport".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 2, 21).unwrap(),
        time: NaiveTime::from_hms_opt(5, 30, 0).unwrap(),
        seats: 2,
        cost_per_person: 45,
        driver: "Kavya Nair".to_string(),
        vehicle: "Scooter".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn first_insert_into_empty_store_is_id_one_and_free() {
    let api = MockResourceApi::new(Store::with_clock(FixedClock(today())), DEFAULT_LATENCY);

    let created = api.add_resource(lamp()).await.unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.date_posted, today());
    let card = ResourceCard::from(&created);
    assert_eq!(card.price, PriceTag::Free);
    assert_eq!(card.price.to_string(), "Free");
}

#[tokio::test(start_paused = true)]
async fn every_insert_grows_collection_by_one() {
    let api = seeded_rides();
    for _ in 0..3 {
        let before = api.list_rides().await.unwrap().len();
        let created = api.add_ride(airport_ride()).await.unwrap();
        let after = api.list_rides().await.unwrap().len();

        assert_eq!(created.id, before as u64 + 1);
        assert_eq!(after, before + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn added_record_round_trips_through_list() {
    let api = seeded_rides();
    let draft = airport_ride();
    let created = api.add_ride(draft.clone()).await.unwrap();

    let listed = api.list_rides().await.unwrap();
    let stored = listed.iter().find(|ride| ride.id == created.id).unwrap();
    assert_eq!(stored.from, draft.from);
    assert_eq!(stored.to, draft.to);
    assert_eq!(stored.date, draft.date);
    assert_eq!(stored.time, draft.time);
    assert_eq!(stored.seats, draft.seats);
    assert_eq!(stored.cost_per_person, draft.cost_per_person);
    assert_eq!(stored.driver, draft.driver);
    assert_eq!(stored.vehicle, draft.vehicle);
    assert_eq!(stored.date_posted, today());
}

#[tokio::test(start_paused = true)]
async fn bike_search_is_literal_substring() {
    let api = seeded_resources();
    let found = api
        .search_resources("bike", &CategoryFilter::parse("all"))
        .await
        .unwrap();

    // Only the description "21-gear mountain bike" contains the literal text.
    let names: Vec<_> = found.iter().map(|r| r.item_name.as_str()).collect();
    assert_eq!(names, vec!["Mountain Bicycle"]);
}

#[tokio::test(start_paused = true)]
async fn search_results_contain_the_query() {
    let api = seeded_resources();
    for query in ["lamp", "HOSTEL", "condition", "electronics", "zzz"] {
        let needle = query.to_lowercase();
        let found = api
            .search_resources(query, &CategoryFilter::All)
            .await
            .unwrap();
        for resource in &found {
            assert!(
                resource.item_name.to_lowercase().contains(&needle)
                    || resource.description.to_lowercase().contains(&needle)
                    || resource.category.to_lowercase().contains(&needle),
                "{} does not contain {query}",
                resource.item_name
            );
        }
    }

    let everything = api.search_resources("", &CategoryFilter::All).await.unwrap();
    assert_eq!(everything, api.list_resources().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn category_filter_is_idempotent() {
    let api = seeded_resources();
    let category = CategoryFilter::parse("Electronics");
    let once = api.search_resources("", &category).await.unwrap();
    let twice: Vec<_> = once
        .iter()
        .filter(|resource| category.admits(&resource.category))
        .cloned()
        .collect();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn rejected_ride_form_never_reaches_the_store() {
    let api = seeded_rides();
    let form = RideForm {
        from: "Hostel A".to_string(),
        to: "Airport".to_string(),
        date: "2026-02-20".to_string(),
        time: "08:00".to_string(),
        seats: "3".to_string(),
        cost_per_person: "20".to_string(),
        driver: "Kavya Nair".to_string(),
        vehicle: "Scooter".to_string(),
    };

    let mut board = campus_hub_core::RideBoard::default();
    assert!(board.submit(&form, today()).is_none());
    assert_eq!(
        board.message().map(|m| m.text.as_str()),
        Some("Seats must be between 1 and 2")
    );
    assert_eq!(api.store().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn valid_resource_form_adds_exactly_one_record() {
    let api = seeded_resources();
    let form = ResourceForm {
        item_name: "Desk Fan".to_string(),
        category: "Electronics".to_string(),
        description: "Quiet three-speed fan".to_string(),
        availability: "Available".to_string(),
        price: "350".to_string(),
        location: "Hostel C".to_string(),
    };
    let draft = form.validate().unwrap();
    let created = api.add_resource(draft).await.unwrap();
    assert_eq!(created.id, 9);
    assert_eq!(api.store().len(), 9);
}

#[tokio::test(start_paused = true)]
async fn backend_from_config_honours_seed_flag() {
    let config = AppConfig {
        latency_ms: 10,
        seed_demo_data: false,
        ..AppConfig::default()
    };
    let (resources, rides) = mock_backend(&config, FixedClock(today()));
    assert!(resources.list_resources().await.unwrap().is_empty());
    assert!(rides.list_rides().await.unwrap().is_empty());

    let (resources, rides) = mock_backend(&AppConfig::default(), FixedClock(today()));
    assert_eq!(resources.list_resources().await.unwrap().len(), 8);
    assert_eq!(rides.list_rides().await.unwrap().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn latency_is_configurable() {
    let api = MockRideApi::new(
        Store::seeded(seed::rides(), FixedClock(today())),
        Duration::from_millis(1200),
    );
    let started = tokio::time::Instant::now();
    api.search_rides("mall").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1200));
}
