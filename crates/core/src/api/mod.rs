//! Access layer: asynchronous list/add/search operations per vertical.
//!
//! The traits mirror the shape a future HTTP backend is expected to keep:
//! `list` yields every record, `add` yields the created record, and
//! `search` yields the filtered records.

mod mock;

use async_trait::async_trait;

pub use mock::{MockResourceApi, MockRideApi, DEFAULT_LATENCY};

use crate::{
    config::AppConfig,
    error::ApiResult,
    models::{NewResource, NewRide, Resource, Ride},
    search::CategoryFilter,
    seed,
    store::{Clock, Store},
};

/// Operations over the resource listing.
#[async_trait]
pub trait ResourceApi: Send + Sync + 'static {
    /// Snapshot of every resource in insertion order.
    async fn list_resources(&self) -> ApiResult<Vec<Resource>>;

    /// Store a new resource and return it with its assigned id and date.
    async fn add_resource(&self, draft: NewResource) -> ApiResult<Resource>;

    /// Resources matching `query` within `category`, in insertion order.
    async fn search_resources(
        &self,
        query: &str,
        category: &CategoryFilter,
    ) -> ApiResult<Vec<Resource>>;
}

/// Operations over the ride listing.
#[async_trait]
pub trait RideApi: Send + Sync + 'static {
    /// Snapshot of every ride in insertion order.
    async fn list_rides(&self) -> ApiResult<Vec<Ride>>;

    /// Store a new ride and return it with its assigned id and date.
    async fn add_ride(&self, draft: NewRide) -> ApiResult<Ride>;

    /// Rides whose route or driver matches `query`, in insertion order.
    async fn search_rides(&self, query: &str) -> ApiResult<Vec<Ride>>;
}

/// Build both mock access layers from configuration, sharing `clock`.
pub fn mock_backend(
    config: &AppConfig,
    clock: impl Clock + Clone + 'static,
) -> (MockResourceApi, MockRideApi) {
    let (resources, rides) = if config.seed_demo_data {
        (seed::resources(), seed::rides())
    } else {
        (Vec::new(), Vec::new())
    };
    let latency = config.latency();
    (
        MockResourceApi::new(Store::seeded(resources, clock.clone()), latency),
        MockRideApi::new(Store::seeded(rides, clock), latency),
    )
}
