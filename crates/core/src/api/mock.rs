use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{ResourceApi, RideApi};
use crate::{
    error::ApiResult,
    models::{NewResource, NewRide, Resource, Ride},
    search::{self, CategoryFilter},
    store::Store,
};

/// Simulated round-trip applied to every mock call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Resource access layer backed by an in-memory [`Store`].
#[derive(Clone)]
pub struct MockResourceApi {
    store: Store<Resource>,
    latency: Duration,
}

impl MockResourceApi {
    /// Wrap `store`, delaying each call by `latency`.
    pub fn new(store: Store<Resource>, latency: Duration) -> Self {
        Self { store, latency }
    }

    /// Underlying store handle.
    pub fn store(&self) -> &Store<Resource> {
        &self.store
    }
}

#[async_trait]
impl ResourceApi for MockResourceApi {
    async fn list_resources(&self) -> ApiResult<Vec<Resource>> {
        sleep(self.latency).await;
        let resources = self.store.snapshot();
        info!(total = resources.len(), "Resources listed");
        Ok(resources)
    }

    async fn add_resource(&self, draft: NewResource) -> ApiResult<Resource> {
        sleep(self.latency).await;
        let resource = self.store.append(draft);
        info!(id = resource.id, name = %resource.item_name, "Resource added");
        Ok(resource)
    }

    async fn search_resources(
        &self,
        query: &str,
        category: &CategoryFilter,
    ) -> ApiResult<Vec<Resource>> {
        let needle = search::needle(query);
        sleep(self.latency).await;
        let matches = self
            .store
            .filtered(|resource| search::resource_matches(resource, &needle, category));
        debug!(query = %needle, %category, matches = matches.len(), "Resources searched");
        Ok(matches)
    }
}

/// Ride access layer backed by an in-memory [`Store`].
#[derive(Clone)]
pub struct MockRideApi {
    store: Store<Ride>,
    latency: Duration,
}

impl MockRideApi {
    /// Wrap `store`, delaying each call by `latency`.
    pub fn new(store: Store<Ride>, latency: Duration) -> Self {
        Self { store, latency }
    }

    /// Underlying store handle.
    pub fn store(&self) -> &Store<Ride> {
        &self.store
    }
}

#[async_trait]
impl RideApi for MockRideApi {
    async fn list_rides(&self) -> ApiResult<Vec<Ride>> {
        sleep(self.latency).await;
        let rides = self.store.snapshot();
        info!(total = rides.len(), "Rides listed");
        Ok(rides)
    }

    async fn add_ride(&self, draft: NewRide) -> ApiResult<Ride> {
        sleep(self.latency).await;
        let ride = self.store.append(draft);
        info!(id = ride.id, from = %ride.from, to = %ride.to, "Ride added");
        Ok(ride)
    }

    async fn search_rides(&self, query: &str) -> ApiResult<Vec<Ride>> {
        let needle = search::needle(query);
        sleep(self.latency).await;
        let matches = self
            .store
            .filtered(|ride| search::ride_matches(ride, &needle));
        debug!(query = %needle, matches = matches.len(), "Rides searched");
        Ok(matches)
    }
}
