//! bindings to the external data sources a simulation imports: the GTFS
//! feed, the vehicle-type catalog, and the background travel demand. each
//! binding sits behind a trait so the compiler can be exercised against
//! in-memory fakes.
mod data_error;
mod gtfs_feed;
mod travel_demand;
mod vehicle_catalog;

pub use data_error::DataError;
pub use gtfs_feed::GtfsFeed;
pub use travel_demand::TravelDemand;
pub use vehicle_catalog::{VehicleTypeCatalog, VehicleTypeRow};

use std::collections::HashMap;
use std::path::Path;

/// a bound public-transit schedule source. vehicle assignment binds catalog
/// vehicle identities onto schedule trips in memory before export.
pub trait TransitFeed {
    fn assign_vehicle(
        &mut self,
        trip_map: HashMap<String, String>,
        block_map: HashMap<String, String>,
    );
    fn export_route_file(
        &self,
        start_seconds: u32,
        end_seconds: u32,
        schedule: &str,
        path: &Path,
    ) -> Result<(), DataError>;
    fn export_busstop_file(&self, path: &Path, network_path: &Path) -> Result<(), DataError>;
}

/// a bound vehicle-type catalog.
pub trait VehicleCatalog {
    fn contains(&self, vehicle_id: &str) -> bool;
    fn export(&self, path: &Path) -> Result<(), DataError>;
}

/// a bound travel-demand source that folds background traffic into the
/// transit route file.
pub trait DemandProcessor {
    fn merge_route_file(
        &self,
        raw_route_path: &Path,
        vehicle_path: &Path,
        stop_path: &Path,
        network_path: &Path,
        out_path: &Path,
    ) -> Result<(), DataError>;
}
