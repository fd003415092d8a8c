//! the standalone route-filter variant: applies a per-file vehicle policy to
//! pre-existing route files and emits a run configuration referencing the
//! filtered copies, without GTFS or demand synthesis.
mod filter_error;
pub mod filter_ops;
mod filter_model;
mod route_filter;

pub use filter_error::FilterError;
pub use filter_model::{FilterMode, FilterModel, RouteFilterSpec};
pub use filter_ops::FilteredRoute;
pub use route_filter::{filter_route_document, VehiclePolicy};
