use super::{DataError, TransitFeed};
use crate::util::xml_ops::{escape_attr, XML_DECLARATION};
use gtfs_structures::{Gtfs, Trip};
use itertools::Itertools;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// SUMO vehicle type used for trips with no vehicle assignment.
pub const UNASSIGNED_VEHICLE_TYPE: &str = "bus";

/// fallback dwell time at a stop when the feed carries no arrival time.
const DEFAULT_STOP_DURATION_SECONDS: u32 = 20;

/// a GTFS feed bound by a `gtfs.<name>` import. the schedule reference of a
/// simulation block is interpreted as a GTFS service id.
pub struct GtfsFeed {
    name: String,
    gtfs: Gtfs,
    trip_assignments: HashMap<String, String>,
    block_assignments: HashMap<String, String>,
}

/// one scheduled vehicle in the exported route document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub trip_id: String,
    pub vehicle_type: String,
    pub depart_seconds: u32,
    pub stops: Vec<StopCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopCall {
    pub bus_stop: String,
    pub duration_seconds: u32,
}

impl GtfsFeed {
    /// loads a GTFS feed from `<data_path>/<name>` (a directory or zip
    /// archive of GTFS text files).
    pub fn open(data_path: &Path, name: &str) -> Result<GtfsFeed, DataError> {
        let source = data_path.join(name);
        let source_str = source.to_string_lossy();
        log::info!("loading GTFS feed '{name}' from {source_str}");
        let gtfs = Gtfs::new(source_str.as_ref()).map_err(|e| DataError::FeedReadError {
            name: name.to_string(),
            source: e,
        })?;
        Ok(GtfsFeed {
            name: name.to_string(),
            gtfs,
            trip_assignments: HashMap::new(),
            block_assignments: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// the vehicle identity operating a trip: a trip-level assignment wins
    /// over a block-level one; unassigned trips run the default type.
    fn vehicle_type_for(&self, trip: &Trip) -> &str {
        if let Some(vehicle) = self.trip_assignments.get(&trip.id) {
            return vehicle;
        }
        trip.block_id
            .as_ref()
            .and_then(|block| self.block_assignments.get(block))
            .map(String::as_str)
            .unwrap_or(UNASSIGNED_VEHICLE_TYPE)
    }

    /// collects trips on the given service whose first departure falls
    /// inside `[start_seconds, end_seconds)`, depart-sorted.
    fn scheduled_entries(
        &self,
        start_seconds: u32,
        end_seconds: u32,
        schedule: &str,
    ) -> Vec<RouteEntry> {
        self.gtfs
            .trips
            .values()
            .filter(|trip| trip.service_id == schedule)
            .filter_map(|trip| {
                let depart_seconds = trip.stop_times.first()?.departure_time?;
                if depart_seconds < start_seconds || depart_seconds >= end_seconds {
                    return None;
                }
                let stops = trip
                    .stop_times
                    .iter()
                    .map(|st| StopCall {
                        bus_stop: st.stop.id.clone(),
                        duration_seconds: match (st.arrival_time, st.departure_time) {
                            (Some(arrival), Some(departure)) if departure > arrival => {
                                departure - arrival
                            }
                            _ => DEFAULT_STOP_DURATION_SECONDS,
                        },
                    })
                    .collect();
                Some(RouteEntry {
                    trip_id: trip.id.clone(),
                    vehicle_type: self.vehicle_type_for(trip).to_string(),
                    depart_seconds,
                    stops,
                })
            })
            .sorted_by(|a, b| {
                a.depart_seconds
                    .cmp(&b.depart_seconds)
                    .then_with(|| a.trip_id.cmp(&b.trip_id))
            })
            .collect()
    }
}

impl TransitFeed for GtfsFeed {
    fn assign_vehicle(
        &mut self,
        trip_map: HashMap<String, String>,
        block_map: HashMap<String, String>,
    ) {
        log::debug!(
            "feed '{}': binding {} trip and {} block vehicle assignments",
            self.name,
            trip_map.len(),
            block_map.len()
        );
        self.trip_assignments = trip_map;
        self.block_assignments = block_map;
    }

    fn export_route_file(
        &self,
        start_seconds: u32,
        end_seconds: u32,
        schedule: &str,
        path: &Path,
    ) -> Result<(), DataError> {
        let entries = self.scheduled_entries(start_seconds, end_seconds, schedule);
        log::info!(
            "feed '{}': exporting {} trips on schedule '{schedule}' in [{start_seconds}, {end_seconds})",
            self.name,
            entries.len()
        );
        write_route_file(path, &entries)
    }

    fn export_busstop_file(&self, path: &Path, network_path: &Path) -> Result<(), DataError> {
        log::debug!(
            "feed '{}': exporting bus stops for network {}",
            self.name,
            network_path.display()
        );
        let stops = self
            .gtfs
            .stops
            .values()
            .map(|stop| (stop.id.clone(), stop.name.clone().unwrap_or_default()))
            .sorted()
            .collect_vec();
        write_busstop_file(path, &stops)
    }
}

/// writes a SUMO routes document with one `vehicle` element per entry.
pub fn write_route_file(path: &Path, entries: &[RouteEntry]) -> Result<(), DataError> {
    let mut out = String::from(XML_DECLARATION);
    out.push_str("<routes>\n");
    for entry in entries {
        out.push_str(&format!(
            "\t<vehicle id=\"{}\" type=\"{}\" depart=\"{}\">\n",
            escape_attr(&entry.trip_id),
            escape_attr(&entry.vehicle_type),
            entry.depart_seconds
        ));
        for stop in &entry.stops {
            out.push_str(&format!(
                "\t\t<stop busStop=\"{}\" duration=\"{}\"/>\n",
                escape_attr(&stop.bus_stop),
                stop.duration_seconds
            ));
        }
        out.push_str("\t</vehicle>\n");
    }
    out.push_str("</routes>\n");
    fs::write(path, out).map_err(|e| DataError::ExportIoError {
        filepath: PathBuf::from(path),
        source: e,
    })
}

/// writes a SUMO additional file declaring one `busStop` per (id, name) pair.
pub fn write_busstop_file(path: &Path, stops: &[(String, String)]) -> Result<(), DataError> {
    let mut out = String::from(XML_DECLARATION);
    out.push_str("<additional>\n");
    for (stop_id, stop_name) in stops {
        out.push_str(&format!(
            "\t<busStop id=\"{}\" name=\"{}\" friendlyPos=\"true\"/>\n",
            escape_attr(stop_id),
            escape_attr(stop_name)
        ));
    }
    out.push_str("</additional>\n");
    fs::write(path, out).map_err(|e| DataError::ExportIoError {
        filepath: PathBuf::from(path),
        source: e,
    })
}
