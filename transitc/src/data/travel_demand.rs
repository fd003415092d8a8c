use super::{DataError, DemandProcessor};
use crate::util::xml_ops::{serialize_element, XML_DECLARATION};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// background travel demand bound by a `td.<name>` import, read from
/// `<data_path>/<name>_demand.rou.xml`. merging folds the demand vehicles
/// into the transit route file, depart-sorted, which is the ordering SUMO
/// requires of its route inputs.
pub struct TravelDemand {
    name: String,
    document: String,
}

impl TravelDemand {
    pub fn open(data_path: &Path, name: &str) -> Result<TravelDemand, DataError> {
        let filepath = data_path.join(format!("{name}_demand.rou.xml"));
        log::info!("loading travel demand '{name}' from {}", filepath.display());
        let document = fs::read_to_string(&filepath).map_err(|e| DataError::DemandReadError {
            filepath,
            source: e,
        })?;
        Ok(TravelDemand {
            name: name.to_string(),
            document,
        })
    }

    pub fn from_document(name: &str, document: String) -> TravelDemand {
        TravelDemand {
            name: name.to_string(),
            document,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl DemandProcessor for TravelDemand {
    fn merge_route_file(
        &self,
        raw_route_path: &Path,
        vehicle_path: &Path,
        stop_path: &Path,
        network_path: &Path,
        out_path: &Path,
    ) -> Result<(), DataError> {
        log::debug!(
            "demand '{}': merging {} against vehicles {}, stops {}, network {}",
            self.name,
            raw_route_path.display(),
            vehicle_path.display(),
            stop_path.display(),
            network_path.display()
        );
        let raw_document =
            fs::read_to_string(raw_route_path).map_err(|e| DataError::DemandReadError {
                filepath: raw_route_path.to_path_buf(),
                source: e,
            })?;
        let mut vehicles = collect_vehicles(&raw_document, raw_route_path)?;
        let background = collect_vehicles(&self.document, Path::new(&self.name))?;
        log::info!(
            "demand '{}': merging {} transit and {} background vehicles",
            self.name,
            vehicles.len(),
            background.len()
        );
        vehicles.extend(background);
        vehicles.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut out = String::from(XML_DECLARATION);
        out.push_str("<routes>\n");
        for (_, vehicle_xml) in &vehicles {
            out.push_str(vehicle_xml);
        }
        out.push_str("</routes>\n");
        fs::write(out_path, out).map_err(|e| DataError::ExportIoError {
            filepath: PathBuf::from(out_path),
            source: e,
        })
    }
}

/// extracts the `vehicle` elements of a routes document, keyed by their
/// depart time, each re-serialized for the merged output.
fn collect_vehicles(document: &str, filepath: &Path) -> Result<Vec<(f64, String)>, DataError> {
    let tree = roxmltree::Document::parse(document).map_err(|e| DataError::RouteParseError {
        filepath: filepath.to_path_buf(),
        message: format!("{e}"),
    })?;
    let mut vehicles = Vec::new();
    for node in tree
        .root_element()
        .children()
        .filter(|c| c.is_element() && c.has_tag_name("vehicle"))
    {
        let depart_attr = node.attribute("depart").ok_or_else(|| {
            DataError::RouteParseError {
                filepath: filepath.to_path_buf(),
                message: String::from("vehicle element missing 'depart' attribute"),
            }
        })?;
        let depart: f64 =
            depart_attr
                .parse()
                .map_err(|_| DataError::RouteParseError {
                    filepath: filepath.to_path_buf(),
                    message: format!("unparsable depart time '{depart_attr}'"),
                })?;
        let mut vehicle_xml = String::new();
        serialize_element(node, &mut vehicle_xml, 1);
        vehicles.push((depart, vehicle_xml));
    }
    Ok(vehicles)
}
