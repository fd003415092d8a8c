use super::FilterError;
use crate::util::xml_ops::{serialize_element, XML_DECLARATION};
use std::collections::HashSet;
use std::path::Path;

/// the per-file vehicle retention policy of the filter DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehiclePolicy {
    /// retain only vehicles whose id is in the set
    Include(HashSet<String>),
    /// remove only vehicles whose id is in the set
    Exclude(HashSet<String>),
    /// pass every vehicle through unchanged
    All,
}

impl VehiclePolicy {
    pub fn retains(&self, vehicle_id: &str) -> bool {
        match self {
            VehiclePolicy::Include(ids) => ids.contains(vehicle_id),
            VehiclePolicy::Exclude(ids) => !ids.contains(vehicle_id),
            VehiclePolicy::All => true,
        }
    }
}

/// applies a vehicle policy to a routes document, dropping or keeping
/// `vehicle` elements by id. non-vehicle elements (vehicle types, flows)
/// always pass through. `source` names the document in errors.
pub fn filter_route_document(
    document: &str,
    policy: &VehiclePolicy,
    source: &Path,
) -> Result<String, FilterError> {
    let tree = roxmltree::Document::parse(document).map_err(|e| FilterError::ParseError {
        filepath: source.to_path_buf(),
        message: format!("{e}"),
    })?;
    let root = tree.root_element();
    let mut out = String::from(XML_DECLARATION);
    out.push_str("<routes>\n");
    for child in root.children().filter(|c| c.is_element()) {
        if child.has_tag_name("vehicle") {
            let vehicle_id = child
                .attribute("id")
                .ok_or_else(|| FilterError::MissingVehicleId(source.to_path_buf()))?;
            if !policy.retains(vehicle_id) {
                continue;
            }
        }
        serialize_element(child, &mut out, 1);
    }
    out.push_str("</routes>\n");
    Ok(out)
}
