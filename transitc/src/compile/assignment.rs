use super::CompileError;
use crate::data::VehicleCatalog;
use crate::model::VehicleAssignment;
use std::collections::HashMap;

/// the two lookup mappings built from a simulation block's assignment list,
/// handed unchanged to the feed's vehicle-assignment step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMappings {
    pub trip_to_vehicle: HashMap<String, String>,
    pub block_to_vehicle: HashMap<String, String>,
}

/// validates every assignment against the vehicle catalog and builds the
/// trip and block mappings. validation is all-or-nothing: the first vehicle
/// id absent from the catalog fails the whole block. when two assignments
/// name the same trip or block id, the later one wins, matching the
/// declaration-order overwrite behavior of imports.
pub fn build_assignment_mappings(
    catalog: &dyn VehicleCatalog,
    assignments: &[VehicleAssignment],
) -> Result<AssignmentMappings, CompileError> {
    let mut mappings = AssignmentMappings::default();
    for assignment in assignments {
        if !catalog.contains(&assignment.vehicle_id) {
            return Err(CompileError::UnknownVehicle(assignment.vehicle_id.clone()));
        }
        if let Some(block_id) = &assignment.block_id {
            mappings
                .block_to_vehicle
                .insert(block_id.clone(), assignment.vehicle_id.clone());
        }
        if let Some(trip_id) = &assignment.trip_id {
            mappings
                .trip_to_vehicle
                .insert(trip_id.clone(), assignment.vehicle_id.clone());
        }
    }
    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use std::collections::HashSet;
    use std::path::Path;

    struct FakeCatalog {
        ids: HashSet<String>,
    }

    impl FakeCatalog {
        fn with(ids: &[&str]) -> FakeCatalog {
            FakeCatalog {
                ids: ids.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl VehicleCatalog for FakeCatalog {
        fn contains(&self, vehicle_id: &str) -> bool {
            self.ids.contains(vehicle_id)
        }
        fn export(&self, _path: &Path) -> Result<(), DataError> {
            Ok(())
        }
    }

    fn assignment(
        vehicle_id: &str,
        trip_id: Option<&str>,
        block_id: Option<&str>,
    ) -> VehicleAssignment {
        VehicleAssignment {
            vehicle_id: String::from(vehicle_id),
            trip_id: trip_id.map(String::from),
            block_id: block_id.map(String::from),
        }
    }

    #[test]
    fn test_mappings_built_from_ids_present() {
        let catalog = FakeCatalog::with(&["bus42", "shuttle7"]);
        let assignments = vec![
            assignment("bus42", Some("T100"), None),
            assignment("shuttle7", None, Some("B7")),
            assignment("bus42", Some("T200"), Some("B9")),
        ];
        let mappings = build_assignment_mappings(&catalog, &assignments).unwrap();
        assert_eq!(mappings.trip_to_vehicle.get("T100"), Some(&String::from("bus42")));
        assert_eq!(mappings.trip_to_vehicle.get("T200"), Some(&String::from("bus42")));
        assert_eq!(mappings.block_to_vehicle.get("B7"), Some(&String::from("shuttle7")));
        assert_eq!(mappings.block_to_vehicle.get("B9"), Some(&String::from("bus42")));
    }

    #[test]
    fn test_unknown_vehicle_fails_whole_block() {
        let catalog = FakeCatalog::with(&["bus42"]);
        let assignments = vec![
            assignment("bus42", Some("T100"), None),
            assignment("ghost99", Some("T200"), None),
        ];
        match build_assignment_mappings(&catalog, &assignments) {
            Err(CompileError::UnknownVehicle(id)) => assert_eq!(id, "ghost99"),
            other => panic!("expected UnknownVehicle, got {other:?}"),
        }
    }

    #[test]
    fn test_assignment_without_trip_or_block_is_a_noop() {
        let catalog = FakeCatalog::with(&["bus42"]);
        let mappings =
            build_assignment_mappings(&catalog, &[assignment("bus42", None, None)]).unwrap();
        assert!(mappings.trip_to_vehicle.is_empty());
        assert!(mappings.block_to_vehicle.is_empty());
    }

    #[test]
    fn test_duplicate_trip_id_last_wins() {
        let catalog = FakeCatalog::with(&["bus42", "shuttle7"]);
        let assignments = vec![
            assignment("bus42", Some("T100"), None),
            assignment("shuttle7", Some("T100"), None),
        ];
        let mappings = build_assignment_mappings(&catalog, &assignments).unwrap();
        assert_eq!(
            mappings.trip_to_vehicle.get("T100"),
            Some(&String::from("shuttle7"))
        );
    }
}
