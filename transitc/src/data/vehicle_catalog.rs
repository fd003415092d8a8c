use super::{DataError, VehicleCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::xml_ops::{escape_attr, XML_DECLARATION};

/// one row of a vehicle-type catalog CSV. the exported attributes follow the
/// SUMO `vType` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleTypeRow {
    pub id: String,
    pub vclass: String,
    pub length: f64,
    pub accel: f64,
    pub decel: f64,
    pub max_speed: f64,
    pub person_capacity: u32,
}

/// a vehicle-type catalog read from `<data_path>/<name>.csv`.
pub struct VehicleTypeCatalog {
    rows: Vec<VehicleTypeRow>,
    ids: HashSet<String>,
}

impl VehicleTypeCatalog {
    pub fn from_csv(filepath: &Path) -> Result<VehicleTypeCatalog, DataError> {
        let reader =
            csv::ReaderBuilder::new()
                .from_path(filepath)
                .map_err(|e| DataError::CatalogReadError {
                    filepath: filepath.to_path_buf(),
                    message: format!("{e}"),
                })?;
        let rows = reader
            .into_deserialize::<VehicleTypeRow>()
            .map(|r| {
                r.map_err(|e| DataError::CatalogReadError {
                    filepath: filepath.to_path_buf(),
                    message: format!("failure reading catalog row: {e}"),
                })
            })
            .collect::<Result<Vec<VehicleTypeRow>, DataError>>()?;
        Ok(VehicleTypeCatalog::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<VehicleTypeRow>) -> VehicleTypeCatalog {
        let ids = rows.iter().map(|r| r.id.clone()).collect();
        VehicleTypeCatalog { rows, ids }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_xml(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push_str("<additional>\n");
        for row in &self.rows {
            out.push_str(&format!(
                "\t<vType id=\"{}\" vClass=\"{}\" length=\"{}\" accel=\"{}\" decel=\"{}\" maxSpeed=\"{}\" personCapacity=\"{}\"/>\n",
                escape_attr(&row.id),
                escape_attr(&row.vclass),
                row.length,
                row.accel,
                row.decel,
                row.max_speed,
                row.person_capacity
            ));
        }
        out.push_str("</additional>\n");
        out
    }
}

impl VehicleCatalog for VehicleTypeCatalog {
    fn contains(&self, vehicle_id: &str) -> bool {
        self.ids.contains(vehicle_id)
    }

    fn export(&self, path: &Path) -> Result<(), DataError> {
        fs::write(path, self.to_xml()).map_err(|e| DataError::ExportIoError {
            filepath: PathBuf::from(path),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn catalog() -> VehicleTypeCatalog {
        VehicleTypeCatalog::from_rows(vec![
            VehicleTypeRow {
                id: String::from("bus42"),
                vclass: String::from("bus"),
                length: 12.0,
                accel: 1.2,
                decel: 4.0,
                max_speed: 20.0,
                person_capacity: 55,
            },
            VehicleTypeRow {
                id: String::from("shuttle7"),
                vclass: String::from("bus"),
                length: 8.0,
                accel: 1.5,
                decel: 4.5,
                max_speed: 25.0,
                person_capacity: 20,
            },
        ])
    }

    #[test]
    fn test_membership() {
        let catalog = catalog();
        assert!(catalog.contains("bus42"));
        assert!(catalog.contains("shuttle7"));
        assert!(!catalog.contains("ghost99"));
    }

    #[test]
    fn test_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("fleetA.csv");
        let mut f = std::fs::File::create(&filepath).unwrap();
        writeln!(f, "id,vclass,length,accel,decel,max_speed,person_capacity").unwrap();
        writeln!(f, "bus42,bus,12.0,1.2,4.0,20.0,55").unwrap();
        drop(f);

        let catalog = VehicleTypeCatalog::from_csv(&filepath).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("bus42"));
    }

    #[test]
    fn test_export_writes_vtypes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("vehicle.add.xml");
        catalog().export(&out).unwrap();
        let xml = std::fs::read_to_string(&out).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<additional>"));
        assert!(xml.contains("<vType id=\"bus42\" vClass=\"bus\" length=\"12\" accel=\"1.2\""));
        assert!(xml.contains("personCapacity=\"20\""));
        assert!(xml.trim_end().ends_with("</additional>"));
    }
}
