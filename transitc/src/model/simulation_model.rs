use super::ModelError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// the parsed-model tree handed to the compiler. the grammar front end that
/// turns DSL source text into this tree is a separate tool; it hands the tree
/// over as a JSON document which these types deserialize. field names follow
/// the front end's naming, not Rust convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationModel {
    #[serde(default)]
    pub imports: Vec<ImportDeclaration>,
    #[serde(default)]
    pub simulations: Vec<SimulationBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDeclaration {
    #[serde(rename = "importName")]
    pub import_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationBlock {
    /// namespace for the run; also the file-name stem of every artifact
    #[serde(rename = "configNum")]
    pub config_num: u32,
    /// simulation window start, HHMM-encoded clock time
    #[serde(rename = "timeStart")]
    pub time_start: u32,
    /// simulation window end, HHMM-encoded clock time
    #[serde(rename = "timeEnd")]
    pub time_end: u32,
    /// opaque schedule reference, interpreted by the feed binding
    pub schedule: String,
    #[serde(default)]
    pub assignments: Vec<VehicleAssignment>,
    /// edge-telemetry sampling interval; absent disables edge telemetry
    #[serde(default)]
    pub frequency: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAssignment {
    #[serde(rename = "vehicleid")]
    pub vehicle_id: String,
    #[serde(rename = "tripid", default)]
    pub trip_id: Option<String>,
    #[serde(rename = "blockid", default)]
    pub block_id: Option<String>,
}

impl SimulationModel {
    pub fn from_file(path: &Path) -> Result<SimulationModel, ModelError> {
        let filepath = path.to_string_lossy().to_string();
        let file = File::open(path).map_err(|e| ModelError::ReadError {
            filepath: filepath.clone(),
            source: e,
        })?;
        let model = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ModelError::ParseError {
                filepath,
                source: e,
            })?;
        Ok(model)
    }
}
