use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// the parsed tree of the lightweight filter DSL: a time window plus one
/// policy per route file. field names follow the grammar front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterModel {
    #[serde(rename = "timeStart")]
    pub time_start: u32,
    #[serde(rename = "timeEnd")]
    pub time_end: u32,
    #[serde(rename = "routeSet", default)]
    pub routes: Vec<RouteFilterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFilterSpec {
    #[serde(rename = "routeFileName")]
    pub route_file: String,
    pub how: FilterMode,
    #[serde(rename = "vehicleSet", default)]
    pub vehicles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterMode {
    Include,
    Exclude,
    All,
}

impl FilterModel {
    pub fn from_file(path: &Path) -> Result<FilterModel, ModelError> {
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
