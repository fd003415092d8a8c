use super::{filter_route_document, FilterError, FilterMode, FilterModel, VehiclePolicy};
use crate::compile::time_ops::hhmm_to_seconds;
use crate::compile::SumoConfig;
use std::fs;
use std::path::Path;

/// the netstate dump name the variant configuration references; the
/// simulator writes it during the run.
pub const TRAJECTORY_DUMP_FILE: &str = "Trajectory_Output.xml";

pub const FILTER_CONFIG_FILE: &str = "filtered_config.sumocfg";

/// one processed route file: the explicit source-to-output mapping carried
/// into config generation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRoute {
    pub source: String,
    pub output: String,
}

impl From<&super::RouteFilterSpec> for VehiclePolicy {
    fn from(spec: &super::RouteFilterSpec) -> VehiclePolicy {
        let ids = || spec.vehicles.iter().cloned().collect();
        match spec.how {
            FilterMode::Include => VehiclePolicy::Include(ids()),
            FilterMode::Exclude => VehiclePolicy::Exclude(ids()),
            FilterMode::All => VehiclePolicy::All,
        }
    }
}

/// filters every route file the model names and emits the variant run
/// configuration referencing the filtered copies. outputs are numbered in
/// declaration order; the returned mapping is the authority on which source
/// produced which output.
pub fn run(
    model: &FilterModel,
    routes_dir: &Path,
    output_dir: &Path,
    net_file: &str,
    additional_files: &[String],
    gui_settings_file: &str,
) -> Result<Vec<FilteredRoute>, FilterError> {
    let begin_seconds = hhmm_to_seconds(model.time_start)?;
    let end_seconds = hhmm_to_seconds(model.time_end)?;

    fs::create_dir_all(output_dir).map_err(|e| FilterError::WriteError {
        filepath: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut filtered = Vec::with_capacity(model.routes.len());
    for (index, spec) in model.routes.iter().enumerate() {
        let source_path = routes_dir.join(&spec.route_file);
        let document =
            fs::read_to_string(&source_path).map_err(|e| FilterError::ReadError {
                filepath: source_path.clone(),
                source: e,
            })?;
        let policy = VehiclePolicy::from(spec);
        let output_document = filter_route_document(&document, &policy, &source_path)?;
        let output = format!("output_{index}.xml");
        let output_path = output_dir.join(&output);
        fs::write(&output_path, output_document).map_err(|e| FilterError::WriteError {
            filepath: output_path,
            source: e,
        })?;
        log::info!(
            "filtered '{}' ({:?}) into '{output}'",
            spec.route_file,
            spec.how
        );
        filtered.push(FilteredRoute {
            source: spec.route_file.clone(),
            output,
        });
    }

    let config = SumoConfig {
        net_file: String::from(net_file),
        route_files: filtered.iter().map(|r| r.output.clone()).collect(),
        additional_files: additional_files.to_vec(),
        begin_seconds,
        end_seconds,
        netstate_dump: String::from(TRAJECTORY_DUMP_FILE),
        gui_settings_file: String::from(gui_settings_file),
    };
    let config_path = output_dir.join(FILTER_CONFIG_FILE);
    fs::write(&config_path, config.to_xml()).map_err(|e| FilterError::WriteError {
        filepath: config_path,
        source: e,
    })?;
    Ok(filtered)
}
