use super::CompileError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// the named artifact set of one simulation run: every file lives under a
/// per-config-number directory `Simulation_<n>/` beneath the export root.
/// file names are bare (directory-relative) because that is how the run
/// configuration references them; `*_path` accessors give the full paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub directory: PathBuf,
    pub raw_route_file: String,
    pub final_route_file: String,
    pub stop_file: String,
    pub vehicle_file: String,
    pub dump_file: String,
    pub config_file: String,
    pub edge_dump_file: Option<String>,
    edge_dump_frequency: Option<u32>,
    edge_mean_file: String,
}

impl ArtifactPlan {
    pub fn new(export_path: &Path, config_num: u32, frequency: Option<u32>) -> ArtifactPlan {
        let stem = format!("Simulation_{config_num}");
        ArtifactPlan {
            directory: export_path.join(&stem),
            raw_route_file: format!("{stem}_raw_routefile.xml"),
            final_route_file: format!("{stem}_final_routefile.xml"),
            stop_file: format!("{stem}_stopfile.add.xml"),
            vehicle_file: format!("{stem}_vehicle.add.xml"),
            dump_file: format!("{stem}_dump.xml"),
            config_file: format!("{stem}_config.sumocfg"),
            edge_dump_file: frequency.map(|_| format!("{stem}.edge.dump.add.xml")),
            edge_dump_frequency: frequency,
            edge_mean_file: format!("{stem}_EdgeMean.xml"),
        }
    }

    pub fn raw_route_path(&self) -> PathBuf {
        self.directory.join(&self.raw_route_file)
    }

    pub fn final_route_path(&self) -> PathBuf {
        self.directory.join(&self.final_route_file)
    }

    pub fn stop_path(&self) -> PathBuf {
        self.directory.join(&self.stop_file)
    }

    pub fn vehicle_path(&self) -> PathBuf {
        self.directory.join(&self.vehicle_file)
    }

    pub fn config_path(&self) -> PathBuf {
        self.directory.join(&self.config_file)
    }

    /// removes any previous run's directory for this config number and
    /// recreates it empty. compilation is never incremental; stale artifacts
    /// are always discarded.
    pub fn prepare_directory(&self) -> Result<(), CompileError> {
        match fs::remove_dir_all(&self.directory) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(CompileError::IoError {
                    filepath: self.directory.clone(),
                    source: e,
                })
            }
        }
        fs::create_dir_all(&self.directory).map_err(|e| CompileError::IoError {
            filepath: self.directory.clone(),
            source: e,
        })
    }

    /// materializes the edge-telemetry descriptor when a sampling frequency
    /// was declared. this is the one artifact the planner writes itself.
    pub fn write_edge_dump_descriptor(&self) -> Result<(), CompileError> {
        let (filename, frequency) = match (&self.edge_dump_file, self.edge_dump_frequency) {
            (Some(filename), Some(frequency)) => (filename, frequency),
            _ => return Ok(()),
        };
        let contents = format!(
            "<additional>\n\t<edgeData id=\"msmid\" freq=\"{frequency}\" file=\"{}\" />\n</additional>\n",
            self.edge_mean_file
        );
        let filepath = self.directory.join(filename);
        fs::write(&filepath, contents).map_err(|e| CompileError::IoError {
            filepath,
            source: e,
        })
    }
}
