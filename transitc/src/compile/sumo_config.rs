use super::CompileError;
use std::fs;
use std::path::{Path, PathBuf};

/// vehicles unable to move for this many simulated seconds are teleported
/// past their obstruction; fixed for every generated configuration.
pub const TIME_TO_TELEPORT_SECONDS: u32 = 150;

const SCHEMA_HEADER: &str = "<configuration xmlns:xsi=\"http://www.w3.org\
/2001/XMLSchema-instance\" xsi:noNamespaceSchema\
Location=\"http://sumo.dlr.de/xsd/sumoConfiguration.xsd\">\n";

/// the run-configuration descriptor: the top-level `.sumocfg` document
/// telling the simulator which artifacts to load and over what time window.
/// the byte layout matches what the downstream simulator tooling has always
/// consumed; all time values are absolute seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumoConfig {
    pub net_file: String,
    pub route_files: Vec<String>,
    pub additional_files: Vec<String>,
    pub begin_seconds: u32,
    pub end_seconds: u32,
    pub netstate_dump: String,
    pub gui_settings_file: String,
}

impl SumoConfig {
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(SCHEMA_HEADER);
        out.push_str("\t<input>\n");
        out.push_str(&format!("\t\t<net-file value=\"{}\"/>\n", self.net_file));
        out.push_str(&format!(
            "\t\t<route-files value=\"{}\"/>\n",
            self.route_files.join(",")
        ));
        out.push_str(&format!(
            "\t\t<additional-files value=\"{}\"/>\n",
            self.additional_files.join(",")
        ));
        out.push_str("\t</input>\n");
        out.push_str("\t<time>\n");
        out.push_str(&format!("\t\t<begin value=\"{}\"/>\n", self.begin_seconds));
        out.push_str(&format!("\t\t<end value=\"{}\"/>\n", self.end_seconds));
        out.push_str(&format!(
            "\t\t<time-to-teleport value=\"{TIME_TO_TELEPORT_SECONDS}\" />\n"
        ));
        out.push_str("\t</time>\n");
        out.push_str("\t<processing>\n\t\t<ignore-route-errors value=\"true\"/>\n\t</processing>\n");
        out.push_str("\t<output>\n");
        out.push_str(&format!(
            "\t\t<netstate-dump value=\"{}\"/>\n",
            self.netstate_dump
        ));
        out.push_str("\t</output>\n");
        out.push_str("\t<gui_only>\n");
        out.push_str(&format!(
            "\t\t<gui-settings-file value=\"{}\"/>\n",
            self.gui_settings_file
        ));
        out.push_str("\t</gui_only>\n</configuration>\n");
        out
    }

    pub fn write(&self, path: &Path) -> Result<(), CompileError> {
        fs::write(path, self.to_xml()).map_err(|e| CompileError::IoError {
            filepath: PathBuf::from(path),
            source: e,
        })
    }
}
