use config::Config;
use serde::{Deserialize, Serialize};

/// filesystem layout settings for a compilation run: defaults, overridden by
/// an optional TOML file, overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerSettings {
    /// read-only tree holding feeds, vehicle catalogs, networks, and demand
    pub data_path: String,
    /// root under which per-config-number run directories are created
    pub export_path: String,
    /// GUI settings file referenced by every generated configuration,
    /// relative to the data path
    pub gui_settings_file: String,
}

impl CompilerSettings {
    pub fn load(config_file: Option<&str>) -> Result<CompilerSettings, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("data_path", "../data/")?
            .set_default("export_path", "../SUMO_simulation/")?
            .set_default("gui_settings_file", "gui.view.xml")?;
        if let Some(filepath) = config_file {
            builder = builder.add_source(config::File::new(filepath, config::FileFormat::Toml));
        }
        builder.build()?.try_deserialize()
    }
}
