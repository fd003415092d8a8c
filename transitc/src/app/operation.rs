//! compilation entry points for the transitc command line tool. the model
//! files consumed here are the JSON parse trees produced by the DSL grammar
//! front end.
use super::CompilerSettings;
use crate::compile::SimulationCompiler;
use crate::filter::{filter_ops, FilterModel};
use crate::model::SimulationModel;
use clap::Subcommand;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Subcommand)]
pub enum TransitcOperation {
    /// compile a transit-simulation model into per-simulation SUMO bundles
    Compile {
        /// parsed model file (JSON tree of imports and simulation blocks)
        #[arg(long)]
        model_file: String,
        /// optional TOML settings file (data_path, export_path, gui_settings_file)
        #[arg(long)]
        config_file: Option<String>,
        /// overrides the settings' data path
        #[arg(long)]
        data_path: Option<String>,
        /// overrides the settings' export path
        #[arg(long)]
        export_path: Option<String>,
        /// overrides the settings' GUI settings file
        #[arg(long)]
        gui_settings_file: Option<String>,
    },
    /// filter pre-existing route files by vehicle policy and emit a run configuration
    FilterRoutes {
        /// parsed filter model file (JSON tree of time window and route policies)
        #[arg(long)]
        model_file: String,
        /// directory holding the route files the model names
        #[arg(long, default_value_t = String::from("."))]
        routes_dir: String,
        #[arg(long, default_value_t = String::from("DSL_OUTPUT"))]
        output_dir: String,
        /// network file the generated configuration references
        #[arg(long)]
        network_file: String,
        /// additional file reference for the generated configuration; repeatable
        #[arg(long)]
        additional_file: Vec<String>,
        #[arg(long, default_value_t = String::from("gui.view.xml"))]
        gui_settings_file: String,
    },
}

impl TransitcOperation {
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        match self {
            TransitcOperation::Compile {
                model_file,
                config_file,
                data_path,
                export_path,
                gui_settings_file,
            } => {
                let mut settings = CompilerSettings::load(config_file.as_deref())?;
                if let Some(data_path) = data_path {
                    settings.data_path = data_path.clone();
                }
                if let Some(export_path) = export_path {
                    settings.export_path = export_path.clone();
                }
                if let Some(gui_settings_file) = gui_settings_file {
                    settings.gui_settings_file = gui_settings_file.clone();
                }
                let model = SimulationModel::from_file(Path::new(model_file))?;
                let data_path = PathBuf::from(&settings.data_path);
                let gui_settings_path = data_path.join(&settings.gui_settings_file);
                let compiler = SimulationCompiler::new(
                    data_path,
                    PathBuf::from(&settings.export_path),
                    gui_settings_path,
                );
                compiler.compile(&model)?;
                Ok(())
            }
            TransitcOperation::FilterRoutes {
                model_file,
                routes_dir,
                output_dir,
                network_file,
                additional_file,
                gui_settings_file,
            } => {
                let model = FilterModel::from_file(Path::new(model_file))?;
                let filtered = filter_ops::run(
                    &model,
                    Path::new(routes_dir),
                    Path::new(output_dir),
                    network_file,
                    additional_file,
                    gui_settings_file,
                )?;
                log::info!("filtered {} route files into {output_dir}", filtered.len());
                Ok(())
            }
        }
    }
}
