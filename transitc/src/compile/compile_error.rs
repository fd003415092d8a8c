use super::time_ops::InvalidTimeEncoding;
use crate::data::DataError;
use crate::model::ModelError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("invalid import: '{0}'")]
    UnrecognizedImport(String),
    #[error("imported network file does not exist: {}", .0.display())]
    MissingNetworkFile(PathBuf),
    #[error("simulation requires a '{0}.' import but none was declared")]
    MissingImport(&'static str),
    #[error("'{0}' is not a valid vehicle id")]
    UnknownVehicle(String),
    #[error(transparent)]
    InvalidTime(#[from] InvalidTimeEncoding),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("failure writing '{}': {source}", .filepath.display())]
    IoError {
        filepath: PathBuf,
        source: std::io::Error,
    },
}
