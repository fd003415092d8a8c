use crate::compile::time_ops::InvalidTimeEncoding;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("failed parsing route document '{}': {message}", .filepath.display())]
    ParseError { filepath: PathBuf, message: String },
    #[error("vehicle element without an 'id' attribute in '{}'", .0.display())]
    MissingVehicleId(PathBuf),
    #[error(transparent)]
    InvalidTime(#[from] InvalidTimeEncoding),
    #[error("failure reading '{}': {source}", .filepath.display())]
    ReadError {
        filepath: PathBuf,
        source: std::io::Error,
    },
    #[error("failure writing '{}': {source}", .filepath.display())]
    WriteError {
        filepath: PathBuf,
        source: std::io::Error,
    },
}
