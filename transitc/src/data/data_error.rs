use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("failed reading GTFS feed '{name}': {source}")]
    FeedReadError {
        name: String,
        source: gtfs_structures::Error,
    },
    #[error("failed reading vehicle catalog '{}': {message}", .filepath.display())]
    CatalogReadError { filepath: PathBuf, message: String },
    #[error("failed reading travel demand '{}': {source}", .filepath.display())]
    DemandReadError {
        filepath: PathBuf,
        source: std::io::Error,
    },
    #[error("failed parsing route document '{}': {message}", .filepath.display())]
    RouteParseError { filepath: PathBuf, message: String },
    #[error("failure writing '{}': {source}", .filepath.display())]
    ExportIoError {
        filepath: PathBuf,
        source: std::io::Error,
    },
}
