#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("failed reading model file '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed parsing model file '{filepath}': {source}")]
    ParseError {
        filepath: String,
        source: serde_json::Error,
    },
}
