// pertmap/src/structure/errors.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Unknown reference structure name: {0}")]
    UnknownName(String),
    #[error("Radius {radius} km is outside the structure range [{min}, {max}] km")]
    OutOfRange { radius: f64, min: f64, max: f64 },
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid structure nodes: {0}")]
    InvalidNodes(String),
}
