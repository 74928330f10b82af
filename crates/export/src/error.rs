use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize CSV output: {0}")]
    SerializationFailure(#[from] csv::Error),

    #[error("Failed to write CSV output: {0}")]
    Io(#[from] std::io::Error),
}
