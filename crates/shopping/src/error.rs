use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("invalid timestamp format `{format}`: {reason}")]
    TimestampFormat { format: String, reason: String },

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
