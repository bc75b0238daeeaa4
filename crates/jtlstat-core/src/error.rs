use std::path::PathBuf;

/// Failure while turning the rows of one result file into [`Record`]s.
///
/// Every variant is fatal for the file it came from; other files in the same
/// batch are unaffected.
///
/// [`Record`]: crate::jtl::Record
#[derive(Debug, thiserror::Error)]
pub enum JtlError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: no value for `{field}`")]
    MissingField { line: u64, field: &'static str },

    #[error("line {line}: `{column}` is not an integer: {value:?}")]
    InvalidInteger {
        line: u64,
        column: String,
        value: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum JtlStatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Parse error in {}: {source}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: JtlError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
